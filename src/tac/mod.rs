//! Three-address code (TAC) intermediate representation
//!
//! - [`instruction`]: [`TacInstruction`], [`Opcode`] and [`Operand`]
//! - [`generator`]: [`TacGenerator`], the AST → TAC lowering pass
//!
//! # Lowering Model
//!
//! The generator owns its instruction vector and a name counter. Temps
//! (`tN`) hold intermediate values and labels (`LN`) mark jump targets; both
//! come from one counter unless [`CounterScheme::Split`] is configured.
//! Instruction order is control-flow order and never changes after emission.

pub mod generator;
pub mod instruction;

pub use generator::{
    CounterScheme, GeneratorConfig, InternalError, TacGenerator, MAX_LOWERING_DEPTH,
};
pub use instruction::{Opcode, Operand, TacInstruction};
