//! # Introduction
//!
//! minic is a small compiler front end for a tiny C subset: a single
//! `int main(...)` function with integer declarations, assignments,
//! arithmetic, comparisons, `if` statements and `return`. Source text is
//! tokenized, parsed by an LL(1) recursive-descent parser into a syntax tree,
//! and lowered to three-address code (TAC). The TAC can then be executed and
//! the run stepped through forward and backward in a terminal UI.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → TacGenerator → TAC → Interpreter → Snapshots → TUI
//! ```
//!
//! 1. [`parser`]: tokenises the source (or reads a JSON token file) and builds
//!    an [`parser::ast::Node`] tree.
//! 2. [`tac`]: lowers the tree to a flat [`tac::TacInstruction`] sequence.
//! 3. [`driver`]: runs both stages in one call.
//! 4. [`interpreter`]: executes TAC over 64-bit integers, capturing a
//!    [`snapshot::Snapshot`] before every instruction.
//! 5. [`ui`]: ratatui-based viewer over the snapshot history; not part of the
//!    stable library API.
//!
//! ## Example
//!
//! ```
//! use minic::driver::compile;
//! use minic::tac::GeneratorConfig;
//!
//! let unit = compile("int main(int a) { int b; b = a + 2; return b; }", GeneratorConfig::default())?;
//! let tac: Vec<String> = unit.instructions.iter().map(|i| i.to_string()).collect();
//! assert_eq!(tac, ["t0 = a + 2", "b = t0", "RETURN b"]);
//! # Ok::<(), minic::driver::CompileError>(())
//! ```

pub mod driver;
pub mod interpreter;
pub mod parser;
pub mod snapshot;
pub mod tac;
pub mod ui;
