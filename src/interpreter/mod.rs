//! TAC execution engine
//!
//! This module provides the logic for running generated three-address code:
//! - [`engine`]: [`Interpreter`](engine::Interpreter), which executes a TAC sequence
//! - [`errors`]: Runtime error types
//!
//! # Execution Model
//!
//! Values are 64-bit signed integers. Source variables and temps live in one
//! binding table; labels are resolved to instruction indices up front. A
//! [`Snapshot`](crate::snapshot::Snapshot) is taken before every instruction
//! and once more when execution stops, so the whole run can be stepped
//! through backward and forward afterwards.

pub mod engine;
pub mod errors;
