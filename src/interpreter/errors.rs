//! Runtime error types for the TAC interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can
//! occur while executing a TAC sequence (as opposed to syntax or internal
//! errors raised while producing it).
//!
//! All runtime errors are fatal: they halt execution, but the snapshots
//! recorded up to that point stay available for inspection.

use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Read of a variable or temp that was never written
    #[error("Read of unbound '{name}' at instruction {pc}")]
    UnboundVariable { name: String, pc: usize },

    /// Literal text that is not an integer
    #[error("Invalid integer literal '{text}' at instruction {pc}")]
    InvalidLiteral { text: String, pc: usize },

    /// Operand of the wrong sort, e.g. a label used as a value
    #[error("Invalid operand '{operand}' at instruction {pc}")]
    InvalidOperand { operand: String, pc: usize },

    /// Required operand field is empty
    #[error("Missing operand for '{op}' at instruction {pc}")]
    MissingOperand { op: &'static str, pc: usize },

    /// Jump to a label that is never marked
    #[error("Jump to unknown label '{label}' at instruction {pc}")]
    UnknownLabel { label: String, pc: usize },

    /// Same label marked twice
    #[error("Label '{label}' is marked more than once")]
    DuplicateLabel { label: String },

    /// Division by zero
    #[error("Division by zero at instruction {pc}")]
    DivisionByZero { pc: usize },

    /// Integer overflow in arithmetic operation
    #[error("Integer overflow in '{operation}' at instruction {pc}")]
    IntegerOverflow { operation: String, pc: usize },

    /// Snapshot history limit exceeded
    #[error("Snapshot limit of {limit} exceeded")]
    SnapshotLimitExceeded { limit: usize },

    /// History navigation past either end
    #[error("{message}")]
    HistoryBoundary { message: String },
}

impl RuntimeError {
    /// The instruction index the error happened at, if it has one.
    pub fn pc(&self) -> Option<usize> {
        match self {
            RuntimeError::UnboundVariable { pc, .. }
            | RuntimeError::InvalidLiteral { pc, .. }
            | RuntimeError::InvalidOperand { pc, .. }
            | RuntimeError::MissingOperand { pc, .. }
            | RuntimeError::UnknownLabel { pc, .. }
            | RuntimeError::DivisionByZero { pc }
            | RuntimeError::IntegerOverflow { pc, .. } => Some(*pc),
            RuntimeError::DuplicateLabel { .. }
            | RuntimeError::SnapshotLimitExceeded { .. }
            | RuntimeError::HistoryBoundary { .. } => None,
        }
    }
}
