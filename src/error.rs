// src/error.rs
//! Error taxonomy for the compiler and the circuit engine
//!
//! All errors are raised synchronously at the point of violation; nothing in
//! this crate retries. The compiler and engine propagate errors unmodified to
//! the immediate caller, which is responsible for any user-facing rendering.

use thiserror::Error;

/// Errors produced while translating a gate list into FLOW instructions.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A recognized gate carried an unusable field, e.g. a NOT targeting
    /// qubit 0 (reserved as the always-|0⟩ control line) or a missing index.
    #[error("invalid gate: {0}")]
    InvalidGate(String),

    /// The gate tag is not one of NOT, CNOT, TOFF.
    #[error("unsupported gate {0}")]
    UnsupportedGate(String),

    /// A gate list or compiled program file could not be read.
    #[error("failed to read program file: {0}")]
    Io(#[from] std::io::Error),

    /// A gate list or compiled program file was not well-formed JSON.
    #[error("malformed program file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors produced by the circuit engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// An accreted state was not a valid single-qubit object, or a matrix
    /// did not have the dimensions the operation requires.
    #[error("dimension mismatch: {0}")]
    Dimension(String),

    /// A FLOW instruction's indices were out of bounds or not strictly
    /// ordered. The engine requires ctrl < t1 < t2 < qubit count.
    #[error("flow indices ({ctrl}, {t1}, {t2}) must satisfy ctrl < t1 < t2 < {qubit_count}")]
    Range {
        ctrl: usize,
        t1: usize,
        t2: usize,
        qubit_count: usize,
    },

    /// A qubit index passed to a read-out routine does not exist.
    #[error("qubit index {index} out of range for {qubit_count}-qubit state")]
    Index { index: usize, qubit_count: usize },

    /// The engine is unseeded: no qubit has been accreted yet.
    #[error("no state loaded: accrete at least one qubit first")]
    NoState,
}
