//! Reversible-Logic Circuit Compiler and Simulator
//!
//! This crate provides a small compiler that lowers high-level reversible
//! gates (NOT, CNOT, TOFFOLI) into a single primitive conditional-swap
//! operation, together with a circuit engine that executes those primitives
//! over a composite multi-qubit state and reads out measured bits.
//!
//! The state representation is a density matrix over all accreted qubits, so
//! memory grows as 4^n with the qubit count. This is a deliberate, accepted
//! limit: the engine targets small pedagogical circuits, not scalable
//! simulation.

pub mod compiler;
pub mod engine;
pub mod error;

// Create a prelude module for convenient imports
pub mod prelude {
    pub use crate::compiler::{compile, compile_records, Gate, GateRecord, Instruction};
    pub use crate::engine::{CircuitEngine, CompositeState, SingleQubit};
    pub use crate::error::{CompileError, EngineError};
}

// Version and crate information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
