// src/engine/mod.rs
//! Circuit engine
//!
//! The engine owns a growable composite state over qubits, applies FLOW
//! instructions as permutation transforms, and exposes measurement and
//! diagnostic read-outs. It depends only on the shape of the primitive
//! instruction, never on the compiler.

pub mod circuit;
pub mod qubit;
pub mod state;

pub use circuit::{flow_operator, CircuitEngine};
pub use qubit::SingleQubit;
pub use state::CompositeState;
