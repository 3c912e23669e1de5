// src/compiler/mod.rs
//! Gate compiler
//!
//! This module lowers high-level reversible gate descriptors into the
//! engine's sole primitive, the FLOW instruction (a conditional swap).
//! Compilation is pure and stateless: it has no dependency on the engine and
//! performs no index validation against a qubit count, which is deferred to
//! execution time.

pub mod gate;
pub mod program;

pub use gate::{load_gate_list, Gate, GateRecord};
pub use program::{compile, compile_records, load_program, save_program, Instruction};
