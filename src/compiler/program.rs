// src/compiler/program.rs
//! FLOW instructions and the lowering pass
//!
//! The engine executes exactly one primitive: the FLOW instruction
//! `(ctrl, t1, t2)`, a conditional swap of the states at `t1` and `t2` that
//! fires iff the qubit at `ctrl` holds logical 0. [`compile`] lowers each
//! high-level gate to one or three FLOW instructions.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;

use super::gate::{Gate, GateRecord};

/// A primitive instruction, serialized as
/// `{"op":"FLOW","ctrl":..,"t1":..,"t2":..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Instruction {
    /// Swap the states at `t1` and `t2` iff the qubit at `ctrl` is |0⟩.
    #[serde(rename = "FLOW")]
    Flow { ctrl: usize, t1: usize, t2: usize },
}

impl Instruction {
    fn flow(ctrl: usize, t1: usize, t2: usize) -> Self {
        Instruction::Flow { ctrl, t1, t2 }
    }
}

/// Lower a gate list into an ordered FLOW program.
///
/// - `NOT(t)` becomes `FLOW(0, t, t+1)`: a swap against the reserved |0⟩
///   control on qubit 0 and the adjacent ancilla line. `t` must be ≥ 1, and
///   the caller must make sure qubit `t + 1` exists before execution.
/// - `CNOT(c, t)` becomes `FLOW(c, c, t)`: the control doubles as one of
///   the swapped positions.
/// - `TOFFOLI(c1, c2, t)` becomes the three-step controlled-swap
///   decomposition `FLOW(c1, c2, t)`, `FLOW(c2, c1, t)`, `FLOW(c1, c2, t)`,
///   in exactly that order.
///
/// No index validation against a qubit count happens here; that is the
/// engine's job at execution time.
pub fn compile(gates: &[Gate]) -> Result<Vec<Instruction>, CompileError> {
    let mut program = Vec::new();
    for gate in gates {
        match *gate {
            Gate::Not { target } => {
                if target == 0 {
                    return Err(CompileError::InvalidGate(
                        "NOT target cannot be 0: qubit 0 is reserved as the |0⟩ control line"
                            .to_string(),
                    ));
                }
                program.push(Instruction::flow(0, target, target + 1));
            }
            Gate::Cnot { control, target } => {
                program.push(Instruction::flow(control, control, target));
            }
            Gate::Toffoli { c1, c2, target } => {
                // Decompose the doubly-controlled flip into controlled
                // swaps, using c1 as control on (c2, target).
                program.push(Instruction::flow(c1, c2, target));
                program.push(Instruction::flow(c2, c1, target));
                program.push(Instruction::flow(c1, c2, target));
            }
        }
    }
    Ok(program)
}

/// Lower a list of raw gate records, as produced by
/// [`load_gate_list`](super::gate::load_gate_list).
///
/// Fails on the first unrecognized or malformed record without emitting any
/// partial program.
pub fn compile_records(records: &[GateRecord]) -> Result<Vec<Instruction>, CompileError> {
    let gates = records
        .iter()
        .map(Gate::from_record)
        .collect::<Result<Vec<_>, _>>()?;
    compile(&gates)
}

/// Load a compiled FLOW program from disk.
pub fn load_program<P: AsRef<Path>>(path: P) -> Result<Vec<Instruction>, CompileError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Persist a compiled FLOW program for reuse across runs.
pub fn save_program<P: AsRef<Path>>(path: P, program: &[Instruction]) -> Result<(), CompileError> {
    let writer = BufWriter::new(File::create(path)?);
    Ok(serde_json::to_writer_pretty(writer, program)?)
}
