// src/compiler/gate.rs
//! Reversible gate descriptors and their on-disk record form
//!
//! A gate list on disk is a JSON array of records, each carrying a string
//! tag and the integer fields appropriate to that tag:
//!
//! ```text
//! {"op":"NOT",  "target":1}
//! {"op":"CNOT", "control":0, "target":1}
//! {"op":"TOFF", "c1":0, "c2":1, "target":2}
//! ```
//!
//! Tags are matched case-insensitively. [`GateRecord`] is the serde view of
//! one such record; [`Gate`] is the typed descriptor the compiler consumes.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CompileError;

/// Raw record form of a gate, as read from a program file.
///
/// All index fields are optional at this level; [`Gate::from_record`]
/// checks that the fields required by the tag are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateRecord {
    /// Gate tag: `"NOT"`, `"CNOT"` or `"TOFF"`, in any case.
    pub op: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c1: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c2: Option<usize>,
}

/// A typed reversible gate descriptor.
///
/// Indices refer to positions in the engine's qubit ordering. Qubit 0 is
/// reserved as a permanently-|0⟩ control line in the compiled form, so a
/// NOT may not target it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Flip the value of `target`. Compiles against the reserved |0⟩
    /// control on qubit 0 and the adjacent line `target + 1`.
    Not { target: usize },

    /// Flip `target` conditioned on `control`'s value.
    Cnot { control: usize, target: usize },

    /// Flip `target` conditioned on both `c1` and `c2`.
    Toffoli { c1: usize, c2: usize, target: usize },
}

impl Gate {
    /// Recognize a raw record as a typed gate.
    ///
    /// Fails with [`CompileError::UnsupportedGate`] for an unknown tag and
    /// [`CompileError::InvalidGate`] when a required field is missing.
    pub fn from_record(record: &GateRecord) -> Result<Self, CompileError> {
        let op = record.op.to_ascii_uppercase();
        match op.as_str() {
            "NOT" => Ok(Gate::Not {
                target: require(record.target, &op, "target")?,
            }),
            "CNOT" => Ok(Gate::Cnot {
                control: require(record.control, &op, "control")?,
                target: require(record.target, &op, "target")?,
            }),
            "TOFF" => Ok(Gate::Toffoli {
                c1: require(record.c1, &op, "c1")?,
                c2: require(record.c2, &op, "c2")?,
                target: require(record.target, &op, "target")?,
            }),
            _ => Err(CompileError::UnsupportedGate(record.op.clone())),
        }
    }

    /// The record form of this gate, suitable for writing back to a file.
    pub fn to_record(&self) -> GateRecord {
        match *self {
            Gate::Not { target } => GateRecord {
                op: "NOT".to_string(),
                target: Some(target),
                ..GateRecord::default()
            },
            Gate::Cnot { control, target } => GateRecord {
                op: "CNOT".to_string(),
                control: Some(control),
                target: Some(target),
                ..GateRecord::default()
            },
            Gate::Toffoli { c1, c2, target } => GateRecord {
                op: "TOFF".to_string(),
                c1: Some(c1),
                c2: Some(c2),
                target: Some(target),
                ..GateRecord::default()
            },
        }
    }
}

fn require(field: Option<usize>, op: &str, name: &str) -> Result<usize, CompileError> {
    field.ok_or_else(|| CompileError::InvalidGate(format!("{} gate is missing field `{}`", op, name)))
}

/// Load a JSON gate list from disk.
pub fn load_gate_list<P: AsRef<Path>>(path: P) -> Result<Vec<GateRecord>, CompileError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
