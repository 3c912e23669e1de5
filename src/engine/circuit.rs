// src/engine/circuit.rs
//! The circuit engine: accretion, FLOW application and read-out
//!
//! The engine has two states. UNSEEDED (zero qubits, no composite state)
//! becomes SEEDED through the first accretion; apply, measure and the
//! diagnostics all require SEEDED and fail with a no-state error otherwise.
//! There is no teardown: the caller discards the engine when done.

use ndarray::Array2;
use num_complex::Complex64;

use crate::compiler::Instruction;
use crate::error::EngineError;

use super::qubit::SingleQubit;
use super::state::CompositeState;

/// Build the 2^n × 2^n permutation operator for one FLOW instruction:
/// swap bits `t1` and `t2` of the basis index whenever bit `ctrl` is 0,
/// identity otherwise. Bits are read MSB-first, so qubit k is bit
/// (n - 1 - k).
///
/// The result is a real 0/1 permutation matrix and is exactly its own
/// conjugate transpose, so applying it twice restores any state.
pub fn flow_operator(n: usize, ctrl: usize, t1: usize, t2: usize) -> Array2<Complex64> {
    let dim = 1 << n;
    let mut operator = Array2::zeros((dim, dim));

    for col in 0..dim {
        let mut bits: Vec<usize> = (0..n).map(|k| (col >> (n - 1 - k)) & 1).collect();
        if bits[ctrl] == 0 {
            bits.swap(t1, t2);
        }
        let mut row = 0;
        for b in bits {
            row = (row << 1) | b;
        }
        operator[[row, col]] = Complex64::new(1.0, 0.0);
    }

    operator
}

/// Owns the composite state and executes compiled FLOW programs over it.
pub struct CircuitEngine {
    qubit_count: usize,
    state: Option<CompositeState>,
}

impl CircuitEngine {
    /// An unseeded engine; the state is built up by accretion.
    pub fn new() -> Self {
        CircuitEngine {
            qubit_count: 0,
            state: None,
        }
    }

    /// An engine seeded with `qubit_count` copies of the default
    /// equal-superposition projector.
    pub fn with_seed(qubit_count: usize) -> Self {
        if qubit_count == 0 {
            return Self::new();
        }
        CircuitEngine {
            qubit_count,
            state: Some(CompositeState::uniform_seed(qubit_count)),
        }
    }

    /// Number of qubits accreted so far.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// The composite state, if the engine is seeded.
    pub fn state(&self) -> Option<&CompositeState> {
        self.state.as_ref()
    }

    /// Tensor a new single-qubit state onto the composite state as the
    /// highest-index qubit. This is the only way the engine grows.
    pub fn accrete(&mut self, qubit: SingleQubit) {
        let incoming: CompositeState = qubit.into();
        self.state = Some(match self.state.take() {
            None => incoming,
            Some(existing) => existing.tensor(&incoming),
        });
        self.qubit_count += 1;
    }

    /// Apply one FLOW instruction to the composite state.
    ///
    /// Requires `ctrl < t1 < t2 < qubit_count`; the qubit count is never
    /// changed by application, so a failed call leaves the engine intact.
    pub fn apply(&mut self, ctrl: usize, t1: usize, t2: usize) -> Result<(), EngineError> {
        let state = self.state.as_mut().ok_or(EngineError::NoState)?;

        if !(ctrl < t1 && t1 < t2 && t2 < state.qubit_count()) {
            return Err(EngineError::Range {
                ctrl,
                t1,
                t2,
                qubit_count: state.qubit_count(),
            });
        }

        let operator = flow_operator(state.qubit_count(), ctrl, t1, t2);
        state.apply_unitary(&operator)
    }

    /// Execute a compiled program, instruction by instruction.
    ///
    /// Fails on the first invalid instruction, leaving the state as mutated
    /// by all prior instructions; there is no rollback.
    pub fn execute(&mut self, program: &[Instruction]) -> Result<(), EngineError> {
        for instruction in program {
            let Instruction::Flow { ctrl, t1, t2 } = *instruction;
            self.apply(ctrl, t1, t2)?;
        }
        Ok(())
    }

    /// Expectation value of σ_z on the reduced state of one qubit:
    /// +1 for logical 0, -1 for logical 1.
    pub fn measure_z(&self, qubit: usize) -> Result<f64, EngineError> {
        let state = self.state.as_ref().ok_or(EngineError::NoState)?;
        if qubit >= state.qubit_count() {
            return Err(EngineError::Index {
                index: qubit,
                qubit_count: state.qubit_count(),
            });
        }

        let reduced = state.reduce(&[qubit])?;
        Ok(reduced.matrix()[[0, 0]].re - reduced.matrix()[[1, 1]].re)
    }

    /// Read every qubit out as a classical bit string.
    ///
    /// Sign convention: a measured value > 0 is reported as '0', anything
    /// else as '1'. Callers rely on this exact convention.
    pub fn read_bits(&self) -> Result<String, EngineError> {
        (0..self.qubit_count)
            .map(|q| self.measure_z(q).map(|z| if z > 0.0 { '0' } else { '1' }))
            .collect()
    }

    /// Pairwise entanglement diagnostic: an n×n symmetric matrix whose
    /// (i, j) entry is the von Neumann entropy of the reduced state over
    /// qubits {i, j}, with a zero diagonal. The state is not modified.
    pub fn entanglement_matrix(&self) -> Result<Array2<f64>, EngineError> {
        let state = self.state.as_ref().ok_or(EngineError::NoState)?;

        let n = state.qubit_count();
        let mut matrix = Array2::zeros((n, n));
        for i in 0..n {
            for j in (i + 1)..n {
                let entropy = state.reduce(&[i, j])?.entropy();
                matrix[[i, j]] = entropy;
                matrix[[j, i]] = entropy;
            }
        }
        Ok(matrix)
    }

    /// Absolute value of the composite state's trace; 0.0 when unseeded.
    ///
    /// Stays ≈ 1 under FLOW application, since permutation conjugation
    /// preserves the trace.
    pub fn trace_norm(&self) -> f64 {
        match &self.state {
            Some(state) => state.trace().norm(),
            None => 0.0,
        }
    }
}

impl Default for CircuitEngine {
    fn default() -> Self {
        Self::new()
    }
}
