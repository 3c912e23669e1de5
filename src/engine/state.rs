// src/engine/state.rs
//! Composite state over accreted qubits
//!
//! The composite state is a density matrix of dimension 2^n × 2^n over the
//! n qubits accreted so far. Basis indices use a fixed most-significant-bit-
//! first convention: qubit k is bit (n - 1 - k) of the index, so qubit 0 is
//! the leftmost bit of a basis label |b0 b1 ... b(n-1)⟩.

use std::fmt::{self, Display};

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::EngineError;

use super::qubit::SingleQubit;

/// Density-matrix representation of the joint state over all qubits.
#[derive(Clone, Debug)]
pub struct CompositeState {
    qubit_count: usize,
    matrix: Array2<Complex64>,
}

impl CompositeState {
    /// Create a composite state from a 2^n × 2^n matrix.
    pub fn new(qubit_count: usize, matrix: Array2<Complex64>) -> Result<Self, EngineError> {
        let expected_dim = 1 << qubit_count;
        if matrix.shape() != [expected_dim, expected_dim] {
            return Err(EngineError::Dimension(format!(
                "composite state for {} qubits must be {}x{}, got {}x{}",
                qubit_count,
                expected_dim,
                expected_dim,
                matrix.shape()[0],
                matrix.shape()[1]
            )));
        }

        Ok(CompositeState {
            qubit_count,
            matrix,
        })
    }

    /// The deterministic default seed: a tensor power of the
    /// equal-superposition projector |+⟩⟨+|. `qubit_count` must be ≥ 1;
    /// an empty engine stays unseeded instead.
    pub fn uniform_seed(qubit_count: usize) -> Self {
        let mut state: CompositeState = SingleQubit::plus().into();
        for _ in 1..qubit_count {
            state = state.tensor(&SingleQubit::plus().into());
        }
        state
    }

    /// Number of qubits in this state.
    pub fn qubit_count(&self) -> usize {
        self.qubit_count
    }

    /// Dimension of the underlying Hilbert space (2^n for n qubits).
    pub fn dimension(&self) -> usize {
        1 << self.qubit_count
    }

    /// Get a reference to the density matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Tensor product with another composite state; `other` becomes the
    /// higher-index block of the joint ordering.
    pub fn tensor(&self, other: &Self) -> Self {
        let self_dim = self.dimension();
        let other_dim = other.dimension();
        let new_dim = self_dim * other_dim;

        let mut new_matrix = Array2::zeros((new_dim, new_dim));
        for i1 in 0..self_dim {
            for j1 in 0..self_dim {
                for i2 in 0..other_dim {
                    for j2 in 0..other_dim {
                        let i = i1 * other_dim + i2;
                        let j = j1 * other_dim + j2;
                        new_matrix[[i, j]] = self.matrix[[i1, j1]] * other.matrix[[i2, j2]];
                    }
                }
            }
        }

        CompositeState {
            qubit_count: self.qubit_count + other.qubit_count,
            matrix: new_matrix,
        }
    }

    /// Conjugate the state by a unitary in place: ρ → U ρ U†.
    pub fn apply_unitary(&mut self, operator: &Array2<Complex64>) -> Result<(), EngineError> {
        let dim = self.dimension();
        if operator.shape() != [dim, dim] {
            return Err(EngineError::Dimension(format!(
                "operator must be {}x{}, got {}x{}",
                dim,
                dim,
                operator.shape()[0],
                operator.shape()[1]
            )));
        }

        let adjoint = operator.t().map(|x| x.conj());
        self.matrix = operator.dot(&self.matrix).dot(&adjoint);
        Ok(())
    }

    /// Partial trace keeping only the listed qubits, in ascending order.
    ///
    /// Duplicates are ignored. Fails with an index error if any listed
    /// qubit does not exist or the list is empty.
    pub fn reduce(&self, keep: &[usize]) -> Result<Self, EngineError> {
        for &q in keep {
            if q >= self.qubit_count {
                return Err(EngineError::Index {
                    index: q,
                    qubit_count: self.qubit_count,
                });
            }
        }

        let mut kept = keep.to_vec();
        kept.sort_unstable();
        kept.dedup();
        if kept.is_empty() {
            return Err(EngineError::Dimension(
                "partial trace must keep at least one qubit".to_string(),
            ));
        }

        let traced: Vec<usize> = (0..self.qubit_count).filter(|q| !kept.contains(q)).collect();

        let dim_keep = 1 << kept.len();
        let dim_trace = 1 << traced.len();
        let mut reduced = Array2::zeros((dim_keep, dim_keep));

        for i_keep in 0..dim_keep {
            for j_keep in 0..dim_keep {
                let mut sum = Complex64::new(0.0, 0.0);
                for k_trace in 0..dim_trace {
                    let i = self.weave(&kept, i_keep, &traced, k_trace);
                    let j = self.weave(&kept, j_keep, &traced, k_trace);
                    sum += self.matrix[[i, j]];
                }
                reduced[[i_keep, j_keep]] = sum;
            }
        }

        Ok(CompositeState {
            qubit_count: kept.len(),
            matrix: reduced,
        })
    }

    /// Scatter the bits of a reduced index and a traced index back into a
    /// full basis index, MSB-first in both the full and reduced orderings.
    fn weave(&self, kept: &[usize], keep_idx: usize, traced: &[usize], trace_idx: usize) -> usize {
        let n = self.qubit_count;
        let mut full = 0usize;
        for (b, &pos) in kept.iter().enumerate() {
            let bit = (keep_idx >> (kept.len() - 1 - b)) & 1;
            full |= bit << (n - 1 - pos);
        }
        for (b, &pos) in traced.iter().enumerate() {
            let bit = (trace_idx >> (traced.len() - 1 - b)) & 1;
            full |= bit << (n - 1 - pos);
        }
        full
    }

    /// Trace of the density matrix.
    pub fn trace(&self) -> Complex64 {
        let mut sum = Complex64::new(0.0, 0.0);
        for i in 0..self.dimension() {
            sum += self.matrix[[i, i]];
        }
        sum
    }

    /// Purity Tr(ρ²); 1 for a pure state.
    pub fn purity(&self) -> f64 {
        let mut sum = Complex64::new(0.0, 0.0);
        for i in 0..self.dimension() {
            for j in 0..self.dimension() {
                sum += self.matrix[[i, j]] * self.matrix[[j, i]];
            }
        }
        sum.re
    }

    /// Von Neumann entropy -Tr(ρ ln ρ), in nats.
    pub fn entropy(&self) -> f64 {
        hermitian_eigenvalues(&self.matrix)
            .into_iter()
            .filter(|&lambda| lambda > 1e-12)
            .map(|lambda| -lambda * lambda.ln())
            .sum()
    }
}

impl From<SingleQubit> for CompositeState {
    fn from(qubit: SingleQubit) -> Self {
        CompositeState {
            qubit_count: 1,
            matrix: qubit.into_matrix(),
        }
    }
}

impl Display for CompositeState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}-qubit composite state:", self.qubit_count)?;

        let threshold = 1e-10;
        for i in 0..self.dimension() {
            for j in 0..self.dimension() {
                let elem = self.matrix[[i, j]];
                if elem.norm_sqr() > threshold {
                    let i_bits = format!("{:0width$b}", i, width = self.qubit_count);
                    let j_bits = format!("{:0width$b}", j, width = self.qubit_count);
                    writeln!(
                        f,
                        "  |{}⟩⟨{}|: {:.6}{:+.6}i",
                        i_bits, j_bits, elem.re, elem.im
                    )?;
                }
            }
        }

        Ok(())
    }
}

/// Eigenvalues of a Hermitian matrix by cyclic Jacobi rotations.
///
/// The reduced states the engine diagnoses are at most 4×4, so a dense
/// iterative scheme converges in a handful of sweeps and avoids pulling a
/// LAPACK backend into the crate.
fn hermitian_eigenvalues(matrix: &Array2<Complex64>) -> Vec<f64> {
    let n = matrix.nrows();
    let mut a = matrix.clone();

    for _sweep in 0..64 {
        let mut off_diagonal = 0.0;
        for p in 0..n {
            for q in (p + 1)..n {
                off_diagonal += a[[p, q]].norm_sqr();
            }
        }
        if off_diagonal < 1e-24 {
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = a[[p, q]];
                let r = apq.norm();
                if r < 1e-14 {
                    continue;
                }

                // Factor out the phase of the pivot so the remaining 2x2
                // block is real symmetric, then rotate it away.
                let phase = apq / r;
                let app = a[[p, p]].re;
                let aqq = a[[q, q]].re;

                let tau = (aqq - app) / (2.0 * r);
                let t = if tau >= 0.0 {
                    1.0 / (tau + (1.0 + tau * tau).sqrt())
                } else {
                    -1.0 / (-tau + (1.0 + tau * tau).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                let mut rotation: Array2<Complex64> = Array2::eye(n);
                rotation[[p, p]] = Complex64::new(c, 0.0);
                rotation[[p, q]] = phase * s;
                rotation[[q, p]] = -phase.conj() * s;
                rotation[[q, q]] = Complex64::new(c, 0.0);

                let adjoint = rotation.t().map(|x| x.conj());
                a = adjoint.dot(&a).dot(&rotation);
            }
        }
    }

    (0..n).map(|i| a[[i, i]].re).collect()
}
