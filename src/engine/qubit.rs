// src/engine/qubit.rs
//! Single-qubit states
//!
//! The engine grows one qubit at a time by accretion, and every accreted
//! input is normalized to a 2×2 density matrix at construction. A pure ket
//! α|0⟩ + β|1⟩ is turned into its projector |ψ⟩⟨ψ|.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::EngineError;

/// A validated single-qubit state in density-matrix form.
#[derive(Clone, Debug)]
pub struct SingleQubit {
    matrix: Array2<Complex64>,
}

impl SingleQubit {
    /// The |0⟩ basis state as a projector.
    pub fn zero() -> Self {
        Self::basis(0)
    }

    /// The |1⟩ basis state as a projector.
    pub fn one() -> Self {
        Self::basis(1)
    }

    /// A classical bit as a basis-state projector.
    pub fn from_bit(bit: bool) -> Self {
        if bit {
            Self::one()
        } else {
            Self::zero()
        }
    }

    /// The equal-superposition projector |+⟩⟨+|.
    ///
    /// This is the engine's documented default seed state for non-accretion
    /// construction; every entry is 1/2.
    pub fn plus() -> Self {
        let half = Complex64::new(0.5, 0.0);
        SingleQubit {
            matrix: Array2::from_elem((2, 2), half),
        }
    }

    fn basis(index: usize) -> Self {
        let mut matrix = Array2::zeros((2, 2));
        matrix[[index, index]] = Complex64::new(1.0, 0.0);
        SingleQubit { matrix }
    }

    /// Build from a pure ket, normalizing it to the projector |ψ⟩⟨ψ|.
    ///
    /// Fails with a dimension error unless the ket has exactly two
    /// amplitudes of unit norm.
    pub fn from_ket(amplitudes: &Array1<Complex64>) -> Result<Self, EngineError> {
        if amplitudes.len() != 2 {
            return Err(EngineError::Dimension(format!(
                "single-qubit ket must have 2 amplitudes, got {}",
                amplitudes.len()
            )));
        }

        let norm_sqr: f64 = amplitudes.iter().map(|a| a.norm_sqr()).sum();
        if (norm_sqr - 1.0).abs() > 1e-10 {
            return Err(EngineError::Dimension(
                "single-qubit ket is not normalized".to_string(),
            ));
        }

        let mut matrix = Array2::zeros((2, 2));
        for i in 0..2 {
            for j in 0..2 {
                matrix[[i, j]] = amplitudes[i] * amplitudes[j].conj();
            }
        }

        Ok(SingleQubit { matrix })
    }

    /// Build from an existing 2×2 density matrix.
    ///
    /// Fails with a dimension error unless the matrix is 2×2, Hermitian and
    /// of unit trace.
    pub fn from_density(matrix: Array2<Complex64>) -> Result<Self, EngineError> {
        if matrix.shape() != [2, 2] {
            return Err(EngineError::Dimension(format!(
                "single-qubit density matrix must be 2x2, got {}x{}",
                matrix.shape()[0],
                matrix.shape()[1]
            )));
        }

        let trace = matrix[[0, 0]] + matrix[[1, 1]];
        if (trace - Complex64::new(1.0, 0.0)).norm() > 1e-10 {
            return Err(EngineError::Dimension(
                "single-qubit density matrix must have unit trace".to_string(),
            ));
        }

        if (matrix[[0, 1]] - matrix[[1, 0]].conj()).norm() > 1e-10 {
            return Err(EngineError::Dimension(
                "single-qubit density matrix must be Hermitian".to_string(),
            ));
        }

        Ok(SingleQubit { matrix })
    }

    /// Get a reference to the underlying 2×2 density matrix.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    pub(crate) fn into_matrix(self) -> Array2<Complex64> {
        self.matrix
    }
}
