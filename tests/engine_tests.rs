use ndarray::{array, Array1, Array2};
use num_complex::Complex64;

use revflow::engine::{flow_operator, CircuitEngine, CompositeState, SingleQubit};
use revflow::error::EngineError;

/// Helper for comparing density matrices with tolerance
fn matrix_approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>, epsilon: f64) -> bool {
    if a.shape() != b.shape() {
        return false;
    }
    a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < epsilon)
}

fn bit_engine(bits: &str) -> CircuitEngine {
    let mut engine = CircuitEngine::new();
    for bit in bits.chars() {
        engine.accrete(SingleQubit::from_bit(bit == '1'));
    }
    engine
}

#[test]
fn test_unseeded_engine_rejects_operations() {
    let mut engine = CircuitEngine::new();
    assert_eq!(engine.qubit_count(), 0);
    assert!(engine.state().is_none());
    assert_eq!(engine.trace_norm(), 0.0);

    assert!(matches!(engine.apply(0, 1, 2), Err(EngineError::NoState)));
    assert!(matches!(engine.measure_z(0), Err(EngineError::NoState)));
    assert!(matches!(
        engine.entanglement_matrix(),
        Err(EngineError::NoState)
    ));
}

#[test]
fn test_accretion_grows_by_one_qubit() {
    let mut engine = CircuitEngine::new();

    engine.accrete(SingleQubit::zero());
    assert_eq!(engine.qubit_count(), 1);
    assert!((engine.trace_norm() - 1.0).abs() < 1e-10);

    engine.accrete(SingleQubit::one());
    assert_eq!(engine.qubit_count(), 2);
    assert!((engine.trace_norm() - 1.0).abs() < 1e-10);

    // Qubit 0 is the most significant bit of the basis label, so the state
    // |0⟩⊗|1⟩ sits at basis index 0b01.
    let state = engine.state().unwrap();
    assert!((state.matrix()[[1, 1]].re - 1.0).abs() < 1e-10);
}

#[test]
fn test_accretion_normalizes_kets_to_projectors() {
    let ket = Array1::from(vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)]);
    let qubit = SingleQubit::from_ket(&ket).unwrap();
    assert!(matrix_approx_eq(
        qubit.matrix(),
        SingleQubit::zero().matrix(),
        1e-12
    ));
}

#[test]
fn test_malformed_accretion_input_is_dimension_error() {
    let too_long = Array1::from(vec![
        Complex64::new(1.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
    ]);
    assert!(matches!(
        SingleQubit::from_ket(&too_long),
        Err(EngineError::Dimension(_))
    ));

    let unnormalized = Array1::from(vec![Complex64::new(1.0, 0.0), Complex64::new(1.0, 0.0)]);
    assert!(matches!(
        SingleQubit::from_ket(&unnormalized),
        Err(EngineError::Dimension(_))
    ));

    let wrong_shape: Array2<Complex64> = Array2::zeros((3, 3));
    assert!(matches!(
        SingleQubit::from_density(wrong_shape),
        Err(EngineError::Dimension(_))
    ));

    let traceless = array![
        [Complex64::new(0.5, 0.0), Complex64::new(0.0, 0.0)],
        [Complex64::new(0.0, 0.0), Complex64::new(0.0, 0.0)],
    ];
    assert!(matches!(
        SingleQubit::from_density(traceless),
        Err(EngineError::Dimension(_))
    ));
}

#[test]
fn test_apply_requires_strict_index_ordering() {
    let mut engine = bit_engine("010");

    // ctrl == t1
    assert!(matches!(engine.apply(1, 1, 2), Err(EngineError::Range { .. })));
    // t1 > t2
    assert!(matches!(engine.apply(0, 2, 1), Err(EngineError::Range { .. })));
    // t2 out of bounds
    assert!(matches!(engine.apply(0, 1, 5), Err(EngineError::Range { .. })));

    // A rejected instruction leaves the engine untouched.
    assert_eq!(engine.qubit_count(), 3);
    assert_eq!(engine.read_bits().unwrap(), "010");
}

#[test]
fn test_flow_operator_is_permutation_and_self_inverse() {
    let operator = flow_operator(3, 0, 1, 2);

    // Each column holds exactly one 1.
    for col in 0..8 {
        let ones = (0..8)
            .filter(|&row| (operator[[row, col]] - Complex64::new(1.0, 0.0)).norm() < 1e-12)
            .count();
        assert_eq!(ones, 1);
    }

    let square = operator.dot(&operator);
    let identity: Array2<Complex64> = Array2::eye(8);
    assert!(matrix_approx_eq(&square, &identity, 1e-12));
}

#[test]
fn test_double_application_restores_state() {
    let mut engine = CircuitEngine::with_seed(3);
    let before = engine.state().unwrap().matrix().clone();

    engine.apply(0, 1, 2).unwrap();
    engine.apply(0, 1, 2).unwrap();

    let after = engine.state().unwrap().matrix();
    assert!(matrix_approx_eq(&before, after, 1e-9));
}

#[test]
fn test_flow_swaps_targets_when_control_is_zero() {
    let mut engine = bit_engine("010");
    engine.apply(0, 1, 2).unwrap();

    assert!(engine.measure_z(0).unwrap() > 0.9);
    assert!(engine.measure_z(1).unwrap() > 0.9);
    assert!(engine.measure_z(2).unwrap() < -0.9);
    assert_eq!(engine.read_bits().unwrap(), "001");
}

#[test]
fn test_flow_is_identity_when_control_is_one() {
    let mut engine = bit_engine("110");
    engine.apply(0, 1, 2).unwrap();
    assert_eq!(engine.read_bits().unwrap(), "110");
}

#[test]
fn test_trace_norm_stays_one_under_flows() {
    let mut engine = CircuitEngine::new();
    engine.accrete(SingleQubit::plus());
    engine.accrete(SingleQubit::one());
    engine.accrete(SingleQubit::zero());
    engine.accrete(SingleQubit::zero());

    engine.apply(0, 1, 2).unwrap();
    engine.apply(1, 2, 3).unwrap();
    engine.apply(0, 2, 3).unwrap();

    assert!((engine.trace_norm() - 1.0).abs() < 1e-6);
    // Permutation conjugation also preserves purity of a pure input.
    assert!((engine.state().unwrap().purity() - 1.0).abs() < 1e-9);
}

#[test]
fn test_measurement_sign_convention() {
    let mut engine = CircuitEngine::new();
    engine.accrete(SingleQubit::zero());
    engine.accrete(SingleQubit::one());
    engine.accrete(SingleQubit::plus());

    assert!((engine.measure_z(0).unwrap() - 1.0).abs() < 1e-10);
    assert!((engine.measure_z(1).unwrap() + 1.0).abs() < 1e-10);
    // |+⟩ measures 0, which is not > 0, so it reads out as '1'.
    assert!(engine.measure_z(2).unwrap().abs() < 1e-10);
    assert_eq!(engine.read_bits().unwrap(), "011");

    assert!(matches!(
        engine.measure_z(7),
        Err(EngineError::Index { .. })
    ));
}

#[test]
fn test_seeded_engine_defaults_to_uniform_projectors() {
    let engine = CircuitEngine::with_seed(2);
    assert_eq!(engine.qubit_count(), 2);
    assert!((engine.trace_norm() - 1.0).abs() < 1e-10);

    // Every entry of |+⟩⟨+| ⊗ |+⟩⟨+| is 1/4.
    let state = engine.state().unwrap();
    for i in 0..4 {
        for j in 0..4 {
            assert!((state.matrix()[[i, j]].re - 0.25).abs() < 1e-10);
        }
    }

    // Seeding with zero qubits leaves the engine unseeded.
    let empty = CircuitEngine::with_seed(0);
    assert!(empty.state().is_none());
}

#[test]
fn test_partial_trace_recovers_factors() {
    let mut engine = CircuitEngine::new();
    engine.accrete(SingleQubit::plus());
    engine.accrete(SingleQubit::zero());

    let state = engine.state().unwrap();

    let qubit0 = state.reduce(&[0]).unwrap();
    assert!(matrix_approx_eq(
        qubit0.matrix(),
        SingleQubit::plus().matrix(),
        1e-10
    ));

    let qubit1 = state.reduce(&[1]).unwrap();
    assert!(matrix_approx_eq(
        qubit1.matrix(),
        SingleQubit::zero().matrix(),
        1e-10
    ));

    assert!(matches!(
        state.reduce(&[5]),
        Err(EngineError::Index { .. })
    ));
}

#[test]
fn test_entanglement_matrix_detects_conditional_swap_entanglement() {
    let mut engine = CircuitEngine::new();
    engine.accrete(SingleQubit::plus());
    engine.accrete(SingleQubit::one());
    engine.accrete(SingleQubit::zero());

    // Product state: every pairwise entropy is zero.
    let before = engine.entanglement_matrix().unwrap();
    for i in 0..3 {
        for j in 0..3 {
            assert!(before[[i, j]].abs() < 1e-9);
        }
    }

    // The swap conditioned on the |+⟩ control entangles all three qubits:
    // (|001⟩ + |110⟩)/√2, so every two-qubit reduction has entropy ln 2.
    engine.apply(0, 1, 2).unwrap();
    let after = engine.entanglement_matrix().unwrap();
    let ln2 = std::f64::consts::LN_2;
    for i in 0..3 {
        assert!(after[[i, i]].abs() < 1e-12);
        for j in 0..3 {
            if i != j {
                assert!(
                    (after[[i, j]] - ln2).abs() < 1e-6,
                    "entropy({}, {}) = {}",
                    i,
                    j,
                    after[[i, j]]
                );
                assert!((after[[i, j]] - after[[j, i]]).abs() < 1e-12);
            }
        }
    }

    // Diagnostics leave the state untouched.
    assert!((engine.trace_norm() - 1.0).abs() < 1e-6);
}

#[test]
fn test_composite_state_dimension_checks() {
    let bad: Array2<Complex64> = Array2::zeros((3, 3));
    assert!(matches!(
        CompositeState::new(2, bad),
        Err(EngineError::Dimension(_))
    ));

    let good = Array2::<Complex64>::eye(4).map(|x| x * 0.25);
    let state = CompositeState::new(2, good).unwrap();
    assert_eq!(state.qubit_count(), 2);
    assert_eq!(state.dimension(), 4);
}
