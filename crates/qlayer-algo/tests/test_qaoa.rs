//! Tests for QAOA max-cut optimization.

use qlayer_algo::{AlgoError, MaxCutGraph, NelderMeadConfig, QaoaCircuit, QaoaConfig, optimize_qaoa};
use qlayer_sim::{Emulator, EmulatorConfig, SimError, StatevectorEmulator};

// ---------------------------------------------------------------------------
// Optimization
// ---------------------------------------------------------------------------

#[test]
fn ring_of_four_reaches_single_layer_optimum() {
    let emulator = StatevectorEmulator::new();
    let result = optimize_qaoa(&QaoaConfig::default(), &emulator).unwrap();

    assert!(result.optimization.converged);
    assert!((result.optimization.value + 2.0).abs() < 1e-4);
    assert!((result.expected_cut() - 3.0).abs() < 1e-4);
    assert_eq!(result.gammas().len(), 1);
    assert_eq!(result.betas().len(), 1);
    assert_eq!(result.circuit.num_layers(), 1);
}

#[test]
fn optimized_state_matches_reported_value() {
    let emulator = StatevectorEmulator::new();
    let result = optimize_qaoa(&QaoaConfig::default(), &emulator).unwrap();
    let recomputed = result
        .circuit
        .cost_expectation(&emulator, &result.state)
        .unwrap();
    assert!((recomputed - result.optimization.value).abs() < 1e-12);
    assert!((result.state.norm_sqr() - 1.0).abs() < 1e-9);
}

#[test]
fn optimized_state_favours_maximum_cuts() {
    let emulator = StatevectorEmulator::new();
    let result = optimize_qaoa(&QaoaConfig::default(), &emulator).unwrap();
    let graph = result.circuit.graph();
    let p = result.state.probabilities();
    let (best, cut) = graph.max_cut().unwrap();
    assert_eq!(cut, 4);
    // The two maximum cuts carry more weight than any other assignment.
    let complement = best ^ 0b1111;
    for (index, &prob) in p.iter().enumerate() {
        if index != best && index != complement {
            assert!(prob < p[best]);
        }
    }
}

#[test]
fn deeper_ansatz_is_no_worse() {
    let emulator = StatevectorEmulator::new();
    let one = optimize_qaoa(&QaoaConfig::default(), &emulator).unwrap();
    let two = optimize_qaoa(
        &QaoaConfig {
            layers: 2,
            initial: vec![0.3, 0.2, 0.6, 0.1],
            optimizer: NelderMeadConfig {
                max_iterations: 2000,
                ..Default::default()
            },
            ..Default::default()
        },
        &emulator,
    )
    .unwrap();
    assert_eq!(two.optimization.parameters.len(), 4);
    assert!(two.optimization.value <= one.optimization.value + 1e-6);
    assert!(two.optimization.value < -3.0);
}

#[test]
fn works_through_trait_object() {
    let emulator: Box<dyn Emulator> = Box::new(StatevectorEmulator::new());
    let qaoa =
        QaoaCircuit::from_parameters(MaxCutGraph::ring(4).unwrap(), &[1.17809152, 0.39269362])
            .unwrap();
    let value = qaoa.expectation(emulator.as_ref()).unwrap();
    assert!((value + 2.0).abs() < 1e-6);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn zero_layers_rejected() {
    let emulator = StatevectorEmulator::new();
    let config = QaoaConfig {
        layers: 0,
        ..Default::default()
    };
    assert_eq!(
        optimize_qaoa(&config, &emulator).unwrap_err(),
        AlgoError::NoLayers
    );
}

#[test]
fn bad_edge_rejected() {
    let emulator = StatevectorEmulator::new();
    let config = QaoaConfig {
        num_qubits: 3,
        edges: vec![(0, 1), (1, 4)],
        ..Default::default()
    };
    assert!(matches!(
        optimize_qaoa(&config, &emulator),
        Err(AlgoError::EdgeOutOfRange { .. })
    ));
}

#[test]
fn emulator_limit_surfaces_as_sim_error() {
    let emulator = StatevectorEmulator::with_config(EmulatorConfig { max_qubits: 3 });
    let err = optimize_qaoa(&QaoaConfig::default(), &emulator).unwrap_err();
    assert_eq!(
        err,
        AlgoError::Sim(SimError::RegisterTooLarge {
            num_qubits: 4,
            max: 3
        })
    );
}

#[test]
fn oversized_register_rejected_before_simulation() {
    let emulator = StatevectorEmulator::with_config(EmulatorConfig { max_qubits: 4 });
    let expected = AlgoError::Sim(SimError::RegisterTooLarge {
        num_qubits: 40,
        max: 4,
    });

    let config = QaoaConfig {
        num_qubits: 40,
        edges: MaxCutGraph::ring(40).unwrap().edges().to_vec(),
        ..Default::default()
    };
    assert_eq!(optimize_qaoa(&config, &emulator).unwrap_err(), expected);

    let qaoa = QaoaCircuit::from_parameters(MaxCutGraph::ring(40).unwrap(), &[0.1, 0.1]).unwrap();
    assert_eq!(qaoa.final_state(&emulator).unwrap_err(), expected);
    assert_eq!(qaoa.expectation(&emulator).unwrap_err(), expected);
}

#[test]
fn config_loads_from_yaml() {
    let yaml = r#"
num_qubits: 3
edges: [[0, 1], [1, 2]]
layers: 2
optimizer:
  max_iterations: 50
"#;
    let config: QaoaConfig = serde_yaml_ng::from_str(yaml).unwrap();
    assert_eq!(config.num_qubits, 3);
    assert_eq!(config.edges, vec![(0, 1), (1, 2)]);
    assert_eq!(config.layers, 2);
    assert_eq!(config.optimizer.max_iterations, 50);
    assert_eq!(config.optimizer.tolerance, NelderMeadConfig::default().tolerance);
    assert_eq!(config.initial_parameters().unwrap(), vec![0.1; 4]);
}
