//! QAOA for max-cut.
//!
//! The ansatz starts from `H^{⊗n}|0…0⟩`. Each layer with parameters `(γ, β)`
//! applies the cost unitary `exp(-iγ Z_i Z_j)` for every edge, built as
//! `CNOT[i,j] · RZ(-2γ)_j · CNOT[i,j]`, followed by the mixer `RX(-2β)` on
//! every qubit.
//!
//! The cost observable is `C = Σ_{(i,j)} Z_i Z_j`; minimizing `⟨C⟩`
//! maximizes the expected cut.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use qlayer_ir::{Circuit, Gate, library};
use qlayer_sim::{Emulator, StateVector};

use crate::error::{AlgoError, AlgoResult};
use crate::optimizer::{NelderMead, NelderMeadConfig, OptimizationResult};

/// Starting value for parameters not supplied in [`QaoaConfig::initial`].
pub const DEFAULT_INITIAL_PARAMETER: f64 = 0.1;

/// An undirected graph whose vertices are qubits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaxCutGraph {
    num_vertices: usize,
    edges: Vec<(usize, usize)>,
}

impl MaxCutGraph {
    /// Create a graph, rejecting self loops and out-of-range endpoints.
    pub fn new(num_vertices: usize, edges: Vec<(usize, usize)>) -> AlgoResult<Self> {
        if num_vertices == 0 {
            return Err(AlgoError::EmptyGraph);
        }
        for &(a, b) in &edges {
            if a >= num_vertices || b >= num_vertices {
                return Err(AlgoError::EdgeOutOfRange {
                    edge: (a, b),
                    num_vertices,
                });
            }
            if a == b {
                return Err(AlgoError::SelfLoop(a));
            }
        }
        Ok(Self {
            num_vertices,
            edges,
        })
    }

    /// Cycle `0 - 1 - … - (n-1) - 0`.
    pub fn ring(num_vertices: usize) -> AlgoResult<Self> {
        let edges: Vec<_> = match num_vertices {
            0 | 1 => Vec::new(),
            2 => vec![(0, 1)],
            n => (0..n).map(|i| (i, (i + 1) % n)).collect(),
        };
        Self::new(num_vertices, edges)
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// Number of edges cut by the partition encoded in `assignment`.
    ///
    /// Bit `v` of `assignment` is the side of vertex `v`.
    pub fn cut_value(&self, assignment: usize) -> usize {
        self.edges
            .iter()
            .filter(|&&(a, b)| (assignment >> a) & 1 != (assignment >> b) & 1)
            .count()
    }

    /// Best partition by exhaustive search, as `(assignment, cut)`.
    ///
    /// Ties go to the smallest assignment. `None` when the vertex count is
    /// too large to enumerate assignments as `usize`.
    pub fn max_cut(&self) -> Option<(usize, usize)> {
        let count = u32::try_from(self.num_vertices)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))?;
        Some(
            (0..count)
                .map(|assignment| (assignment, self.cut_value(assignment)))
                .fold((0, 0), |best, candidate| {
                    if candidate.1 > best.1 { candidate } else { best }
                }),
        )
    }
}

/// A QAOA ansatz circuit for a [`MaxCutGraph`].
#[derive(Debug, Clone)]
pub struct QaoaCircuit {
    graph: MaxCutGraph,
    circuit: Circuit,
    num_layers: usize,
}

impl QaoaCircuit {
    /// Create the zero-layer ansatz: a Hadamard on every qubit.
    pub fn new(graph: MaxCutGraph) -> AlgoResult<Self> {
        let mut circuit = Circuit::new();
        for q in 0..graph.num_vertices() {
            circuit.append(Gate::single("h", q, library::h())?);
        }
        Ok(Self {
            graph,
            circuit,
            num_layers: 0,
        })
    }

    /// Build an ansatz from interleaved parameters `[γ₁, β₁, γ₂, β₂, …]`.
    pub fn from_parameters(graph: MaxCutGraph, parameters: &[f64]) -> AlgoResult<Self> {
        if parameters.is_empty() || parameters.len() % 2 != 0 {
            return Err(AlgoError::ParameterCount {
                expected: 2 * parameters.len().div_ceil(2).max(1),
                got: parameters.len(),
            });
        }
        let mut qaoa = Self::new(graph)?;
        for pair in parameters.chunks_exact(2) {
            qaoa.add_layer(pair[0], pair[1])?;
        }
        Ok(qaoa)
    }

    /// Append one cost layer with angle `gamma` and one mixer layer with angle `beta`.
    pub fn add_layer(&mut self, gamma: f64, beta: f64) -> AlgoResult<&mut Self> {
        for &(i, j) in self.graph.edges() {
            self.circuit
                .append(Gate::pair("cnot", i, j, library::cnot())?)
                .append(Gate::single("rz", j, library::rz(-2.0 * gamma))?)
                .append(Gate::pair("cnot", i, j, library::cnot())?);
        }
        for q in 0..self.graph.num_vertices() {
            self.circuit
                .append(Gate::single("rx", q, library::rx(-2.0 * beta))?);
        }
        self.num_layers += 1;
        Ok(self)
    }

    /// The graph.
    pub fn graph(&self) -> &MaxCutGraph {
        &self.graph
    }

    /// The ansatz circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Number of `(γ, β)` layers added.
    pub fn num_layers(&self) -> usize {
        self.num_layers
    }

    /// Run the ansatz from `|0…0⟩`.
    pub fn final_state<E: Emulator + ?Sized>(&self, emulator: &E) -> AlgoResult<StateVector> {
        emulator.check_register(self.graph.num_vertices())?;
        let initial = StateVector::from_qubit_count(self.graph.num_vertices())?;
        Ok(emulator.apply_circuit(&self.circuit, &initial)?)
    }

    /// `⟨ψ|C|ψ⟩` with `C = Σ Z_i Z_j` over the edges.
    pub fn expectation<E: Emulator + ?Sized>(&self, emulator: &E) -> AlgoResult<f64> {
        let state = self.final_state(emulator)?;
        self.cost_expectation(emulator, &state)
    }

    /// `⟨state|C|state⟩` computed by applying Z gates through `emulator`.
    pub fn cost_expectation<E: Emulator + ?Sized>(
        &self,
        emulator: &E,
        state: &StateVector,
    ) -> AlgoResult<f64> {
        let mut total = 0.0;
        for &(i, j) in self.graph.edges() {
            let zi = emulator.apply_gate(&Gate::single("z", i, library::z())?, state)?;
            let zizj = emulator.apply_gate(&Gate::single("z", j, library::z())?, &zi)?;
            total += state.inner(&zizj)?.re;
        }
        Ok(total)
    }
}

/// QAOA run parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaoaConfig {
    /// Number of vertices (qubits).
    pub num_qubits: usize,
    /// Graph edges.
    pub edges: Vec<(usize, usize)>,
    /// Number of `(γ, β)` layers.
    pub layers: usize,
    /// Starting parameters `[γ₁, β₁, …]`; missing entries use
    /// [`DEFAULT_INITIAL_PARAMETER`].
    pub initial: Vec<f64>,
    /// Optimizer settings.
    pub optimizer: NelderMeadConfig,
}

impl Default for QaoaConfig {
    fn default() -> Self {
        Self {
            num_qubits: 4,
            edges: vec![(0, 1), (1, 2), (2, 3), (3, 0)],
            layers: 1,
            initial: Vec::new(),
            optimizer: NelderMeadConfig::default(),
        }
    }
}

impl QaoaConfig {
    /// Starting parameter vector of length `2 * layers`.
    pub fn initial_parameters(&self) -> AlgoResult<Vec<f64>> {
        let expected = 2 * self.layers;
        if self.initial.len() > expected {
            return Err(AlgoError::ParameterCount {
                expected,
                got: self.initial.len(),
            });
        }
        let mut parameters = self.initial.clone();
        parameters.resize(expected, DEFAULT_INITIAL_PARAMETER);
        Ok(parameters)
    }
}

/// Outcome of [`optimize_qaoa`].
#[derive(Debug, Clone)]
pub struct QaoaResult {
    /// Optimizer outcome; `value` is the minimized `⟨C⟩`.
    pub optimization: OptimizationResult,
    /// Ansatz at the optimal parameters.
    pub circuit: QaoaCircuit,
    /// Final state at the optimal parameters.
    pub state: StateVector,
}

impl QaoaResult {
    /// Optimal cost angles `γ`.
    pub fn gammas(&self) -> Vec<f64> {
        self.optimization.parameters.iter().step_by(2).copied().collect()
    }

    /// Optimal mixer angles `β`.
    pub fn betas(&self) -> Vec<f64> {
        self.optimization.parameters.iter().skip(1).step_by(2).copied().collect()
    }

    /// Expected cut size `Σ (1 - ⟨Z_i Z_j⟩) / 2`.
    pub fn expected_cut(&self) -> f64 {
        (self.circuit.graph().edges().len() as f64 - self.optimization.value) / 2.0
    }
}

/// Minimize `⟨C⟩` over the QAOA parameters with Nelder-Mead.
pub fn optimize_qaoa<E: Emulator + ?Sized>(
    config: &QaoaConfig,
    emulator: &E,
) -> AlgoResult<QaoaResult> {
    if config.layers == 0 {
        return Err(AlgoError::NoLayers);
    }
    let graph = MaxCutGraph::new(config.num_qubits, config.edges.clone())?;
    emulator.check_register(graph.num_vertices())?;
    let initial = config.initial_parameters()?;

    info!(
        qubits = graph.num_vertices(),
        edges = graph.edges().len(),
        layers = config.layers,
        emulator = emulator.name(),
        "optimizing QAOA"
    );

    let optimizer = NelderMead::new(config.optimizer.clone());
    let optimization = optimizer.minimize(
        |parameters| {
            let value = QaoaCircuit::from_parameters(graph.clone(), parameters)?
                .expectation(emulator)?;
            trace!(?parameters, value, "QAOA objective");
            Ok(value)
        },
        &initial,
    )?;

    let circuit = QaoaCircuit::from_parameters(graph, &optimization.parameters)?;
    let state = circuit.final_state(emulator)?;

    debug!(
        value = optimization.value,
        iterations = optimization.iterations,
        converged = optimization.converged,
        "QAOA optimization finished"
    );

    Ok(QaoaResult {
        optimization,
        circuit,
        state,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlayer_sim::StatevectorEmulator;

    #[test]
    fn test_graph_validation() {
        assert_eq!(MaxCutGraph::new(0, vec![]).unwrap_err(), AlgoError::EmptyGraph);
        assert_eq!(
            MaxCutGraph::new(3, vec![(0, 1), (1, 3)]).unwrap_err(),
            AlgoError::EdgeOutOfRange {
                edge: (1, 3),
                num_vertices: 3
            }
        );
        assert_eq!(
            MaxCutGraph::new(3, vec![(2, 2)]).unwrap_err(),
            AlgoError::SelfLoop(2)
        );
    }

    #[test]
    fn test_cut_value() {
        let graph = MaxCutGraph::ring(4).unwrap();
        assert_eq!(graph.cut_value(0b0000), 0);
        assert_eq!(graph.cut_value(0b0101), 4);
        assert_eq!(graph.cut_value(0b0011), 2);
        assert_eq!(graph.max_cut(), Some((0b0101, 4)));
    }

    #[test]
    fn test_ring_edges() {
        assert_eq!(MaxCutGraph::ring(2).unwrap().edges(), &[(0, 1)]);
        assert_eq!(
            MaxCutGraph::ring(3).unwrap().edges(),
            &[(0, 1), (1, 2), (2, 0)]
        );
    }

    #[test]
    fn test_zero_layer_circuit() {
        let qaoa = QaoaCircuit::new(MaxCutGraph::ring(3).unwrap()).unwrap();
        assert_eq!(qaoa.circuit().len(), 3);
        assert_eq!(qaoa.circuit().depth(), 1);
        assert_eq!(qaoa.num_layers(), 0);
    }

    #[test]
    fn test_layer_structure() {
        let mut qaoa = QaoaCircuit::new(MaxCutGraph::ring(4).unwrap()).unwrap();
        qaoa.add_layer(0.3, 0.2).unwrap().add_layer(0.1, 0.4).unwrap();
        // 4 H + 2 * (4 edges * 3 + 4 RX)
        assert_eq!(qaoa.circuit().len(), 4 + 2 * 16);
        assert_eq!(qaoa.num_layers(), 2);
        let names: Vec<&str> = qaoa.circuit().gates()[4..8].iter().map(Gate::name).collect();
        assert_eq!(names, ["cnot", "rz", "cnot", "cnot"]);
        assert_eq!(qaoa.circuit().gates()[5].targets(), &[1]);
    }

    #[test]
    fn test_plus_state_expectation_is_zero() {
        let qaoa = QaoaCircuit::new(MaxCutGraph::ring(4).unwrap()).unwrap();
        let value = qaoa.expectation(&StatevectorEmulator::new()).unwrap();
        assert!(value.abs() < 1e-12);
    }

    #[test]
    fn test_known_optimum_on_ring() {
        let qaoa = QaoaCircuit::from_parameters(
            MaxCutGraph::ring(4).unwrap(),
            &[1.17809152, 0.39269362],
        )
        .unwrap();
        let value = qaoa.expectation(&StatevectorEmulator::new()).unwrap();
        assert!((value + 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_parameters_rejects_odd_count() {
        let graph = MaxCutGraph::ring(3).unwrap();
        assert_eq!(
            QaoaCircuit::from_parameters(graph.clone(), &[0.1, 0.2, 0.3]).unwrap_err(),
            AlgoError::ParameterCount {
                expected: 4,
                got: 3
            }
        );
        assert!(QaoaCircuit::from_parameters(graph, &[]).is_err());
    }

    #[test]
    fn test_initial_parameters_padding() {
        let config = QaoaConfig {
            layers: 2,
            initial: vec![0.5],
            ..Default::default()
        };
        assert_eq!(config.initial_parameters().unwrap(), vec![0.5, 0.1, 0.1, 0.1]);
        let too_many = QaoaConfig {
            layers: 1,
            initial: vec![0.1, 0.2, 0.3],
            ..Default::default()
        };
        assert!(too_many.initial_parameters().is_err());
    }
}
