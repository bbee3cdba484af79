//! Grover search over a marked subset of `0..N`.
//!
//! The register has `floor(log2 N) + 1` qubits. One iteration is the oracle
//! `I - 2 Σ |m⟩⟨m|` followed by the diffuser `H⊗ⁿ (2|0⟩⟨0| - I) H⊗ⁿ`. Both
//! reflections are diagonal and are emitted through [`diagonal_circuit`], so
//! the whole search runs on one- and two-qubit gates.
//!
//! With `M = 2ⁿ` basis states and `m` marked items, `k` iterations succeed
//! with probability `sin²((2k + 1) θ / 2)` where `sin(θ / 2) = √(m / M)`.

use std::f64::consts::{FRAC_PI_2, PI};

use tracing::debug;

use qlayer_ir::{Circuit, Gate, library};
use qlayer_sim::{Emulator, StateVector};

use crate::error::{AlgoError, AlgoResult};
use crate::phase::diagonal_circuit;

/// Largest register a search problem may require.
pub const MAX_SEARCH_QUBITS: usize = 24;

/// Items `0..size`, some of them marked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchProblem {
    size: usize,
    marked: Vec<usize>,
}

impl SearchProblem {
    /// Create a problem; duplicate marks are merged.
    pub fn new(size: usize, mut marked: Vec<usize>) -> AlgoResult<Self> {
        if marked.is_empty() {
            return Err(AlgoError::NoMarkedItems);
        }
        if let Some(&bad) = marked.iter().find(|&&m| m >= size) {
            return Err(AlgoError::MarkedOutOfRange { marked: bad, size });
        }
        let num_qubits = qubits_for(size);
        if num_qubits > MAX_SEARCH_QUBITS {
            return Err(AlgoError::SearchSpaceTooLarge {
                num_qubits,
                max: MAX_SEARCH_QUBITS,
            });
        }
        marked.sort_unstable();
        marked.dedup();
        Ok(Self { size, marked })
    }

    /// Number of items `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Marked items, ascending.
    pub fn marked(&self) -> &[usize] {
        &self.marked
    }

    /// Whether basis state `index` is marked.
    pub fn is_marked(&self, index: usize) -> bool {
        self.marked.binary_search(&index).is_ok()
    }

    /// `floor(log2 N) + 1`.
    pub fn num_qubits_required(&self) -> usize {
        qubits_for(self.size)
    }

    /// Number of basis states of the register, `2ⁿ`.
    pub fn num_states(&self) -> usize {
        1 << self.num_qubits_required()
    }

    /// Rotation angle `θ` of one iteration, `sin(θ / 2) = √(m / 2ⁿ)`.
    pub fn rotation_angle(&self) -> f64 {
        2.0 * (self.marked.len() as f64 / self.num_states() as f64)
            .sqrt()
            .asin()
    }

    /// Success probability after `iterations` rounds.
    pub fn success_probability_after(&self, iterations: usize) -> f64 {
        let half = (2 * iterations + 1) as f64 * self.rotation_angle() / 2.0;
        half.sin().powi(2)
    }

    /// `round(π / 2θ - 1/2)`, at least 1.
    pub fn optimal_iterations(&self) -> usize {
        (FRAC_PI_2 / self.rotation_angle() - 0.5).round().max(1.0) as usize
    }

    /// Circuit flipping the sign of every marked basis state.
    pub fn oracle_circuit(&self) -> AlgoResult<Circuit> {
        let phases: Vec<f64> = (0..self.num_states())
            .map(|x| if self.is_marked(x) { PI } else { 0.0 })
            .collect();
        diagonal_circuit(&phases)
    }
}

fn qubits_for(size: usize) -> usize {
    (usize::BITS - size.leading_zeros()) as usize
}

/// Reflection `2|0⟩⟨0| - I` on `num_qubits` qubits.
fn zero_reflection(num_qubits: usize) -> AlgoResult<Circuit> {
    let phases: Vec<f64> = (0..1usize << num_qubits)
        .map(|x| if x == 0 { 0.0 } else { PI })
        .collect();
    diagonal_circuit(&phases)
}

/// Grover circuit: a Hadamard layer then a number of oracle + diffuser rounds.
#[derive(Debug, Clone)]
pub struct GroverCircuit {
    problem: SearchProblem,
    circuit: Circuit,
    iterations: usize,
}

impl GroverCircuit {
    /// Hadamard layer and a single iteration.
    pub fn from_search_problem(problem: SearchProblem) -> AlgoResult<Self> {
        Self::with_iterations(problem, 1)
    }

    /// Hadamard layer and the iteration count from
    /// [`SearchProblem::optimal_iterations`].
    pub fn optimal(problem: SearchProblem) -> AlgoResult<Self> {
        let iterations = problem.optimal_iterations();
        Self::with_iterations(problem, iterations)
    }

    /// Hadamard layer and `iterations` rounds.
    pub fn with_iterations(problem: SearchProblem, iterations: usize) -> AlgoResult<Self> {
        let num_qubits = problem.num_qubits_required();
        let mut circuit = Circuit::new();
        append_hadamards(&mut circuit, num_qubits)?;

        if iterations > 0 {
            let oracle = problem.oracle_circuit()?;
            let reflection = zero_reflection(num_qubits)?;
            for _ in 0..iterations {
                circuit.concat(&oracle)?;
                append_hadamards(&mut circuit, num_qubits)?;
                circuit.concat(&reflection)?;
                append_hadamards(&mut circuit, num_qubits)?;
            }
        }

        debug!(
            qubits = num_qubits,
            marked = problem.marked().len(),
            iterations,
            gates = circuit.len(),
            "built Grover circuit"
        );

        Ok(Self {
            problem,
            circuit,
            iterations,
        })
    }

    /// The search problem.
    pub fn problem(&self) -> &SearchProblem {
        &self.problem
    }

    /// The circuit.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Number of oracle + diffuser rounds.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run the circuit from `|0…0⟩`.
    pub fn final_state<E: Emulator + ?Sized>(&self, emulator: &E) -> AlgoResult<StateVector> {
        let num_qubits = self.problem.num_qubits_required();
        emulator.check_register(num_qubits)?;
        let initial = StateVector::from_qubit_count(num_qubits)?;
        Ok(emulator.apply_circuit(&self.circuit, &initial)?)
    }

    /// Probability of measuring a marked item in `state`.
    pub fn success_probability(&self, state: &StateVector) -> f64 {
        self.problem
            .marked()
            .iter()
            .filter_map(|&m| state.try_get(m).ok())
            .map(|amplitude| amplitude.norm_sqr())
            .sum()
    }
}

fn append_hadamards(circuit: &mut Circuit, num_qubits: usize) -> AlgoResult<()> {
    for q in 0..num_qubits {
        circuit.append(Gate::single("h", q, library::h())?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlayer_sim::StatevectorEmulator;

    #[test]
    fn test_num_qubits_required() {
        assert_eq!(SearchProblem::new(1, vec![0]).unwrap().num_qubits_required(), 1);
        assert_eq!(SearchProblem::new(2, vec![0, 1]).unwrap().num_qubits_required(), 2);
        assert_eq!(SearchProblem::new(3, vec![2]).unwrap().num_qubits_required(), 2);
        assert_eq!(SearchProblem::new(8, vec![6]).unwrap().num_qubits_required(), 4);
        assert_eq!(
            SearchProblem::new(16, vec![1, 3, 7, 15]).unwrap().num_qubits_required(),
            5
        );
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            SearchProblem::new(8, vec![]).unwrap_err(),
            AlgoError::NoMarkedItems
        );
        assert_eq!(
            SearchProblem::new(8, vec![10]).unwrap_err(),
            AlgoError::MarkedOutOfRange {
                marked: 10,
                size: 8
            }
        );
        assert_eq!(
            SearchProblem::new(2, vec![0, 2]).unwrap_err(),
            AlgoError::MarkedOutOfRange {
                marked: 2,
                size: 2
            }
        );
        assert_eq!(
            SearchProblem::new(0, vec![0]).unwrap_err(),
            AlgoError::MarkedOutOfRange {
                marked: 0,
                size: 0
            }
        );
        assert!(matches!(
            SearchProblem::new(1 << 30, vec![1]).unwrap_err(),
            AlgoError::SearchSpaceTooLarge { num_qubits: 31, .. }
        ));
    }

    #[test]
    fn test_duplicate_marks_merged() {
        let problem = SearchProblem::new(8, vec![5, 3, 5]).unwrap();
        assert_eq!(problem.marked(), &[3, 5]);
        assert!(problem.is_marked(5));
        assert!(!problem.is_marked(4));
    }

    #[test]
    fn test_optimal_iterations() {
        assert_eq!(SearchProblem::new(3, vec![1]).unwrap().optimal_iterations(), 1);
        // 16 states, one marked: π / (4 asin(1/4)) - 1/2 ≈ 2.61
        assert_eq!(SearchProblem::new(8, vec![6]).unwrap().optimal_iterations(), 3);
    }

    #[test]
    fn test_circuit_shape() {
        let problem = SearchProblem::new(8, vec![6]).unwrap();
        let zero = GroverCircuit::with_iterations(problem.clone(), 0).unwrap();
        assert_eq!(zero.circuit().len(), 4);

        let one = GroverCircuit::from_search_problem(problem).unwrap();
        assert_eq!(one.iterations(), 1);
        assert_eq!(one.circuit().num_qubits(), 4);
        assert!(one.circuit().gates().iter().all(|g| g.num_targets() <= 2));
    }

    #[test]
    fn test_four_state_register_single_iteration() {
        let grover =
            GroverCircuit::from_search_problem(SearchProblem::new(3, vec![2]).unwrap()).unwrap();
        let state = grover.final_state(&StatevectorEmulator::new()).unwrap();
        assert!((grover.success_probability(&state) - 1.0).abs() < 1e-10);
        assert_eq!(state.most_probable(1)[0].0, 2);
    }
}
