//! Greedy layer scheduling.
//!
//! Gates are placed one at a time, in circuit order, into the earliest layer
//! after the last layer used by any of their targets. Because every qubit's
//! gates are totally ordered by the circuit, this yields the minimum number
//! of layers under that ordering: no gate can start earlier without moving
//! ahead of a predecessor on one of its qubits.
//!
//! ```text
//!   q0: ─[g0]───────[g2]─
//!   q1: ─[g1]────────────
//!
//!   layers = [[g0, g1], [g2]]
//! ```

use crate::gate::Gate;

/// Partition of a gate sequence into parallel layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layering {
    /// Gate indices per layer, in circuit order within each layer.
    layers: Vec<Vec<usize>>,
    /// Layer assigned to each gate.
    assignment: Vec<usize>,
    /// Next free layer per qubit, indexed by qubit position.
    next_free: Vec<usize>,
}

impl Layering {
    /// Create an empty layering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the layering of a gate sequence.
    pub fn from_gates<'a>(gates: impl IntoIterator<Item = &'a Gate>) -> Self {
        let mut layering = Self::new();
        for gate in gates {
            layering.push(gate);
        }
        layering
    }

    /// Schedule the next gate in sequence and return its layer.
    pub fn push(&mut self, gate: &Gate) -> usize {
        self.push_targets(gate.targets())
    }

    fn push_targets(&mut self, targets: &[usize]) -> usize {
        if let Some(&max) = targets.iter().max() {
            if max >= self.next_free.len() {
                self.next_free.resize(max + 1, 0);
            }
        }

        let layer = targets
            .iter()
            .map(|&q| self.next_free[q])
            .max()
            .unwrap_or(0);

        if layer == self.layers.len() {
            self.layers.push(Vec::new());
        }

        let index = self.assignment.len();
        self.layers[layer].push(index);
        self.assignment.push(layer);

        for &q in targets {
            self.next_free[q] = layer + 1;
        }

        layer
    }

    /// Get the layers as lists of gate indices.
    pub fn layers(&self) -> &[Vec<usize>] {
        &self.layers
    }

    /// Consume the layering and return the layers.
    pub fn into_layers(self) -> Vec<Vec<usize>> {
        self.layers
    }

    /// Number of layers.
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Number of scheduled gates.
    pub fn num_gates(&self) -> usize {
        self.assignment.len()
    }

    /// Layer holding the gate at `gate_index`, if scheduled.
    pub fn layer_of(&self, gate_index: usize) -> Option<usize> {
        self.assignment.get(gate_index).copied()
    }

    /// Number of layers a qubit participates in up to its last gate.
    pub fn qubit_depth(&self, qubit: usize) -> usize {
        self.next_free.get(qubit).copied().unwrap_or(0)
    }
}
