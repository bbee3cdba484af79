//! Ordered gate sequences.

use rustc_hash::FxHashSet;

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::layering::Layering;

/// A quantum circuit: gates in application order.
///
/// Qubits are identified by their integer positions; the circuit width is
/// one more than the largest target index referenced by any gate. The layer
/// schedule is maintained incrementally as gates are appended, so
/// [`depth`](Self::depth) and [`layers`](Self::layers) are cheap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Circuit {
    /// Gates in application order.
    gates: Vec<Gate>,
    /// Greedy layer schedule of `gates`.
    layering: Layering,
    /// Largest target index plus one.
    num_qubits: usize,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit from a sequence of gates.
    pub fn from_gates(gates: impl IntoIterator<Item = Gate>) -> Self {
        let mut circuit = Self::new();
        circuit.extend(gates);
        circuit
    }

    /// Append a gate.
    pub fn append(&mut self, gate: Gate) -> &mut Self {
        self.num_qubits = self.num_qubits.max(gate.max_target() + 1);
        self.layering.push(&gate);
        self.gates.push(gate);
        self
    }

    /// Append every gate of `other`, which must have the same width.
    pub fn concat(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        if other.num_qubits != self.num_qubits {
            return Err(IrError::ConcatSizeMismatch {
                left: self.num_qubits,
                right: other.num_qubits,
            });
        }
        self.extend(other.gates.iter().cloned());
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the gates in application order.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Check whether the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Number of qubits: largest target index plus one, or 0 when empty.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of distinct qubits touched by at least one gate.
    pub fn num_non_idle_qubits(&self) -> usize {
        self.gates
            .iter()
            .flat_map(|g| g.targets().iter().copied())
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Get the circuit depth (number of layers).
    pub fn depth(&self) -> usize {
        self.layering.depth()
    }

    /// Gate indices grouped into parallel layers.
    pub fn layers(&self) -> &[Vec<usize>] {
        self.layering.layers()
    }

    /// Get the full layer schedule.
    pub fn layering(&self) -> &Layering {
        &self.layering
    }

    /// Gates of one layer.
    pub fn layer_gates(&self, layer: usize) -> impl Iterator<Item = &Gate> + '_ {
        self.layering
            .layers()
            .get(layer)
            .into_iter()
            .flatten()
            .map(|&i| &self.gates[i])
    }
}

impl Extend<Gate> for Circuit {
    fn extend<T: IntoIterator<Item = Gate>>(&mut self, iter: T) {
        for gate in iter {
            self.append(gate);
        }
    }
}

impl FromIterator<Gate> for Circuit {
    fn from_iter<T: IntoIterator<Item = Gate>>(iter: T) -> Self {
        Self::from_gates(iter)
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter {
        self.gates.iter()
    }
}
