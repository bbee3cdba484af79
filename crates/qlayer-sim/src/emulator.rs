//! Gate and circuit application.
//!
//! [`Emulator`] is the seam shared by every engine: a statevector engine
//! computes amplitudes itself, while an alternate engine could forward the
//! same calls to an external reference simulator for cross-checking. Every
//! call is a pure function from `(gate or circuit, input state)` to a freshly
//! allocated output state; the input is never modified.
//!
//! ```rust
//! use qlayer_ir::{Gate, library};
//! use qlayer_sim::{Emulator, StateVector, StatevectorEmulator};
//!
//! let emulator = StatevectorEmulator::new();
//! let zero = StateVector::from_qubit_count(1).unwrap();
//! let x = Gate::single("x", 0, library::x()).unwrap();
//!
//! let one = emulator.apply_gate(&x, &zero).unwrap();
//! assert_eq!(one.get(1).re, 1.0);
//! assert_eq!(zero.get(0).re, 1.0);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use qlayer_ir::{Circuit, Gate, GateMatrix};

use crate::bits::{bit, local_pair_index, replace_bit, scatter_pair};
use crate::error::{SimError, SimResult};
use crate::statevector::StateVector;

/// Largest register the engine accepts by default.
pub const DEFAULT_MAX_QUBITS: usize = 24;

/// An engine that evolves state vectors under gates and circuits.
pub trait Emulator: Send + Sync {
    /// Engine name for diagnostics.
    fn name(&self) -> &str;

    /// Largest state width this engine accepts.
    fn max_qubits(&self) -> usize {
        usize::MAX
    }

    /// Refuse a register wider than [`Emulator::max_qubits`].
    ///
    /// Callers building an input state should check first, so an oversized
    /// register fails before its amplitudes are allocated.
    fn check_register(&self, num_qubits: usize) -> SimResult<()> {
        let max = self.max_qubits();
        if num_qubits > max {
            return Err(SimError::RegisterTooLarge { num_qubits, max });
        }
        Ok(())
    }

    /// Apply one gate, returning a new state.
    fn apply_gate(&self, gate: &Gate, state: &StateVector) -> SimResult<StateVector>;

    /// Apply a circuit's gates in stored order, returning a new state.
    ///
    /// The circuit width must equal the state width. No reordering or fusion
    /// is performed.
    fn apply_circuit(&self, circuit: &Circuit, state: &StateVector) -> SimResult<StateVector> {
        if circuit.num_qubits() != state.num_qubits() {
            return Err(SimError::SizeMismatch {
                circuit: circuit.num_qubits(),
                state: state.num_qubits(),
            });
        }

        debug!(
            emulator = self.name(),
            gates = circuit.len(),
            qubits = circuit.num_qubits(),
            depth = circuit.depth(),
            "applying circuit"
        );

        let mut gates = circuit.gates().iter();
        let Some(first) = gates.next() else {
            return Ok(state.clone());
        };
        let mut current = self.apply_gate(first, state)?;
        for gate in gates {
            current = self.apply_gate(gate, &current)?;
        }
        Ok(current)
    }
}

/// Emulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Largest state width accepted.
    pub max_qubits: usize,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        Self {
            max_qubits: DEFAULT_MAX_QUBITS,
        }
    }
}

/// Dense statevector engine applying gate matrices directly.
///
/// Supports gates with one or two targets; wider gates must be decomposed by
/// the caller. Work per gate is linear in the state length.
#[derive(Debug, Clone, Default)]
pub struct StatevectorEmulator {
    config: EmulatorConfig,
}

impl StatevectorEmulator {
    /// Create an emulator with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an emulator with the given configuration.
    pub fn with_config(config: EmulatorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &EmulatorConfig {
        &self.config
    }

    fn check_operands(&self, gate: &Gate, state: &StateVector) -> SimResult<()> {
        let num_qubits = state.num_qubits();
        self.check_register(num_qubits)?;
        if gate.targets().iter().any(|&t| t >= num_qubits) {
            return Err(SimError::OperandOutOfBounds {
                gate_name: gate.name().to_string(),
                targets: gate.targets().to_vec(),
                num_qubits,
            });
        }
        Ok(())
    }
}

impl Emulator for StatevectorEmulator {
    fn name(&self) -> &str {
        "statevector"
    }

    fn max_qubits(&self) -> usize {
        self.config.max_qubits
    }

    fn apply_gate(&self, gate: &Gate, state: &StateVector) -> SimResult<StateVector> {
        self.check_operands(gate, state)?;

        trace!(
            gate = gate.name(),
            targets = ?gate.targets(),
            qubits = state.num_qubits(),
            "applying gate"
        );

        let input = state.amplitudes();
        let mut output = StateVector::zeroed(state.num_qubits())?;
        match *gate.targets() {
            [target] => apply_single(gate.matrix(), target, input, &mut output),
            [first, second] => apply_pair(gate.matrix(), first, second, input, &mut output),
            _ => {
                return Err(SimError::UnsupportedOperandCount {
                    gate_name: gate.name().to_string(),
                    got: gate.num_targets(),
                });
            }
        }
        Ok(output)
    }
}

/// `out[idx] = Σ_i in[idx with target bit = i] · m[bit(idx, target)][i]`.
fn apply_single(matrix: &GateMatrix, target: usize, input: &[Complex64], output: &mut StateVector) {
    for idx in 0..input.len() {
        let row = bit(idx, target);
        output[idx] = input[replace_bit(idx, target, false)] * matrix[[row, 0]]
            + input[replace_bit(idx, target, true)] * matrix[[row, 1]];
    }
}

/// Two-target analogue of [`apply_single`] over the packed local index.
fn apply_pair(
    matrix: &GateMatrix,
    first: usize,
    second: usize,
    input: &[Complex64],
    output: &mut StateVector,
) {
    for idx in 0..input.len() {
        let bra = local_pair_index(idx, first, second);
        output[idx] = (0..4)
            .map(|ket| input[scatter_pair(idx, first, second, ket)] * matrix[[bra, ket]])
            .sum();
    }
}
