//! Error types for the simulation crate.

use thiserror::Error;

/// Errors produced while building state vectors or applying gates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SimError {
    /// Amplitude list length is not a power of two of at least 2.
    #[error("State vector length must be a power of two >= 2, got {0}")]
    InvalidLength(usize),

    /// Requested qubit count is zero or too large to address.
    #[error("Number of qubits must be a positive integer below the address width, got {0}")]
    InvalidQubitCount(usize),

    /// Replacement buffer does not match the current state length.
    #[error("New amplitude buffer has length {got}, expected {expected}")]
    AmplitudeLengthMismatch {
        /// Current state length.
        expected: usize,
        /// Length of the rejected buffer.
        got: usize,
    },

    /// Amplitude index outside the state.
    #[error("Amplitude index {index} out of range for state of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// State length.
        len: usize,
    },

    /// Gate addresses a qubit the register does not have.
    #[error(
        "Operation '{gate_name}' attempted to access indices {targets:?} on a register of size {num_qubits}"
    )]
    OperandOutOfBounds {
        /// Name of the gate.
        gate_name: String,
        /// The gate's targets.
        targets: Vec<usize>,
        /// Register size.
        num_qubits: usize,
    },

    /// Gate has more targets than the engine applies directly.
    #[error(
        "Operation '{gate_name}' received {got} qubits, but a maximum of 2 is supported; decompose the gate first"
    )]
    UnsupportedOperandCount {
        /// Name of the gate.
        gate_name: String,
        /// Number of targets supplied.
        got: usize,
    },

    /// Circuit and state vector widths disagree.
    #[error("Circuit acts on {circuit} qubits but the state vector has {state}")]
    SizeMismatch {
        /// Circuit width.
        circuit: usize,
        /// State width.
        state: usize,
    },

    /// State is wider than the emulator is configured to handle.
    #[error("State has {num_qubits} qubits, emulator limit is {max}")]
    RegisterTooLarge {
        /// State width.
        num_qubits: usize,
        /// Configured limit.
        max: usize,
    },

    /// Bit positions and bit values of different lengths.
    #[error("Got {positions} bit positions but {values} values")]
    BitCountMismatch {
        /// Number of positions.
        positions: usize,
        /// Number of values.
        values: usize,
    },

    /// Circuit construction error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qlayer_ir::IrError),
}

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
