//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur while building gates and circuits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate matrix has a different number of rows and columns.
    #[error("Gate matrix must be square, got {rows}x{cols}")]
    MatrixNotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Gate matrix dimension does not match the number of targets.
    #[error(
        "Matrix size mismatch: expected {expected}x{expected} for {num_targets} targets, got {got}x{got}"
    )]
    MatrixSizeMismatch {
        /// Expected dimension, 2^num_targets.
        expected: usize,
        /// Actual dimension.
        got: usize,
        /// Number of target qubits.
        num_targets: usize,
    },

    /// Gate was given no target qubits.
    #[error("Gate requires at least one target qubit")]
    NoTargets,

    /// Same qubit listed twice in a gate's targets.
    #[error("Duplicate target qubit {target} in gate")]
    DuplicateTarget {
        /// The repeated qubit index.
        target: usize,
    },

    /// Circuits of different widths cannot be concatenated.
    #[error("Cannot concatenate circuits of {left} and {right} qubits")]
    ConcatSizeMismatch {
        /// Width of the receiving circuit.
        left: usize,
        /// Width of the appended circuit.
        right: usize,
    },
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
