//! Error types for the algorithms crate.

use thiserror::Error;

/// Errors produced by circuit generation, QAOA and optimization.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// Random circuits need at least one qubit.
    #[error("Circuit width must be at least 1, got {0}")]
    InvalidWidth(usize),

    /// Two-qubit weight outside `[0, 1]`.
    #[error("Two-qubit gate weight must lie in [0, 1], got {0}")]
    InvalidWeight(f64),

    /// Hermitian entry bound is negative or not finite.
    #[error("Random matrix scale must be finite and non-negative, got {0}")]
    InvalidScale(f64),

    /// Graph with no vertices.
    #[error("Graph must have at least one vertex")]
    EmptyGraph,

    /// Edge endpoint outside the vertex range.
    #[error("Edge ({}, {}) references a vertex outside 0..{num_vertices}", edge.0, edge.1)]
    EdgeOutOfRange {
        /// The offending edge.
        edge: (usize, usize),
        /// Number of vertices in the graph.
        num_vertices: usize,
    },

    /// Edge from a vertex to itself.
    #[error("Edge ({0}, {0}) is a self loop")]
    SelfLoop(usize),

    /// QAOA needs at least one layer.
    #[error("QAOA requires at least one layer")]
    NoLayers,

    /// Wrong number of variational parameters.
    #[error("Expected {expected} parameters, got {got}")]
    ParameterCount {
        /// Required count.
        expected: usize,
        /// Supplied count.
        got: usize,
    },

    /// Optimizer started from an empty parameter vector.
    #[error("Cannot optimize over zero parameters")]
    EmptyParameters,

    /// Optimizer settings out of range.
    #[error("Invalid optimizer configuration: {0}")]
    InvalidOptimizerConfig(String),

    /// Diagonal phase list whose length is not a power of two of at least 2.
    #[error("Phase list length must be a power of two >= 2, got {0}")]
    InvalidPhaseCount(usize),

    /// Search problem without marked items.
    #[error("Search problem requires at least one marked item")]
    NoMarkedItems,

    /// Marked item outside the search space.
    #[error("Marked item {marked} is outside the search space 0..{size}")]
    MarkedOutOfRange {
        /// The offending item.
        marked: usize,
        /// Search space size.
        size: usize,
    },

    /// Search space needs more qubits than can be enumerated.
    #[error("Search space needs {num_qubits} qubits, at most {max} are supported")]
    SearchSpaceTooLarge {
        /// Qubits required.
        num_qubits: usize,
        /// Supported limit.
        max: usize,
    },

    /// Simulation error.
    #[error("Simulation error: {0}")]
    Sim(#[from] qlayer_sim::SimError),

    /// Circuit construction error.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] qlayer_ir::IrError),
}

/// Result type for algorithm operations.
pub type AlgoResult<T> = Result<T, AlgoError>;
