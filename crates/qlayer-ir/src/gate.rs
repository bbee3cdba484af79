//! Matrix-defined quantum gates.

use std::fmt;
use std::sync::Arc;

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{IrError, IrResult};

/// Dense complex matrix describing a gate's action on its targets.
pub type GateMatrix = Array2<Complex64>;

/// Name given to gates constructed without one.
pub const DEFAULT_GATE_NAME: &str = "custom";

/// An immutable unitary applied to an ordered list of target qubits.
///
/// Target order is significant: for a two-target gate `[t1, t2]` the matrix
/// row/column index is `2 * bit(t2) + bit(t1)`, so `[0, 1]` and `[1, 0]`
/// describe different operations unless the matrix is swap-symmetric.
///
/// The matrix is reference counted, so cloning a gate (for example when the
/// same gate is appended to several circuits) does not copy it.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    name: String,
    targets: Vec<usize>,
    matrix: Arc<GateMatrix>,
}

impl Gate {
    /// Create a gate acting on `targets` with the given matrix.
    ///
    /// The matrix must be square with dimension `2^targets.len()`. Targets
    /// must be non-empty and distinct.
    pub fn new(
        targets: impl Into<Vec<usize>>,
        matrix: GateMatrix,
        name: Option<&str>,
    ) -> IrResult<Self> {
        let targets = targets.into();
        let (rows, cols) = matrix.dim();

        if rows != cols {
            return Err(IrError::MatrixNotSquare { rows, cols });
        }

        if targets.is_empty() {
            return Err(IrError::NoTargets);
        }

        let expected = u32::try_from(targets.len())
            .ok()
            .and_then(|k| 1usize.checked_shl(k))
            .unwrap_or(0);
        if rows != expected {
            return Err(IrError::MatrixSizeMismatch {
                expected,
                got: rows,
                num_targets: targets.len(),
            });
        }

        for (i, &target) in targets.iter().enumerate() {
            if targets[..i].contains(&target) {
                return Err(IrError::DuplicateTarget { target });
            }
        }

        Ok(Self {
            name: name.unwrap_or(DEFAULT_GATE_NAME).to_string(),
            targets,
            matrix: Arc::new(matrix),
        })
    }

    /// Create a named gate.
    pub fn named(
        name: &str,
        targets: impl Into<Vec<usize>>,
        matrix: GateMatrix,
    ) -> IrResult<Self> {
        Self::new(targets, matrix, Some(name))
    }

    /// Create a single-target gate.
    pub fn single(name: &str, target: usize, matrix: GateMatrix) -> IrResult<Self> {
        Self::new(vec![target], matrix, Some(name))
    }

    /// Create a two-target gate. `first` supplies the low bit of the local index.
    pub fn pair(name: &str, first: usize, second: usize, matrix: GateMatrix) -> IrResult<Self> {
        Self::new(vec![first, second], matrix, Some(name))
    }

    /// Get the gate name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the target qubits in the order they were supplied.
    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    /// Get the number of target qubits.
    pub fn num_targets(&self) -> usize {
        self.targets.len()
    }

    /// Get the gate matrix.
    pub fn matrix(&self) -> &GateMatrix {
        &self.matrix
    }

    /// Get the matrix dimension (`2^num_targets`).
    pub fn matrix_size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Largest target index.
    pub fn max_target(&self) -> usize {
        self.targets.iter().copied().max().unwrap_or(0)
    }

    /// Check whether the gate touches a qubit.
    pub fn acts_on(&self, qubit: usize) -> bool {
        self.targets.contains(&qubit)
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Gate(name={}, targets={:?}, matrix_size={})",
            self.name,
            self.targets,
            self.matrix_size()
        )
    }
}
