//! Dense state vectors.

use std::ops::{Index, IndexMut};

use num_complex::Complex64;

use crate::error::{SimError, SimResult};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Amplitudes of an n-qubit pure state.
///
/// Holds `2^n` complex numbers (`n >= 1`). Bit `q` of an amplitude's index is
/// qubit `q`'s basis value, qubit 0 being the least-significant bit.
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl StateVector {
    /// Create a state from explicit amplitudes.
    ///
    /// The length must be a power of two and at least 2. Amplitudes are
    /// taken as given; no normalization is applied.
    pub fn from_amplitudes(amplitudes: impl Into<Vec<Complex64>>) -> SimResult<Self> {
        let amplitudes = amplitudes.into();
        let len = amplitudes.len();
        if len < 2 || !len.is_power_of_two() {
            return Err(SimError::InvalidLength(len));
        }
        Ok(Self {
            num_qubits: len.trailing_zeros() as usize,
            amplitudes,
        })
    }

    /// Create a state from real amplitudes.
    pub fn from_real(amplitudes: &[f64]) -> SimResult<Self> {
        Self::from_amplitudes(
            amplitudes
                .iter()
                .map(|&a| Complex64::new(a, 0.0))
                .collect::<Vec<_>>(),
        )
    }

    /// Create the all-zero basis state |0...0⟩ on `num_qubits` qubits.
    pub fn from_qubit_count(num_qubits: usize) -> SimResult<Self> {
        let mut state = Self::zeroed(num_qubits)?;
        state.amplitudes[0] = ONE;
        Ok(state)
    }

    /// Create the basis state |index⟩ on `num_qubits` qubits.
    pub fn basis(num_qubits: usize, index: usize) -> SimResult<Self> {
        let mut state = Self::zeroed(num_qubits)?;
        state.try_set(index, ONE)?;
        Ok(state)
    }

    /// All-zero amplitude buffer of the given width.
    pub(crate) fn zeroed(num_qubits: usize) -> SimResult<Self> {
        if num_qubits == 0 || num_qubits >= usize::BITS as usize {
            return Err(SimError::InvalidQubitCount(num_qubits));
        }
        let len = 1usize << num_qubits;
        let mut amplitudes = Vec::new();
        amplitudes
            .try_reserve_exact(len)
            .map_err(|_| SimError::InvalidQubitCount(num_qubits))?;
        amplitudes.resize(len, ZERO);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, `2^num_qubits`.
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false: a state holds at least two amplitudes.
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Amplitude at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`; see [`try_get`](Self::try_get).
    pub fn get(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// Overwrite the amplitude at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`; see [`try_set`](Self::try_set).
    pub fn set(&mut self, index: usize, amplitude: Complex64) {
        self.amplitudes[index] = amplitude;
    }

    /// Amplitude at `index`, or an error when out of range.
    pub fn try_get(&self, index: usize) -> SimResult<Complex64> {
        self.amplitudes
            .get(index)
            .copied()
            .ok_or(SimError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Overwrite the amplitude at `index`, or fail when out of range.
    pub fn try_set(&mut self, index: usize, amplitude: Complex64) -> SimResult<()> {
        let len = self.len();
        let slot = self
            .amplitudes
            .get_mut(index)
            .ok_or(SimError::IndexOutOfRange { index, len })?;
        *slot = amplitude;
        Ok(())
    }

    /// Get all amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Replace the whole amplitude buffer; the length must not change.
    pub fn set_amplitudes(&mut self, amplitudes: impl Into<Vec<Complex64>>) -> SimResult<()> {
        let amplitudes = amplitudes.into();
        if amplitudes.len() != self.len() {
            return Err(SimError::AmplitudeLengthMismatch {
                expected: self.len(),
                got: amplitudes.len(),
            });
        }
        self.amplitudes = amplitudes;
        Ok(())
    }

    /// Consume the state and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Squared norm, `⟨ψ|ψ⟩`.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Measurement probabilities in the computational basis.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Inner product `⟨self|other⟩`.
    pub fn inner(&self, other: &StateVector) -> SimResult<Complex64> {
        if other.len() != self.len() {
            return Err(SimError::AmplitudeLengthMismatch {
                expected: self.len(),
                got: other.len(),
            });
        }
        Ok(self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Entrywise comparison within `tol`. States of different width are never equal.
    pub fn approx_eq(&self, other: &StateVector, tol: f64) -> bool {
        self.num_qubits == other.num_qubits
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    /// Bitstring of a basis index, qubit 0 first.
    pub fn basis_label(&self, index: usize) -> String {
        (0..self.num_qubits)
            .map(|q| if (index >> q) & 1 == 1 { '1' } else { '0' })
            .collect()
    }

    /// The `count` most probable basis indices with their probabilities.
    pub fn most_probable(&self, count: usize) -> Vec<(usize, f64)> {
        let mut ranked: Vec<(usize, f64)> = self.probabilities().into_iter().enumerate().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(count);
        ranked
    }
}

impl Index<usize> for StateVector {
    type Output = Complex64;

    fn index(&self, index: usize) -> &Complex64 {
        &self.amplitudes[index]
    }
}

impl IndexMut<usize> for StateVector {
    fn index_mut(&mut self, index: usize) -> &mut Complex64 {
        &mut self.amplitudes[index]
    }
}

impl TryFrom<Vec<Complex64>> for StateVector {
    type Error = SimError;

    fn try_from(amplitudes: Vec<Complex64>) -> SimResult<Self> {
        Self::from_amplitudes(amplitudes)
    }
}
