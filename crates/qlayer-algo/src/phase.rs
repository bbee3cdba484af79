//! Diagonal unitaries as CNOT + RZ circuits.
//!
//! A diagonal unitary `diag(e^{iφ(x)})` on `n` qubits is a phase polynomial.
//! Expanding `φ` in the Walsh basis,
//!
//! ```text
//! φ(x) = Σ_S a_S (-1)^{parity(x & S)},   a_S = 2^-n Σ_x φ(x) (-1)^{parity(x & S)}
//! ```
//!
//! each non-empty `S` becomes one RZ(2·a_S) on the highest qubit `t` of `S`
//! while that qubit holds the parity of `S`. For a fixed `t` the lower parts
//! of `S` are visited in Gray-code order, so each step costs one CNOT. The
//! empty set is a global phase, emitted as a scalar gate on qubit 0 so the
//! circuit is exact rather than exact up to phase.

use num_complex::Complex64;

use qlayer_ir::{Circuit, Gate, library};

use crate::error::{AlgoError, AlgoResult};

/// Coefficients below this magnitude emit no rotation.
const COEFFICIENT_EPS: f64 = 1e-12;

/// Build a circuit of one- and two-qubit gates implementing
/// `diag(e^{i·phases[0]}, e^{i·phases[1]}, …)`.
///
/// `phases.len()` must be `2^n` with `n ≥ 1`; index `x` is the basis state
/// whose bit `q` is qubit `q`.
pub fn diagonal_circuit(phases: &[f64]) -> AlgoResult<Circuit> {
    let len = phases.len();
    if len < 2 || !len.is_power_of_two() {
        return Err(AlgoError::InvalidPhaseCount(len));
    }
    let num_qubits = len.trailing_zeros() as usize;
    let coefficients = walsh_coefficients(phases);

    let mut circuit = Circuit::new();
    let global = coefficients[0];
    if global.abs() > COEFFICIENT_EPS {
        let scalar = library::identity(1).mapv(|v| v * Complex64::from_polar(1.0, global));
        circuit.append(Gate::single("phase", 0, scalar)?);
    }

    for top in 0..num_qubits {
        let high = 1usize << top;
        rotate(&mut circuit, top, coefficients[high])?;

        let lower_subsets = 1usize << top;
        for step in 1..lower_subsets {
            let control = step.trailing_zeros() as usize;
            circuit.append(Gate::pair("cnot", control, top, library::cnot())?);
            let gray = step ^ (step >> 1);
            rotate(&mut circuit, top, coefficients[high | gray])?;
        }
        if top > 0 {
            // Gray sequence ends on the single highest lower bit.
            circuit.append(Gate::pair("cnot", top - 1, top, library::cnot())?);
        }
    }

    Ok(circuit)
}

fn rotate(circuit: &mut Circuit, qubit: usize, coefficient: f64) -> AlgoResult<()> {
    if coefficient.abs() > COEFFICIENT_EPS {
        circuit.append(Gate::single("rz", qubit, library::rz(2.0 * coefficient))?);
    }
    Ok(())
}

/// Normalized fast Walsh-Hadamard transform.
fn walsh_coefficients(phases: &[f64]) -> Vec<f64> {
    let mut coefficients = phases.to_vec();
    let mut half = 1;
    while half < coefficients.len() {
        for block in coefficients.chunks_exact_mut(2 * half) {
            let (left, right) = block.split_at_mut(half);
            for (a, b) in left.iter_mut().zip(right.iter_mut()) {
                let (sum, diff) = (*a + *b, *a - *b);
                *a = sum;
                *b = diff;
            }
        }
        half *= 2;
    }
    let scale = phases.len() as f64;
    coefficients.iter_mut().for_each(|c| *c /= scale);
    coefficients
}
