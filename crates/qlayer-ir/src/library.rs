//! Standard gate matrices and small matrix helpers.
//!
//! Two-target matrices are written in the local basis `2 * bit(t2) + bit(t1)`
//! where `t1` is the first listed target. The controlled gates below
//! therefore expect the control as the first target:
//!
//! ```rust
//! use qlayer_ir::{Gate, library};
//!
//! // Control on qubit 2, target qubit 0.
//! let cx = Gate::pair("cx", 2, 0, library::cx()).unwrap();
//! assert_eq!(cx.targets(), &[2, 0]);
//! ```
//!
//! Rotations follow `R_P(θ) = exp(iθP/2)`, i.e. `rx(θ)` has `+i sin(θ/2)`
//! off the diagonal and `rz(θ) = diag(e^{iθ/2}, e^{-iθ/2})`.

use std::f64::consts::FRAC_1_SQRT_2;
use std::f64::consts::PI;

use ndarray::{Array2, array};
use num_complex::Complex64;

use crate::gate::GateMatrix;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

fn re(value: f64) -> Complex64 {
    Complex64::new(value, 0.0)
}

/// Identity on `num_targets` qubits.
pub fn identity(num_targets: usize) -> GateMatrix {
    Array2::eye(1 << num_targets)
}

/// Pauli-X.
pub fn x() -> GateMatrix {
    array![[ZERO, ONE], [ONE, ZERO]]
}

/// Pauli-Y.
pub fn y() -> GateMatrix {
    array![[ZERO, -I], [I, ZERO]]
}

/// Pauli-Z.
pub fn z() -> GateMatrix {
    array![[ONE, ZERO], [ZERO, -ONE]]
}

/// Hadamard.
pub fn h() -> GateMatrix {
    let s = re(FRAC_1_SQRT_2);
    array![[s, s], [s, -s]]
}

/// S gate (sqrt(Z)).
pub fn s() -> GateMatrix {
    array![[ONE, ZERO], [ZERO, I]]
}

/// T gate (fourth root of Z).
pub fn t() -> GateMatrix {
    array![[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, PI / 4.0)]]
}

/// X rotation, `exp(iθX/2)`.
pub fn rx(theta: f64) -> GateMatrix {
    let c = re((theta / 2.0).cos());
    let s = I * (theta / 2.0).sin();
    array![[c, s], [s, c]]
}

/// Y rotation, `exp(iθY/2)`.
pub fn ry(theta: f64) -> GateMatrix {
    let c = re((theta / 2.0).cos());
    let s = re((theta / 2.0).sin());
    array![[c, s], [-s, c]]
}

/// Z rotation, `exp(iθZ/2)`.
pub fn rz(theta: f64) -> GateMatrix {
    array![
        [Complex64::from_polar(1.0, theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, -theta / 2.0)]
    ]
}

/// Controlled-X, control on the first target.
pub fn cx() -> GateMatrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ONE, ZERO, ZERO]
    ]
}

/// Alias of [`cx`].
pub fn cnot() -> GateMatrix {
    cx()
}

/// Controlled-Y, control on the first target.
pub fn cy() -> GateMatrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ZERO, -I],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, I, ZERO, ZERO]
    ]
}

/// Controlled-Z (symmetric in its targets).
pub fn cz() -> GateMatrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ZERO, ZERO, -ONE]
    ]
}

/// SWAP.
pub fn swap() -> GateMatrix {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, ONE, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE]
    ]
}

/// Conjugate transpose.
pub fn dagger(matrix: &GateMatrix) -> GateMatrix {
    matrix.t().mapv(|v| v.conj())
}

/// Kronecker product `a ⊗ b`.
///
/// With the two-target packing, `kron(v, u)` on targets `[t1, t2]` applies
/// `u` to `t1` and `v` to `t2`.
pub fn kron(a: &GateMatrix, b: &GateMatrix) -> GateMatrix {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(i, j)| {
        a[[i / br, j / bc]] * b[[i % br, j % bc]]
    })
}

/// Check `U†U = I` within `tol` (max-abs entrywise).
pub fn is_unitary(matrix: &GateMatrix, tol: f64) -> bool {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return false;
    }
    let product = dagger(matrix).dot(matrix);
    product
        .indexed_iter()
        .all(|((i, j), v)| (v - if i == j { ONE } else { ZERO }).norm() <= tol)
}
