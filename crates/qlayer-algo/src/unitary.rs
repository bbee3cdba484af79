//! Random unitaries via the matrix exponential.
//!
//! A random unitary on `k` qubits is `exp(iA)` for a random Hermitian `A`
//! whose real and imaginary parts are drawn uniformly from `[-scale, scale]`.
//! The exponential uses scaling and squaring around a truncated Taylor
//! series:
//!
//! ```text
//! exp(M) = exp(M / 2^s)^(2^s),   ‖M / 2^s‖₁ ≤ 1/2
//! ```

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;

use qlayer_ir::GateMatrix;

/// Norm bound of the scaled matrix fed to the Taylor series.
const SCALED_NORM: f64 = 0.5;

/// Upper bound on Taylor terms; convergence usually stops far earlier.
const MAX_TAYLOR_TERMS: usize = 30;

/// Maximum absolute column sum.
fn one_norm(matrix: &GateMatrix) -> f64 {
    matrix
        .columns()
        .into_iter()
        .map(|column| column.iter().map(|v| v.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}

/// Matrix exponential `exp(M)` of a square complex matrix.
pub fn expm(matrix: &GateMatrix) -> GateMatrix {
    let dim = matrix.nrows();
    let norm = one_norm(matrix);
    let squarings = if norm > SCALED_NORM {
        (norm / SCALED_NORM).log2().ceil() as i32
    } else {
        0
    };
    let scaled = matrix.mapv(|v| v * 2f64.powi(-squarings));

    let mut result: GateMatrix = Array2::eye(dim);
    let mut term: GateMatrix = Array2::eye(dim);
    for k in 1..=MAX_TAYLOR_TERMS {
        term = term.dot(&scaled).mapv(|v| v / k as f64);
        result += &term;
        if one_norm(&term) < f64::EPSILON {
            break;
        }
    }

    for _ in 0..squarings {
        result = result.dot(&result);
    }
    result
}

/// Random Hermitian matrix of dimension `dim`.
///
/// Entries are drawn row by row over the upper triangle: the real diagonal
/// entry first, then real and imaginary parts of each off-diagonal entry.
pub fn random_hermitian<R: Rng + ?Sized>(dim: usize, scale: f64, rng: &mut R) -> GateMatrix {
    let mut matrix = Array2::zeros((dim, dim));
    for i in 0..dim {
        matrix[[i, i]] = Complex64::new(rng.gen_range(-scale..=scale), 0.0);
        for j in i + 1..dim {
            let entry = Complex64::new(
                rng.gen_range(-scale..=scale),
                rng.gen_range(-scale..=scale),
            );
            matrix[[i, j]] = entry;
            matrix[[j, i]] = entry.conj();
        }
    }
    matrix
}

/// Random `2^num_targets`-dimensional unitary `exp(iA)`.
pub fn random_unitary<R: Rng + ?Sized>(num_targets: usize, scale: f64, rng: &mut R) -> GateMatrix {
    let hermitian = random_hermitian(1 << num_targets, scale, rng);
    expm(&hermitian.mapv(|v| v * Complex64::i()))
}
