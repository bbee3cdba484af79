//! Nelder-Mead simplex minimization.
//!
//! Gradient-free, which suits expectation values computed by simulation:
//! the objective is only ever evaluated, never differentiated.
//!
//! ```rust
//! use qlayer_algo::{NelderMead, NelderMeadConfig};
//!
//! let optimizer = NelderMead::new(NelderMeadConfig::default());
//! let result = optimizer
//!     .minimize(|x| Ok((x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2)), &[0.0, 0.0])
//!     .unwrap();
//! assert!(result.converged);
//! assert!((result.parameters[0] - 3.0).abs() < 1e-3);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{AlgoError, AlgoResult};

/// Configuration for the Nelder-Mead optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NelderMeadConfig {
    /// Maximum number of iterations.
    pub max_iterations: usize,

    /// Convergence tolerance on both the spread of objective values and the
    /// distance of every vertex from the best one.
    pub tolerance: f64,

    /// Offset along each axis used to build the initial simplex.
    pub initial_step: f64,

    /// Reflection coefficient (default: 1.0)
    pub alpha: f64,

    /// Expansion coefficient (default: 2.0)
    pub gamma: f64,

    /// Contraction coefficient (default: 0.5)
    pub rho: f64,

    /// Shrink coefficient (default: 0.5)
    pub sigma: f64,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: 1e-8,
            initial_step: 0.5,
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            sigma: 0.5,
        }
    }
}

impl NelderMeadConfig {
    /// Check coefficient ranges.
    pub fn validate(&self) -> AlgoResult<()> {
        let invalid = |msg: &str| Err(AlgoError::InvalidOptimizerConfig(msg.to_string()));
        if !(self.tolerance > 0.0) {
            return invalid("tolerance must be positive");
        }
        if !self.initial_step.is_finite() || self.initial_step == 0.0 {
            return invalid("initial_step must be finite and non-zero");
        }
        if !(self.alpha > 0.0) {
            return invalid("alpha must be positive");
        }
        if !(self.gamma > 1.0) {
            return invalid("gamma must exceed 1");
        }
        if !(self.rho > 0.0 && self.rho < 1.0) {
            return invalid("rho must lie in (0, 1)");
        }
        if !(self.sigma > 0.0 && self.sigma < 1.0) {
            return invalid("sigma must lie in (0, 1)");
        }
        Ok(())
    }
}

/// Outcome of a minimization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Best parameters found.
    pub parameters: Vec<f64>,
    /// Objective value at `parameters`.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration limit.
    pub converged: bool,
    /// Objective evaluations performed.
    pub evaluations: usize,
}

/// Nelder-Mead simplex optimizer.
#[derive(Debug, Clone, Default)]
pub struct NelderMead {
    config: NelderMeadConfig,
}

impl NelderMead {
    /// Create an optimizer with the given configuration.
    pub fn new(config: NelderMeadConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &NelderMeadConfig {
        &self.config
    }

    /// Minimize `objective` starting from `initial`.
    ///
    /// Objective errors abort the run. NaN values are treated as `+∞`.
    pub fn minimize<F>(&self, mut objective: F, initial: &[f64]) -> AlgoResult<OptimizationResult>
    where
        F: FnMut(&[f64]) -> AlgoResult<f64>,
    {
        self.config.validate()?;
        if initial.is_empty() {
            return Err(AlgoError::EmptyParameters);
        }

        let n = initial.len();
        let mut evaluations = 0;
        let mut evaluate = |x: &[f64]| -> AlgoResult<f64> {
            evaluations += 1;
            let value = objective(x)?;
            Ok(if value.is_nan() { f64::INFINITY } else { value })
        };

        let mut simplex = self.initialize_simplex(initial);
        let mut values = simplex
            .iter()
            .map(|vertex| evaluate(vertex.as_slice()))
            .collect::<AlgoResult<Vec<f64>>>()?;

        let mut iterations = 0;
        let mut converged = false;
        loop {
            sort_simplex(&mut simplex, &mut values);
            if self.has_converged(&simplex, &values) {
                converged = true;
                break;
            }
            if iterations >= self.config.max_iterations {
                break;
            }
            iterations += 1;

            trace!(iteration = iterations, best = values[0], "nelder-mead step");

            let centroid = centroid(&simplex[..n]);
            let worst = &simplex[n];

            let reflected = towards(&centroid, worst, -self.config.alpha);
            let reflected_value = evaluate(&reflected)?;

            if reflected_value < values[0] {
                let expanded = towards(&centroid, &reflected, self.config.gamma);
                let expanded_value = evaluate(&expanded)?;
                if expanded_value < reflected_value {
                    simplex[n] = expanded;
                    values[n] = expanded_value;
                } else {
                    simplex[n] = reflected;
                    values[n] = reflected_value;
                }
                continue;
            }

            if reflected_value < values[n - 1] {
                simplex[n] = reflected;
                values[n] = reflected_value;
                continue;
            }

            if reflected_value < values[n] {
                let contracted = towards(&centroid, &reflected, self.config.rho);
                let contracted_value = evaluate(&contracted)?;
                if contracted_value <= reflected_value {
                    simplex[n] = contracted;
                    values[n] = contracted_value;
                    continue;
                }
            } else {
                let contracted = towards(&centroid, worst, self.config.rho);
                let contracted_value = evaluate(&contracted)?;
                if contracted_value < values[n] {
                    simplex[n] = contracted;
                    values[n] = contracted_value;
                    continue;
                }
            }

            let (best, rest) = simplex.split_at_mut(1);
            for (vertex, value) in rest.iter_mut().zip(&mut values[1..]) {
                *vertex = towards(&best[0], vertex, self.config.sigma);
                *value = evaluate(vertex.as_slice())?;
            }
        }

        debug!(
            iterations,
            evaluations,
            converged,
            value = values[0],
            "nelder-mead finished"
        );

        Ok(OptimizationResult {
            parameters: simplex.swap_remove(0),
            value: values[0],
            iterations,
            converged,
            evaluations,
        })
    }

    /// `initial` plus one vertex per axis offset by `initial_step`.
    fn initialize_simplex(&self, initial: &[f64]) -> Vec<Vec<f64>> {
        let mut simplex = vec![initial.to_vec()];
        for axis in 0..initial.len() {
            let mut vertex = initial.to_vec();
            vertex[axis] += self.config.initial_step;
            simplex.push(vertex);
        }
        simplex
    }

    /// Expects a sorted simplex.
    fn has_converged(&self, simplex: &[Vec<f64>], values: &[f64]) -> bool {
        let spread = values[values.len() - 1] - values[0];
        let size = simplex[1..]
            .iter()
            .flat_map(|vertex| vertex.iter().zip(&simplex[0]).map(|(a, b)| (a - b).abs()))
            .fold(0.0, f64::max);
        spread < self.config.tolerance && size < self.config.tolerance
    }
}

/// Order vertices by ascending objective value.
fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

/// Mean of the given vertices.
fn centroid(vertices: &[Vec<f64>]) -> Vec<f64> {
    let count = vertices.len() as f64;
    let mut centroid = vec![0.0; vertices[0].len()];
    for vertex in vertices {
        for (c, v) in centroid.iter_mut().zip(vertex) {
            *c += v;
        }
    }
    centroid.iter_mut().for_each(|c| *c /= count);
    centroid
}

/// `base + coeff * (point - base)`.
fn towards(base: &[f64], point: &[f64], coeff: f64) -> Vec<f64> {
    base.iter()
        .zip(point)
        .map(|(&b, &p)| b + coeff * (p - b))
        .collect()
}
