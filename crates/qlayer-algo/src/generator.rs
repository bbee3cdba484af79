//! Seeded random circuit generation.
//!
//! Each step draws `u ∈ [0, 1)`. When `u >= weight_2q` (or the register has
//! a single qubit) a random 2×2 unitary is placed on one uniform qubit;
//! otherwise a random 4×4 unitary is placed on two distinct uniform qubits.
//! Random unitaries come from [`crate::unitary::random_unitary`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use qlayer_ir::{Circuit, Gate};

use crate::error::{AlgoError, AlgoResult};
use crate::unitary::random_unitary;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 27;

/// Default bound on the random Hermitian generator entries.
pub const DEFAULT_SCALE: f64 = 100.0;

/// Random circuit parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of qubits gates are drawn over.
    pub width: usize,
    /// Number of gates to generate.
    pub depth: usize,
    /// Probability that a step emits a two-qubit gate.
    pub weight_2q: f64,
    /// RNG seed for [`RandomCircuitGenerator::generate`].
    pub seed: u64,
    /// Entry bound of the Hermitian matrices that are exponentiated.
    pub scale: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 1,
            depth: 0,
            weight_2q: 0.5,
            seed: DEFAULT_SEED,
            scale: DEFAULT_SCALE,
        }
    }
}

impl GeneratorConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> AlgoResult<()> {
        if self.width == 0 {
            return Err(AlgoError::InvalidWidth(self.width));
        }
        if !(0.0..=1.0).contains(&self.weight_2q) {
            return Err(AlgoError::InvalidWeight(self.weight_2q));
        }
        if !self.scale.is_finite() || self.scale < 0.0 {
            return Err(AlgoError::InvalidScale(self.scale));
        }
        Ok(())
    }
}

/// Generates random circuits from a [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct RandomCircuitGenerator {
    config: GeneratorConfig,
}

impl RandomCircuitGenerator {
    /// Create a generator, validating the configuration.
    pub fn new(config: GeneratorConfig) -> AlgoResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a circuit from the configured seed.
    ///
    /// The same configuration always yields the same circuit.
    pub fn generate(&self) -> AlgoResult<Circuit> {
        self.generate_with_rng(&mut StdRng::seed_from_u64(self.config.seed))
    }

    /// Generate a circuit drawing from `rng`.
    ///
    /// The circuit width is one more than the highest qubit actually drawn,
    /// so it may be narrower than the configured width.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> AlgoResult<Circuit> {
        let GeneratorConfig {
            width,
            depth,
            weight_2q,
            scale,
            ..
        } = self.config;

        let mut circuit = Circuit::new();
        for _ in 0..depth {
            let u: f64 = rng.r#gen();
            let gate = if u >= weight_2q || width == 1 {
                let target = rng.gen_range(0..width);
                Gate::new(vec![target], random_unitary(1, scale, rng), None)?
            } else {
                let first = rng.gen_range(0..width);
                let mut second = rng.gen_range(0..width);
                while second == first {
                    second = rng.gen_range(0..width);
                }
                Gate::new(vec![first, second], random_unitary(2, scale, rng), None)?
            };
            circuit.append(gate);
        }

        debug!(
            width,
            depth,
            weight_2q,
            qubits = circuit.num_qubits(),
            layers = circuit.depth(),
            "generated random circuit"
        );
        Ok(circuit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: usize, depth: usize, weight_2q: f64) -> GeneratorConfig {
        GeneratorConfig {
            width,
            depth,
            weight_2q,
            ..Default::default()
        }
    }

    #[test]
    fn test_gate_count_and_range() {
        let generator = RandomCircuitGenerator::new(config(5, 40, 0.5)).unwrap();
        let circuit = generator.generate().unwrap();
        assert_eq!(circuit.len(), 40);
        assert!(circuit.num_qubits() <= 5);
        for gate in &circuit {
            assert!(gate.targets().iter().all(|&q| q < 5));
            assert!(matches!(gate.num_targets(), 1 | 2));
        }
    }

    #[test]
    fn test_weight_zero_gives_single_qubit_gates() {
        let generator = RandomCircuitGenerator::new(config(4, 30, 0.0)).unwrap();
        let circuit = generator.generate().unwrap();
        assert!(circuit.gates().iter().all(|g| g.num_targets() == 1));
    }

    #[test]
    fn test_weight_one_gives_two_qubit_gates() {
        let generator = RandomCircuitGenerator::new(config(3, 30, 1.0)).unwrap();
        let circuit = generator.generate().unwrap();
        for gate in circuit.gates() {
            assert_eq!(gate.num_targets(), 2);
            assert_ne!(gate.targets()[0], gate.targets()[1]);
        }
    }

    #[test]
    fn test_width_one_never_emits_pairs() {
        let generator = RandomCircuitGenerator::new(config(1, 10, 1.0)).unwrap();
        let circuit = generator.generate().unwrap();
        assert_eq!(circuit.num_qubits(), 1);
        assert_eq!(circuit.depth(), 10);
    }

    #[test]
    fn test_same_seed_same_circuit() {
        let a = RandomCircuitGenerator::new(config(4, 25, 0.3)).unwrap();
        let b = RandomCircuitGenerator::new(config(4, 25, 0.3)).unwrap();
        assert_eq!(a.generate().unwrap(), b.generate().unwrap());
    }

    #[test]
    fn test_different_seed_different_circuit() {
        let a = RandomCircuitGenerator::new(config(4, 25, 0.3)).unwrap();
        let b = RandomCircuitGenerator::new(GeneratorConfig {
            seed: 28,
            ..config(4, 25, 0.3)
        })
        .unwrap();
        assert_ne!(a.generate().unwrap(), b.generate().unwrap());
    }

    #[test]
    fn test_zero_depth_is_empty() {
        let generator = RandomCircuitGenerator::new(config(3, 0, 0.5)).unwrap();
        let circuit = generator.generate().unwrap();
        assert!(circuit.is_empty());
        assert_eq!(circuit.num_qubits(), 0);
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            RandomCircuitGenerator::new(config(0, 5, 0.5)).unwrap_err(),
            AlgoError::InvalidWidth(0)
        );
        assert_eq!(
            RandomCircuitGenerator::new(config(2, 5, 1.5)).unwrap_err(),
            AlgoError::InvalidWeight(1.5)
        );
        assert!(matches!(
            RandomCircuitGenerator::new(config(2, 5, f64::NAN)),
            Err(AlgoError::InvalidWeight(_))
        ));
        assert!(matches!(
            RandomCircuitGenerator::new(GeneratorConfig {
                scale: -1.0,
                ..config(2, 5, 0.5)
            }),
            Err(AlgoError::InvalidScale(_))
        ));
    }
}
