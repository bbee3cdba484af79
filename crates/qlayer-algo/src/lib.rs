//! qlayer Algorithms: workloads built on the qlayer engine.
//!
//! - **Random circuits**: seeded generation of 1- and 2-qubit random
//!   unitaries ([`RandomCircuitGenerator`])
//! - **QAOA max-cut**: ansatz construction and `⟨Σ Z_i Z_j⟩` evaluation
//!   ([`QaoaCircuit`])
//! - **Nelder-Mead**: gradient-free minimization of the QAOA objective
//!   ([`NelderMead`], [`optimize_qaoa`])
//! - **Grover search**: amplitude amplification over marked items, with the
//!   oracle and diffuser lowered to CNOT + RZ ([`GroverCircuit`],
//!   [`phase::diagonal_circuit`])
//!
//! # Quick start
//!
//! ```rust
//! use qlayer_algo::{MaxCutGraph, QaoaCircuit};
//! use qlayer_sim::StatevectorEmulator;
//!
//! let graph = MaxCutGraph::ring(4).unwrap();
//! let mut qaoa = QaoaCircuit::new(graph).unwrap();
//! qaoa.add_layer(0.4, 0.3).unwrap();
//!
//! let value = qaoa.expectation(&StatevectorEmulator::new()).unwrap();
//! assert!(value > -4.0 && value < 4.0);
//! ```

pub mod error;
pub mod generator;
pub mod grover;
pub mod optimizer;
pub mod phase;
pub mod qaoa;
pub mod unitary;

pub use error::{AlgoError, AlgoResult};
pub use generator::{GeneratorConfig, RandomCircuitGenerator};
pub use grover::{GroverCircuit, MAX_SEARCH_QUBITS, SearchProblem};
pub use optimizer::{NelderMead, NelderMeadConfig, OptimizationResult};
pub use qaoa::{MaxCutGraph, QaoaCircuit, QaoaConfig, QaoaResult, optimize_qaoa};
