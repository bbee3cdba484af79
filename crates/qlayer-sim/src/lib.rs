//! qlayer Statevector Simulation Engine
//!
//! This crate evolves dense state vectors under the gates and circuits of
//! `qlayer-ir`. It provides exact amplitudes, limited by memory to roughly
//! 25 qubits.
//!
//! # Features
//!
//! - **Pure application**: every call returns a new [`StateVector`]; inputs
//!   are never modified
//! - **Arbitrary matrices**: any 2×2 or 4×4 gate matrix, not just a fixed
//!   gate set
//! - **Target-order aware**: two-target gates use the packing documented in
//!   [`bits`]
//!
//! # Memory
//!
//! | Qubits | Memory |
//! |--------|--------|
//! | 10 | ~16 KB |
//! | 15 | ~512 KB |
//! | 20 | ~16 MB |
//! | 25 | ~512 MB |
//!
//! Each gate application allocates one output buffer of the same size.
//!
//! # Example
//!
//! ```rust
//! use qlayer_ir::{Circuit, Gate, library};
//! use qlayer_sim::{Emulator, StateVector, StatevectorEmulator};
//!
//! let mut bell = Circuit::new();
//! bell.append(Gate::single("h", 0, library::h()).unwrap())
//!     .append(Gate::pair("cx", 0, 1, library::cx()).unwrap());
//!
//! let emulator = StatevectorEmulator::new();
//! let state = StateVector::from_qubit_count(2).unwrap();
//! let out = emulator.apply_circuit(&bell, &state).unwrap();
//!
//! let p = out.probabilities();
//! assert!((p[0b00] - 0.5).abs() < 1e-12);
//! assert!((p[0b11] - 0.5).abs() < 1e-12);
//! ```

pub mod bits;
pub mod emulator;
pub mod error;
pub mod statevector;

pub use emulator::{DEFAULT_MAX_QUBITS, Emulator, EmulatorConfig, StatevectorEmulator};
pub use error::{SimError, SimResult};
pub use statevector::StateVector;
