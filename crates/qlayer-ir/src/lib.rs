//! qlayer Gate and Circuit Representation
//!
//! This crate holds the data side of qlayer: matrix-defined gates, ordered
//! circuits, and the greedy scheduler that groups a circuit's gates into
//! parallel layers.
//!
//! # Core Components
//!
//! - **Gates**: [`Gate`] pairs an ordered list of target qubits with a
//!   `2^k × 2^k` complex matrix ([`GateMatrix`])
//! - **Circuits**: [`Circuit`] keeps gates in application order and tracks
//!   width, non-idle qubits and depth
//! - **Layering**: [`Layering`] partitions gate indices into layers with no
//!   shared qubits inside a layer
//! - **Library**: [`library`] provides the usual Pauli, Clifford, rotation and
//!   controlled matrices
//!
//! # Example: Scheduling a Circuit
//!
//! ```rust
//! use qlayer_ir::{Circuit, Gate, library};
//!
//! let mut circuit = Circuit::new();
//! circuit
//!     .append(Gate::single("h", 0, library::h()).unwrap())
//!     .append(Gate::single("x", 1, library::x()).unwrap())
//!     .append(Gate::pair("cx", 0, 1, library::cx()).unwrap());
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! assert_eq!(circuit.layers(), &[vec![0, 1], vec![2]]);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod layering;
pub mod library;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{DEFAULT_GATE_NAME, Gate, GateMatrix};
pub use layering::Layering;
