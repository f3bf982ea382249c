//! # QADD Core
//!
//! Bits, gates, circuits and the reversible half-adder construction.
//!
//! ## Architecture
//!
//! ```text
//! qadd_core
//!     Foundation
//!         types      Bit, InputPair, Bitstring, Counts
//!         constants  wire layout, shot limits, expected truth table
//!         error      QaddError / QaddResult
//!     Circuit
//!         gate       X, H, CX, CCX, Measure, Barrier
//!         circuit    gate list + measurement map
//!         builder    fluent builder, half_adder(), hello_circuit()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qadd_core::prelude::*;
//!
//! // 1 + 1: CARRY=1, SUM=0
//! let circuit = half_adder_circuit(1, 1).unwrap();
//! assert_eq!(circuit.num_wires(), 4);
//! assert_eq!(circuit.count_3w(), 1);
//! println!("{}", circuit.to_qasm());
//! ```
//!
//! ## Expected Outputs
//!
//! ```rust
//! use qadd_core::prelude::*;
//!
//! let pair = InputPair::new(0, 1).unwrap();
//! assert_eq!(truth_table::expected_for(pair), "01");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types
pub mod types;

/// Constants
pub mod constants;

/// Error types
pub mod error;

/// Gates
pub mod gate;

/// Circuit structure
pub mod circuit;

/// Circuit builder and named circuits
pub mod builder;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::{half_adder, half_adder_circuit, hello_circuit, CircuitBuilder};
pub use circuit::Circuit;
pub use constants::{adder, shots, truth_table};
pub use error::{QaddError, QaddResult};
pub use gate::Gate;
pub use types::{Bit, Bitstring, ClbitId, Counts, InputPair, WireId};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use qadd_core::prelude::*;
    //! ```

    pub use crate::builder::{half_adder, half_adder_circuit, hello_circuit, CircuitBuilder};
    pub use crate::circuit::Circuit;
    pub use crate::constants::{adder, shots, truth_table};
    pub use crate::error::{QaddError, QaddResult};
    pub use crate::gate::Gate;
    pub use crate::types::{Bit, Bitstring, ClbitId, Counts, InputPair, WireId};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
