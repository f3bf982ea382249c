//! # QADD Backend
//!
//! Sampler abstraction and execution for QADD.
//!
//! ## Architecture
//!
//! ```text
//! qadd_backend
//!     execution  Backend trait, ExecutionResult, ExecutionMetadata
//!     simulator  SimulatorBackend (ideal state-vector sampler)
//!     timeout    TimeoutBackend (per-call deadline decorator)
//!     fixed      StaticBackend (canned table or failure)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qadd_backend::prelude::*;
//! use qadd_core::half_adder_circuit;
//!
//! let backend = SimulatorBackend::ideal(4).with_seed(42);
//! let circuit = half_adder_circuit(1, 1).unwrap();
//!
//! let result = backend.execute(&circuit, 1000).unwrap();
//! assert_eq!(result.counts.get("10"), Some(&1000));
//! ```
//!
//! ## With a Deadline
//!
//! ```rust
//! use qadd_backend::prelude::*;
//! use qadd_core::hello_circuit;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let backend = TimeoutBackend::new(
//!     Arc::new(SimulatorBackend::ideal(1)),
//!     Duration::from_secs(5),
//! );
//! let result = backend.execute(&hello_circuit(), 100).unwrap();
//! assert_eq!(result.total_counts(), 100);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Execution types and backend trait
pub mod execution;

/// Simulator backend
pub mod simulator;

/// Timeout decorator
pub mod timeout;

/// Fixed-response backend
pub mod fixed;

// ============================================================================
// Re-exports
// ============================================================================

pub use execution::{Backend, ExecutionMetadata, ExecutionResult};
pub use fixed::StaticBackend;
pub use simulator::SimulatorBackend;
pub use timeout::TimeoutBackend;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qadd_backend::prelude::*;
    //! ```

    pub use crate::execution::{Backend, ExecutionMetadata, ExecutionResult};
    pub use crate::fixed::StaticBackend;
    pub use crate::simulator::SimulatorBackend;
    pub use crate::timeout::TimeoutBackend;
}

// ============================================================================
// Integration Tests
// ============================================================================
