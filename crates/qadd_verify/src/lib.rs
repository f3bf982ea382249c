//! # QADD Verify
//!
//! Majority-vote verification of the reversible half-adder.
//!
//! ## Architecture
//!
//! ```text
//! qadd_verify
//!     config     VerifyConfig, TiePolicy
//!     majority   majority_vote, MajorityOutcome
//!     verifier   Verifier (per-pair sampling, sequential or parallel)
//!     report     VerificationRecord, VerificationReport, Reporter
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use qadd_verify::prelude::*;
//!
//! let verifier = Verifier::with_simulator(VerifyConfig::reproducible(42));
//! let report = verifier.run().unwrap();
//!
//! assert!(report.all_passed());
//! println!("{}", Reporter::to_text(&report));
//! ```
//!
//! ## Custom Backend
//!
//! ```rust
//! use qadd_backend::StaticBackend;
//! use qadd_verify::prelude::*;
//! use std::sync::Arc;
//!
//! let backend = StaticBackend::failing("sampler offline");
//! let verifier = Verifier::new(Arc::new(backend), VerifyConfig::quick());
//!
//! let report = verifier.run().unwrap();
//! assert_eq!(report.failures().count(), 4);
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Run configuration
pub mod config;

/// Majority vote
pub mod majority;

/// Verification engine
pub mod verifier;

/// Records, reports, and formatting
pub mod report;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{TiePolicy, VerifyConfig};
pub use majority::{majority_vote, MajorityOutcome};
pub use report::{ReportFormat, Reporter, VerificationRecord, VerificationReport};
pub use verifier::Verifier;

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use qadd_verify::prelude::*;
    //! ```

    pub use crate::config::{TiePolicy, VerifyConfig};
    pub use crate::majority::{majority_vote, MajorityOutcome};
    pub use crate::report::{ReportFormat, Reporter, VerificationRecord, VerificationReport};
    pub use crate::verifier::Verifier;
}

// ============================================================================
// Integration Tests
// ============================================================================
