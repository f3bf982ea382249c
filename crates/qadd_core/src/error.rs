//! Error types for QADD
//!
//! A single error enum shared by every crate in the workspace.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for QADD
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QaddError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Bit value outside {0, 1}
    #[error("Invalid input bit {0}: must be 0 or 1")]
    InvalidInput(i64),

    /// Shot count zero or above the backend limit
    #[error("Invalid shot count {shots}: must be in range [1, {max}]")]
    InvalidShotCount { shots: u64, max: u64 },

    /// Invalid bitstring format
    #[error("Invalid bitstring '{0}': must contain only '0' and '1'")]
    InvalidBitstring(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Circuit Errors
    // ========================================================================
    /// Empty circuit
    #[error("Circuit is empty")]
    EmptyCircuit,

    /// Gate on non-existent wire
    #[error("Gate references wire {wire} but circuit has only {num_wires} wires")]
    GateWireMismatch { wire: usize, num_wires: usize },

    /// Measurement into a non-existent output position
    #[error("Measurement targets output bit {clbit} but circuit has only {num_clbits}")]
    ClbitOutOfRange { clbit: usize, num_clbits: usize },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// Sampler substrate could not run the circuit (includes timeouts)
    #[error("Execution failure: {0}")]
    ExecutionFailure(String),

    /// Two or more outcomes share the maximum count
    #[error("Ambiguous majority: {candidates:?} each observed {count} times")]
    AmbiguousMajority { candidates: Vec<String>, count: u64 },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    /// File I/O error
    #[error("File error: {0}")]
    FileError(String),
}

/// Result type alias for QADD operations
pub type QaddResult<T> = Result<T, QaddError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QaddError {
    fn from(err: serde_json::Error) -> Self {
        QaddError::JsonError(err.to_string())
    }
}

impl From<std::io::Error> for QaddError {
    fn from(err: std::io::Error) -> Self {
        QaddError::FileError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QaddError {
    /// Shorthand for an execution failure with a formatted message
    pub fn execution(msg: impl Into<String>) -> Self {
        QaddError::ExecutionFailure(msg.into())
    }

    /// Check if error is a local precondition violation
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QaddError::InvalidInput(_)
                | QaddError::InvalidShotCount { .. }
                | QaddError::InvalidBitstring(_)
                | QaddError::InvalidConfig(_)
        )
    }

    /// Check if error came from running the sampler
    pub fn is_execution_error(&self) -> bool {
        matches!(
            self,
            QaddError::ExecutionFailure(_) | QaddError::AmbiguousMajority { .. }
        )
    }

    /// Check if error is a circuit construction error
    pub fn is_circuit_error(&self) -> bool {
        matches!(
            self,
            QaddError::EmptyCircuit
                | QaddError::GateWireMismatch { .. }
                | QaddError::ClbitOutOfRange { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QaddError::InvalidInput(2);
        assert!(err.to_string().contains("2"));
    }

    #[test]
    fn test_shot_count_display() {
        let err = QaddError::InvalidShotCount { shots: 0, max: 100 };
        assert!(err.to_string().contains("0"));
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn test_ambiguous_majority_display() {
        let err = QaddError::AmbiguousMajority {
            candidates: vec!["01".into(), "10".into()],
            count: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("01"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn test_classification() {
        assert!(QaddError::InvalidInput(3).is_validation_error());
        assert!(!QaddError::execution("down").is_validation_error());
        assert!(QaddError::execution("down").is_execution_error());
        assert!(QaddError::EmptyCircuit.is_circuit_error());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: QaddError = io.into();
        assert!(matches!(err, QaddError::FileError(_)));
    }
}
