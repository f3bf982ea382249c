//! Backend execution types and traits
//!
//! Defines the sampler interface and the outcome table it returns.

use qadd_core::{shots, Bitstring, Circuit, Counts, QaddError, QaddResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Result of circuit execution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Outcome frequency table (bitstring -> count)
    pub counts: Counts,

    /// Number of shots executed
    pub shots: u64,

    /// Execution metadata
    pub metadata: ExecutionMetadata,
}

/// Execution metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionMetadata {
    /// Backend name
    pub backend: String,

    /// Execution time in milliseconds
    pub execution_time_ms: Option<u64>,

    /// Whether simulation was used
    pub simulated: bool,

    /// Seed used (if any)
    pub seed: Option<u64>,

    /// Additional info
    pub extra: BTreeMap<String, String>,
}

impl ExecutionResult {
    /// Create new execution result
    pub fn new(counts: Counts, shots: u64, backend: &str) -> Self {
        Self {
            counts,
            shots,
            metadata: ExecutionMetadata {
                backend: backend.to_string(),
                simulated: true,
                ..Default::default()
            },
        }
    }

    /// Get total count (should equal shots)
    pub fn total_counts(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Get probability of a specific bitstring
    pub fn probability(&self, bitstring: &str) -> f64 {
        if self.shots == 0 {
            return 0.0;
        }
        let count = self.counts.get(bitstring).copied().unwrap_or(0);
        count as f64 / self.shots as f64
    }

    /// Get most frequent bitstring
    ///
    /// Among equal counts the lexicographically smallest bitstring wins.
    pub fn most_frequent(&self) -> Option<(&String, u64)> {
        let mut best: Option<(&String, u64)> = None;
        for (bs, &count) in &self.counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((bs, count));
            }
        }
        best
    }

    /// Check the table invariants: every key is a `width`-bit string and
    /// the counts sum to `expected_shots`
    pub fn validate(&self, expected_shots: u64, width: usize) -> QaddResult<()> {
        for key in self.counts.keys() {
            let bits = Bitstring::parse(key)?;
            if bits.len() != width {
                return Err(QaddError::execution(format!(
                    "outcome '{}' has {} bits, expected {}",
                    key,
                    bits.len(),
                    width
                )));
            }
        }

        let total = self.total_counts();
        if total != expected_shots {
            return Err(QaddError::execution(format!(
                "outcome counts sum to {} but {} shots were requested",
                total, expected_shots
            )));
        }

        Ok(())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QaddResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ExecutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ExecutionResult(backend={}, shots={}, unique={}, counts={:?})",
            self.metadata.backend,
            self.shots,
            self.counts.len(),
            self.counts
        )
    }
}

/// Sampler backend trait
///
/// Given a circuit and a shot count, returns the empirical outcome table.
/// Implementations are agnostic to what the outputs mean.
pub trait Backend: Send + Sync {
    /// Get backend name
    fn name(&self) -> &str;

    /// Get number of wires the backend can hold
    fn num_wires(&self) -> usize;

    /// Execute a circuit
    fn execute(&self, circuit: &Circuit, shots: u64) -> QaddResult<ExecutionResult>;

    /// Execute multiple circuits (batch)
    fn execute_batch(&self, circuits: &[Circuit], shots: u64) -> QaddResult<Vec<ExecutionResult>> {
        circuits.iter().map(|c| self.execute(c, shots)).collect()
    }

    /// Check if backend is simulator
    fn is_simulator(&self) -> bool {
        true
    }

    /// Get maximum shots per execution
    fn max_shots(&self) -> u64 {
        shots::MAX_SHOTS
    }

    /// Reject shot counts outside `[1, max_shots]`
    fn validate_shots(&self, shots: u64) -> QaddResult<()> {
        let max = self.max_shots();
        if !shots::in_range(shots, max) {
            return Err(QaddError::InvalidShotCount { shots, max });
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
