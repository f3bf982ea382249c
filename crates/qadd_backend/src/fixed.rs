//! Fixed-response backend
//!
//! Returns the same outcome table (or the same failure) for every circuit,
//! so the verification engine can be exercised deterministically.

use crate::execution::{Backend, ExecutionResult};
use qadd_core::{Circuit, Counts, QaddError, QaddResult};

/// Backend with a canned response
#[derive(Debug, Clone)]
pub struct StaticBackend {
    name: String,
    response: Result<Counts, String>,
}

impl StaticBackend {
    /// Always answer with `counts`
    ///
    /// Requests whose shot count differs from the table total fail, so the
    /// returned table always satisfies the sampler contract.
    pub fn new(counts: Counts) -> Self {
        Self {
            name: "static".to_string(),
            response: Ok(counts),
        }
    }

    /// Build from `(bitstring, count)` pairs
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u64)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(bs, count)| (bs.to_string(), count))
                .collect(),
        )
    }

    /// Always fail with `ExecutionFailure(message)`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            name: "static".to_string(),
            response: Err(message.into()),
        }
    }

    /// Set backend name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Shot count the canned table answers
    pub fn total(&self) -> u64 {
        self.response
            .as_ref()
            .map(|c| c.values().sum())
            .unwrap_or(0)
    }
}

impl Backend for StaticBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn num_wires(&self) -> usize {
        usize::MAX
    }

    fn execute(&self, _circuit: &Circuit, shots: u64) -> QaddResult<ExecutionResult> {
        self.validate_shots(shots)?;

        match &self.response {
            Ok(counts) => {
                let total = self.total();
                if total != shots {
                    return Err(QaddError::execution(format!(
                        "static table holds {} shots, {} requested",
                        total, shots
                    )));
                }
                let mut result = ExecutionResult::new(counts.clone(), shots, &self.name);
                result.metadata.simulated = false;
                Ok(result)
            }
            Err(message) => Err(QaddError::execution(message.clone())),
        }
    }

    fn is_simulator(&self) -> bool {
        false
    }
}

// ============================================================================
// Tests
// ============================================================================
