//! Verification configuration
//!
//! Shot count, reproducibility, deadline, tie handling and scheduling
//! for a verification run.

use qadd_core::{shots, QaddError, QaddResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// What to do when several outcomes share the maximum count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TiePolicy {
    /// Pick the lexicographically smallest tied bitstring
    #[default]
    LexicographicSmallest,
    /// Fail the row with `AmbiguousMajority`
    Reject,
}

impl TiePolicy {
    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "smallest" | "lexicographic" | "lexicographic-smallest" => {
                Some(TiePolicy::LexicographicSmallest)
            }
            "reject" => Some(TiePolicy::Reject),
            _ => None,
        }
    }
}

impl fmt::Display for TiePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TiePolicy::LexicographicSmallest => write!(f, "lexicographic-smallest"),
            TiePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Verification run configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Shots per input pair
    pub shots: u64,

    /// Upper bound accepted for `shots`
    pub max_shots: u64,

    /// Random seed for the bundled simulator
    pub seed: Option<u64>,

    /// Per-execution deadline in milliseconds
    pub timeout_ms: Option<u64>,

    /// Tie handling for the majority vote
    pub tie_policy: TiePolicy,

    /// Evaluate the four pairs concurrently
    pub parallel: bool,

    /// Log every row at info level
    pub verbose: bool,
}

impl VerifyConfig {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Quick run with fewer shots
    pub fn quick() -> Self {
        Self {
            shots: shots::QUICK_SHOTS,
            ..Self::default()
        }
    }

    /// Fixed seed, default shots
    pub fn reproducible(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set shots
    pub fn with_shots(mut self, shots: u64) -> Self {
        self.shots = shots;
        self
    }

    /// Set shot cap
    pub fn with_max_shots(mut self, max_shots: u64) -> Self {
        self.max_shots = max_shots;
        self
    }

    /// Set seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set per-execution timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Set tie policy
    pub fn with_tie_policy(mut self, policy: TiePolicy) -> Self {
        self.tie_policy = policy;
        self
    }

    /// Enable concurrent evaluation
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Timeout as a duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate configuration
    pub fn validate(&self) -> QaddResult<()> {
        if self.max_shots < shots::MIN_SHOTS {
            return Err(QaddError::InvalidConfig(format!(
                "max_shots must be >= {}, got {}",
                shots::MIN_SHOTS,
                self.max_shots
            )));
        }

        if !shots::in_range(self.shots, self.max_shots) {
            return Err(QaddError::InvalidShotCount {
                shots: self.shots,
                max: self.max_shots,
            });
        }

        if self.timeout_ms == Some(0) {
            return Err(QaddError::InvalidConfig(
                "timeout_ms must be > 0 when set".to_string(),
            ));
        }

        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Parse from JSON
    pub fn from_json(json: &str) -> QaddResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> QaddResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file
    pub fn load(path: impl AsRef<Path>) -> QaddResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> QaddResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            shots: shots::DEFAULT_SHOTS,
            max_shots: shots::MAX_SHOTS,
            seed: None,
            timeout_ms: None,
            tie_policy: TiePolicy::default(),
            parallel: false,
            verbose: false,
        }
    }
}

impl fmt::Display for VerifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VerifyConfig(shots={}, seed={:?}, timeout_ms={:?}, ties={}, parallel={})",
            self.shots, self.seed, self.timeout_ms, self.tie_policy, self.parallel
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
