//! Majority vote over an outcome table

use crate::config::TiePolicy;
use qadd_core::{Counts, QaddError, QaddResult};
use serde::{Deserialize, Serialize};

/// Winner of a majority vote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorityOutcome {
    /// Selected bitstring
    pub bitstring: String,

    /// Its count
    pub count: u64,

    /// Every bitstring sharing the maximum count, ascending
    pub tied: Vec<String>,
}

impl MajorityOutcome {
    /// Whether more than one outcome reached the maximum
    pub fn is_tie(&self) -> bool {
        self.tied.len() > 1
    }

    /// Share of `shots` held by the winner
    pub fn share(&self, shots: u64) -> f64 {
        if shots == 0 {
            0.0
        } else {
            self.count as f64 / shots as f64
        }
    }
}

/// Select the most frequent outcome
///
/// Zero-count entries are ignored. An empty table is an execution failure.
/// Ties are settled by `policy`, never by map iteration order.
pub fn majority_vote(counts: &Counts, policy: TiePolicy) -> QaddResult<MajorityOutcome> {
    let max = counts.values().copied().max().unwrap_or(0);
    if max == 0 {
        return Err(QaddError::execution("empty outcome table"));
    }

    // BTreeMap iteration is ascending, so `tied` is sorted.
    let tied: Vec<String> = counts
        .iter()
        .filter(|(_, &c)| c == max)
        .map(|(bs, _)| bs.clone())
        .collect();

    if tied.len() > 1 && policy == TiePolicy::Reject {
        return Err(QaddError::AmbiguousMajority {
            candidates: tied,
            count: max,
        });
    }

    Ok(MajorityOutcome {
        bitstring: tied[0].clone(),
        count: max,
        tied,
    })
}

// ============================================================================
// Tests
// ============================================================================
