//! Runtime parameters and genesis state.

use crate::types::{CommitmentRoot, IdentityTag};
use serde::{Deserialize, Serialize};

/// Default additive offset applied to reviewer reputation when weighting.
pub const DEFAULT_REVIEW_WEIGHT_OFFSET: u64 = 1;

/// Tunable runtime parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Weighted score = raw score * (reviewer reputation + offset).
    #[serde(default = "default_review_weight_offset")]
    pub review_weight_offset: u64,
}

fn default_review_weight_offset() -> u64 {
    DEFAULT_REVIEW_WEIGHT_OFFSET
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            review_weight_offset: DEFAULT_REVIEW_WEIGHT_OFFSET,
        }
    }
}

/// Initial ledger contents.
///
/// Genesis is the only place reputation is assigned other than by the
/// runtime's own increments. It is applied once, before any transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genesis {
    pub commitment: Option<CommitmentRoot>,
    pub reputations: Vec<(IdentityTag, u64)>,
}

impl Genesis {
    pub fn with_commitment(root: CommitmentRoot) -> Self {
        Self {
            commitment: Some(root),
            reputations: Vec::new(),
        }
    }

    /// Add an initial reputation allocation.
    pub fn allocate(mut self, tag: IdentityTag, reputation: u64) -> Self {
        self.reputations.push((tag, reputation));
        self
    }
}
