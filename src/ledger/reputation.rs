//! Reputation ledger: identity tag -> non-negative score.
//!
//! The only mutation primitive is `bump`. There is no decrement and no
//! direct set; genesis seeding goes through `seed` before the ledger is
//! handed to the runtime.

use crate::types::IdentityTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReputationLedger {
    scores: BTreeMap<IdentityTag, u64>,
}

impl ReputationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from genesis allocations. Zero entries are dropped.
    pub fn seed(allocations: impl IntoIterator<Item = (IdentityTag, u64)>) -> Self {
        let scores = allocations
            .into_iter()
            .filter(|(_, value)| *value > 0)
            .collect();
        Self { scores }
    }

    /// Reputation of `tag`; 0 when absent.
    pub fn get(&self, tag: &IdentityTag) -> u64 {
        self.scores.get(tag).copied().unwrap_or(0)
    }

    /// Increment `tag` by exactly one, creating the record at 1.
    ///
    /// Saturates at `u64::MAX`; the value never decreases.
    pub fn bump(&mut self, tag: &IdentityTag) -> u64 {
        let entry = self.scores.entry(*tag).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    /// Number of identities with a record.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&IdentityTag, &u64)> {
        self.scores.iter()
    }
}
