//! Review guard: prevents a reviewer from reviewing the same publication twice.

use crate::types::ReviewKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewGuard {
    seen: BTreeSet<ReviewKey>,
}

impl ReviewGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ReviewKey) -> bool {
        self.seen.contains(key)
    }

    /// Record `key`. Returns false if it was already present.
    pub fn insert(&mut self, key: ReviewKey) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
