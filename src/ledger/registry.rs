//! Commitment registry: the active membership root.

use crate::types::CommitmentRoot;
use serde::{Deserialize, Serialize};

/// Holds the root every identity proof must reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitmentRegistry {
    root: Option<CommitmentRoot>,
}

impl CommitmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `root` as the active commitment, replacing any previous one.
    pub fn set(&mut self, root: CommitmentRoot) -> Option<CommitmentRoot> {
        self.root.replace(root)
    }

    /// The active commitment, `None` if never set.
    pub fn get(&self) -> Option<CommitmentRoot> {
        self.root
    }

    /// Whether `root` is the active commitment.
    pub fn matches(&self, root: &CommitmentRoot) -> bool {
        self.root.as_ref() == Some(root)
    }
}
