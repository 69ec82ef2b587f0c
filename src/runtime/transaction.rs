//! Transactions submitted by the sequencer and their receipts.

use crate::ledger::PublicationDraft;
use crate::types::{CommitmentRoot, PublicationId};
use serde::{Deserialize, Serialize};

/// A single state transition request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transaction<P> {
    /// Replace the active membership commitment.
    SetCommitment { root: CommitmentRoot },
    /// Publish a work under an identity proof.
    Publish {
        proof: P,
        publication: PublicationDraft,
    },
    /// Review an existing publication under an identity proof.
    Review {
        proof: P,
        publication_id: PublicationId,
        score: u64,
    },
}

impl<P> Transaction<P> {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::SetCommitment { .. } => "set_commitment",
            Self::Publish { .. } => "publish",
            Self::Review { .. } => "review",
        }
    }
}

/// Outcome of a successful review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewReceipt {
    /// Amount added to the publication score.
    pub weighted_score: u64,
    /// Publication score after the review.
    pub publication_score: u64,
    pub author_reputation: u64,
    pub reviewer_reputation: u64,
}

/// Outcome of a successful transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Receipt {
    CommitmentSet { previous: Option<CommitmentRoot> },
    Published { id: PublicationId },
    Reviewed(ReviewReceipt),
}
