//! Rejection conditions for ledger transactions.
//!
//! Every variant aborts the enclosing transaction with no state change.
//! None of them is retried inside the runtime.

use crate::types::{CommitmentRoot, IdentityTag, PublicationId};
use thiserror::Error;

/// Errors that reject a `set_commitment`, `publish` or `review` transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeerReviewError {
    /// The proof object failed its own verification.
    #[error("identity proof failed verification")]
    ProofInvalid,

    /// The proof was built against a root that is not the active commitment.
    #[error("proof root {actual} does not match active commitment {}", display_root(.expected))]
    CommitmentMismatch {
        /// Active commitment, `None` when no commitment was ever set.
        expected: Option<CommitmentRoot>,
        /// Root carried in the proof's public output.
        actual: CommitmentRoot,
    },

    #[error("publication {0} not found")]
    PublicationNotFound(PublicationId),

    #[error("no author recorded for publication {0}")]
    AuthorNotFound(PublicationId),

    #[error("publication {0} already exists")]
    PublicationAlreadyExists(PublicationId),

    #[error("reviewer {reviewer} already reviewed publication {publication}")]
    AlreadyReviewed {
        reviewer: IdentityTag,
        publication: PublicationId,
    },

    /// Reviewer has no earned reputation.
    #[error("reviewer {0} has zero reputation")]
    InsufficientReputation(IdentityTag),

    #[error("weighted score overflow (score {score}, reputation {reputation})")]
    ScoreOverflow { score: u64, reputation: u64 },
}

fn display_root(root: &Option<CommitmentRoot>) -> String {
    match root {
        Some(r) => r.to_string(),
        None => "<not set>".to_string(),
    }
}

/// Result type for ledger transactions.
pub type Result<T> = std::result::Result<T, PeerReviewError>;
