//! The peer-review state machine.

use super::genesis::{Genesis, RuntimeConfig};
use super::scoring;
use super::transaction::{Receipt, ReviewReceipt, Transaction};
use crate::error::{PeerReviewError, Result};
use crate::ledger::{
    EventKind, LedgerEvent, LedgerState, Publication, PublicationDraft, ReputationLedger,
};
use crate::proof::IdentityProof;
use crate::types::{CommitmentRoot, IdentityTag, PublicationId, ReviewKey};
use tracing::{info, warn};

/// Orchestrates `set_commitment`, `publish` and `review` over the ledger.
#[derive(Debug, Clone)]
pub struct PeerReviewRuntime {
    state: LedgerState,
    config: RuntimeConfig,
}

impl PeerReviewRuntime {
    /// Empty ledger, no commitment set.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::from_state(LedgerState::new(), config)
    }

    /// Ledger seeded from genesis.
    pub fn from_genesis(genesis: Genesis, config: RuntimeConfig) -> Self {
        let mut state = LedgerState::new();
        if let Some(root) = genesis.commitment {
            state.registry.set(root);
        }
        state.reputation = ReputationLedger::seed(genesis.reputations);
        Self::from_state(state, config)
    }

    /// Resume from an existing state (e.g. a loaded snapshot).
    pub fn from_state(state: LedgerState, config: RuntimeConfig) -> Self {
        Self { state, config }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn into_state(self) -> LedgerState {
        self.state
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Apply one transaction.
    pub fn apply<P: IdentityProof>(&mut self, tx: Transaction<P>) -> Result<Receipt> {
        match tx {
            Transaction::SetCommitment { root } => Ok(Receipt::CommitmentSet {
                previous: self.set_commitment(root),
            }),
            Transaction::Publish { proof, publication } => {
                let id = self.publish(&proof, publication)?;
                Ok(Receipt::Published { id })
            }
            Transaction::Review {
                proof,
                publication_id,
                score,
            } => self
                .review(&proof, publication_id, score)
                .map(Receipt::Reviewed),
        }
    }

    /// Store `root` as the active commitment. Returns the previous root.
    ///
    /// Unrestricted: any caller may replace the commitment.
    pub fn set_commitment(&mut self, root: CommitmentRoot) -> Option<CommitmentRoot> {
        let previous = self.state.registry.set(root);
        let sequence = self.state.journal.record(EventKind::CommitmentSet { root });
        info!(
            sequence,
            root = %root.short(),
            replaced = previous.is_some(),
            "commitment set"
        );
        previous
    }

    /// Publish a work under `proof`.
    ///
    /// On success the publication exists with score 0, its author entry is
    /// recorded and the author's reputation grows by one.
    pub fn publish<P: IdentityProof + ?Sized>(
        &mut self,
        proof: &P,
        draft: PublicationDraft,
    ) -> Result<PublicationId> {
        self.try_publish(proof, draft).map_err(|e| {
            warn!(error = %e, "publish rejected");
            e
        })
    }

    fn try_publish<P: IdentityProof + ?Sized>(
        &mut self,
        proof: &P,
        draft: PublicationDraft,
    ) -> Result<PublicationId> {
        let author = self.authenticate(proof)?;
        let id = PublicationId::derive(&author, draft.timestamp);

        if self.state.publications.contains(&id) {
            return Err(PeerReviewError::PublicationAlreadyExists(id));
        }

        // All checks passed; mutate.
        self.state
            .publications
            .insert(id, Publication::from(draft), author);
        let reputation = self.state.reputation.bump(&author);
        let sequence = self
            .state
            .journal
            .record(EventKind::Published { id, author });

        info!(
            sequence,
            publication = %id.short(),
            author = %author.short(),
            reputation,
            "publication stored"
        );
        Ok(id)
    }

    /// Review publication `id` with raw `score` under `proof`.
    ///
    /// The score is weighted by the reviewer's reputation before the call.
    /// Author and reviewer each gain one reputation point.
    pub fn review<P: IdentityProof + ?Sized>(
        &mut self,
        proof: &P,
        id: PublicationId,
        score: u64,
    ) -> Result<ReviewReceipt> {
        self.try_review(proof, id, score).map_err(|e| {
            warn!(error = %e, publication = %id.short(), "review rejected");
            e
        })
    }

    fn try_review<P: IdentityProof + ?Sized>(
        &mut self,
        proof: &P,
        id: PublicationId,
        score: u64,
    ) -> Result<ReviewReceipt> {
        let reviewer = self.authenticate(proof)?;

        let publication = self
            .state
            .publications
            .get(&id)
            .ok_or(PeerReviewError::PublicationNotFound(id))?;

        let key = ReviewKey::derive(&reviewer, &id);
        if self.state.reviews.contains(&key) {
            return Err(PeerReviewError::AlreadyReviewed {
                reviewer,
                publication: id,
            });
        }

        let reputation = self.state.reputation.get(&reviewer);
        if reputation == 0 {
            return Err(PeerReviewError::InsufficientReputation(reviewer));
        }

        let overflow = PeerReviewError::ScoreOverflow { score, reputation };
        let weighted =
            scoring::weighted_score(score, reputation, self.config.review_weight_offset)
                .ok_or_else(|| overflow.clone())?;
        publication.score.checked_add(weighted).ok_or(overflow)?;

        let author = self
            .state
            .publications
            .author_of(&id)
            .ok_or(PeerReviewError::AuthorNotFound(id))?;

        // All checks passed; mutate. The score credit cannot fail after the
        // checks above, and it is the first write.
        let publication_score = self
            .state
            .publications
            .add_score(&id, weighted)
            .ok_or(PeerReviewError::PublicationNotFound(id))?;
        self.state.reviews.insert(key);
        self.state.reputation.bump(&author);
        let reviewer_reputation = self.state.reputation.bump(&reviewer);
        let sequence = self.state.journal.record(EventKind::Reviewed {
            id,
            reviewer,
            weighted_score: weighted,
        });

        info!(
            sequence,
            publication = %id.short(),
            reviewer = %reviewer.short(),
            weighted_score = weighted,
            publication_score,
            "review applied"
        );

        Ok(ReviewReceipt {
            weighted_score: weighted,
            publication_score,
            author_reputation: self.state.reputation.get(&author),
            reviewer_reputation,
        })
    }

    /// Verify `proof` and check it against the active commitment.
    fn authenticate<P: IdentityProof + ?Sized>(&self, proof: &P) -> Result<IdentityTag> {
        if !proof.verify() {
            return Err(PeerReviewError::ProofInvalid);
        }

        let output = proof.public_output();
        if !self.state.registry.matches(&output.root) {
            return Err(PeerReviewError::CommitmentMismatch {
                expected: self.state.registry.get(),
                actual: output.root,
            });
        }

        Ok(output.identity_tag)
    }

    /// The active commitment root, `None` until one is set.
    pub fn commitment(&self) -> Option<CommitmentRoot> {
        self.state.registry.get()
    }

    pub fn publication(&self, id: &PublicationId) -> Option<&Publication> {
        self.state.publications.get(id)
    }

    /// Identity tag that published `id`.
    pub fn author_of(&self, id: &PublicationId) -> Option<IdentityTag> {
        self.state.publications.author_of(id)
    }

    /// Ids of all publications by `author`, in id order.
    pub fn publications_by<'a>(
        &'a self,
        author: &'a IdentityTag,
    ) -> impl Iterator<Item = PublicationId> + 'a {
        self.state.publications.by_author(author)
    }

    /// Reputation of `tag`; 0 when absent.
    pub fn reputation(&self, tag: &IdentityTag) -> u64 {
        self.state.reputation.get(tag)
    }

    /// Every identity with a reputation record, in tag order.
    pub fn reputations(&self) -> impl Iterator<Item = (&IdentityTag, &u64)> {
        self.state.reputation.iter()
    }

    /// Whether `reviewer` has already reviewed `id`.
    pub fn has_reviewed(&self, reviewer: &IdentityTag, id: &PublicationId) -> bool {
        self.state.reviews.contains(&ReviewKey::derive(reviewer, id))
    }

    /// Journal entries with a sequence number greater than `after`. A
    /// follower that has applied up to `after` replays exactly these.
    pub fn events_since(&self, after: u64) -> &[LedgerEvent] {
        self.state.journal.since(after)
    }

    /// Percentile rank of a publication's score among all publications.
    pub fn score_percentile(&self, id: &PublicationId) -> Option<f64> {
        let score = self.publication(id)?.score;
        scoring::percentile(score, self.state.publications.iter().map(|(_, p)| p.score))
    }
}

impl Default for PeerReviewRuntime {
    fn default() -> Self {
        Self::new(RuntimeConfig::default())
    }
}
