//! Property-based tests for the peer-review runtime
//!
//! Tests for:
//! - Determinism: same (tag, timestamp) always yields the same publication id
//! - Atomicity: a rejected transaction leaves the state byte-identical
//! - Monotonicity: reputation never decreases
//! - Weighting law: a review adds exactly score * (reputation + 1)
//! - Review guard: a repeated review always fails with AlreadyReviewed

use super::{Genesis, PeerReviewRuntime, RuntimeConfig};
use crate::error::PeerReviewError;
use crate::ledger::PublicationDraft;
use crate::proof::MockProof;
use crate::types::{CommitmentRoot, IdentityTag, PublicationId};
use proptest::prelude::*;

const ACTIVE_ROOT: CommitmentRoot = CommitmentRoot::from_bytes([1; 32]);
const STALE_ROOT: CommitmentRoot = CommitmentRoot::from_bytes([2; 32]);

fn tag(id: u8) -> IdentityTag {
    IdentityTag::from_bytes([id; 32])
}

#[derive(Debug, Clone)]
enum Op {
    Publish {
        actor: u8,
        timestamp: u64,
        valid: bool,
        stale: bool,
    },
    Review {
        actor: u8,
        target: usize,
        score: u64,
        valid: bool,
        stale: bool,
    },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..4, 0u64..4, prop::bool::weighted(0.9), prop::bool::weighted(0.1)).prop_map(
            |(actor, timestamp, valid, stale)| Op::Publish {
                actor,
                timestamp,
                valid,
                stale,
            }
        ),
        (
            0u8..6,
            0usize..16,
            0u64..1_000,
            prop::bool::weighted(0.9),
            prop::bool::weighted(0.1)
        )
            .prop_map(|(actor, target, score, valid, stale)| Op::Review {
                actor,
                target,
                score,
                valid,
                stale,
            }),
    ]
}

fn proof_for(actor: u8, valid: bool, stale: bool) -> MockProof {
    let root = if stale { STALE_ROOT } else { ACTIVE_ROOT };
    if valid {
        MockProof::valid(root, tag(actor))
    } else {
        MockProof::invalid(root, tag(actor))
    }
}

fn all_reputations(runtime: &PeerReviewRuntime) -> Vec<u64> {
    (0u8..6).map(|a| runtime.reputation(&tag(a))).collect()
}

proptest! {
    /// Property test: Determinism of publication ids
    #[test]
    fn prop_publication_id_deterministic(id in any::<[u8; 32]>(), timestamp in any::<u64>()) {
        let author = IdentityTag::from_bytes(id);
        prop_assert_eq!(
            PublicationId::derive(&author, timestamp),
            PublicationId::derive(&author, timestamp)
        );

        let mut runtime = PeerReviewRuntime::from_genesis(
            Genesis::with_commitment(ACTIVE_ROOT),
            RuntimeConfig::default(),
        );
        let published = runtime
            .publish(&MockProof::valid(ACTIVE_ROOT, author), PublicationDraft::new("c", timestamp))
            .unwrap();
        prop_assert_eq!(published, PublicationId::derive(&author, timestamp));
    }

    /// Property test: Atomicity, monotonicity and the weighting law over
    /// arbitrary operation sequences
    #[test]
    fn prop_transaction_invariants(
        seed_reputation in 0u64..4,
        ops in prop::collection::vec(op_strategy(), 1..40),
    ) {
        let genesis = Genesis::with_commitment(ACTIVE_ROOT).allocate(tag(5), seed_reputation);
        let mut runtime = PeerReviewRuntime::from_genesis(genesis, RuntimeConfig::default());
        let mut published: Vec<PublicationId> = Vec::new();

        for op in ops {
            let before_bytes = runtime.state().to_bytes().unwrap();
            let before_reps = all_reputations(&runtime);

            match op {
                Op::Publish { actor, timestamp, valid, stale } => {
                    let proof = proof_for(actor, valid, stale);
                    match runtime.publish(&proof, PublicationDraft::new("content", timestamp)) {
                        Ok(id) => {
                            prop_assert!(valid && !stale);
                            prop_assert_eq!(runtime.publication(&id).unwrap().score, 0);
                            prop_assert_eq!(runtime.author_of(&id), Some(tag(actor)));
                            prop_assert_eq!(
                                runtime.reputation(&tag(actor)),
                                before_reps[actor as usize] + 1
                            );
                            published.push(id);
                        }
                        Err(_) => {
                            prop_assert_eq!(runtime.state().to_bytes().unwrap(), before_bytes);
                        }
                    }
                }
                Op::Review { actor, target, score, valid, stale } => {
                    let id = if published.is_empty() {
                        PublicationId::from_bytes([0xee; 32])
                    } else {
                        published[target % published.len()]
                    };
                    let before_score = runtime.publication(&id).map(|p| p.score);
                    let reviewer_rep = runtime.reputation(&tag(actor));
                    let proof = proof_for(actor, valid, stale);

                    match runtime.review(&proof, id, score) {
                        Ok(receipt) => {
                            prop_assert!(reviewer_rep > 0);
                            prop_assert_eq!(receipt.weighted_score, score * (reviewer_rep + 1));
                            prop_assert_eq!(
                                runtime.publication(&id).unwrap().score,
                                before_score.unwrap() + score * (reviewer_rep + 1)
                            );

                            // Second identical review is always refused.
                            let again = runtime.review(&proof, id, score).unwrap_err();
                            let is_already_reviewed = matches!(again, PeerReviewError::AlreadyReviewed { .. });
                            prop_assert!(is_already_reviewed);
                            prop_assert_eq!(
                                runtime.publication(&id).unwrap().score,
                                before_score.unwrap() + score * (reviewer_rep + 1)
                            );
                        }
                        Err(_) => {
                            prop_assert_eq!(runtime.state().to_bytes().unwrap(), before_bytes);
                        }
                    }
                }
            }

            let after_reps = all_reputations(&runtime);
            for (before, after) in before_reps.iter().zip(after_reps.iter()) {
                prop_assert!(after >= before, "reputation decreased: {} -> {}", before, after);
            }
        }
    }
}
