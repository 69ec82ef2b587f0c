//! Identity proofs consumed by the ledger runtime
//!
//! The runtime never constructs or inspects proof internals. It relies on the
//! [`IdentityProof`] contract only:
//! - `verify()` fails closed on malformed or unverifiable proofs
//! - `public_output()` yields the `(root, identity_tag)` pair
//!
//! This module also ships a transparent reference backend (Merkle membership
//! commitment, prover, verifier) standing in for the external proof system.
//! It is NOT zero-knowledge: the witness travels with the proof. Use it for
//! tests, benches and local bootstrapping.

pub mod merkle;
pub mod mock;
pub mod prover;
pub mod traits;
pub mod verifier;

pub use merkle::{MembershipTree, MerkleWitness};
pub use mock::MockProof;
pub use prover::prove_membership;
pub use traits::{IdentityProof, PublicOutput};
pub use verifier::{verify_membership_proof, MembershipProof};

/// Errors from the reference membership backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProofError {
    #[error("member set is empty")]
    EmptyMemberSet,

    #[error("leaf is not part of the member set")]
    UnknownLeaf,

    #[error("witness leaf does not belong to this secret")]
    LeafMismatch,

    #[error("witness path too deep: {0} levels")]
    PathTooDeep(usize),

    #[error("proof verification failed: {0}")]
    Verification(String),
}
