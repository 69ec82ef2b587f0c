//! Reference prover for membership proofs
//!
//! Builds a [`MembershipProof`] from a member secret and its inclusion
//! witness. The member signs a digest of the public output, the domain and
//! the witness, so none of them can be swapped after proving.

use super::{merkle::MerkleWitness, verifier::MembershipProof, ProofError, PublicOutput};
use crate::identity::MemberSecret;

/// Prove that the holder of `secret` is a member under `witness`'s root.
pub fn prove_membership(
    secret: &MemberSecret,
    witness: &MerkleWitness,
    domain: &[u8],
) -> Result<MembershipProof, ProofError> {
    if witness.leaf != secret.leaf() {
        return Err(ProofError::LeafMismatch);
    }

    let public_output = PublicOutput {
        root: witness.compute_root()?,
        identity_tag: secret.identity_tag(domain),
    };

    let statement = MembershipProof::statement(&public_output, domain, witness);
    let signature = secret.signing_key().sign(&statement).as_ref().to_vec();

    Ok(MembershipProof {
        public_output,
        domain: domain.to_vec(),
        witness: witness.clone(),
        public_key: secret.public_key(),
        signature,
    })
}
