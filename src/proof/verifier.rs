//! Reference verifier for membership proofs
//!
//! A proof is accepted only if all of the following hold:
//! - the witness path recomputes the claimed root
//! - the witness leaf is the hash of the carried public key
//! - the identity tag is the tag of that leaf in the carried domain
//! - the signature over the statement verifies under the public key

use super::{merkle::MerkleWitness, IdentityProof, ProofError, PublicOutput};
use crate::identity::{leaf_from_public_key, tag_for_leaf};
use ring::signature::{UnparsedPublicKey, ED25519};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const STATEMENT_DOMAIN: &[u8] = b"zkpeer-membership-statement-v1";

/// Transparent membership proof produced by [`super::prove_membership`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipProof {
    pub public_output: PublicOutput,
    /// Tag domain the identity tag was derived in.
    pub domain: Vec<u8>,
    pub witness: MerkleWitness,
    /// Ed25519 public key whose hash is the witness leaf.
    pub public_key: [u8; 32],
    /// Ed25519 signature over [`MembershipProof::statement`].
    pub signature: Vec<u8>,
}

impl MembershipProof {
    /// Digest the member signs: public output, domain and witness.
    pub fn statement(
        output: &PublicOutput,
        domain: &[u8],
        witness: &MerkleWitness,
    ) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(STATEMENT_DOMAIN);
        hasher.update(output.root.as_bytes());
        hasher.update(output.identity_tag.as_bytes());
        hasher.update((domain.len() as u64).to_le_bytes());
        hasher.update(domain);
        hasher.update(witness.leaf);
        for (sibling, is_left) in &witness.path {
            hasher.update(sibling);
            hasher.update([u8::from(*is_left)]);
        }
        hasher.finalize().into()
    }

    /// Encoded size of the proof in bytes.
    pub fn size(&self) -> usize {
        // root + tag + leaf + public key, then the variable parts
        32 * 4 + self.signature.len() + self.domain.len() + self.witness.path.len() * 33
    }
}

/// Verify a membership proof, reporting why it failed.
pub fn verify_membership_proof(proof: &MembershipProof) -> Result<(), ProofError> {
    let root = proof.witness.compute_root()?;
    if root != proof.public_output.root {
        return Err(ProofError::Verification(format!(
            "witness root {} does not match claimed root {}",
            root.short(),
            proof.public_output.root.short()
        )));
    }

    if leaf_from_public_key(&proof.public_key) != proof.witness.leaf {
        return Err(ProofError::Verification(
            "public key does not match witness leaf".to_string(),
        ));
    }

    if tag_for_leaf(&proof.witness.leaf, &proof.domain) != proof.public_output.identity_tag {
        return Err(ProofError::Verification(
            "identity tag was not derived from witness leaf".to_string(),
        ));
    }

    let statement =
        MembershipProof::statement(&proof.public_output, &proof.domain, &proof.witness);
    UnparsedPublicKey::new(&ED25519, &proof.public_key)
        .verify(&statement, &proof.signature)
        .map_err(|_| ProofError::Verification("signature check failed".to_string()))
}

impl IdentityProof for MembershipProof {
    fn verify(&self) -> bool {
        match verify_membership_proof(self) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "membership proof rejected");
                false
            }
        }
    }

    fn public_output(&self) -> &PublicOutput {
        &self.public_output
    }
}
