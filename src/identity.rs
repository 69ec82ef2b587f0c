//! Member keys, membership leaves and identity tags (nullifiers)
//!
//! A member holds a secret. Everything public is derived from it:
//!
//! - an **Ed25519 signing key**, expanded from the secret with HKDF;
//! - the **membership leaf**, SHA-256 of the public key, which the commitment
//!   service folds into the accumulator root over the approved member set;
//! - the **identity tag**, HMAC-SHA256 of the domain keyed by the leaf, the
//!   pseudonymous handle under which reputation and authorship are recorded.
//!
//! # Security Properties
//!
//! - **Determinism**: Same secret + same domain always produces the same tag
//! - **One tag per member per domain**: The tag is a function of the leaf, so
//!   a member cannot mint extra tags within a domain
//! - **Domain Separation**: Different domains produce unrelated tags for the same secret
//! - **Immediate Zeroization**: Secret and seed bytes are cleared from memory
//!
//! Tags are linkable to leaves by anyone who knows the member set. Hiding that
//! link is the job of a zero-knowledge prover, not of this module.

use crate::types::IdentityTag;
use hkdf::Hkdf;
use ring::hmac;
use ring::signature::{Ed25519KeyPair, KeyPair};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Default domain for tags used against this ledger.
pub const DEFAULT_TAG_DOMAIN: &[u8] = b"zkpeer-peer-review";

const SIGNING_SEED_SALT: &[u8] = b"zkpeer-member-key-v1";
const LEAF_DOMAIN: &[u8] = b"zkpeer-membership-leaf-v1";

/// A member's secret. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MemberSecret(Vec<u8>);

impl MemberSecret {
    /// Wraps secret bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw secret bytes.
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Ed25519 key pair owned by this member.
    pub fn signing_key(&self) -> Ed25519KeyPair {
        let mut seed = derive_signing_seed(&self.0);
        let key = Ed25519KeyPair::from_seed_unchecked(&seed)
            .expect("32-byte seed is always a valid Ed25519 seed");
        seed.zeroize();
        key
    }

    /// The member's Ed25519 public key.
    pub fn public_key(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(self.signing_key().public_key().as_ref());
        out
    }

    /// The accumulator leaf contributed by this member.
    pub fn leaf(&self) -> [u8; 32] {
        member_leaf(self)
    }

    /// The identity tag for `domain`.
    pub fn identity_tag(&self, domain: &[u8]) -> IdentityTag {
        derive_identity_tag(self, domain)
    }
}

impl std::fmt::Debug for MemberSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("MemberSecret(<redacted>)")
    }
}

fn derive_signing_seed(secret: &[u8]) -> [u8; 32] {
    let hk = Hkdf::<Sha256>::new(Some(SIGNING_SEED_SALT), secret);
    let mut seed = [0u8; 32];
    hk.expand(b"ed25519-seed", &mut seed)
        .expect("HKDF expand should never fail with valid length");
    seed
}

/// Membership leaf of an Ed25519 public key.
pub fn leaf_from_public_key(public_key: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(LEAF_DOMAIN);
    hasher.update(public_key);
    hasher.finalize().into()
}

/// Identity tag of the member behind `leaf` within `domain`.
pub fn tag_for_leaf(leaf: &[u8; 32], domain: &[u8]) -> IdentityTag {
    let key = hmac::Key::new(hmac::HMAC_SHA256, leaf);
    let tag = hmac::sign(&key, domain);
    let mut out = [0u8; 32];
    out.copy_from_slice(tag.as_ref());
    IdentityTag::from_bytes(out)
}

/// Derives the identity tag of `secret` within `domain`.
pub fn derive_identity_tag(secret: &MemberSecret, domain: &[u8]) -> IdentityTag {
    tag_for_leaf(&member_leaf(secret), domain)
}

/// Computes the membership leaf of `secret`.
pub fn member_leaf(secret: &MemberSecret) -> [u8; 32] {
    leaf_from_public_key(&secret.public_key())
}
