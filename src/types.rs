//! Fixed-width hash values used as ledger keys.
//!
//! Every key in the ledger is a 32-byte SHA-256 output. Distinct newtypes
//! keep a publication id from ever being used where an identity tag is
//! expected.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Domain label for publication id derivation.
const PUBLICATION_ID_DOMAIN: &[u8] = b"zkpeer-publication-id-v1";

/// Domain label for review key derivation.
const REVIEW_KEY_DOMAIN: &[u8] = b"zkpeer-review-key-v1";

/// Error returned when parsing a hex-encoded hash.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HashParseError {
    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("expected 32 bytes, got {0}")]
    InvalidLength(usize),
}

macro_rules! hash_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name([u8; 32]);

        impl $name {
            /// Create from a 32-byte array.
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Get bytes.
            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            /// Parse from a 64-character hex string.
            pub fn from_hex(s: &str) -> Result<Self, HashParseError> {
                let bytes = hex::decode(s).map_err(|e| HashParseError::InvalidHex(e.to_string()))?;
                let arr: [u8; 32] = bytes
                    .as_slice()
                    .try_into()
                    .map_err(|_| HashParseError::InvalidLength(bytes.len()))?;
                Ok(Self(arr))
            }

            /// Truncated hex form for log lines.
            pub fn short(&self) -> String {
                let full = hex::encode(self.0);
                format!("{}...{}", &full[..8], &full[full.len() - 8..])
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", hex::encode(self.0))
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }
        }
    };
}

hash_newtype!(
    /// Root of the membership accumulator over the approved member set.
    CommitmentRoot
);

hash_newtype!(
    /// Pseudonymous identity tag (nullifier) derived from a member secret.
    IdentityTag
);

hash_newtype!(
    /// Lookup key of a publication.
    PublicationId
);

hash_newtype!(
    /// Membership-test key for the review guard.
    ReviewKey
);

impl PublicationId {
    /// Derive the id of a publication from its author tag and timestamp.
    pub fn derive(author: &IdentityTag, timestamp: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(PUBLICATION_ID_DOMAIN);
        hasher.update(author.as_bytes());
        hasher.update(timestamp.to_le_bytes());
        Self(hasher.finalize().into())
    }
}

impl ReviewKey {
    /// Derive the guard key for a (reviewer, publication) pair.
    pub fn derive(reviewer: &IdentityTag, publication: &PublicationId) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(REVIEW_KEY_DOMAIN);
        hasher.update(reviewer.as_bytes());
        hasher.update(publication.as_bytes());
        Self(hasher.finalize().into())
    }
}
