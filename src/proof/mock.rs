//! Mock identity proof for testing.
//!
//! Stands in for a real proof object: the verification outcome and the
//! public output are fixed at construction.

use super::traits::{IdentityProof, PublicOutput};
use crate::types::{CommitmentRoot, IdentityTag};
use serde::{Deserialize, Serialize};

/// Mock proof with a preset verification result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockProof {
    pub valid: bool,
    pub output: PublicOutput,
}

impl MockProof {
    /// A proof that verifies.
    pub fn valid(root: CommitmentRoot, identity_tag: IdentityTag) -> Self {
        Self {
            valid: true,
            output: PublicOutput { root, identity_tag },
        }
    }

    /// A proof that fails verification.
    pub fn invalid(root: CommitmentRoot, identity_tag: IdentityTag) -> Self {
        Self {
            valid: false,
            output: PublicOutput { root, identity_tag },
        }
    }
}

impl IdentityProof for MockProof {
    fn verify(&self) -> bool {
        self.valid
    }

    fn public_output(&self) -> &PublicOutput {
        &self.output
    }
}
