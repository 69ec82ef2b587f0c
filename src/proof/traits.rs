//! The proof contract the runtime depends on.

use crate::types::{CommitmentRoot, IdentityTag};
use serde::{Deserialize, Serialize};

/// Public output of an identity proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicOutput {
    /// Accumulator root the membership witness was checked against.
    pub root: CommitmentRoot,
    /// Identity tag derived from the prover's secret.
    pub identity_tag: IdentityTag,
}

/// An opaque identity proof.
///
/// A successful `verify()` guarantees that `identity_tag` was derived from a
/// secret whose membership leaf is included under `root`. Whether `root` is
/// the *active* commitment is the runtime's concern, not the proof's.
pub trait IdentityProof {
    /// Check the proof. Must return `false` for anything malformed.
    fn verify(&self) -> bool;

    /// The public output pair.
    fn public_output(&self) -> &PublicOutput;
}

impl<P: IdentityProof + ?Sized> IdentityProof for Box<P> {
    fn verify(&self) -> bool {
        (**self).verify()
    }

    fn public_output(&self) -> &PublicOutput {
        (**self).public_output()
    }
}
