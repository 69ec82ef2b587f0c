//! Aggregate ledger state.
//!
//! All stores are ordered maps/sets, so the CBOR encoding of equal states is
//! byte-identical. Snapshots and atomicity checks rely on that.

use super::{
    CommitmentRegistry, Journal, PublicationLedger, ReputationLedger, ReviewGuard,
};
use crate::serialization::{from_cbor, to_cbor, SerializationError};
use serde::{Deserialize, Serialize};

/// Current schema version of the snapshot encoding.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    /// Schema version for evolution.
    pub schema_version: u32,
    pub registry: CommitmentRegistry,
    pub reputation: ReputationLedger,
    pub publications: PublicationLedger,
    pub reviews: ReviewGuard,
    #[serde(default)]
    pub journal: Journal,
}

impl LedgerState {
    pub fn new() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            registry: CommitmentRegistry::new(),
            reputation: ReputationLedger::new(),
            publications: PublicationLedger::new(),
            reviews: ReviewGuard::new(),
            journal: Journal::new(),
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerializationError> {
        to_cbor(self)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerializationError> {
        from_cbor(bytes)
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new()
    }
}
