//! Ledger service: runtime + snapshot persistence.
//!
//! The service is what an embedding sequencer talks to. It opens the ledger
//! from configuration (snapshot if present, genesis otherwise), applies
//! transactions one at a time and writes a snapshot after every success.
//! Rejected transactions touch neither memory nor disk.

use crate::config::{ConfigError, ZkPeerConfig};
use crate::error::PeerReviewError;
use crate::proof::IdentityProof;
use crate::runtime::{Genesis, PeerReviewRuntime, Receipt, RuntimeConfig, Transaction};
use crate::store::{StateStore, StoreError};
use thiserror::Error;
use tracing::{error, info};

/// Service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The transaction was rejected by the runtime.
    #[error("transaction rejected: {0}")]
    Rejected(#[from] PeerReviewError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ServiceError {
    /// The runtime rejection, if this is one.
    pub fn rejection(&self) -> Option<&PeerReviewError> {
        match self {
            Self::Rejected(e) => Some(e),
            _ => None,
        }
    }
}

pub struct LedgerService {
    runtime: PeerReviewRuntime,
    store: Option<StateStore>,
}

impl LedgerService {
    /// Open the ledger described by `config`.
    pub fn open(config: &ZkPeerConfig) -> Result<Self, ServiceError> {
        let store = config.storage.state_path.clone().map(StateStore::new);

        let snapshot = match &store {
            Some(store) => store.load()?,
            None => None,
        };

        let runtime = match snapshot {
            Some(state) => {
                info!(
                    publications = state.publications.len(),
                    events = state.journal.len(),
                    "resumed ledger from snapshot"
                );
                PeerReviewRuntime::from_state(state, config.runtime)
            }
            None => {
                let genesis = config.to_genesis()?;
                info!(
                    commitment = genesis.commitment.is_some(),
                    allocations = genesis.reputations.len(),
                    "initialized ledger from genesis"
                );
                PeerReviewRuntime::from_genesis(genesis, config.runtime)
            }
        };

        Ok(Self { runtime, store })
    }

    /// In-memory ledger with no snapshot file.
    pub fn in_memory(genesis: Genesis, config: RuntimeConfig) -> Self {
        Self {
            runtime: PeerReviewRuntime::from_genesis(genesis, config),
            store: None,
        }
    }

    /// Apply `tx` and persist the resulting state.
    ///
    /// A transaction counts as applied only once its snapshot is written. If
    /// the write fails the in-memory state is rolled back and the error is
    /// returned, so the same transaction can be resubmitted.
    pub fn submit<P: IdentityProof>(&mut self, tx: Transaction<P>) -> Result<Receipt, ServiceError> {
        let kind = tx.kind();
        let Some(store) = &self.store else {
            return Ok(self.runtime.apply(tx)?);
        };

        let checkpoint = self.runtime.clone();
        let receipt = self.runtime.apply(tx)?;

        if let Err(e) = store.save(self.runtime.state()) {
            error!(error = %e, transaction = kind, "snapshot write failed, rolled back");
            self.runtime = checkpoint;
            return Err(e.into());
        }

        Ok(receipt)
    }

    pub fn runtime(&self) -> &PeerReviewRuntime {
        &self.runtime
    }

    pub fn store(&self) -> Option<&StateStore> {
        self.store.as_ref()
    }
}
