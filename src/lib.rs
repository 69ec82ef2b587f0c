//! zkpeer - Anonymous Peer-Review Ledger Core
//!
//! State-transition core of a peer-review ledger where members publish and
//! review works under pseudonymous identity tags.
//!
//! Key principles:
//! - Membership proven by identity proofs, never by revealed identity
//! - Reputation only ever grows, one point at a time
//! - Review influence weighted by earned reputation
//! - Every transaction applies fully or not at all

pub mod config;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod logging;
pub mod proof;
pub mod runtime;
pub mod serialization;
pub mod service;
pub mod store;
pub mod types;

pub use error::{PeerReviewError, Result};
pub use ledger::{Publication, PublicationDraft};
pub use proof::{IdentityProof, PublicOutput};
pub use runtime::{Genesis, PeerReviewRuntime, Receipt, RuntimeConfig, Transaction};
pub use service::LedgerService;
pub use types::{CommitmentRoot, IdentityTag, PublicationId, ReviewKey};
