//! Peer-review runtime: publish and review under identity proofs
//!
//! The runtime exclusively owns the ledger stores and is the only thing
//! that mutates them. Each operation is one transaction:
//! - every precondition is checked before the first mutation
//! - a rejected transaction leaves the state byte-identical
//! - a successful one is appended to the journal
//!
//! ## Publication lifecycle
//! `nonexistent -> published(score=0) -> reviewed(score=w1) -> reviewed(score=w1+w2) -> ...`
//! There is no deletion and no terminal state.

pub mod engine;
pub mod genesis;
pub mod scoring;
pub mod transaction;

#[cfg(test)]
mod proptests;

pub use engine::PeerReviewRuntime;
pub use genesis::{Genesis, RuntimeConfig};
pub use transaction::{Receipt, ReviewReceipt, Transaction};
