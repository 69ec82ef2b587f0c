//! Ledger stores owned by the peer-review runtime.
//!
//! - Commitment registry: active membership root
//! - Reputation ledger: identity tag -> score (absent = 0)
//! - Publication ledger: publication id -> publication, plus author index
//! - Review guard: (reviewer, publication) pairs already reviewed
//! - Journal: append-only record of applied transactions
//!
//! Stores expose plain mutation primitives. Precondition checks and
//! all-or-nothing application live in `crate::runtime`.

pub mod journal;
pub mod publications;
pub mod registry;
pub mod reputation;
pub mod review_guard;
pub mod state;

pub use journal::{EventKind, Journal, LedgerEvent};
pub use publications::{Publication, PublicationDraft, PublicationLedger};
pub use registry::CommitmentRegistry;
pub use reputation::ReputationLedger;
pub use review_guard::ReviewGuard;
pub use state::LedgerState;
