//! Append-only journal of applied transactions.
//!
//! - One entry per successful transaction, never for a rejected one
//! - Sequence numbers start at 1 and increase by one
//! - Pseudonymous: records identity tags, never secrets

use crate::types::{CommitmentRoot, IdentityTag, PublicationId};
use serde::{Deserialize, Serialize};

/// What a transaction changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    CommitmentSet {
        root: CommitmentRoot,
    },
    Published {
        id: PublicationId,
        author: IdentityTag,
    },
    Reviewed {
        id: PublicationId,
        reviewer: IdentityTag,
        weighted_score: u64,
    },
}

/// Single journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub sequence: u64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    events: Vec<LedgerEvent>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event and return its sequence number.
    pub fn record(&mut self, kind: EventKind) -> u64 {
        let sequence = self.events.last().map_or(1, |e| e.sequence + 1);
        self.events.push(LedgerEvent { sequence, kind });
        sequence
    }

    /// Events with a sequence number strictly greater than `after`.
    pub fn since(&self, after: u64) -> &[LedgerEvent] {
        let start = self.events.partition_point(|e| e.sequence <= after);
        &self.events[start..]
    }

    /// Events touching publication `id`.
    pub fn for_publication<'a>(
        &'a self,
        id: &'a PublicationId,
    ) -> impl Iterator<Item = &'a LedgerEvent> + 'a {
        self.events.iter().filter(move |e| match &e.kind {
            EventKind::Published { id: p, .. } | EventKind::Reviewed { id: p, .. } => p == id,
            EventKind::CommitmentSet { .. } => false,
        })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
