//! Publication ledger and author index.
//!
//! A publication and its author entry are always inserted together. Content
//! and timestamp never change after insertion; only the score grows.

use crate::types::{IdentityTag, PublicationId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Payload submitted with `publish`. Carries no score: every publication
/// starts at zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicationDraft {
    /// Content reference (URI, digest, or inline text).
    pub content: String,
    /// Creation timestamp supplied by the author.
    pub timestamp: u64,
}

impl PublicationDraft {
    pub fn new(content: impl Into<String>, timestamp: u64) -> Self {
        Self {
            content: content.into(),
            timestamp,
        }
    }
}

/// A stored publication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Publication {
    pub content: String,
    pub timestamp: u64,
    /// Accumulated weighted review score.
    pub score: u64,
}

impl From<PublicationDraft> for Publication {
    fn from(draft: PublicationDraft) -> Self {
        Self {
            content: draft.content,
            timestamp: draft.timestamp,
            score: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationLedger {
    publications: BTreeMap<PublicationId, Publication>,
    authors: BTreeMap<PublicationId, IdentityTag>,
}

impl PublicationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &PublicationId) -> bool {
        self.publications.contains_key(id)
    }

    pub fn get(&self, id: &PublicationId) -> Option<&Publication> {
        self.publications.get(id)
    }

    pub fn author_of(&self, id: &PublicationId) -> Option<IdentityTag> {
        self.authors.get(id).copied()
    }

    /// Insert a publication together with its author entry.
    ///
    /// Callers must check `contains` first; an existing entry is replaced.
    pub fn insert(&mut self, id: PublicationId, publication: Publication, author: IdentityTag) {
        self.publications.insert(id, publication);
        self.authors.insert(id, author);
    }

    /// Add `amount` to the score of `id`. Returns the new score, or `None`
    /// if the publication does not exist or the sum would overflow.
    pub fn add_score(&mut self, id: &PublicationId, amount: u64) -> Option<u64> {
        let publication = self.publications.get_mut(id)?;
        publication.score = publication.score.checked_add(amount)?;
        Some(publication.score)
    }

    pub fn len(&self) -> usize {
        self.publications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.publications.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PublicationId, &Publication)> {
        self.publications.iter()
    }

    /// Publications authored by `author`, in id order.
    pub fn by_author<'a>(
        &'a self,
        author: &'a IdentityTag,
    ) -> impl Iterator<Item = PublicationId> + 'a {
        self.authors
            .iter()
            .filter(move |(_, a)| *a == author)
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: u8) -> IdentityTag {
        IdentityTag::from_bytes([id; 32])
    }

    #[test]
    fn test_draft_starts_at_zero() {
        let publication: Publication = PublicationDraft::new("ipfs://paper", 10).into();
        assert_eq!(publication.score, 0);
        assert_eq!(publication.timestamp, 10);
    }

    #[test]
    fn test_insert_creates_author_entry() {
        let mut ledger = PublicationLedger::new();
        let id = PublicationId::derive(&tag(1), 10);

        ledger.insert(id, PublicationDraft::new("x", 10).into(), tag(1));

        assert!(ledger.contains(&id));
        assert_eq!(ledger.author_of(&id), Some(tag(1)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_add_score() {
        let mut ledger = PublicationLedger::new();
        let id = PublicationId::derive(&tag(1), 10);
        ledger.insert(id, PublicationDraft::new("x", 10).into(), tag(1));

        assert_eq!(ledger.add_score(&id, 60), Some(60));
        assert_eq!(ledger.add_score(&id, 5), Some(65));
        assert_eq!(ledger.get(&id).unwrap().content, "x");
    }

    #[test]
    fn test_add_score_missing_or_overflow() {
        let mut ledger = PublicationLedger::new();
        let id = PublicationId::derive(&tag(1), 10);
        assert_eq!(ledger.add_score(&id, 1), None);

        ledger.insert(id, PublicationDraft::new("x", 10).into(), tag(1));
        ledger.add_score(&id, u64::MAX);
        assert_eq!(ledger.add_score(&id, 1), None);
        assert_eq!(ledger.get(&id).unwrap().score, u64::MAX);
    }

    #[test]
    fn test_by_author() {
        let mut ledger = PublicationLedger::new();
        let a1 = PublicationId::derive(&tag(1), 1);
        let a2 = PublicationId::derive(&tag(1), 2);
        let b1 = PublicationId::derive(&tag(2), 1);
        ledger.insert(a1, PublicationDraft::new("a1", 1).into(), tag(1));
        ledger.insert(a2, PublicationDraft::new("a2", 2).into(), tag(1));
        ledger.insert(b1, PublicationDraft::new("b1", 1).into(), tag(2));

        let author = tag(1);
        let mine: Vec<_> = ledger.by_author(&author).collect();
        assert_eq!(mine.len(), 2);
        assert!(mine.contains(&a1) && mine.contains(&a2));
    }

    #[test]
    fn test_publication_json_roundtrip() {
        let publication = Publication {
            content: "doi:10.1000/182".to_string(),
            timestamp: 1_700_000_000,
            score: 60,
        };
        let json = serde_json::to_string(&publication).unwrap();
        let back: Publication = serde_json::from_str(&json).unwrap();
        assert_eq!(publication, back);
    }
}
