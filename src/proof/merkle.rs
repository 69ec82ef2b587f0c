//! Merkle commitment over the approved member set
//!
//! Binary SHA-256 tree over membership leaves, sorted (BTreeSet order) so the
//! root is independent of insertion order. An odd node at any level is paired
//! with itself.

use super::ProofError;
use crate::types::CommitmentRoot;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;

/// 32-byte hash (SHA-256 output)
pub type Hash = [u8; 32];

/// Deepest path accepted from a witness. 2^64 leaves is beyond any member set.
pub const MAX_PATH_DEPTH: usize = 64;

const NODE_PREFIX: u8 = 0x01;

/// A complete Merkle tree, stored level by level (leaves first).
#[derive(Debug, Clone)]
pub struct MembershipTree {
    levels: Vec<Vec<Hash>>,
}

/// Inclusion witness for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleWitness {
    pub leaf: Hash,
    /// (sibling_hash, sibling_is_left), from the leaf upwards.
    pub path: Vec<(Hash, bool)>,
}

impl MembershipTree {
    /// Build a tree from a set of membership leaves.
    pub fn from_leaves(leaves: &BTreeSet<Hash>) -> Result<Self, ProofError> {
        if leaves.is_empty() {
            return Err(ProofError::EmptyMemberSet);
        }

        let mut levels = vec![leaves.iter().copied().collect::<Vec<_>>()];
        while levels[levels.len() - 1].len() > 1 {
            let next = levels[levels.len() - 1]
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => hash_pair(left, right),
                    [single] => hash_pair(single, single),
                    _ => unreachable!("chunks(2) yields one or two items"),
                })
                .collect();
            levels.push(next);
        }

        Ok(Self { levels })
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    /// Always false; an empty member set cannot build a tree.
    pub fn is_empty(&self) -> bool {
        self.levels[0].is_empty()
    }

    /// The commitment root.
    pub fn root(&self) -> CommitmentRoot {
        let top = self.levels[self.levels.len() - 1][0];
        CommitmentRoot::from_bytes(top)
    }

    /// Inclusion witness for `leaf`.
    pub fn witness(&self, leaf: &Hash) -> Result<MerkleWitness, ProofError> {
        let mut index = self.levels[0]
            .binary_search(leaf)
            .map_err(|_| ProofError::UnknownLeaf)?;

        let mut path = Vec::with_capacity(self.levels.len() - 1);
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_is_left = index % 2 == 1;
            let sibling = if sibling_is_left {
                level[index - 1]
            } else {
                // Odd tail pairs with itself.
                *level.get(index + 1).unwrap_or(&level[index])
            };
            path.push((sibling, sibling_is_left));
            index /= 2;
        }

        Ok(MerkleWitness { leaf: *leaf, path })
    }
}

impl MerkleWitness {
    /// Recompute the root this witness commits to.
    pub fn compute_root(&self) -> Result<CommitmentRoot, ProofError> {
        if self.path.len() > MAX_PATH_DEPTH {
            return Err(ProofError::PathTooDeep(self.path.len()));
        }

        let root = self
            .path
            .iter()
            .fold(self.leaf, |current, (sibling, sibling_is_left)| {
                if *sibling_is_left {
                    hash_pair(sibling, &current)
                } else {
                    hash_pair(&current, sibling)
                }
            });
        Ok(CommitmentRoot::from_bytes(root))
    }
}

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update([NODE_PREFIX]);
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(ids: impl IntoIterator<Item = u8>) -> BTreeSet<Hash> {
        ids.into_iter().map(|i| [i; 32]).collect()
    }

    #[test]
    fn test_empty_set_rejected() {
        assert_eq!(
            MembershipTree::from_leaves(&BTreeSet::new()).unwrap_err(),
            ProofError::EmptyMemberSet
        );
    }

    #[test]
    fn test_single_leaf_root_is_leaf() {
        let tree = MembershipTree::from_leaves(&leaves([5])).unwrap();
        assert_eq!(tree.root().as_bytes(), &[5; 32]);
        let witness = tree.witness(&[5; 32]).unwrap();
        assert!(witness.path.is_empty());
        assert_eq!(witness.compute_root().unwrap(), tree.root());
    }

    #[test]
    fn test_every_leaf_witness_reaches_root() {
        for size in 1..=9u8 {
            let set = leaves(1..=size);
            let tree = MembershipTree::from_leaves(&set).unwrap();
            assert_eq!(tree.len(), size as usize);
            for leaf in &set {
                let witness = tree.witness(leaf).unwrap();
                assert_eq!(
                    witness.compute_root().unwrap(),
                    tree.root(),
                    "size {} leaf {}",
                    size,
                    leaf[0]
                );
            }
        }
    }

    #[test]
    fn test_unknown_leaf() {
        let tree = MembershipTree::from_leaves(&leaves([1, 2, 3])).unwrap();
        assert_eq!(tree.witness(&[9; 32]).unwrap_err(), ProofError::UnknownLeaf);
    }

    #[test]
    fn test_root_changes_with_membership() {
        let a = MembershipTree::from_leaves(&leaves([1, 2, 3])).unwrap();
        let b = MembershipTree::from_leaves(&leaves([1, 2, 4])).unwrap();
        assert_ne!(a.root(), b.root());
    }

    #[test]
    fn test_tampered_sibling_changes_root() {
        let tree = MembershipTree::from_leaves(&leaves([1, 2, 3, 4])).unwrap();
        let mut witness = tree.witness(&[2; 32]).unwrap();
        witness.path[0].0 = [0xee; 32];
        assert_ne!(witness.compute_root().unwrap(), tree.root());
    }

    #[test]
    fn test_path_depth_limit() {
        let witness = MerkleWitness {
            leaf: [0; 32],
            path: vec![([0; 32], false); MAX_PATH_DEPTH + 1],
        };
        assert_eq!(
            witness.compute_root().unwrap_err(),
            ProofError::PathTooDeep(MAX_PATH_DEPTH + 1)
        );
    }
}
