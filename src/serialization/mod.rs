//! CBOR serialization for ledger snapshots.
//!
//! - CBOR via `ciborium` (NOT JSON or bincode)
//! - Deterministic output for ordered collections
//! - Schema evolution through `#[serde(default)]`

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Serialization errors.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// CBOR encoding failed.
    #[error("CBOR encoding failed: {0}")]
    Encode(String),

    /// CBOR decoding failed.
    #[error("CBOR decoding failed: {0}")]
    Decode(String),
}

/// Serialize to CBOR bytes.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(value, &mut bytes)
        .map_err(|e| SerializationError::Encode(format!("{:?}", e)))?;
    Ok(bytes)
}

/// Deserialize from CBOR bytes.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    ciborium::from_reader(bytes).map_err(|e| SerializationError::Decode(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IdentityTag;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[test]
    fn test_hash_keyed_map_roundtrip() {
        let mut scores = BTreeMap::new();
        scores.insert(IdentityTag::from_bytes([1; 32]), 5u64);
        scores.insert(IdentityTag::from_bytes([2; 32]), 6u64);

        let bytes = to_cbor(&scores).unwrap();
        let recovered: BTreeMap<IdentityTag, u64> = from_cbor(&bytes).unwrap();
        assert_eq!(scores, recovered);
    }

    #[test]
    fn test_backward_compatibility() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct V1 {
            schema_version: u32,
        }

        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct V2 {
            schema_version: u32,
            #[serde(default)]
            journal: Vec<u64>,
        }

        let bytes = to_cbor(&V1 { schema_version: 1 }).unwrap();
        let v2: V2 = from_cbor(&bytes).unwrap();
        assert_eq!(v2.schema_version, 1);
        assert!(v2.journal.is_empty());
    }

    #[test]
    fn test_decode_error() {
        let result: Result<u64, _> = from_cbor(&[]);
        assert!(matches!(result, Err(SerializationError::Decode(_))));
    }
}
