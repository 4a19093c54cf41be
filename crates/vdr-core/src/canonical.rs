//! # Signing Bytes — Proof-Stripped Compact JSON
//!
//! Proofs over DID Documents, credentials, and presentations sign the
//! artifact's JSON with the top-level `proof` member removed and all
//! insignificant whitespace stripped. That exact byte sequence is what
//! `SigningBytes` produces.
//!
//! ## Security Invariant
//!
//! The inner buffer is private and the only constructor applies the
//! strip-then-compact transform, so verification code cannot be handed bytes
//! produced any other way. `serde_json` is built with `preserve_order`, so
//! compaction keeps the author's member order and round-trips the original
//! byte layout.

use serde_json::Value;

use crate::error::RegistryError;

/// JSON member name removed before signing.
pub const PROOF_MEMBER: &str = "proof";

/// The byte sequence an artifact's proofs sign over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningBytes(Vec<u8>);

impl SigningBytes {
    /// Build signing bytes from an artifact's raw JSON text: parse, drop the
    /// top-level `proof` member when present, re-serialize compactly.
    pub fn strip_proof(raw: &str) -> Result<Self, RegistryError> {
        let mut value: Value = serde_json::from_str(raw)?;
        if let Value::Object(map) = &mut value {
            map.shift_remove(PROOF_MEMBER);
        }
        Ok(Self(serde_json::to_vec(&value)?))
    }

    /// Same transform starting from an already-parsed value.
    pub fn strip_proof_value(value: &Value) -> Result<Self, RegistryError> {
        let mut value = value.clone();
        if let Value::Object(map) = &mut value {
            map.shift_remove(PROOF_MEMBER);
        }
        Ok(Self(serde_json::to_vec(&value)?))
    }

    /// The canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl AsRef<[u8]> for SigningBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| serde_json::json!(n)),
            "[a-zA-Z0-9_ ]{0,24}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,8}", inner, 0..6).prop_map(|m| {
                    Value::Object(m.into_iter().collect())
                }),
            ]
        })
    }

    proptest! {
        /// Stripping is idempotent: bytes produced once re-strip to themselves.
        #[test]
        fn strip_proof_idempotent(value in json_value()) {
            let once = SigningBytes::strip_proof_value(&value).unwrap();
            let text = String::from_utf8(once.as_bytes().to_vec()).unwrap();
            let twice = SigningBytes::strip_proof(&text).unwrap();
            prop_assert_eq!(once, twice);
        }

        /// Compaction is deterministic for identical input.
        #[test]
        fn strip_proof_deterministic(value in json_value()) {
            let a = SigningBytes::strip_proof_value(&value).unwrap();
            let b = SigningBytes::strip_proof_value(&value).unwrap();
            prop_assert_eq!(a.as_bytes(), b.as_bytes());
        }
    }
}
