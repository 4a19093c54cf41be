//! # Storage Key Codec
//!
//! Deterministic, side-effect-free transforms from domain identifiers to
//! storage-safe key strings. Keys may only contain letters, digits, and
//! underscores once they reach the state store, so every identifier class
//! gets its own sanitizer:
//!
//! - DIDs lose their fixed `did:<method>:` prefix (shorter keys cost less
//!   state) and swap remaining colons for underscores.
//! - Public keys hash to a fixed-width hex string regardless of PEM size.
//! - Credential ids are URLs; all URL punctuation becomes underscores.
//! - Delegation tuples join their four fields and pass through the
//!   credential-id sanitizer.

use sha2::{Digest, Sha256};

use crate::did::DID_PREFIX_LEN;

/// Storage key for a DID: prefix stripped, colons replaced by underscores.
/// A string too short to carry the prefix, or whose prefix offset is not a
/// character boundary, is sanitized whole — this function never fails.
pub fn did_key(did: &str) -> String {
    let trimmed = did
        .get(DID_PREFIX_LEN..)
        .filter(|rest| !rest.is_empty())
        .unwrap_or(did);
    trimmed.replace(':', "_")
}

/// Storage key for a public key: hex of the SHA-256 of the PEM bytes.
pub fn pubkey_key(pem: &str) -> String {
    let digest = Sha256::digest(pem.as_bytes());
    hex_encode(&digest)
}

/// Storage key for a credential id (an HTTP URL): every character outside
/// `[A-Za-z0-9_]` that appears in URLs (`:`, `/`, `.`, `-`) becomes `_`.
pub fn credential_key(vc_id: &str) -> String {
    vc_id
        .chars()
        .map(|c| match c {
            ':' | '/' | '.' | '-' => '_',
            other => other,
        })
        .collect()
}

/// Storage key for a delegation grant: the full 4-tuple joined with `_`,
/// then sanitized. At most one grant exists per unique tuple.
pub fn delegate_key(delegator: &str, delegatee: &str, resource: &str, action: &str) -> String {
    credential_key(&format!("{delegator}_{delegatee}_{resource}_{action}"))
}

/// Storage key prefix for hierarchical delegation searches. Narrower fields
/// only participate when every broader field is present.
pub fn delegate_prefix(delegator: &str, delegatee: &str, resource: &str, action: &str) -> String {
    let mut prefix = format!("{delegator}_");
    if !delegatee.is_empty() {
        prefix.push_str(delegatee);
        prefix.push('_');
        if !resource.is_empty() {
            prefix.push_str(resource);
            prefix.push('_');
            if !action.is_empty() {
                prefix.push_str(action);
            }
        }
    }
    credential_key(&prefix)
}

/// Storage key for a template, composed from its id and version.
pub fn template_key(template_id: &str, version: &str) -> String {
    format!("{template_id}_{version}")
}

/// Storage key for one issuance-log entry under the holder index. The
/// timestamp plus a 2-byte payload hash keeps repeat issuances to the same
/// holder from overwriting each other.
pub fn issue_log_key(holder_did: &str, unix_ts: i64, payload: &[u8]) -> String {
    let digest = Sha256::digest(payload);
    format!("{}-{}-{}", did_key(holder_did), unix_ts, hex_encode(&digest[..2]))
}

/// Lowercase hex without an external dependency; key material only.
pub fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn did_key_strips_prefix_and_colons() {
        assert_eq!(did_key("did:vdrx:ab:cd"), "ab_cd");
        // Strings at or under prefix length pass through the colon swap only.
        assert_eq!(did_key("short:x"), "short_x");
    }

    #[test]
    fn did_key_handles_multibyte_input_without_panic() {
        // The prefix offset leaves nothing in the first input and lands
        // inside 'é' in the second; both sanitize whole.
        assert_eq!(did_key("did:vdré"), "did_vdré");
        assert_eq!(did_key("did:vdrxé"), "did_vdrxé");
    }

    #[test]
    fn pubkey_key_is_fixed_width() {
        let short = pubkey_key("k");
        let long = pubkey_key(&"-----BEGIN PUBLIC KEY-----\n".repeat(40));
        assert_eq!(short.len(), 64);
        assert_eq!(long.len(), 64);
        assert_ne!(short, long);
    }

    #[test]
    fn credential_key_sanitizes_url_punctuation() {
        assert_eq!(
            credential_key("https://vc.example.com/v1/a-b.json"),
            "https___vc_example_com_v1_a_b_json"
        );
    }

    #[test]
    fn delegate_prefix_is_hierarchical() {
        assert_eq!(delegate_prefix("did:vdrx:a", "", "", ""), "did_vdrx_a_");
        assert_eq!(
            delegate_prefix("did:vdrx:a", "did:vdrx:b", "", ""),
            "did_vdrx_a_did_vdrx_b_"
        );
        // Action without resource does not narrow the prefix.
        assert_eq!(
            delegate_prefix("did:vdrx:a", "did:vdrx:b", "", "sign"),
            "did_vdrx_a_did_vdrx_b_"
        );
        assert_eq!(
            delegate_prefix("did:vdrx:a", "did:vdrx:b", "res", "sign"),
            "did_vdrx_a_did_vdrx_b_res_sign"
        );
    }

    #[test]
    fn full_delegate_key_matches_full_prefix() {
        let key = delegate_key("did:vdrx:a", "did:vdrx:b", "res", "sign");
        let prefix = delegate_prefix("did:vdrx:a", "did:vdrx:b", "res", "sign");
        assert_eq!(key, prefix);
    }

    #[test]
    fn issue_log_keys_differ_for_distinct_payloads() {
        let a = issue_log_key("did:vdrx:h", 1000, b"payload-a");
        let b = issue_log_key("did:vdrx:h", 1000, b"payload-b");
        assert!(a.starts_with("h-1000-"));
        assert_ne!(a, b);
    }
}
