//! # PEM Armor Handling
//!
//! Verification methods carry their public keys as PEM text. The registry
//! accepts both raw 32-byte Ed25519 keys and SubjectPublicKeyInfo DER (where
//! the key occupies the trailing 32 bytes), so armored output from common
//! tooling works unchanged.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use vdr_core::CryptoError;

const BEGIN_MARKER: &str = "-----BEGIN";
const END_MARKER: &str = "-----END";

/// Decode the base64 body between PEM armor lines. Input without armor is
/// treated as a bare base64 body.
pub fn decode_pem(pem: &str) -> Result<Vec<u8>, CryptoError> {
    let mut body = String::new();
    let mut inside = !pem.contains(BEGIN_MARKER);
    for line in pem.lines() {
        let line = line.trim();
        if line.starts_with(BEGIN_MARKER) {
            inside = true;
            continue;
        }
        if line.starts_with(END_MARKER) {
            break;
        }
        if inside && !line.is_empty() {
            body.push_str(line);
        }
    }
    if body.is_empty() {
        return Err(CryptoError::KeyError("empty pem body".into()));
    }
    STANDARD
        .decode(body.as_bytes())
        .map_err(|e| CryptoError::KeyError(format!("pem body is not base64: {e}")))
}

/// Armor a raw public key as PEM with 64-column base64 lines.
pub fn encode_public_key_pem(raw: &[u8]) -> String {
    let body = STANDARD.encode(raw);
    let mut out = String::from("-----BEGIN PUBLIC KEY-----\n");
    for chunk in body.as_bytes().chunks(64) {
        // chunks of a valid base64 string stay valid UTF-8
        out.push_str(std::str::from_utf8(chunk).unwrap_or_default());
        out.push('\n');
    }
    out.push_str("-----END PUBLIC KEY-----\n");
    out
}
