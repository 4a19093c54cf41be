//! # vdr-crypto — Signature Suite for the Verifiable Data Registry
//!
//! The registry treats asymmetric cryptography as an external collaborator:
//! the model and engine crates only see the [`SignatureSuite`] port. This
//! crate supplies that port plus the Ed25519 implementation used by the
//! registry's verification methods (PEM-encoded public keys, raw 64-byte
//! signatures carried base64-encoded in `proofValue`).
//!
//! ## Crate Policy
//!
//! - Depends only on `vdr-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   keys, real signatures, real verification.
//! - Private keys are never serialized; `Ed25519KeyPair` does not implement
//!   `Serialize`.

pub mod ed25519;
pub mod pem;

pub use ed25519::{Ed25519KeyPair, Ed25519Suite};
pub use pem::{decode_pem, encode_public_key_pem};

use vdr_core::CryptoError;

/// Port for asymmetric signature verification. One suite instance serves a
/// whole registry; the verification-method `type` field selects nothing at
/// runtime because the registry's method binds a single suite.
pub trait SignatureSuite: Send + Sync {
    /// Verify `signature` over `message` with the PEM-encoded public key.
    ///
    /// Returns `Ok(false)` for a well-formed key and a signature that does
    /// not match; `Err` when the key itself cannot be parsed.
    fn verify(&self, public_key_pem: &str, message: &[u8], signature: &[u8])
        -> Result<bool, CryptoError>;
}
