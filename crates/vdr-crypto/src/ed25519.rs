//! # Ed25519 Suite
//!
//! The registry's sole production signature suite. Verification keys arrive
//! PEM-encoded on DID Document verification methods; signatures are raw
//! 64-byte Ed25519, base64-carried in `proofValue`.

use ed25519_dalek::{Signature, Signer, Verifier, VerifyingKey};

use vdr_core::{CryptoError, SigningBytes};

use crate::pem::{decode_pem, encode_public_key_pem};
use crate::SignatureSuite;

/// Stateless Ed25519 implementation of [`SignatureSuite`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Suite;

impl Ed25519Suite {
    /// Parse a PEM-encoded Ed25519 public key. Accepts raw 32-byte keys and
    /// SPKI DER, where the key is the trailing 32 bytes.
    pub fn verifying_key_from_pem(pem: &str) -> Result<VerifyingKey, CryptoError> {
        let der = decode_pem(pem)?;
        if der.len() < 32 {
            return Err(CryptoError::KeyError(format!(
                "public key too short: {} bytes",
                der.len()
            )));
        }
        let mut raw = [0u8; 32];
        raw.copy_from_slice(&der[der.len() - 32..]);
        VerifyingKey::from_bytes(&raw)
            .map_err(|e| CryptoError::KeyError(format!("invalid ed25519 point: {e}")))
    }
}

impl SignatureSuite for Ed25519Suite {
    fn verify(
        &self,
        public_key_pem: &str,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError> {
        let key = Self::verifying_key_from_pem(public_key_pem)?;
        let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
            return Ok(false);
        };
        let sig = Signature::from_bytes(&sig_bytes);
        Ok(key.verify(message, &sig).is_ok())
    }
}

/// An Ed25519 key pair for producing registry artifacts (documents,
/// credentials, presentations) in tests and tooling.
///
/// Does not implement `Serialize` — private keys must not leak into logs,
/// responses, or persisted state.
pub struct Ed25519KeyPair {
    signing_key: ed25519_dalek::SigningKey,
}

impl Ed25519KeyPair {
    /// Generate a random key pair.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            signing_key: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Deterministic key pair from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: ed25519_dalek::SigningKey::from_bytes(seed),
        }
    }

    /// The PEM armor of the public key, as it appears in a verification
    /// method's `publicKeyPem` field.
    pub fn public_key_pem(&self) -> String {
        encode_public_key_pem(self.signing_key.verifying_key().as_bytes())
    }

    /// Sign canonical signing bytes, returning the raw 64-byte signature.
    ///
    /// The input must be [`SigningBytes`] — you cannot sign an arbitrary
    /// buffer, which keeps every signature in the system over the
    /// proof-stripped compact form.
    pub fn sign(&self, data: &SigningBytes) -> [u8; 64] {
        self.signing_key.sign(data.as_bytes()).to_bytes()
    }
}
