//! # Verifiable Presentation
//!
//! A presentation is an ephemeral, holder-signed bundle of credentials,
//! constructed and verified per request and never persisted. Embedded
//! credentials stay as raw JSON values: each one is re-serialized unchanged
//! and verified on its own, so its signature covers its own byte layout.

use serde::Deserialize;
use serde_json::Value;

use vdr_core::{RegistryError, SigningBytes};
use vdr_crypto::SignatureSuite;

use crate::document::DidDocument;
use crate::proof::{verify_proofs, ProofSet};

#[derive(Debug, Clone, Deserialize)]
struct PresentationWire {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    presentation_type: String,
    #[serde(rename = "verifiableCredential", default)]
    verifiable_credential: Vec<Value>,
    #[serde(rename = "presentationUsage", default)]
    presentation_usage: Option<String>,
    #[serde(rename = "expirationDate", default)]
    expiration_date: Option<String>,
    #[serde(default)]
    verifier: Option<String>,
    #[serde(default)]
    proof: Option<ProofSet>,
}

/// A parsed Verifiable Presentation.
#[derive(Debug, Clone)]
pub struct VerifiablePresentation {
    raw: Value,
    /// Presentation id.
    pub id: String,
    /// Must be `VerifiablePresentation`.
    pub presentation_type: String,
    /// Embedded credentials, as raw JSON.
    pub credentials: Vec<Value>,
    /// Declared usage; carried, not interpreted.
    pub presentation_usage: Option<String>,
    /// Optional expiration; carried, not interpreted.
    pub expiration_date: Option<String>,
    /// Intended verifier; carried, not interpreted.
    pub verifier: Option<String>,
    /// The holder's proof(s); `proofPurpose` must be `authentication`.
    pub proof: Option<ProofSet>,
}

impl VerifiablePresentation {
    /// Parse a presentation from its JSON text, keeping the raw value.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| RegistryError::InvalidPresentation(e.to_string()))?;
        let wire: PresentationWire = serde_json::from_value(value.clone())
            .map_err(|e| RegistryError::InvalidPresentation(e.to_string()))?;
        Ok(Self {
            raw: value,
            id: wire.id,
            presentation_type: wire.presentation_type,
            credentials: wire.verifiable_credential,
            presentation_usage: wire.presentation_usage,
            expiration_date: wire.expiration_date,
            verifier: wire.verifier,
            proof: wire.proof,
        })
    }

    /// The holder DID, taken from the first proof's `verificationMethod`.
    pub fn holder_did(&self) -> Result<&str, RegistryError> {
        self.proof
            .as_ref()
            .and_then(|p| p.first())
            .ok_or_else(|| RegistryError::SignatureInvalid("need proof".into()))?
            .signer_did()
    }

    /// The canonical bytes the presentation's proofs sign over.
    pub fn signing_bytes(&self) -> Result<SigningBytes, RegistryError> {
        SigningBytes::strip_proof_value(&self.raw)
    }

    /// Verify the presentation's attached proof(s) against the holder's
    /// resolved document.
    pub fn verify_signature<F>(
        &self,
        resolve: F,
        suite: &dyn SignatureSuite,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&str) -> Result<DidDocument, RegistryError>,
    {
        let proofs = self
            .proof
            .as_ref()
            .ok_or_else(|| RegistryError::SignatureInvalid("need proof".into()))?;
        verify_proofs(&self.signing_bytes()?, &proofs.all(), resolve, suite)
    }
}
