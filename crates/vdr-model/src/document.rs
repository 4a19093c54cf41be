//! # DID Document
//!
//! A DID Document binds a DID to its public keys and chain addresses. The
//! parsed form keeps the raw JSON alongside the typed fields: the raw value
//! is what signing bytes and the persisted (proof-stripped, compact)
//! rendition are derived from.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vdr_core::{RegistryError, SigningBytes};
use vdr_crypto::SignatureSuite;

use crate::proof::{verify_proofs, ProofSet};

/// One verification method entry. Each contributes a pubkey → DID and an
/// address → DID reverse-index entry, globally unique across all documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationMethod {
    /// `<did>#<keyId>`, referenced by proofs.
    pub id: String,
    /// Suite name; absent in some producers.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub method_type: Option<String>,
    /// PEM-armored public key.
    #[serde(rename = "publicKeyPem")]
    pub public_key_pem: String,
    /// The DID controlling this key.
    #[serde(default)]
    pub controller: String,
    /// Chain address derived from the public key.
    #[serde(default)]
    pub address: String,
}

/// A service endpoint entry; parsed but not interpreted by the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    #[serde(rename = "type")]
    pub service_type: String,
    #[serde(rename = "serviceEndpoint")]
    pub service_endpoint: String,
}

#[derive(Debug, Clone, Deserialize)]
struct DocumentWire {
    id: String,
    #[serde(default)]
    controller: Vec<String>,
    #[serde(default)]
    created: Option<String>,
    #[serde(default)]
    updated: Option<String>,
    #[serde(rename = "verificationMethod", default)]
    verification_method: Vec<VerificationMethod>,
    #[serde(default)]
    service: Vec<Service>,
    #[serde(default)]
    authentication: Vec<String>,
    #[serde(default)]
    proof: Option<ProofSet>,
}

/// A parsed DID Document.
#[derive(Debug, Clone)]
pub struct DidDocument {
    raw: Value,
    /// The subject DID.
    pub id: String,
    /// Controlling DIDs.
    pub controller: Vec<String>,
    /// Creation timestamp, if the author supplied one.
    pub created: Option<String>,
    /// Last-update timestamp, if the author supplied one.
    pub updated: Option<String>,
    /// Key material bound to the subject.
    pub verification_method: Vec<VerificationMethod>,
    /// Service endpoints; carried, not interpreted.
    pub service: Vec<Service>,
    /// Verification-method references usable for authentication.
    pub authentication: Vec<String>,
    /// The document's own proof(s).
    pub proof: Option<ProofSet>,
}

impl DidDocument {
    /// Parse a DID Document from its JSON text, keeping the raw value.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| RegistryError::InvalidDocument(e.to_string()))?;
        let wire: DocumentWire = serde_json::from_value(value.clone())
            .map_err(|e| RegistryError::InvalidDocument(e.to_string()))?;
        Ok(Self {
            raw: value,
            id: wire.id,
            controller: wire.controller,
            created: wire.created,
            updated: wire.updated,
            verification_method: wire.verification_method,
            service: wire.service,
            authentication: wire.authentication,
            proof: wire.proof,
        })
    }

    /// The canonical bytes this document's proofs sign over: the raw JSON
    /// minus `proof`, compacted. This is also the persisted rendition.
    pub fn signing_bytes(&self) -> Result<SigningBytes, RegistryError> {
        SigningBytes::strip_proof_value(&self.raw)
    }

    /// All PEM public keys and chain addresses across verification methods,
    /// in declaration order. These feed the two reverse indices.
    pub fn keys_and_addresses(&self) -> (Vec<&str>, Vec<&str>) {
        let pubkeys = self
            .verification_method
            .iter()
            .map(|vm| vm.public_key_pem.as_str())
            .collect();
        let addresses = self
            .verification_method
            .iter()
            .map(|vm| vm.address.as_str())
            .collect();
        (pubkeys, addresses)
    }

    /// Verify the document's attached proof(s). The resolver maps signer
    /// DIDs to documents and may short-circuit to `self` when a document
    /// self-signs before it has been persisted.
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
