//! # Proof Blocks and the Shared Verification Walk
//!
//! A proof references its signer as `<did>#<keyId>` in `verificationMethod`
//! and carries a base64 signature in `proofValue`. Documents, credentials,
//! and presentations all attach either a single proof object or an array;
//! when an array is present every member must verify.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use vdr_core::{RegistryError, SigningBytes};
use vdr_crypto::SignatureSuite;

use crate::document::DidDocument;

/// A signature block attached to a registry artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proof {
    /// Proof suite name, e.g. `Ed25519Signature2020`.
    #[serde(rename = "type", default)]
    pub proof_type: String,
    /// Creation timestamp as supplied by the signer.
    #[serde(default)]
    pub created: String,
    /// What the proof authorizes, e.g. `authentication`.
    #[serde(rename = "proofPurpose", default)]
    pub proof_purpose: String,
    /// Optional challenge for replay protection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    /// `<signerDID>#<keyId>` naming the verification method used.
    #[serde(rename = "verificationMethod")]
    pub verification_method: String,
    /// Base64-encoded signature bytes.
    #[serde(rename = "proofValue", default)]
    pub proof_value: String,
}

impl Proof {
    /// The signer DID: everything before the `#` key fragment.
    pub fn signer_did(&self) -> Result<&str, RegistryError> {
        let pos = self.verification_method.find('#').ok_or_else(|| {
            RegistryError::SignatureInvalid(
                "verificationMethod has no key fragment".into(),
            )
        })?;
        Ok(&self.verification_method[..pos])
    }
}

/// One proof or several; serialized exactly as found on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProofSet {
    /// A single proof object.
    Single(Proof),
    /// An array of proofs, all of which must verify.
    Multiple(Vec<Proof>),
}

impl ProofSet {
    /// All proofs in attachment order.
    pub fn all(&self) -> Vec<&Proof> {
        match self {
            Self::Single(p) => vec![p],
            Self::Multiple(ps) => ps.iter().collect(),
        }
    }

    /// The first proof, if any. Presentations name their holder through it.
    pub fn first(&self) -> Option<&Proof> {
        match self {
            Self::Single(p) => Some(p),
            Self::Multiple(ps) => ps.first(),
        }
    }
}

/// Verify every proof in `proofs` over `signing` bytes.
///
/// The resolver maps a signer DID to its Document; a self-signing artifact
/// passes a resolver that short-circuits to the in-memory pending document.
/// An empty proof set is a hard failure — absence of proof never verifies.
pub fn verify_proofs<F>(
    signing: &SigningBytes,
    proofs: &[&Proof],
    resolve: F,
    suite: &dyn SignatureSuite,
) -> Result<(), RegistryError>
where
    F: Fn(&str) -> Result<DidDocument, RegistryError>,
{
    if proofs.is_empty() {
        return Err(RegistryError::SignatureInvalid("need proof".into()));
    }
    for proof in proofs {
        verify_one(signing, proof, &resolve, suite)?;
    }
    Ok(())
}

fn verify_one<F>(
    signing: &SigningBytes,
    proof: &Proof,
    resolve: &F,
    suite: &dyn SignatureSuite,
) -> Result<(), RegistryError>
where
    F: Fn(&str) -> Result<DidDocument, RegistryError>,
{
    let signer = proof.signer_did()?;
    let signer_doc = resolve(signer)?;
    let pem = signer_doc
        .verification_method
        .iter()
        .find(|vm| vm.id == proof.verification_method)
        .map(|vm| vm.public_key_pem.as_str())
        .ok_or_else(|| {
            RegistryError::SignatureInvalid(format!(
                "verification method {} not found in signer document",
                proof.verification_method
            ))
        })?;
    if proof.proof_value.is_empty() {
        return Err(RegistryError::SignatureInvalid("proofValue is empty".into()));
    }
    let signature = STANDARD.decode(proof.proof_value.as_bytes()).map_err(|e| {
        RegistryError::SignatureInvalid(format!("proofValue is not base64: {e}"))
    })?;
    let pass = suite.verify(pem, signing.as_bytes(), &signature)?;
    if !pass {
        return Err(RegistryError::SignatureInvalid("signature mismatch".into()));
    }
    Ok(())
}
