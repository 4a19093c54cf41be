//! # Verifiable Credential
//!
//! A credential is a signed claim by an issuer DID about a subject DID.
//! Credentials are immutable once issued — "update" is revocation plus
//! reissue. Content conformance is delegated to a JSON-Schema template
//! stored in the registry and checked here with the `jsonschema` crate.

use serde::Deserialize;
use serde_json::Value;

use vdr_core::{RegistryError, SigningBytes};
use vdr_crypto::SignatureSuite;

use crate::document::DidDocument;
use crate::proof::{verify_proofs, ProofSet};

/// Reference from a credential to the template it was issued under.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(rename = "vcType", default)]
    pub vc_type: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CredentialWire {
    id: String,
    #[serde(rename = "type", default)]
    types: Vec<String>,
    issuer: String,
    #[serde(rename = "issuanceDate", default)]
    issuance_date: String,
    #[serde(rename = "expirationDate", default)]
    expiration_date: String,
    #[serde(rename = "credentialSubject", default)]
    credential_subject: Value,
    #[serde(default)]
    template: Option<TemplateRef>,
    #[serde(default)]
    proof: Option<ProofSet>,
}

/// A parsed Verifiable Credential.
#[derive(Debug, Clone)]
pub struct VerifiableCredential {
    raw: Value,
    /// Credential id — an HTTP URL in practice.
    pub id: String,
    /// Declared types; the first entry must be `VerifiableCredential`.
    pub types: Vec<String>,
    /// Issuer DID.
    pub issuer: String,
    /// RFC 3339 issuance date.
    pub issuance_date: String,
    /// RFC 3339 expiration date.
    pub expiration_date: String,
    /// Claim payload; carries the subject DID under `"id"`.
    pub credential_subject: Value,
    /// Template reference, when issued under one.
    pub template: Option<TemplateRef>,
    /// The credential's proof(s).
    pub proof: Option<ProofSet>,
}

impl VerifiableCredential {
    /// Parse a credential from its JSON text, keeping the raw value.
    pub fn parse(raw: &str) -> Result<Self, RegistryError> {
        let value: Value = serde_json::from_str(raw)
            .map_err(|e| RegistryError::InvalidCredential(e.to_string()))?;
        let wire: CredentialWire = serde_json::from_value(value.clone())
            .map_err(|e| RegistryError::InvalidCredential(e.to_string()))?;
        Ok(Self {
            raw: value,
            id: wire.id,
            types: wire.types,
            issuer: wire.issuer,
            issuance_date: wire.issuance_date,
            expiration_date: wire.expiration_date,
            credential_subject: wire.credential_subject,
            template: wire.template,
            proof: wire.proof,
        })
    }

    /// The subject (holder) DID: `credentialSubject.id`.
    pub fn subject_did(&self) -> Result<&str, RegistryError> {
        self.credential_subject
            .get("id")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RegistryError::InvalidCredential("credentialSubject.id missing".into())
            })
    }

    /// The canonical bytes the credential's proofs sign over.
    pub fn signing_bytes(&self) -> Result<SigningBytes, RegistryError> {
        SigningBytes::strip_proof_value(&self.raw)
    }

    /// Verify the credential's attached proof(s) against the issuer's
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

    /// Validate `credentialSubject` against a template's JSON-Schema text.
    pub fn validate_subject_against_template(
        &self,
        template_schema: &str,
    ) -> Result<(), RegistryError> {
        if template_schema.is_empty() {
            return Err(RegistryError::SchemaMismatch("vc template is empty".into()));
        }
        let schema: Value = serde_json::from_str(template_schema)
            .map_err(|e| RegistryError::SchemaMismatch(format!("template is not JSON: {e}")))?;
        let validator = jsonschema::validator_for(&schema)
            .map_err(|e| RegistryError::SchemaMismatch(format!("template does not compile: {e}")))?;
        let violations: Vec<String> = validator
            .iter_errors(&self.credential_subject)
            .map(|err| {
                if err.instance_path.to_string().is_empty() {
                    format!("(root): {err}")
                } else {
                    format!("{}: {err}", err.instance_path)
                }
            })
            .collect();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(RegistryError::SchemaMismatch(violations.join("; ")))
        }
    }
}

/// Check that a template's schema text compiles, without validating anything
/// against it. Gates `SetVcTemplate`.
pub fn ensure_template_compiles(template_schema: &str) -> Result<(), RegistryError> {
    if template_schema.is_empty() {
        return Err(RegistryError::SchemaMismatch("vc template is empty".into()));
    }
    let schema: Value = serde_json::from_str(template_schema)
        .map_err(|e| RegistryError::SchemaMismatch(format!("template is not JSON: {e}")))?;
    jsonschema::validator_for(&schema)
        .map(|_| ())
        .map_err(|e| RegistryError::SchemaMismatch(format!("template does not compile: {e}")))
}
