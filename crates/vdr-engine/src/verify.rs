//! # Credential and Presentation Verification
//!
//! The checks run in a fixed order and the first failure decides the
//! outcome. For a credential: issuance-log presence (when enabled), subject
//! blacklist, date parsing and ordering, validity window, declared type,
//! trusted issuer (when enabled), outer signature, template conformance,
//! revocation. A presentation wraps the same walk per embedded credential
//! and adds holder authentication and delegation.

use tracing::warn;

use vdr_core::{parse_rfc3339_unix, RegistryError};
use vdr_model::{VerifiableCredential, VerifiablePresentation};
use vdr_store::StateStore;

use crate::registry::DidRegistry;

const TYPE_VERIFIABLE_CREDENTIAL: &str = "VerifiableCredential";
const TYPE_VERIFIABLE_PRESENTATION: &str = "VerifiablePresentation";
const PROOF_PURPOSE_AUTHENTICATION: &str = "authentication";
const DELEGATE_ACTION_SIGN: &str = "sign";

impl<S: StateStore> DidRegistry<S> {
    /// Verify a credential end to end. `Ok(true)` means every check passed;
    /// any failing check surfaces as the error naming it.
    pub fn verify_vc(&self, vc_json: &str) -> Result<bool, RegistryError> {
        let vc = VerifiableCredential::parse(vc_json)?;
        if let Err(e) = self.check_credential(&vc) {
            warn!(vc_id = %vc.id, error = %e, "credential verification failed");
            return Err(e);
        }
        Ok(true)
    }

    pub(crate) fn check_credential(
        &self,
        vc: &VerifiableCredential,
    ) -> Result<(), RegistryError> {
        if self.config.enable_issue_log
            && self
                .store
                .search_issue_logs_by_vc_id(&vc.id, 0, 1)?
                .is_empty()
        {
            return Err(RegistryError::NotIssued);
        }

        let subject = vc.subject_did()?;
        if self.store.is_blacklisted(subject)? {
            return Err(RegistryError::Blacklisted("vc owner".into()));
        }

        let issuance = parse_rfc3339_unix(&vc.issuance_date)?;
        let expiration = parse_rfc3339_unix(&vc.expiration_date)?;
        if issuance > expiration {
            return Err(RegistryError::IssuanceAfterExpiration);
        }
        let now = self.now()?;
        if now < issuance || now > expiration {
            return Err(RegistryError::Expired);
        }

        if vc.types.first().map(String::as_str) != Some(TYPE_VERIFIABLE_CREDENTIAL) {
            return Err(RegistryError::InvalidVcType);
        }

        if self.config.enable_trust_issuer {
            match self.store.trust_issuer(&vc.issuer) {
                Ok(_) => {}
                Err(RegistryError::DataNotFound) => {
                    return Err(RegistryError::Unauthorized(
                        "issuer is not in trust issuer list".into(),
                    ))
                }
                Err(e) => return Err(e),
            }
        }

        vc.verify_signature(|signer| self.resolve_document(signer), self.suite.as_ref())?;

        if let Some(template_ref) = &vc.template {
            let template = self.store.template(&template_ref.id, &template_ref.version)?;
            if template.name != template_ref.name || template.vc_type != template_ref.vc_type {
                return Err(RegistryError::InvalidCredential(
                    "template name or vcType does not match the registered template".into(),
                ));
            }
            vc.validate_subject_against_template(&template.template)?;
        }

        if self.store.is_revoked(&vc.id)? {
            return Err(RegistryError::Revoked);
        }
        Ok(())
    }

    /// Verify a presentation: its type, its holder (not blacklisted), every
    /// embedded credential (with a delegation grant when the holder is not
    /// the subject), proof purpose, and the holder's outer signature.
    pub fn verify_vp(&self, vp_json: &str) -> Result<bool, RegistryError> {
        let vp = VerifiablePresentation::parse(vp_json)?;
        if let Err(e) = self.check_presentation(&vp) {
            warn!(vp_id = %vp.id, error = %e, "presentation verification failed");
            return Err(e);
        }
        Ok(true)
    }

    fn check_presentation(&self, vp: &VerifiablePresentation) -> Result<(), RegistryError> {
        if vp.presentation_type != TYPE_VERIFIABLE_PRESENTATION {
            return Err(RegistryError::InvalidPresentation("invalid VP type".into()));
        }

        let holder = vp.holder_did()?.to_owned();
        if self.store.is_blacklisted(&holder)? {
            return Err(RegistryError::Blacklisted("vp owner".into()));
        }

        let now = self.now()?;
        for raw_vc in &vp.credentials {
            let vc_json = serde_json::to_string(raw_vc)?;
            let vc = VerifiableCredential::parse(&vc_json)?;
            // Wrapped so callers can tell an embedded-credential failure
            // from one in the presentation itself.
            self.check_credential(&vc)
                .map_err(|e| RegistryError::InvalidCredential(e.to_string()))?;
            let subject = vc.subject_did()?;
            if subject != holder {
                self.check_delegate(subject, &holder, &vc.id, DELEGATE_ACTION_SIGN, now)?;
            }
        }

        let proofs = vp
            .proof
            .as_ref()
            .ok_or_else(|| RegistryError::SignatureInvalid("need proof".into()))?;
        if proofs
            .all()
            .iter()
            .any(|p| p.proof_purpose != PROOF_PURPOSE_AUTHENTICATION)
        {
            return Err(RegistryError::InvalidPresentation(
                "proofPurpose is not authentication".into(),
            ));
        }

        vp.verify_signature(|signer| self.resolve_document(signer), self.suite.as_ref())?;
        Ok(())
    }
}
