//! # Trust Lists
//!
//! Trust anchors (bulk-replaced root list), the trusted-issuer registry,
//! the blacklist, and credential revocation. Batch mutations validate every
//! member before applying any, so a batch either lands whole or not at all.

use tracing::debug;

use vdr_core::{Did, RegistryError};
use vdr_store::StateStore;

use crate::events::{
    TOPIC_ADD_BLACK_LIST, TOPIC_ADD_TRUST_ISSUER, TOPIC_DELETE_BLACK_LIST,
    TOPIC_DELETE_TRUST_ISSUER, TOPIC_REVOKE_VC, TOPIC_SET_TRUST_ROOT_LIST,
};
use crate::registry::DidRegistry;

impl<S: StateStore> DidRegistry<S> {
    // ─── Revocation ─────────────────────────────────────────────────

    /// Irreversibly revoke a credential by id.
    pub fn revoke_vc(&self, vc_id: &str) -> Result<(), RegistryError> {
        self.require_admin()?;
        self.store.put_revoked_vc(vc_id)?;
        debug!(vc_id, "credential revoked");
        self.events.emit(TOPIC_REVOKE_VC, &[vc_id.to_owned()]);
        Ok(())
    }

    pub fn get_revoked_vc_list(
        &self,
        vc_id_search: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, RegistryError> {
        self.store.search_revoked_vcs(vc_id_search, start, count)
    }

    // ─── Trust roots ────────────────────────────────────────────────

    /// Replace the whole trust-root list. Every DID must already be a valid
    /// registered identity.
    pub fn set_trust_root_list(&self, dids: &[String]) -> Result<(), RegistryError> {
        self.require_admin()?;
        for did in dids {
            self.validate_did(did)?;
        }
        self.store.put_trust_root_list(dids)?;
        debug!(roots = dids.len(), "trust root list replaced");
        self.events
            .emit(TOPIC_SET_TRUST_ROOT_LIST, &[serde_json::to_string(dids)?]);
        Ok(())
    }

    pub fn get_trust_root_list(&self) -> Result<Vec<String>, RegistryError> {
        self.store.trust_root_list()
    }

    // ─── Trusted issuers ────────────────────────────────────────────

    /// Add a batch of trusted issuers. Validate-all-then-apply: one invalid
    /// DID rejects the whole batch. Emits one event per DID.
    pub fn add_trust_issuer(&self, dids: &[String]) -> Result<(), RegistryError> {
        self.require_admin()?;
        for did in dids {
            self.validate_did(did)?;
        }
        for did in dids {
            self.store.put_trust_issuer(did)?;
            self.events.emit(TOPIC_ADD_TRUST_ISSUER, &[did.clone()]);
        }
        debug!(issuers = dids.len(), "trusted issuers added");
        Ok(())
    }

    /// Remove a batch of trusted issuers. Removal is idempotent; the whole
    /// batch must be well-formed before anything is deleted.
    pub fn delete_trust_issuer(&self, dids: &[String]) -> Result<(), RegistryError> {
        self.require_admin()?;
        for did in dids {
            Did::new(did).ensure_well_formed(&self.config.did_method)?;
        }
        for did in dids {
            self.store.delete_trust_issuer(did)?;
            self.events.emit(TOPIC_DELETE_TRUST_ISSUER, &[did.clone()]);
        }
        debug!(issuers = dids.len(), "trusted issuers removed");
        Ok(())
    }

    pub fn get_trust_issuer(
        &self,
        did_search: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, RegistryError> {
        self.store.search_trust_issuers(did_search, start, count)
    }

    // ─── Blacklist ──────────────────────────────────────────────────

    /// Blacklist a batch of DIDs. Syntax is checked for the whole batch
    /// before any write; existence is not required, so an identity can be
    /// blocked ahead of registration.
    pub fn add_black_list(&self, dids: &[String]) -> Result<(), RegistryError> {
        self.require_admin()?;
        for did in dids {
            Did::new(did).ensure_well_formed(&self.config.did_method)?;
        }
        for did in dids {
            self.store.put_blacklist(did)?;
        }
        debug!(entries = dids.len(), "blacklist entries added");
        self.events
            .emit(TOPIC_ADD_BLACK_LIST, &[serde_json::to_string(dids)?]);
        Ok(())
    }

    /// Unblacklist a batch of DIDs. Idempotent; the whole batch must be
    /// well-formed before anything is deleted.
    pub fn delete_black_list(&self, dids: &[String]) -> Result<(), RegistryError> {
        self.require_admin()?;
        for did in dids {
            Did::new(did).ensure_well_formed(&self.config.did_method)?;
        }
        for did in dids {
            self.store.delete_blacklist(did)?;
        }
        debug!(entries = dids.len(), "blacklist entries removed");
        self.events
            .emit(TOPIC_DELETE_BLACK_LIST, &[serde_json::to_string(dids)?]);
        Ok(())
    }

    pub fn get_black_list(
        &self,
        did_search: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, RegistryError> {
        self.store.search_blacklist(did_search, start, count)
    }
}
