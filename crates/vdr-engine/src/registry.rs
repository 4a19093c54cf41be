//! # Registry Engine Core
//!
//! `DidRegistry` owns the DAL and the host ports. This module carries the
//! construction, the shared helpers every operation leans on (time, sender
//! resolution, admin gate, document resolution), and the admin pointer
//! operations; the operation families live in sibling modules as further
//! `impl` blocks.

use std::sync::Arc;

use tracing::debug;

use vdr_core::{Did, RegistryError};
use vdr_crypto::SignatureSuite;
use vdr_model::DidDocument;
use vdr_store::{RegistryStore, StateStore};

use crate::config::EngineConfig;
use crate::events::TOPIC_SET_DID_DOCUMENT;
use crate::host::{CallerIdentity, Clock, EventSink};
use crate::standards;

/// The DID registry and trust engine.
pub struct DidRegistry<S: StateStore> {
    pub(crate) store: RegistryStore<S>,
    pub(crate) config: EngineConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) caller: Arc<dyn CallerIdentity>,
    pub(crate) events: Arc<dyn EventSink>,
    pub(crate) suite: Arc<dyn SignatureSuite>,
}

impl<S: StateStore> DidRegistry<S> {
    pub fn new(
        store: S,
        config: EngineConfig,
        clock: Arc<dyn Clock>,
        caller: Arc<dyn CallerIdentity>,
        events: Arc<dyn EventSink>,
        suite: Arc<dyn SignatureSuite>,
    ) -> Self {
        Self {
            store: RegistryStore::new(store),
            config,
            clock,
            caller,
            events,
            suite,
        }
    }

    /// The single DID method this registry serves.
    pub fn did_method(&self) -> &str {
        &self.config.did_method
    }

    /// Declared standards, by name.
    pub fn standards(&self) -> Vec<&'static str> {
        standards::standards()
    }

    pub fn supports_standard(&self, name: &str) -> bool {
        standards::supports_standard(name)
    }

    // ─── Shared helpers ─────────────────────────────────────────────

    pub(crate) fn now(&self) -> Result<i64, RegistryError> {
        self.clock.now()
    }

    /// The caller's DID, resolved through the address index.
    pub(crate) fn sender_did(&self) -> Result<String, RegistryError> {
        let address = self.caller.sender_address()?;
        self.store.did_by_address(&address)
    }

    pub(crate) fn is_admin(&self) -> Result<bool, RegistryError> {
        let admin = match self.store.admin() {
            Ok(admin) => admin,
            Err(RegistryError::DataNotFound) => return Ok(false),
            Err(e) => return Err(e),
        };
        match self.sender_did() {
            Ok(sender) => Ok(sender == admin),
            Err(RegistryError::DidNotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub(crate) fn require_admin(&self) -> Result<(), RegistryError> {
        if self.is_admin()? {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized("no operation permission".into()))
        }
    }

    /// Load and parse a stored document. Stored renditions are proof-less
    /// and compact; parsing them back yields the key material proof
    /// verification needs.
    pub(crate) fn resolve_document(&self, did: &str) -> Result<DidDocument, RegistryError> {
        let bytes = match self.store.document(did) {
            Ok(bytes) => bytes,
            Err(RegistryError::DidNotFound) => {
                return Err(RegistryError::DocumentNotFound(did.to_owned()))
            }
            Err(e) => return Err(e),
        };
        DidDocument::parse(&String::from_utf8_lossy(&bytes))
    }

    /// Full DID validity: syntax, method, blacklist, stored document.
    pub(crate) fn validate_did(&self, did: &str) -> Result<(), RegistryError> {
        Did::new(did).ensure_well_formed(&self.config.did_method)?;
        if self.store.is_blacklisted(did)? {
            return Err(RegistryError::Blacklisted(did.to_owned()));
        }
        if !self.store.document_exists(did)? {
            return Err(RegistryError::DidNotFound);
        }
        Ok(())
    }

    /// Boolean validity check. Store failures still propagate; every
    /// validity failure maps to `false`.
    pub fn is_valid_did(&self, did: &str) -> Result<bool, RegistryError> {
        match self.validate_did(did) {
            Ok(()) => Ok(true),
            Err(RegistryError::Store(e)) => Err(RegistryError::Store(e)),
            Err(_) => Ok(false),
        }
    }

    // ─── Admin pointer ──────────────────────────────────────────────

    /// Bootstrap: register the admin's own document and record its DID as
    /// the admin pointer. No duplicate check — this is the first write.
    pub fn init_admin(&self, doc_json: &str) -> Result<(), RegistryError> {
        let doc = DidDocument::parse(doc_json)?;
        Did::new(&doc.id).ensure_well_formed(&self.config.did_method)?;
        let pending = doc.clone();
        doc.verify_signature(
            |signer| {
                if signer == doc.id {
                    Ok(pending.clone())
                } else {
                    self.resolve_document(signer)
                }
            },
            self.suite.as_ref(),
        )?;
        let stored = self.store_document_with_indices(&doc)?;
        self.store.put_admin(&doc.id)?;
        debug!(did = %doc.id, "admin initialized");
        self.events
            .emit(TOPIC_SET_DID_DOCUMENT, &[doc.id.clone(), stored]);
        Ok(())
    }

    /// Hand the admin pointer to another registered DID.
    pub fn set_admin(&self, did: &str) -> Result<(), RegistryError> {
        self.require_admin()?;
        self.validate_did(did)?;
        self.store.put_admin(did)?;
        debug!(did, "admin pointer updated");
        Ok(())
    }

    /// The current admin DID.
    pub fn admin(&self) -> Result<String, RegistryError> {
        self.store.admin()
    }
}
