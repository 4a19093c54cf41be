//! # Document Lifecycle
//!
//! Registration, lookup, and update of DID documents. On registration both
//! reverse indices (public key → DID, address → DID) are written; an update
//! diffs old against new key material so stale index entries never refer to
//! a key the document no longer carries.

use tracing::debug;

use vdr_core::{Did, RegistryError};
use vdr_model::DidDocument;
use vdr_store::StateStore;

use crate::events::TOPIC_SET_DID_DOCUMENT;
use crate::registry::DidRegistry;

impl<S: StateStore> DidRegistry<S> {
    /// Register a new DID document. The document self-signs: its proof
    /// verifies against its own (pending) verification methods, or against
    /// an already-registered controller's.
    pub fn add_did_document(&self, doc_json: &str) -> Result<(), RegistryError> {
        let doc = DidDocument::parse(doc_json)?;
        Did::new(&doc.id).ensure_well_formed(&self.config.did_method)?;
        if self.store.document_exists(&doc.id)? {
            return Err(RegistryError::DuplicateIdentity(doc.id.clone()));
        }
        self.ensure_key_material_unclaimed(&doc, None)?;
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
        debug!(did = %doc.id, "did document registered");
        self.events
            .emit(TOPIC_SET_DID_DOCUMENT, &[doc.id.clone(), stored]);
        Ok(())
    }

    /// The stored (proof-less, compact) document text. Blacklisted DIDs'
    /// documents are unreadable through this surface.
    pub fn get_did_document(&self, did: &str) -> Result<String, RegistryError> {
        Did::new(did).ensure_well_formed(&self.config.did_method)?;
        if self.store.is_blacklisted(did)? {
            return Err(RegistryError::Blacklisted(did.to_owned()));
        }
        match self.store.document(did) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(RegistryError::DidNotFound) => {
                Err(RegistryError::DocumentNotFound(did.to_owned()))
            }
            Err(e) => Err(e),
        }
    }

    pub fn get_did_by_pubkey(&self, pem: &str) -> Result<String, RegistryError> {
        self.store.did_by_pubkey(pem)
    }

    pub fn get_did_document_by_pubkey(&self, pem: &str) -> Result<String, RegistryError> {
        let did = self.store.did_by_pubkey(pem)?;
        self.get_did_document(&did)
    }

    pub fn get_did_by_address(&self, address: &str) -> Result<String, RegistryError> {
        self.store.did_by_address(address)
    }

    pub fn get_did_document_by_address(&self, address: &str) -> Result<String, RegistryError> {
        let did = self.store.did_by_address(address)?;
        self.get_did_document(&did)
    }

    /// Replace an existing document. Only the subject itself or the admin
    /// may update; index entries are diffed against the old document.
    pub fn update_did_document(&self, doc_json: &str) -> Result<(), RegistryError> {
        let doc = DidDocument::parse(doc_json)?;
        Did::new(&doc.id).ensure_well_formed(&self.config.did_method)?;
        let old = self.resolve_document(&doc.id)?;

        let sender_is_subject = matches!(self.sender_did(), Ok(sender) if sender == doc.id);
        if !sender_is_subject && !self.is_admin()? {
            return Err(RegistryError::Unauthorized("no operation permission".into()));
        }

        self.ensure_key_material_unclaimed(&doc, Some(&doc.id))?;
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

        let (old_keys, old_addresses) = old.keys_and_addresses();
        let (new_keys, new_addresses) = doc.keys_and_addresses();
        for stale in old_keys.iter().filter(|k| !new_keys.contains(k)) {
            self.store.delete_pubkey_index(stale)?;
        }
        for stale in old_addresses
            .iter()
            .filter(|a| !a.is_empty() && !new_addresses.contains(a))
        {
            self.store.delete_address_index(stale)?;
        }

        let stored = self.store_document_with_indices(&doc)?;
        debug!(did = %doc.id, "did document updated");
        self.events
            .emit(TOPIC_SET_DID_DOCUMENT, &[doc.id.clone(), stored]);
        Ok(())
    }

    /// Reject key material already bound to a different DID. `owner` is the
    /// DID allowed to hold the entries (the subject itself, on update).
    fn ensure_key_material_unclaimed(
        &self,
        doc: &DidDocument,
        owner: Option<&str>,
    ) -> Result<(), RegistryError> {
        for vm in &doc.verification_method {
            if let Ok(holder) = self.store.did_by_pubkey(&vm.public_key_pem) {
                if owner != Some(holder.as_str()) {
                    return Err(RegistryError::DuplicateIdentity(format!(
                        "public key of [{}]",
                        vm.id
                    )));
                }
            }
            if vm.address.is_empty() {
                continue;
            }
            if let Ok(holder) = self.store.did_by_address(&vm.address) {
                if owner != Some(holder.as_str()) {
                    return Err(RegistryError::DuplicateIdentity(format!(
                        "address of [{}]",
                        vm.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Persist the proof-less compact rendition plus both reverse indices.
    /// Returns the stored text for event payloads.
    pub(crate) fn store_document_with_indices(
        &self,
        doc: &DidDocument,
    ) -> Result<String, RegistryError> {
        let stored = doc.signing_bytes()?;
        self.store.put_document(&doc.id, stored.as_bytes())?;
        for vm in &doc.verification_method {
            self.store.put_pubkey_index(&vm.public_key_pem, &doc.id)?;
            if !vm.address.is_empty() {
                self.store.put_address_index(&vm.address, &doc.id)?;
            }
        }
        Ok(String::from_utf8_lossy(stored.as_bytes()).into_owned())
    }
}
