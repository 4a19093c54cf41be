//! # Registry DAL
//!
//! Maps domain operations onto keyed state-store spaces. Space names are
//! single letters because they prefix every world-state key — shorter is
//! cheaper.
//!
//! ## Pagination
//!
//! Every search endpoint uses one skip-then-take algorithm: skip the first
//! `start` matches, collect up to `count` further matches, stop. Entries
//! consumed while skipping never count against the budget, and registries
//! that filter entries after decoding (template name search, issuance-log
//! issuer/template filters) apply skip/take to matches, not visited rows.
//! `count == 0` defaults to [`DEFAULT_SEARCH_COUNT`].

use vdr_core::{keycodec, RegistryError};
use vdr_model::{DelegateInfo, VcIssueLog, VcTemplate};

use crate::state::StateStore;

/// Result cap applied when a caller passes `count == 0`.
pub const DEFAULT_SEARCH_COUNT: usize = 1000;

const SPACE_DID: &str = "d";
const SPACE_PUBKEY_INDEX: &str = "p";
const SPACE_ADDRESS_INDEX: &str = "a";
const SPACE_TRUST_ISSUER: &str = "ti";
const SPACE_REVOKED_VC: &str = "r";
const SPACE_BLACKLIST: &str = "b";
const SPACE_DELEGATE: &str = "g";
const SPACE_VC_TEMPLATE: &str = "vt";
const SPACE_ISSUE_LOG: &str = "l";
const SPACE_ISSUE_LOG_BY_VC: &str = "vl";
const BLOB_TRUST_ROOT: &str = "tr";
const BLOB_ADMIN: &str = "Admin";

fn effective_count(count: usize) -> usize {
    if count == 0 {
        DEFAULT_SEARCH_COUNT
    } else {
        count
    }
}

/// Skip-then-take over an already-filtered match sequence.
fn paginate<T>(items: impl IntoIterator<Item = T>, start: usize, count: usize) -> Vec<T> {
    items
        .into_iter()
        .skip(start)
        .take(effective_count(count))
        .collect()
}

/// The registry's data access layer over a [`StateStore`].
#[derive(Debug)]
pub struct RegistryStore<S: StateStore> {
    store: S,
}

impl<S: StateStore> RegistryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ─── DID documents ──────────────────────────────────────────────

    pub fn put_document(&self, did: &str, compact_doc: &[u8]) -> Result<(), RegistryError> {
        Ok(self
            .store
            .put(SPACE_DID, &keycodec::did_key(did), compact_doc)?)
    }

    pub fn document(&self, did: &str) -> Result<Vec<u8>, RegistryError> {
        match self.store.get(SPACE_DID, &keycodec::did_key(did))? {
            Some(doc) if !doc.is_empty() => Ok(doc),
            _ => Err(RegistryError::DidNotFound),
        }
    }

    pub fn document_exists(&self, did: &str) -> Result<bool, RegistryError> {
        Ok(self.document(did).is_ok())
    }

    // ─── Reverse indices ────────────────────────────────────────────

    pub fn put_pubkey_index(&self, pem: &str, did: &str) -> Result<(), RegistryError> {
        Ok(self
            .store
            .put(SPACE_PUBKEY_INDEX, &keycodec::pubkey_key(pem), did.as_bytes())?)
    }

    pub fn delete_pubkey_index(&self, pem: &str) -> Result<(), RegistryError> {
        Ok(self
            .store
            .delete(SPACE_PUBKEY_INDEX, &keycodec::pubkey_key(pem))?)
    }

    pub fn did_by_pubkey(&self, pem: &str) -> Result<String, RegistryError> {
        match self.store.get(SPACE_PUBKEY_INDEX, &keycodec::pubkey_key(pem))? {
            Some(did) if !did.is_empty() => Ok(String::from_utf8_lossy(&did).into_owned()),
            _ => Err(RegistryError::DidNotFound),
        }
    }

    pub fn put_address_index(&self, address: &str, did: &str) -> Result<(), RegistryError> {
        Ok(self
            .store
            .put(SPACE_ADDRESS_INDEX, address, did.as_bytes())?)
    }

    pub fn delete_address_index(&self, address: &str) -> Result<(), RegistryError> {
        Ok(self.store.delete(SPACE_ADDRESS_INDEX, address)?)
    }

    pub fn did_by_address(&self, address: &str) -> Result<String, RegistryError> {
        match self.store.get(SPACE_ADDRESS_INDEX, address)? {
            Some(did) if !did.is_empty() => Ok(String::from_utf8_lossy(&did).into_owned()),
            _ => Err(RegistryError::DidNotFound),
        }
    }

    // ─── Trust roots (single blob, bulk replace) ────────────────────

    pub fn put_trust_root_list(&self, dids: &[String]) -> Result<(), RegistryError> {
        let blob = serde_json::to_vec(dids)?;
        Ok(self.store.put_blob(BLOB_TRUST_ROOT, &blob)?)
    }

    pub fn trust_root_list(&self) -> Result<Vec<String>, RegistryError> {
        match self.store.get_blob(BLOB_TRUST_ROOT)? {
            Some(blob) => Ok(serde_json::from_slice(&blob).unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    // ─── Trusted issuers ────────────────────────────────────────────

    pub fn put_trust_issuer(&self, did: &str) -> Result<(), RegistryError> {
        Ok(self
            .store
            .put(SPACE_TRUST_ISSUER, &keycodec::did_key(did), did.as_bytes())?)
    }

    pub fn trust_issuer(&self, did: &str) -> Result<String, RegistryError> {
        match self.store.get(SPACE_TRUST_ISSUER, &keycodec::did_key(did))? {
            Some(v) if !v.is_empty() => Ok(String::from_utf8_lossy(&v).into_owned()),
            _ => Err(RegistryError::DataNotFound),
        }
    }

    pub fn delete_trust_issuer(&self, did: &str) -> Result<(), RegistryError> {
        Ok(self
            .store
            .delete(SPACE_TRUST_ISSUER, &keycodec::did_key(did))?)
    }

    pub fn search_trust_issuers(
        &self,
        did_search: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, RegistryError> {
        let hits = self
            .store
            .iterate_prefix(SPACE_TRUST_ISSUER, &keycodec::did_key(did_search))?;
        Ok(paginate(
            hits.into_iter()
                .map(|(_, v)| String::from_utf8_lossy(&v).into_owned()),
            start,
            count,
        ))
    }

    // ─── Revoked credentials ────────────────────────────────────────

    pub fn put_revoked_vc(&self, vc_id: &str) -> Result<(), RegistryError> {
        Ok(self
            .store
            .put(SPACE_REVOKED_VC, &keycodec::credential_key(vc_id), vc_id.as_bytes())?)
    }

    pub fn is_revoked(&self, vc_id: &str) -> Result<bool, RegistryError> {
        Ok(self
            .store
            .get(SPACE_REVOKED_VC, &keycodec::credential_key(vc_id))?
            .is_some_and(|v| !v.is_empty()))
    }

    pub fn search_revoked_vcs(
        &self,
        vc_id_search: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, RegistryError> {
        let hits = self
            .store
            .iterate_prefix(SPACE_REVOKED_VC, &keycodec::credential_key(vc_id_search))?;
        Ok(paginate(
            hits.into_iter()
                .map(|(_, v)| String::from_utf8_lossy(&v).into_owned()),
            start,
            count,
        ))
    }

    // ─── Blacklist ──────────────────────────────────────────────────

    pub fn put_blacklist(&self, did: &str) -> Result<(), RegistryError> {
        Ok(self
            .store
            .put(SPACE_BLACKLIST, &keycodec::did_key(did), did.as_bytes())?)
    }

    pub fn is_blacklisted(&self, did: &str) -> Result<bool, RegistryError> {
        Ok(self
            .store
            .get(SPACE_BLACKLIST, &keycodec::did_key(did))?
            .is_some_and(|v| !v.is_empty()))
    }

    pub fn delete_blacklist(&self, did: &str) -> Result<(), RegistryError> {
        Ok(self.store.delete(SPACE_BLACKLIST, &keycodec::did_key(did))?)
    }

    pub fn search_blacklist(
        &self,
        did_search: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<String>, RegistryError> {
        let hits = self
            .store
            .iterate_prefix(SPACE_BLACKLIST, &keycodec::did_key(did_search))?;
        Ok(paginate(
            hits.into_iter()
                .map(|(_, v)| String::from_utf8_lossy(&v).into_owned()),
            start,
            count,
        ))
    }

    // ─── Delegation grants ──────────────────────────────────────────

    pub fn put_delegate(&self, grant: &DelegateInfo) -> Result<(), RegistryError> {
        let key = keycodec::delegate_key(
            &grant.delegator_did,
            &grant.delegatee_did,
            &grant.resource,
            &grant.action,
        );
        let value = serde_json::to_vec(grant)?;
        Ok(self.store.put(SPACE_DELEGATE, &key, &value)?)
    }

    pub fn delete_delegate(
        &self,
        delegator: &str,
        delegatee: &str,
        resource: &str,
        action: &str,
    ) -> Result<(), RegistryError> {
        let key = keycodec::delegate_key(delegator, delegatee, resource, action);
        Ok(self.store.delete(SPACE_DELEGATE, &key)?)
    }

    /// Hierarchical prefix search: delegator only, +delegatee, +resource,
    /// or the full tuple.
    pub fn search_delegates(
        &self,
        delegator: &str,
        delegatee: &str,
        resource: &str,
        action: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<DelegateInfo>, RegistryError> {
        let prefix = keycodec::delegate_prefix(delegator, delegatee, resource, action);
        let hits = self.store.iterate_prefix(SPACE_DELEGATE, &prefix)?;
        let grants = hits
            .into_iter()
            .map(|(_, v)| serde_json::from_slice::<DelegateInfo>(&v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paginate(grants, start, count))
    }

    // ─── Credential templates ───────────────────────────────────────

    pub fn put_template(&self, template: &VcTemplate) -> Result<(), RegistryError> {
        let key = keycodec::template_key(&template.id, &template.version);
        let value = serde_json::to_vec(template)?;
        Ok(self.store.put(SPACE_VC_TEMPLATE, &key, &value)?)
    }

    pub fn template(&self, id: &str, version: &str) -> Result<VcTemplate, RegistryError> {
        match self
            .store
            .get(SPACE_VC_TEMPLATE, &keycodec::template_key(id, version))?
        {
            Some(v) if !v.is_empty() => Ok(serde_json::from_slice(&v)?),
            _ => Err(RegistryError::TemplateNotFound),
        }
    }

    /// Every version of a template id, in storage order.
    pub fn templates_by_id(&self, id: &str) -> Result<Vec<VcTemplate>, RegistryError> {
        let hits = self
            .store
            .iterate_prefix(SPACE_VC_TEMPLATE, &format!("{id}_"))?;
        hits.into_iter()
            .map(|(_, v)| serde_json::from_slice(&v).map_err(RegistryError::from))
            .collect()
    }

    /// Substring search over template names, paginated over matches.
    pub fn search_templates(
        &self,
        name_search: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<VcTemplate>, RegistryError> {
        let hits = self.store.iterate_prefix(SPACE_VC_TEMPLATE, "")?;
        let templates = hits
            .into_iter()
            .map(|(_, v)| serde_json::from_slice::<VcTemplate>(&v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paginate(
            templates.into_iter().filter(|t| t.name.contains(name_search)),
            start,
            count,
        ))
    }

    // ─── Admin pointer ──────────────────────────────────────────────

    pub fn put_admin(&self, did: &str) -> Result<(), RegistryError> {
        Ok(self.store.put_blob(BLOB_ADMIN, did.as_bytes())?)
    }

    pub fn admin(&self) -> Result<String, RegistryError> {
        match self.store.get_blob(BLOB_ADMIN)? {
            Some(v) if !v.is_empty() => Ok(String::from_utf8_lossy(&v).into_owned()),
            _ => Err(RegistryError::DataNotFound),
        }
    }

    // ─── Issuance log (append-only, double-indexed) ─────────────────

    pub fn put_issue_log(&self, entry: &VcIssueLog) -> Result<(), RegistryError> {
        let payload = serde_json::to_vec(entry)?;
        let holder_key = keycodec::issue_log_key(&entry.did, entry.issue_time, &payload);
        self.store.put(SPACE_ISSUE_LOG, &holder_key, &payload)?;
        let vc_key = keycodec::credential_key(&entry.vc_id);
        Ok(self.store.put(SPACE_ISSUE_LOG_BY_VC, &vc_key, &payload)?)
    }

    pub fn search_issue_logs_by_vc_id(
        &self,
        vc_id: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<VcIssueLog>, RegistryError> {
        let hits = self
            .store
            .iterate_prefix(SPACE_ISSUE_LOG_BY_VC, &keycodec::credential_key(vc_id))?;
        let logs = hits
            .into_iter()
            .map(|(_, v)| serde_json::from_slice::<VcIssueLog>(&v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paginate(logs, start, count))
    }

    /// Scan the holder index, post-filtering by issuer and template id when
    /// supplied; pagination applies to matches.
    pub fn search_issue_logs(
        &self,
        issuer: &str,
        holder: &str,
        template_id: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<VcIssueLog>, RegistryError> {
        let hits = self
            .store
            .iterate_prefix(SPACE_ISSUE_LOG, &keycodec::did_key(holder))?;
        let logs = hits
            .into_iter()
            .map(|(_, v)| serde_json::from_slice::<VcIssueLog>(&v))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(paginate(
            logs.into_iter().filter(|log| {
                (issuer.is_empty() || log.issuer == issuer)
                    && (template_id.is_empty() || log.template_id == template_id)
            }),
            start,
            count,
        ))
    }
}
