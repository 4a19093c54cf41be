//! # Templates and the Issuance Log
//!
//! Credential templates bind a JSON-Schema text to an (id, version) pair;
//! issuing under a template commits the issuer to that schema. The issuance
//! log is the registry's record that a credential id was actually handed
//! out — when enabled, verification refuses credentials with no log entry.

use std::collections::BTreeSet;

use tracing::debug;

use vdr_core::RegistryError;
use vdr_model::{ensure_template_compiles, VcIssueLog, VcTemplate};
use vdr_store::StateStore;

use crate::events::{TOPIC_SET_VC_TEMPLATE, TOPIC_VC_ISSUE_LOG};
use crate::registry::DidRegistry;

impl<S: StateStore> DidRegistry<S> {
    // ─── Templates ──────────────────────────────────────────────────

    /// Register a template version. The schema text must compile; a stored
    /// template that fails to compile would brick verification of every
    /// credential issued under it.
    pub fn set_vc_template(
        &self,
        id: &str,
        name: &str,
        vc_type: &str,
        version: &str,
        template: &str,
    ) -> Result<(), RegistryError> {
        self.require_admin()?;
        ensure_template_compiles(template)?;
        self.store.put_template(&VcTemplate {
            id: id.to_owned(),
            name: name.to_owned(),
            version: version.to_owned(),
            vc_type: vc_type.to_owned(),
            template: template.to_owned(),
        })?;
        debug!(id, version, "vc template stored");
        self.events.emit(
            TOPIC_SET_VC_TEMPLATE,
            &[
                id.to_owned(),
                name.to_owned(),
                vc_type.to_owned(),
                version.to_owned(),
                template.to_owned(),
            ],
        );
        Ok(())
    }

    pub fn get_vc_template(&self, id: &str, version: &str) -> Result<VcTemplate, RegistryError> {
        self.store.template(id, version)
    }

    /// Substring search over template names.
    pub fn get_vc_template_list(
        &self,
        name_search: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<VcTemplate>, RegistryError> {
        self.store.search_templates(name_search, start, count)
    }

    // ─── Issuance log ───────────────────────────────────────────────

    /// Record that `issuer` issued `vc_id` under `template_id` to `holder`.
    /// Only the issuer itself (or the admin) may log, and some version of
    /// the template must exist.
    pub fn log_vc_issuance(
        &self,
        issuer: &str,
        holder: &str,
        template_id: &str,
        vc_id: &str,
    ) -> Result<(), RegistryError> {
        if !self.config.enable_issue_log {
            return Err(RegistryError::Unauthorized(
                "vc issue log is disabled".into(),
            ));
        }
        let sender_is_issuer = matches!(self.sender_did(), Ok(sender) if sender == issuer);
        if !sender_is_issuer && !self.is_admin()? {
            return Err(RegistryError::Unauthorized("no operation permission".into()));
        }
        self.validate_did(issuer)?;
        self.validate_did(holder)?;
        if self.store.templates_by_id(template_id)?.is_empty() {
            return Err(RegistryError::TemplateNotFound);
        }
        let issue_time = self.now()?;
        self.store.put_issue_log(&VcIssueLog {
            issuer: issuer.to_owned(),
            did: holder.to_owned(),
            template_id: template_id.to_owned(),
            vc_id: vc_id.to_owned(),
            issue_time,
        })?;
        debug!(issuer, holder, vc_id, "vc issuance logged");
        self.events.emit(
            TOPIC_VC_ISSUE_LOG,
            &[
                issuer.to_owned(),
                holder.to_owned(),
                template_id.to_owned(),
                vc_id.to_owned(),
            ],
        );
        Ok(())
    }

    /// Log entries for a holder, optionally narrowed by issuer and
    /// template id.
    pub fn get_vc_issue_logs(
        &self,
        issuer: &str,
        holder: &str,
        template_id: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<VcIssueLog>, RegistryError> {
        self.store
            .search_issue_logs(issuer, holder, template_id, start, count)
    }

    /// Every DID that ever issued to `holder`, deduplicated and sorted.
    pub fn get_vc_issuers(&self, holder: &str) -> Result<Vec<String>, RegistryError> {
        let logs = self.store.search_issue_logs("", holder, "", 0, 0)?;
        let issuers: BTreeSet<String> = logs.into_iter().map(|log| log.issuer).collect();
        Ok(issuers.into_iter().collect())
    }
}
