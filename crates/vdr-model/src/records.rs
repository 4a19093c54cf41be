//! # Registry Record Types
//!
//! The persisted shapes of templates, delegation grants, and issuance-log
//! entries. Wire names match the registry's external JSON contract.

use serde::{Deserialize, Serialize};

/// A credential template: a named, versioned JSON-Schema constraining the
/// `credentialSubject` of credentials issued under it. Keyed by
/// (id, version); re-setting the same pair overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcTemplate {
    pub id: String,
    pub name: String,
    pub version: String,
    #[serde(rename = "vcType")]
    pub vc_type: String,
    /// JSON-Schema text.
    pub template: String,
}

/// A time-bounded capability grant letting `delegatee_did` perform `action`
/// on `resource` on behalf of `delegator_did`. Valid over the half-open
/// window `[start_time, expiration)`. At most one grant per 4-tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateInfo {
    #[serde(rename = "delegatorDid")]
    pub delegator_did: String,
    #[serde(rename = "delegateeDid")]
    pub delegatee_did: String,
    pub resource: String,
    pub action: String,
    #[serde(rename = "startTime")]
    pub start_time: i64,
    pub expiration: i64,
}

impl DelegateInfo {
    /// Whether the grant covers the given chain time.
    pub fn active_at(&self, now: i64) -> bool {
        self.start_time <= now && self.expiration > now
    }
}

/// One append-only issuance-log entry, double-indexed by holder and by
/// credential id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcIssueLog {
    pub issuer: String,
    /// Holder DID.
    pub did: String,
    #[serde(rename = "templateID")]
    pub template_id: String,
    #[serde(rename = "vcID")]
    pub vc_id: String,
    #[serde(rename = "issueTime")]
    pub issue_time: i64,
}
