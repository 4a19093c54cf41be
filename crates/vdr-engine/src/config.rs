//! # Engine Configuration
//!
//! Behavior toggles are explicit fields, fixed at construction. Flipping a
//! flag on a live registry would change which already-issued credentials
//! verify, so the engine never exposes setters.

/// Construction-time engine settings.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// The single DID method this registry serves, e.g. `vdrx` in
    /// `did:vdrx:<address>`. Four characters, fixed prefix length.
    pub did_method: String,
    /// Require credential issuers to appear in the trusted-issuer registry.
    pub enable_trust_issuer: bool,
    /// Require an issuance-log entry before a credential verifies, and
    /// accept `log_vc_issuance` calls.
    pub enable_issue_log: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            did_method: "vdrx".to_owned(),
            enable_trust_issuer: true,
            enable_issue_log: true,
        }
    }
}
