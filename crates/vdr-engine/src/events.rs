//! # Event Topics
//!
//! Topic names for the fire-and-forget event stream. External consumers
//! subscribe by topic string, so these are part of the public surface and
//! never change spelling.

pub const TOPIC_SET_DID_DOCUMENT: &str = "SetDidDocument";
pub const TOPIC_SET_TRUST_ROOT_LIST: &str = "SetTrustRootList";
pub const TOPIC_REVOKE_VC: &str = "RevokeVc";
pub const TOPIC_ADD_BLACK_LIST: &str = "AddBlackList";
pub const TOPIC_DELETE_BLACK_LIST: &str = "DeleteBlackList";
pub const TOPIC_ADD_TRUST_ISSUER: &str = "AddTrustIssuer";
pub const TOPIC_DELETE_TRUST_ISSUER: &str = "DeleteTrustIssuer";
pub const TOPIC_DELEGATE: &str = "Delegate";
pub const TOPIC_REVOKE_DELEGATE: &str = "RevokeDelegate";
pub const TOPIC_SET_VC_TEMPLATE: &str = "SetVcTemplate";
pub const TOPIC_VC_ISSUE_LOG: &str = "VcIssueLog";
