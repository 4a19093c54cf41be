//! # Timestamp Parsing
//!
//! Credentials carry RFC 3339 issuance/expiration dates; the chain supplies
//! time as agreed integer Unix seconds. This module converts between the two.
//! There is no wall-clock access anywhere in the workspace — time always
//! arrives through the host `Clock`.

use chrono::DateTime;

use crate::error::RegistryError;

/// Largest representable expiration, used for "never expires" grants.
pub const MAX_TIMESTAMP: i64 = i64::MAX;

/// Parse an RFC 3339 datetime string to Unix seconds.
pub fn parse_rfc3339_unix(s: &str) -> Result<i64, RegistryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.timestamp())
        .map_err(|_| RegistryError::InvalidTimestamp(s.to_owned()))
}
