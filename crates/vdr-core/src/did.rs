//! # DID Newtype
//!
//! A DID here is `did:<method>:<method-specific-id>` where the
//! method-specific-id is the hex-encoded last-20-bytes-of-Keccak256 of a
//! public key (a chain address). The registry serves exactly one method, so
//! well-formedness is always checked against a configured method string.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Byte length of the fixed `did:<method>:` prefix (method is 4 chars).
pub const DID_PREFIX_LEN: usize = 9;

/// A Decentralized Identifier string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Did(String);

impl Did {
    /// Wrap a DID string without validation. Use [`Did::checked`] at trust
    /// boundaries.
    pub fn new(did: impl Into<String>) -> Self {
        Self(did.into())
    }

    /// Wrap a DID string, rejecting strings too short to carry the
    /// `did:<method>:` prefix or carrying a foreign method.
    pub fn checked(did: impl Into<String>, method: &str) -> Result<Self, RegistryError> {
        let did = Self::new(did);
        did.ensure_well_formed(method)?;
        Ok(did)
    }

    /// The raw DID string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The method-specific-id portion, i.e. the string after `did:<method>:`.
    /// Returns the whole string when the prefix is absent or the offset is
    /// not a character boundary.
    pub fn method_specific_id(&self) -> &str {
        if self.0.len() > DID_PREFIX_LEN {
            self.0.get(DID_PREFIX_LEN..).unwrap_or(&self.0)
        } else {
            &self.0
        }
    }

    /// Check length and method prefix. Blacklist and existence checks are
    /// the engine's concern; this is pure syntax.
    ///
    /// Checked `get` rather than indexing: the input is caller-supplied and
    /// a byte offset may land inside a multibyte character.
    pub fn ensure_well_formed(&self, method: &str) -> Result<(), RegistryError> {
        if self.0.len() < DID_PREFIX_LEN {
            return Err(RegistryError::InvalidDid);
        }
        match self.0.get(4..4 + method.len()) {
            Some(m) if m == method => Ok(()),
            _ => Err(RegistryError::InvalidDidMethod),
        }
    }
}

impl std::fmt::Display for Did {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Did {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Did {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
