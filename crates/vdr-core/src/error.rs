//! # Error Types — Structured Error Hierarchy
//!
//! Every failing check in the registry surfaces as a `RegistryError` value;
//! nothing in the non-test code paths panics. Checks are fail-fast: the first
//! failing condition's error propagates and no further checks run.
//!
//! Several `Display` strings are load-bearing — downstream consumers match
//! on them ("vc is revoked", "no delegate", ...) so their spelling never
//! changes.

use thiserror::Error;

/// Top-level error type for the registry and trust engine.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The DID has no stored record.
    #[error("did not found")]
    DidNotFound,

    /// The DID Document for a given DID does not exist.
    #[error("did document not found, did={0}")]
    DocumentNotFound(String),

    /// The referenced credential template does not exist.
    #[error("template not found")]
    TemplateNotFound,

    /// A generic registry entry lookup came back empty.
    #[error("data not found")]
    DataNotFound,

    /// The DID string is malformed.
    #[error("invalid did")]
    InvalidDid,

    /// The DID carries a method this registry does not serve.
    #[error("invalid did method")]
    InvalidDidMethod,

    /// The DID Document could not be parsed or fails structural checks.
    #[error("invalid did document: {0}")]
    InvalidDocument(String),

    /// The credential could not be parsed or fails structural checks.
    #[error("invalid vc: {0}")]
    InvalidCredential(String),

    /// The presentation could not be parsed or fails structural checks.
    #[error("invalid vp: {0}")]
    InvalidPresentation(String),

    /// A proof is absent, malformed, or its signature does not verify.
    #[error("invalid signature: {0}")]
    SignatureInvalid(String),

    /// No issuance-log entry exists for the credential.
    #[error("vc is not issued")]
    NotIssued,

    /// The current chain time lies outside the credential's validity window.
    #[error("vc is expired")]
    Expired,

    /// `issuanceDate` is after `expirationDate`.
    #[error("issuance date is after the expiration date")]
    IssuanceAfterExpiration,

    /// `type[0]` is not `"VerifiableCredential"`.
    #[error("invalid VC type")]
    InvalidVcType,

    /// The credential id appears in the revocation registry.
    #[error("vc is revoked")]
    Revoked,

    /// The named party is blacklisted.
    #[error("{0} is in black list")]
    Blacklisted(String),

    /// The credential subject does not conform to its template schema.
    #[error("credentialSubject of VC not match template: {0}")]
    SchemaMismatch(String),

    /// The caller is not permitted to perform the operation.
    #[error("{0}")]
    Unauthorized(String),

    /// The presenter holds no delegation grant for the credential.
    #[error("no delegate")]
    DelegationMissing,

    /// Every matching delegation grant lies outside its validity window.
    #[error("delegate is expired")]
    DelegationExpired,

    /// A DID, public key, or address is already bound to another identity.
    #[error("{0} already exists")]
    DuplicateIdentity(String),

    /// A timestamp failed to parse as RFC 3339.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// State store failure — fatal for the current operation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Cryptographic failure during key parsing or verification.
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// JSON serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error raised by the state-store port.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The underlying store is unreachable or rejected the operation.
    #[error("state store unavailable: {0}")]
    Unavailable(String),
}

/// Error in cryptographic operations.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Key parsing failed (bad PEM armor, wrong length, invalid point).
    #[error("key error: {0}")]
    KeyError(String),

    /// Signature verification could not be performed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),
}
