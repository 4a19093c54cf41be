//! # vdr-core — Foundational Types for the Verifiable Data Registry
//!
//! This crate is the leaf of the workspace DAG. It defines the primitives
//! every other `vdr-*` crate builds on:
//!
//! 1. **`Did` newtype.** DID strings are never passed around bare once they
//!    cross an API boundary; well-formedness checks live on the type.
//!
//! 2. **`SigningBytes` newtype.** The exact byte sequence a proof signs over
//!    is the artifact's JSON with the `proof` member removed, compacted.
//!    The only constructor applies that transform, so signature code cannot
//!    accidentally verify against a differently-serialized rendition.
//!
//! 3. **Storage key codec.** Deterministic, pure transforms from domain
//!    identifiers (DIDs, credential ids, delegation tuples) to storage-safe
//!    key strings.
//!
//! 4. **Structured errors.** One `RegistryError` hierarchy via `thiserror`,
//!    with `StoreError` and `CryptoError` as subordinate enums.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vdr-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod did;
pub mod error;
pub mod keycodec;
pub mod temporal;

pub use canonical::SigningBytes;
pub use did::Did;
pub use error::{CryptoError, RegistryError, StoreError};
pub use temporal::{parse_rfc3339_unix, MAX_TIMESTAMP};
