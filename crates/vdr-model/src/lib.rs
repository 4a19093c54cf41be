//! # vdr-model — DID Documents, Credentials, Presentations
//!
//! The wire-format data model of the registry and the proof-verification
//! routine shared by all three artifact kinds:
//!
//! - **Document** (`document.rs`): DID Document parsing, canonical signing
//!   bytes, and one-or-many proof verification against a resolver callback.
//!
//! - **Credential** (`credential.rs`): W3C-shaped Verifiable Credentials,
//!   subject extraction, and JSON-Schema template conformance.
//!
//! - **Presentation** (`presentation.rs`): Verifiable Presentations. Embedded
//!   credentials are kept as raw JSON so their signatures verify over their
//!   own byte layout, not a re-serialized rendition.
//!
//! - **Proof** (`proof.rs`): the signature block and the shared verification
//!   walk (resolve signer, locate verification method, decode, verify).
//!
//! - **Records** (`records.rs`): registry record types — templates,
//!   delegation grants, issuance-log entries — with their exact wire names.
//!
//! ## Security Invariant
//!
//! Every artifact retains its raw parsed JSON, and all signature payloads are
//! produced from it through `vdr_core::SigningBytes`. Parsing never mutates
//! what was signed.

pub mod credential;
pub mod document;
pub mod presentation;
pub mod proof;
pub mod records;

pub use credential::{ensure_template_compiles, TemplateRef, VerifiableCredential};
pub use document::{DidDocument, VerificationMethod};
pub use presentation::VerifiablePresentation;
pub use proof::{verify_proofs, Proof, ProofSet};
pub use records::{DelegateInfo, VcIssueLog, VcTemplate};
