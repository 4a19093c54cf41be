//! # Trust Engine
//!
//! The registry engine ties the data model, the storage layer, and the
//! host environment together: document lifecycle, credential and
//! presentation verification, delegation, trust lists, templates, and the
//! issuance log. Every operation is deterministic given the host interfaces
//! (logical clock, caller identity) and fail-fast: the first failing check
//! decides the outcome.
//!
//! ## Security Invariant
//!
//! No operation trusts caller-supplied JSON until its proof chain has been
//! verified against documents already persisted in the registry (or, for a
//! self-signing first registration, against the pending document itself).

pub mod config;
pub mod events;
pub mod host;
pub mod standards;

mod delegation;
mod documents;
mod issuance;
mod registry;
mod trust;
mod verify;

pub use config::EngineConfig;
pub use host::{CallerIdentity, Clock, EventSink, FixedClock, RecordingSink, StaticCaller};
pub use registry::DidRegistry;
