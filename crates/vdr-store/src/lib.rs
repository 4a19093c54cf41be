//! # vdr-store — Storage Access Layer
//!
//! The registry's only shared resource is a host-provided key-value state
//! store. This crate defines the port (`state.rs`), a deterministic
//! in-memory adapter for tests and embedded use, and the registry DAL
//! (`registry.rs`) that maps domain operations onto keyed spaces.
//!
//! ## Determinism
//!
//! Identical inputs over identical prior state must yield identical reads,
//! writes, and iteration order — independent executions of the same logic
//! have to agree. The in-memory adapter iterates in lexicographic key order;
//! nothing in the DAL depends on insertion order.

pub mod registry;
pub mod state;

pub use registry::{RegistryStore, DEFAULT_SEARCH_COUNT};
pub use state::{MemStateStore, StateStore};
