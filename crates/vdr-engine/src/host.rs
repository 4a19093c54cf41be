//! # Host Interfaces
//!
//! The engine never reads a wall clock, inspects transport credentials, or
//! owns an event bus. Time, caller identity, and event delivery come through
//! these ports so the engine stays deterministic and embeddable.
//!
//! The test doubles live here rather than behind `#[cfg(test)]` because
//! integration tests and embedders' own test suites need them too.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, RwLock};

use vdr_core::RegistryError;

/// Logically agreed time in Unix seconds. Never a wall clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<i64, RegistryError>;
}

/// Identity of the party invoking the current operation, as a chain address.
/// The engine resolves the sender's DID through the address index.
pub trait CallerIdentity: Send + Sync {
    fn sender_address(&self) -> Result<String, RegistryError>;
}

/// Outbound event stream. Emission is fire-and-forget: no delivery
/// guarantee, and a sink failure never fails the operation that emitted.
pub trait EventSink: Send + Sync {
    fn emit(&self, topic: &str, payload: &[String]);
}

// ─── Test doubles ───────────────────────────────────────────────────

/// A settable clock.
#[derive(Debug, Default)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<i64, RegistryError> {
        Ok(self.now.load(Ordering::SeqCst))
    }
}

/// A settable caller identity.
#[derive(Debug, Default)]
pub struct StaticCaller {
    address: RwLock<String>,
}

impl StaticCaller {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: RwLock::new(address.into()),
        }
    }

    pub fn set(&self, address: impl Into<String>) {
        if let Ok(mut guard) = self.address.write() {
            *guard = address.into();
        }
    }
}

impl CallerIdentity for StaticCaller {
    fn sender_address(&self) -> Result<String, RegistryError> {
        self.address
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| {
                RegistryError::Unauthorized("caller identity unavailable".into())
            })
    }
}

/// A sink that records every emission for assertion.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(String, Vec<String>)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All `(topic, payload)` pairs emitted so far, in order.
    pub fn events(&self) -> Vec<(String, Vec<String>)> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Topics only, in emission order.
    pub fn topics(&self) -> Vec<String> {
        self.events().into_iter().map(|(topic, _)| topic).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, topic: &str, payload: &[String]) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push((topic.to_owned(), payload.to_vec()));
        }
    }
}
