//! # Delegation
//!
//! A delegation grant lets a delegatee present (action `sign`) a resource —
//! in practice a credential id — owned by the delegator. One grant exists
//! per (delegator, delegatee, resource, action) tuple; re-delegating the
//! same tuple overwrites the window.

use tracing::debug;

use vdr_core::{RegistryError, MAX_TIMESTAMP};
use vdr_model::DelegateInfo;
use vdr_store::StateStore;

use crate::events::{TOPIC_DELEGATE, TOPIC_REVOKE_DELEGATE};
use crate::registry::DidRegistry;

impl<S: StateStore> DidRegistry<S> {
    /// Grant a delegation from the caller to `delegatee`. `expiration == 0`
    /// means never expires; the window starts at the current chain time.
    pub fn delegate(
        &self,
        delegatee: &str,
        resource: &str,
        action: &str,
        expiration: i64,
    ) -> Result<(), RegistryError> {
        let delegator = self.sender_did()?;
        self.validate_did(delegatee)?;
        let start_time = self.now()?;
        let expiration = if expiration == 0 {
            MAX_TIMESTAMP
        } else {
            expiration
        };
        let grant = DelegateInfo {
            delegator_did: delegator.clone(),
            delegatee_did: delegatee.to_owned(),
            resource: resource.to_owned(),
            action: action.to_owned(),
            start_time,
            expiration,
        };
        self.store.put_delegate(&grant)?;
        debug!(%delegator, delegatee, resource, action, "delegation granted");
        self.events.emit(
            TOPIC_DELEGATE,
            &[
                delegator,
                delegatee.to_owned(),
                resource.to_owned(),
                action.to_owned(),
                start_time.to_string(),
                expiration.to_string(),
            ],
        );
        Ok(())
    }

    /// Revoke the caller's grant for the exact tuple. Idempotent: revoking
    /// an absent grant succeeds.
    pub fn revoke_delegate(
        &self,
        delegatee: &str,
        resource: &str,
        action: &str,
    ) -> Result<(), RegistryError> {
        let delegator = self.sender_did()?;
        self.store
            .delete_delegate(&delegator, delegatee, resource, action)?;
        debug!(%delegator, delegatee, resource, action, "delegation revoked");
        self.events.emit(
            TOPIC_REVOKE_DELEGATE,
            &[
                delegator,
                delegatee.to_owned(),
                resource.to_owned(),
                action.to_owned(),
            ],
        );
        Ok(())
    }

    /// Hierarchical grant search: delegator alone, or progressively
    /// narrowed by delegatee, resource, and action.
    pub fn get_delegate_list(
        &self,
        delegator: &str,
        delegatee: &str,
        resource: &str,
        action: &str,
        start: usize,
        count: usize,
    ) -> Result<Vec<DelegateInfo>, RegistryError> {
        self.store
            .search_delegates(delegator, delegatee, resource, action, start, count)
    }

    /// The delegation gate used by presentation verification: some grant
    /// for the tuple must exist and be inside its `[start, expiration)`
    /// window at `now`.
    pub(crate) fn check_delegate(
        &self,
        delegator: &str,
        delegatee: &str,
        resource: &str,
        action: &str,
        now: i64,
    ) -> Result<(), RegistryError> {
        let grants = self
            .store
            .search_delegates(delegator, delegatee, resource, action, 0, 0)?;
        if grants.is_empty() {
            return Err(RegistryError::DelegationMissing);
        }
        if grants.iter().any(|g| g.active_at(now)) {
            Ok(())
        } else {
            Err(RegistryError::DelegationExpired)
        }
    }
}
