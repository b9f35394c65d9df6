//! The persisted admin allow-list.
//!
//! Authorization is keyed on the sender's host string, exact match and
//! case-sensitive. The set lives behind one exclusive lock for the process
//! lifetime; every mutation is saved to disk before the lock is released.

use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::info;

use crate::error::PersistError;
use crate::state::persist::{Persisted, PersistedGuard};

/// The set of hosts allowed to run admin commands.
pub struct AdminRegistry {
    state: Persisted<BTreeSet<String>>,
}

impl AdminRegistry {
    /// Load the admin set from `path`.
    ///
    /// On first start (no file yet) the set is seeded with `defaults` and
    /// persisted. A corrupt or unreadable file is an error: the bot must
    /// not come up guessing at its admin set.
    pub fn load(
        path: impl Into<PathBuf>,
        defaults: impl IntoIterator<Item = String>,
    ) -> Result<Self, PersistError> {
        let state: Persisted<BTreeSet<String>> =
            Persisted::load(path, defaults.into_iter().collect())?;
        info!(admins = state.lock().len(), "admin set loaded");
        Ok(Self { state })
    }

    /// Check whether `host` may run admin commands.
    ///
    /// An empty host is never authorized; messages without a sender
    /// identity never get this far.
    pub fn is_authorized(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }
        self.state.lock().contains(host)
    }

    /// Add `host` to the set and persist. Idempotent: re-adding an existing
    /// host succeeds.
    pub fn add(&self, host: &str) -> Result<(), PersistError> {
        let mut guard = self.state.lock();
        guard.insert(host.to_string());
        guard.save()
    }

    /// Remove `host` from the set and persist. Idempotent: removing an
    /// absent host succeeds.
    pub fn remove(&self, host: &str) -> Result<(), PersistError> {
        let mut guard = self.state.lock();
        guard.remove(host);
        guard.save()
    }

    /// Exclusive access to the raw set, for multi-step operations.
    pub fn lock(&self) -> PersistedGuard<'_, BTreeSet<String>> {
        self.state.lock()
    }
}
