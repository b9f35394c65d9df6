//! Generic locked, durable state container.
//!
//! A [`Persisted<T>`] holds one value behind an exclusive lock, loaded from
//! a JSON snapshot at startup and explicitly saved on mutation. Saves use
//! atomic writes (temp file + rename) to prevent corruption.
//!
//! `save()` lives on the guard, not the container: persistence can only
//! happen while the lock is held, so no other access can interleave between
//! a mutation and its write-out.

use parking_lot::{Mutex, MutexGuard};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::PersistError;

/// A value of type `T` with an exclusive lock and a durable home on disk.
pub struct Persisted<T> {
    path: PathBuf,
    value: Mutex<T>,
}

impl<T: Serialize + DeserializeOwned> Persisted<T> {
    /// Load a previously saved value from `path`.
    ///
    /// If the file does not exist, the container is initialized with
    /// `default` and persisted immediately. Any other read or parse failure
    /// is an error; callers at startup treat it as fatal.
    pub fn load(path: impl Into<PathBuf>, default: T) -> Result<Self, PersistError> {
        let path = path.into();
        match fs::read(&path) {
            Ok(bytes) => {
                let value = serde_json::from_slice(&bytes).map_err(|source| {
                    PersistError::Corrupt {
                        path: path.clone(),
                        source,
                    }
                })?;
                Ok(Self {
                    path,
                    value: Mutex::new(value),
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let state = Self {
                    path,
                    value: Mutex::new(default),
                };
                state.lock().save()?;
                Ok(state)
            }
            Err(source) => Err(PersistError::Io { path, source }),
        }
    }

    /// Acquire exclusive access to the value.
    ///
    /// The lock is a plain (non-async) mutex: hold it only across the
    /// read-modify-write critical section and the save, never across
    /// outbound I/O or an `.await`.
    pub fn lock(&self) -> PersistedGuard<'_, T> {
        PersistedGuard {
            path: &self.path,
            guard: self.value.lock(),
        }
    }
}

/// Exclusive access to a [`Persisted`] value.
pub struct PersistedGuard<'a, T> {
    path: &'a Path,
    guard: MutexGuard<'a, T>,
}

impl<T> Deref for PersistedGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.guard
    }
}

impl<T> DerefMut for PersistedGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.guard
    }
}

impl<T: Serialize> PersistedGuard<'_, T> {
    /// Durably persist the current value, overwriting any prior snapshot.
    ///
    /// Writes to a temp file first, then renames over the target.
    pub fn save(&self) -> Result<(), PersistError> {
        let json =
            serde_json::to_vec_pretty(&*self.guard).map_err(|source| PersistError::Serialize {
                path: self.path.to_owned(),
                source,
            })?;

        let io_err = |source| PersistError::Io {
            path: self.path.to_owned(),
            source,
        };

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, &json).map_err(io_err)?;
        fs::rename(&temp_path, self.path).map_err(io_err)?;

        debug!(path = %self.path.display(), "state saved");
        Ok(())
    }
}
