//! Persisted bot state.

mod admins;
mod persist;

pub use admins::AdminRegistry;
pub use persist::{Persisted, PersistedGuard};
