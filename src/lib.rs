//! slircb - Straylight IRC Bot
//!
//! The message-handling core: a single connection feeding an ordered
//! handler pipeline, with a host-based authorization gate in front of the
//! admin commands and a persisted, lock-protected admin allow-list.

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;
