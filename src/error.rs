//! Unified error handling for slircb.
//!
//! Persistence failures are fatal at startup (the bot must never run with
//! an unknown admin set) and surfaced per-command afterwards; handler
//! errors never escape the dispatch loop as anything other than a logged
//! warning.

use slircb_proto::Message;
use std::path::PathBuf;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors from loading or saving persisted state.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but does not deserialize. Deliberately not
    /// recovered by falling back to defaults: a half-read admin set must
    /// abort startup, not silently widen or narrow authorization.
    #[error("corrupt state file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize state for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that can occur while a handler processes a message.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("send error: {0}")]
    Send(#[from] mpsc::error::SendError<Message>),

    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

/// Result type for message handlers. `Ok(true)` means the message was
/// fully consumed and no later handler in the chain may see it.
pub type HandlerResult = Result<bool, HandlerError>;
