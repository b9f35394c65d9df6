//! Error types for the protocol model.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Line exceeded the maximum allowed length.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Actual line length.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },

    /// Line was not valid UTF-8.
    #[error("invalid UTF-8 in message: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Failed to parse an IRC message.
    #[error("invalid message {string:?}: {cause}")]
    InvalidMessage {
        /// The offending line.
        string: String,
        /// What went wrong.
        cause: MessageParseError,
    },
}

/// Errors from parsing a single IRC message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty (or whitespace only).
    #[error("empty message")]
    EmptyMessage,

    /// A prefix marker was present but the prefix itself was missing.
    #[error("empty prefix")]
    EmptyPrefix,

    /// No command token was found.
    #[error("missing command")]
    MissingCommand,

    /// The command token contained invalid characters.
    #[error("invalid command: {0:?}")]
    InvalidCommand(String),
}
