//! # slircb-proto
//!
//! The IRC protocol model used by the slircb bot: message parsing and
//! serialization, prefix handling, and a tokio line codec.
//!
//! Unlike a server-side protocol crate, the command surface here is a plain
//! string rather than a closed enum: a bot relays operator-supplied raw
//! lines verbatim, so the model must round-trip any syntactically valid
//! message, not just the commands it understands.
//!
//! ## Quick Start
//!
//! ```rust
//! use slircb_proto::Message;
//!
//! let msg: Message = ":nick!user@host PRIVMSG #chan :hello".parse().unwrap();
//! assert_eq!(msg.command, "PRIVMSG");
//! assert_eq!(msg.trailing.as_deref(), Some("hello"));
//!
//! let join = Message::join("#chan");
//! assert_eq!(join.to_string(), "JOIN #chan");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod prefix;

pub use self::command::{JOIN, NICK, NOTICE, PASS, PING, PONG, PRIVMSG, RPL_WELCOME, USER};
pub use self::error::{MessageParseError, ProtocolError};
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
pub use self::message::Message;
pub use self::prefix::Prefix;
