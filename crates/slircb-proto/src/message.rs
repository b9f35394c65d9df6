//! The owned IRC message type.
//!
//! A message is an optional prefix, a command name, middle parameters, and
//! an optional trailing parameter. IRCv3 tags are tolerated on input and
//! discarded; the bot neither requests nor emits capabilities.

use std::fmt;
use std::str::FromStr;

use crate::command;
use crate::error::{MessageParseError, ProtocolError};
use crate::prefix::Prefix;

/// An owned IRC message.
///
/// # Example
///
/// ```
/// use slircb_proto::Message;
///
/// let msg: Message = ":nick!user@host PRIVMSG #chan :Hello!".parse().unwrap();
/// assert_eq!(msg.command, "PRIVMSG");
/// assert_eq!(msg.params, vec!["#chan"]);
/// assert_eq!(msg.trailing.as_deref(), Some("Hello!"));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Message {
    /// Message prefix/source (e.g., `nick!user@host`).
    pub prefix: Option<Prefix>,
    /// The command name, or a three-digit numeric as received.
    pub command: String,
    /// Middle parameters.
    pub params: Vec<String>,
    /// Trailing parameter (the `:`-marked free text), if any.
    pub trailing: Option<String>,
}

impl Message {
    /// Create a message from raw components, without a prefix.
    pub fn new(
        command: impl Into<String>,
        params: Vec<String>,
        trailing: Option<String>,
    ) -> Self {
        Message {
            prefix: None,
            command: command.into(),
            params,
            trailing,
        }
    }

    /// Create a PRIVMSG to a target with text.
    #[must_use]
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Message::new(command::PRIVMSG, vec![target.into()], Some(text.into()))
    }

    /// Create a NOTICE to a target with text.
    #[must_use]
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Message::new(command::NOTICE, vec![target.into()], Some(text.into()))
    }

    /// Create a JOIN message for a channel.
    #[must_use]
    pub fn join(channel: impl Into<String>) -> Self {
        Message::new(command::JOIN, vec![channel.into()], None)
    }

    /// Create a NICK message.
    #[must_use]
    pub fn nick(nickname: impl Into<String>) -> Self {
        Message::new(command::NICK, vec![nickname.into()], None)
    }

    /// Create a USER registration message.
    #[must_use]
    pub fn user(username: impl Into<String>, realname: impl Into<String>) -> Self {
        Message::new(
            command::USER,
            vec![username.into(), "0".into(), "*".into()],
            Some(realname.into()),
        )
    }

    /// Create a PASS registration message.
    #[must_use]
    pub fn pass(password: impl Into<String>) -> Self {
        Message::new(command::PASS, vec![password.into()], None)
    }

    /// Create a PONG reply carrying the PING token.
    #[must_use]
    pub fn pong(token: impl Into<String>) -> Self {
        Message::new(command::PONG, vec![], Some(token.into()))
    }

    /// Set the prefix/source of this message.
    #[must_use]
    pub fn with_prefix(mut self, prefix: Prefix) -> Self {
        self.prefix = Some(prefix);
        self
    }

    /// Get the nickname from the message prefix, if present.
    pub fn source_nickname(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::nick)
    }

    /// Get the sender's host from the message prefix, if present.
    ///
    /// This is the authorization key: `None` for server origins, missing
    /// prefixes, and empty host fields alike.
    pub fn source_host(&self) -> Option<&str> {
        self.prefix.as_ref().and_then(Prefix::host)
    }
}

fn valid_command(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric())
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        let invalid = |cause| ProtocolError::InvalidMessage {
            string: s.to_owned(),
            cause,
        };

        let mut rest = s.trim_end_matches(['\r', '\n']);
        if rest.trim().is_empty() {
            return Err(invalid(MessageParseError::EmptyMessage));
        }

        // Tags are tolerated and discarded.
        if let Some(after) = rest.strip_prefix('@') {
            rest = match after.split_once(' ') {
                Some((_, tail)) => tail.trim_start_matches(' '),
                None => return Err(invalid(MessageParseError::MissingCommand)),
            };
        }

        let mut prefix = None;
        if let Some(after) = rest.strip_prefix(':') {
            let (head, tail) = after
                .split_once(' ')
                .ok_or_else(|| invalid(MessageParseError::MissingCommand))?;
            if head.is_empty() {
                return Err(invalid(MessageParseError::EmptyPrefix));
            }
            prefix = Some(Prefix::new_from_str(head));
            rest = tail.trim_start_matches(' ');
        }

        // Command token, then middles until the trailing marker.
        let (cmd, mut rest) = match rest.split_once(' ') {
            Some((head, tail)) => (head, tail),
            None => (rest, ""),
        };
        if !valid_command(cmd) {
            return Err(invalid(MessageParseError::InvalidCommand(cmd.to_owned())));
        }

        let mut params = Vec::new();
        let mut trailing = None;
        loop {
            rest = rest.trim_start_matches(' ');
            if rest.is_empty() {
                break;
            }
            if let Some(text) = rest.strip_prefix(':') {
                trailing = Some(text.to_owned());
                break;
            }
            match rest.split_once(' ') {
                Some((param, tail)) => {
                    params.push(param.to_owned());
                    rest = tail;
                }
                None => {
                    params.push(rest.to_owned());
                    break;
                }
            }
        }

        Ok(Message {
            prefix,
            command: cmd.to_ascii_uppercase(),
            params,
            trailing,
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref prefix) = self.prefix {
            write!(f, ":{} ", prefix)?;
        }
        write!(f, "{}", self.command)?;
        for param in &self.params {
            write!(f, " {}", param)?;
        }
        if let Some(ref trailing) = self.trailing {
            write!(f, " :{}", trailing)?;
        }
        Ok(())
    }
}
