//! Admin command parsing and execution.
//!
//! Admin commands arrive as PRIVMSG text of the form `.<verb> <argument>`
//! from an already-authorized host. The parser recognizes exactly three
//! verbs; everything else is "not an admin command" and falls through the
//! chain, it is not an error.

use async_trait::async_trait;
use slircb_proto::Message;
use std::sync::Arc;
use tracing::{debug, info};

use super::Handler;
use crate::error::HandlerResult;
use crate::network::Connection;
use crate::state::AdminRegistry;

/// A recognized admin command with its raw argument.
///
/// The argument is the remainder of the line; each verb interprets it
/// differently, so no further tokenization happens here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// `.addadmin <host>` - authorize a host.
    AddAdmin(String),
    /// `.deladmin <host>` - deauthorize a host.
    DelAdmin(String),
    /// `.raw <line>` - relay a raw protocol line.
    Raw(String),
}

/// Parse admin command syntax out of message text.
///
/// Grammar: a leading `.`, one of the three verbs as a whole token, at
/// least one whitespace character, then the rest of the line as the
/// argument (leading whitespace stripped). Requiring the verb to be a
/// whole token keeps longest-match semantics: `.rawr x` matches nothing.
///
/// Returns `None` for anything that is not admin syntax.
pub fn parse_admin_command(text: &str) -> Option<AdminCommand> {
    let rest = text.strip_prefix('.')?;
    let (verb, arg) = rest.split_once(char::is_whitespace)?;
    let arg = arg.trim_start().to_string();

    match verb {
        "addadmin" => Some(AdminCommand::AddAdmin(arg)),
        "deladmin" => Some(AdminCommand::DelAdmin(arg)),
        "raw" => Some(AdminCommand::Raw(arg)),
        _ => None,
    }
}

/// Executes admin commands against the registry and the wire.
///
/// Always the last handler in the admin chain.
pub struct AdminExecutor {
    admins: Arc<AdminRegistry>,
}

impl AdminExecutor {
    /// Create an executor over the shared registry.
    pub fn new(admins: Arc<AdminRegistry>) -> Self {
        Self { admins }
    }
}

#[async_trait]
impl Handler for AdminExecutor {
    fn name(&self) -> &'static str {
        "admin"
    }

    async fn handle(&self, conn: &Connection, msg: &Message) -> HandlerResult {
        let Some(text) = msg.trailing.as_deref() else {
            return Ok(false);
        };
        let Some(cmd) = parse_admin_command(text) else {
            return Ok(false);
        };

        // A matched verb is always "handled", even when the action is a
        // no-op (e.g. deleting a host that was never there).
        match cmd {
            AdminCommand::AddAdmin(arg) => {
                let host = arg.trim();
                self.admins.add(host)?;
                info!(host, "admin host added");
                conn.notice(msg, "Added host successfully").await?;
            }
            AdminCommand::DelAdmin(arg) => {
                let host = arg.trim();
                self.admins.remove(host)?;
                info!(host, "admin host removed");
                conn.notice(msg, "Removed host successfully").await?;
            }
            AdminCommand::Raw(arg) => match arg.parse::<Message>() {
                Ok(raw) => {
                    debug!(command = %raw.command, "relaying raw line");
                    conn.write_detached(raw);
                }
                Err(e) => {
                    debug!(error = %e, "rejected raw line");
                    conn.notice(msg, "Could not parse, are you sure you know the IRC protocol?")
                        .await?;
                }
            },
        }

        Ok(true)
    }
}
