//! The ordered dispatch pipeline.
//!
//! Precedence is a contract, not an optimization: unauthenticated handlers
//! always get first refusal so ordinary features behave identically for
//! everyone, and only unclaimed messages fall through to the authorization
//! gate and the privileged chain. Reordering changes observable behavior.

use slircb_proto::{Message, command};
use std::sync::Arc;
use tracing::{debug, info};

use super::{AdminExecutor, Handler};
use crate::error::HandlerResult;
use crate::network::Connection;
use crate::state::AdminRegistry;

/// Routes every inbound message through the handler chains.
pub struct Dispatcher {
    channels: Vec<String>,
    admins: Arc<AdminRegistry>,
    /// Unauthenticated chain (factoids, analyzer), tried in order.
    handlers: Vec<Box<dyn Handler>>,
    /// Privileged chain, tried post-authorization; the executor is pinned
    /// last.
    admin_handlers: Vec<Box<dyn Handler>>,
    registered: bool,
}

impl Dispatcher {
    /// Create a dispatcher joining `channels` on welcome, gated on `admins`.
    pub fn new(channels: Vec<String>, admins: Arc<AdminRegistry>) -> Self {
        let executor = AdminExecutor::new(Arc::clone(&admins));
        Self {
            channels,
            admins,
            handlers: Vec::new(),
            admin_handlers: vec![Box::new(executor)],
            registered: false,
        }
    }

    /// Append a handler to the unauthenticated chain.
    pub fn register(&mut self, handler: Box<dyn Handler>) {
        self.handlers.push(handler);
    }

    /// Append a handler to the privileged chain, ahead of the executor.
    pub fn register_admin(&mut self, handler: Box<dyn Handler>) {
        let executor = self.admin_handlers.len() - 1;
        self.admin_handlers.insert(executor, handler);
    }

    /// Process one inbound message to completion.
    ///
    /// The returned boolean reports whether anything consumed the message;
    /// callers use it for logging only.
    pub async fn dispatch(&mut self, conn: &Connection, msg: &Message) -> HandlerResult {
        // One-shot transition: join configured channels on welcome. The
        // welcome itself is reported as not handled.
        if !self.registered && msg.command == command::RPL_WELCOME {
            self.registered = true;
            info!(channels = self.channels.len(), "registered with server");
            for channel in &self.channels {
                conn.write(Message::join(channel)).await?;
            }
            return Ok(false);
        }

        // Only user text flows through the pipeline.
        if msg.command != command::PRIVMSG {
            return Ok(false);
        }

        for handler in &self.handlers {
            if handler.handle(conn, msg).await? {
                debug!(handler = handler.name(), "message consumed");
                return Ok(true);
            }
        }

        // No sender host: nothing left that could act on it.
        let Some(host) = msg.source_host() else {
            return Ok(false);
        };

        if !self.admins.is_authorized(host) {
            // Silent drop. No "unauthorized" notice: admin commands are not
            // advertised to probing non-admins.
            debug!(host, "unauthorized, dropped");
            return Ok(true);
        }

        for handler in &self.admin_handlers {
            if handler.handle(conn, msg).await? {
                debug!(handler = handler.name(), "message consumed");
                return Ok(true);
            }
        }

        Ok(false)
    }
}
