//! Message handlers and the dispatch pipeline.
//!
//! Every handler gets the same seam: offer it a message, get back whether
//! it consumed it. The [`Dispatcher`] tries handlers in a fixed, documented
//! order; the first `true` stops the chain. Feature handlers (factoids,
//! analyzer) plug in as trait objects and keep their logic out of this
//! crate.

mod admin;
mod dispatcher;

pub use admin::{AdminCommand, AdminExecutor, parse_admin_command};
pub use dispatcher::Dispatcher;

use async_trait::async_trait;
use slircb_proto::Message;

use crate::error::HandlerResult;
use crate::network::Connection;

/// A pluggable message consumer.
#[async_trait]
pub trait Handler: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Offer `msg` to this handler. `Ok(true)` means fully handled; no
    /// later handler in the chain sees the message.
    async fn handle(&self, conn: &Connection, msg: &Message) -> HandlerResult;
}
