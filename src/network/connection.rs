//! The bot's single IRC connection.
//!
//! [`Connection`] is the outbound handle given to handlers: a clone-cheap
//! wrapper over the writer task's queue. [`run`] owns the socket and the
//! serial inbound loop; each message is dispatched to completion before the
//! next is read, so there is no internal queueing of inbound traffic.

use futures_util::{SinkExt, StreamExt};
use slircb_proto::{LineCodec, Message, command};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::handlers::Dispatcher;

/// Outbound queue depth. Bounded so a dead peer applies backpressure
/// instead of growing memory.
const OUTBOUND_QUEUE_SIZE: usize = 256;

/// Handle for sending messages to the server.
#[derive(Clone)]
pub struct Connection {
    tx: mpsc::Sender<Message>,
}

impl Connection {
    /// Wrap a sender feeding the writer task.
    pub fn new(tx: mpsc::Sender<Message>) -> Self {
        Self { tx }
    }

    /// Queue a message for transmission.
    pub async fn write(&self, msg: Message) -> Result<(), mpsc::error::SendError<Message>> {
        self.tx.send(msg).await
    }

    /// Send a NOTICE back to the sender of `reply_to`.
    ///
    /// Messages without a source nickname get no reply; there is nobody to
    /// address it to.
    pub async fn notice(
        &self,
        reply_to: &Message,
        text: &str,
    ) -> Result<(), mpsc::error::SendError<Message>> {
        match reply_to.source_nickname() {
            Some(nick) => self.write(Message::notice(nick, text)).await,
            None => Ok(()),
        }
    }

    /// Queue a message from a detached task, fire-and-forget.
    ///
    /// Used for relayed `raw` lines: a slow or failing send must not stall
    /// the inbound loop, and no ordering is guaranteed against later
    /// outbound traffic.
    pub fn write_detached(&self, msg: Message) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tx.send(msg).await {
                warn!(error = %e, "detached send failed, connection gone");
            }
        });
    }
}

/// Connect to the configured server and run the inbound loop until the
/// connection closes. Reconnect policy belongs to the caller.
pub async fn run(config: &Config, mut dispatcher: Dispatcher) -> anyhow::Result<()> {
    let stream = TcpStream::connect(&config.server.addr).await?;
    info!(addr = %config.server.addr, "connected");

    let framed = Framed::new(stream, LineCodec::new());
    let (mut sink, mut lines) = framed.split();

    let (tx, mut rx) = mpsc::channel::<Message>(OUTBOUND_QUEUE_SIZE);
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Err(e) = sink.send(msg).await {
                warn!(error = %e, "write failed");
                break;
            }
        }
    });

    let conn = Connection::new(tx);

    // Registration burst
    if let Some(ref password) = config.server.password {
        conn.write(Message::pass(password)).await?;
    }
    conn.write(Message::nick(&config.server.nick)).await?;
    conn.write(Message::user(&config.server.nick, &config.server.realname))
        .await?;

    while let Some(line) = lines.next().await {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "framing error, closing connection");
                break;
            }
        };

        let msg: Message = match line.parse() {
            Ok(msg) => msg,
            Err(e) => {
                warn!(error = %e, "skipping unparseable line");
                continue;
            }
        };

        // Liveness is a transport concern; the dispatcher never sees PING.
        if msg.command == command::PING {
            let token = msg
                .trailing
                .clone()
                .or_else(|| msg.params.first().cloned())
                .unwrap_or_default();
            conn.write(Message::pong(token)).await?;
            continue;
        }

        match dispatcher.dispatch(&conn, &msg).await {
            Ok(handled) => debug!(command = %msg.command, handled, "dispatched"),
            Err(e) => warn!(command = %msg.command, error = %e, "handler error"),
        }
    }

    info!("connection closed");
    writer.abort();
    Ok(())
}
