//! Integration test common infrastructure.
//!
//! Provides an in-memory outbound channel standing in for the socket, a
//! recording stub handler for chain-ordering assertions, and message
//! builders for inbound traffic.

// Each integration test binary compiles this module separately and uses a
// different subset of it.
#![allow(dead_code)]

use async_trait::async_trait;
use slircb::error::HandlerResult;
use slircb::handlers::Handler;
use slircb::network::Connection;
use slircb::state::AdminRegistry;
use slircb_proto::{Message, Prefix};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;

/// Outbound capture: a `Connection` plus the receiver end of its queue.
pub fn connection() -> (Connection, mpsc::Receiver<Message>) {
    let (tx, rx) = mpsc::channel(64);
    (Connection::new(tx), rx)
}

/// Fresh registry backed by a temp file; returns the dir to keep it alive.
pub fn registry(seed: &[&str]) -> (Arc<AdminRegistry>, tempfile::TempDir) {
    let dir = tempfile::tempdir().expect("tempdir");
    let reg = AdminRegistry::load(
        dir.path().join("admins.json"),
        seed.iter().map(|s| s.to_string()),
    )
    .expect("registry load");
    (Arc::new(reg), dir)
}

/// A PRIVMSG from `nick!user@host` to `#chan`.
pub fn privmsg(host: &str, text: &str) -> Message {
    Message {
        prefix: Some(Prefix::new("nick", "user", host)),
        command: "PRIVMSG".to_string(),
        params: vec!["#chan".to_string()],
        trailing: Some(text.to_string()),
    }
}

/// A PRIVMSG with no prefix at all.
pub fn privmsg_no_prefix(text: &str) -> Message {
    Message::privmsg("#chan", text)
}

/// The welcome numeric from the server.
pub fn welcome() -> Message {
    Message {
        prefix: Some(Prefix::ServerName("irc.example.net".to_string())),
        command: "001".to_string(),
        params: vec!["slircb".to_string()],
        trailing: Some("Welcome".to_string()),
    }
}

/// Stub handler that records invocations and answers a fixed verdict.
pub struct StubHandler {
    name: &'static str,
    accepts: bool,
    calls: Arc<AtomicUsize>,
}

impl StubHandler {
    pub fn new(name: &'static str, accepts: bool) -> (Box<Self>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Box::new(Self {
                name,
                accepts,
                calls: Arc::clone(&calls),
            }),
            calls,
        )
    }
}

#[async_trait]
impl Handler for StubHandler {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn handle(&self, _conn: &Connection, _msg: &Message) -> HandlerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accepts)
    }
}

/// Count of recorded calls.
pub fn calls(counter: &Arc<AtomicUsize>) -> usize {
    counter.load(Ordering::SeqCst)
}
