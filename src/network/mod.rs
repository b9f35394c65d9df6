//! Connection layer: socket, framing, and the outbound queue.

mod connection;

pub use connection::{Connection, run};
