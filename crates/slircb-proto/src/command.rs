//! Command name constants for the traffic a client bot sees and emits.
//!
//! Commands are compared by name; numerics keep their three-digit string
//! form as received on the wire.

/// RPL_WELCOME (001) - registration with the server completed.
pub const RPL_WELCOME: &str = "001";

/// PRIVMSG - channel or private message.
pub const PRIVMSG: &str = "PRIVMSG";

/// NOTICE - non-interactive response message.
pub const NOTICE: &str = "NOTICE";

/// JOIN - join a channel.
pub const JOIN: &str = "JOIN";

/// PING - server liveness probe.
pub const PING: &str = "PING";

/// PONG - reply to PING.
pub const PONG: &str = "PONG";

/// NICK - set nickname during registration.
pub const NICK: &str = "NICK";

/// USER - set username/realname during registration.
pub const USER: &str = "USER";

/// PASS - connection password during registration.
pub const PASS: &str = "PASS";
