//! Live update push channel.
//!
//! The chat server announces new messages over Socket.IO. This module speaks
//! just enough of the protocol to receive `newMessage` events and turn the
//! ones for the viewed session into refresh notices.

mod channel;
mod listener;
pub mod protocol;

use std::fmt;

pub use channel::PushChannel;
pub use listener::{LiveUpdateListener, PushNotice, Subscription};
pub use protocol::PushEvent;

/// Push channel failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushError {
    /// A frame did not follow the Engine.IO / Socket.IO framing.
    Protocol(String),
    /// The WebSocket failed or timed out.
    Transport(String),
    /// The server refused the namespace connect or skipped the open packet.
    Handshake(String),
}

impl fmt::Display for PushError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PushError::Protocol(detail) => write!(f, "protocol error: {detail}"),
            PushError::Transport(detail) => write!(f, "transport error: {detail}"),
            PushError::Handshake(detail) => write!(f, "handshake failed: {detail}"),
        }
    }
}

impl std::error::Error for PushError {}
