//! Socket.IO v4 / Engine.IO v4 text codec.
//!
//! Each WebSocket text frame is one Engine.IO packet: a type digit followed by
//! an optional payload. Engine.IO `message` packets carry a Socket.IO packet:
//!
//! ```text
//! <type>[<namespace>,][<ack id>][<json data>]
//! 42["newMessage",{"sessionId":"abc"}]
//! 42/chat,7["newMessage",{"sessionId":"abc"}]
//! ```
//!
//! Binary attachments are not supported. The client only ever sends the
//! namespace connect (`40`), namespace disconnect (`41`) and pong (`3`).

use serde::Deserialize;
use serde_json::Value;

use super::PushError;
use crate::message::SessionId;

/// Event name announcing a new message in some session.
pub const NEW_MESSAGE_EVENT: &str = "newMessage";

/// Default Socket.IO namespace.
pub const ROOT_NAMESPACE: &str = "/";

/// Engine.IO open handshake.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    /// Server ping interval in milliseconds.
    pub ping_interval: u64,
    /// Time the server waits for a pong, in milliseconds.
    pub ping_timeout: u64,
}

/// One Engine.IO packet.
#[derive(Debug, Clone, PartialEq)]
pub enum EnginePacket {
    Open(Handshake),
    Close,
    Ping,
    Pong,
    Message(SocketPacket),
    Upgrade,
    Noop,
}

/// One Socket.IO packet.
#[derive(Debug, Clone, PartialEq)]
pub enum SocketPacket {
    Connect {
        namespace: String,
    },
    Disconnect {
        namespace: String,
    },
    Event {
        namespace: String,
        name: String,
        payload: Value,
    },
    Ack {
        namespace: String,
        id: u64,
    },
    ConnectError {
        namespace: String,
        message: String,
    },
}

/// Frames the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientFrame<'a> {
    Pong,
    Connect { namespace: &'a str },
    Disconnect { namespace: &'a str },
}

impl ClientFrame<'_> {
    pub fn encode(&self) -> String {
        match self {
            ClientFrame::Pong => "3".to_string(),
            ClientFrame::Connect { namespace } => format!("40{}", namespace_prefix(namespace)),
            ClientFrame::Disconnect { namespace } => format!("41{}", namespace_prefix(namespace)),
        }
    }
}

fn namespace_prefix(namespace: &str) -> String {
    if namespace == ROOT_NAMESPACE {
        String::new()
    } else {
        format!("{namespace},")
    }
}

/// Events the listener cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushEvent {
    NewMessage { session: SessionId },
}

#[derive(Deserialize)]
struct NewMessagePayload {
    #[serde(rename = "sessionId", alias = "chatID")]
    session_id: String,
}

impl PushEvent {
    /// Interprets a Socket.IO event. Unknown event names yield `Ok(None)`.
    ///
    /// # Errors
    /// Returns an error if a `newMessage` payload lacks a session id.
    pub fn from_event(name: &str, payload: &Value) -> Result<Option<Self>, PushError> {
        if name != NEW_MESSAGE_EVENT {
            return Ok(None);
        }
        let parsed = NewMessagePayload::deserialize(payload)
            .map_err(|e| PushError::Protocol(format!("invalid {name} payload: {e}")))?;
        Ok(Some(PushEvent::NewMessage {
            session: SessionId::new(parsed.session_id),
        }))
    }
}

/// Decodes one Engine.IO text frame.
///
/// # Errors
/// Returns `PushError::Protocol` for unknown packet types or malformed payloads.
pub fn decode(frame: &str) -> Result<EnginePacket, PushError> {
    let mut chars = frame.chars();
    let Some(kind) = chars.next() else {
        return Err(PushError::Protocol("empty frame".to_string()));
    };
    let rest = chars.as_str();

    match kind {
        '0' => serde_json::from_str(rest)
            .map(EnginePacket::Open)
            .map_err(|e| PushError::Protocol(format!("invalid open handshake: {e}"))),
        '1' => Ok(EnginePacket::Close),
        '2' => Ok(EnginePacket::Ping),
        '3' => Ok(EnginePacket::Pong),
        '4' => decode_socket(rest).map(EnginePacket::Message),
        '5' => Ok(EnginePacket::Upgrade),
        '6' => Ok(EnginePacket::Noop),
        other => Err(PushError::Protocol(format!(
            "unknown engine packet type '{other}'"
        ))),
    }
}

fn decode_socket(packet: &str) -> Result<SocketPacket, PushError> {
    let mut chars = packet.chars();
    let Some(kind) = chars.next() else {
        return Err(PushError::Protocol("empty socket packet".to_string()));
    };
    let rest = chars.as_str();

    if matches!(kind, '5' | '6') {
        return Err(PushError::Protocol(
            "binary socket packets are not supported".to_string(),
        ));
    }

    let (namespace, rest) = split_namespace(rest);
    let id_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    let (id, data) = rest.split_at(id_len);

    match kind {
        '0' => Ok(SocketPacket::Connect { namespace }),
        '1' => Ok(SocketPacket::Disconnect { namespace }),
        '2' => {
            let (name, payload) = decode_event_data(data)?;
            Ok(SocketPacket::Event {
                namespace,
                name,
                payload,
            })
        }
        '3' => {
            let id = id
                .parse()
                .map_err(|e| PushError::Protocol(format!("invalid ack id: {e}")))?;
            Ok(SocketPacket::Ack { namespace, id })
        }
        '4' => Ok(SocketPacket::ConnectError {
            namespace,
            message: connect_error_message(data),
        }),
        other => Err(PushError::Protocol(format!(
            "unknown socket packet type '{other}'"
        ))),
    }
}

fn split_namespace(rest: &str) -> (String, &str) {
    if rest.starts_with('/') {
        match rest.split_once(',') {
            Some((namespace, tail)) => (namespace.to_string(), tail),
            None => (rest.to_string(), ""),
        }
    } else {
        (ROOT_NAMESPACE.to_string(), rest)
    }
}

fn decode_event_data(data: &str) -> Result<(String, Value), PushError> {
    let value: Value = serde_json::from_str(data)
        .map_err(|e| PushError::Protocol(format!("invalid event data: {e}")))?;
    let Value::Array(mut items) = value else {
        return Err(PushError::Protocol("event data is not an array".to_string()));
    };
    if items.is_empty() {
        return Err(PushError::Protocol("event without a name".to_string()));
    }
    let name = match items.remove(0) {
        Value::String(name) => name,
        other => {
            return Err(PushError::Protocol(format!(
                "event name is not a string: {other}"
            )));
        }
    };
    let payload = if items.is_empty() {
        Value::Null
    } else {
        items.remove(0)
    };
    Ok((name, payload))
}

fn connect_error_message(data: &str) -> String {
    match serde_json::from_str::<Value>(data) {
        Ok(Value::Object(map)) => map
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| data.to_string(), str::to_string),
        Ok(Value::String(message)) => message,
        _ => data.to_string(),
    }
}
