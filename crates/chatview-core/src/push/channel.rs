use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, trace, warn};
use url::Url;

use super::PushError;
use super::protocol::{
    self, ClientFrame, EnginePacket, Handshake, PushEvent, ROOT_NAMESPACE, SocketPacket,
};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One connected Socket.IO session on the root namespace.
pub struct PushChannel {
    ws: WsStream,
    handshake: Handshake,
}

impl PushChannel {
    /// Opens the WebSocket and completes the Engine.IO and namespace handshakes.
    ///
    /// # Errors
    /// Returns `PushError::Transport` if the socket cannot be opened and
    /// `PushError::Handshake` if the server rejects the namespace.
    pub async fn connect(url: &Url) -> Result<Self, PushError> {
        let (mut ws, _response) = timeout(CONNECT_TIMEOUT, connect_async(url.as_str()))
            .await
            .map_err(|_elapsed| {
                PushError::Transport(format!("connect timed out after {CONNECT_TIMEOUT:?}"))
            })?
            .map_err(|e| PushError::Transport(e.to_string()))?;

        let handshake = match read_packet(&mut ws, CONNECT_TIMEOUT).await? {
            Some(EnginePacket::Open(handshake)) => handshake,
            Some(other) => {
                return Err(PushError::Handshake(format!(
                    "expected open packet, got {other:?}"
                )));
            }
            None => {
                return Err(PushError::Handshake(
                    "connection closed before open packet".to_string(),
                ));
            }
        };
        debug!(sid = %handshake.sid, "engine.io session opened");

        send(
            &mut ws,
            ClientFrame::Connect {
                namespace: ROOT_NAMESPACE,
            },
        )
        .await?;

        loop {
            match read_packet(&mut ws, CONNECT_TIMEOUT).await? {
                Some(EnginePacket::Message(SocketPacket::Connect { .. })) => break,
                Some(EnginePacket::Message(SocketPacket::ConnectError { message, .. })) => {
                    return Err(PushError::Handshake(message));
                }
                Some(EnginePacket::Ping) => send(&mut ws, ClientFrame::Pong).await?,
                Some(EnginePacket::Close) | None => {
                    return Err(PushError::Handshake(
                        "connection closed during namespace connect".to_string(),
                    ));
                }
                Some(other) => trace!(?other, "ignoring packet before namespace connect"),
            }
        }

        Ok(Self { ws, handshake })
    }

    pub fn handshake(&self) -> &Handshake {
        &self.handshake
    }

    /// Waits for the next event the listener cares about.
    ///
    /// Answers heartbeats along the way and skips events whose payload cannot
    /// be read. Returns `Ok(None)` when the server closes the session.
    ///
    /// # Errors
    /// Returns an error on transport failure, a malformed frame, or when no
    /// ping arrives within the negotiated interval plus timeout.
    pub async fn next_event(&mut self) -> Result<Option<PushEvent>, PushError> {
        let idle_limit =
            Duration::from_millis(self.handshake.ping_interval + self.handshake.ping_timeout);

        loop {
            let Some(packet) = read_packet(&mut self.ws, idle_limit).await? else {
                return Ok(None);
            };
            match packet {
                EnginePacket::Ping => send(&mut self.ws, ClientFrame::Pong).await?,
                EnginePacket::Close
                | EnginePacket::Message(SocketPacket::Disconnect { .. }) => return Ok(None),
                EnginePacket::Message(SocketPacket::Event { name, payload, .. }) => {
                    match PushEvent::from_event(&name, &payload) {
                        Ok(Some(event)) => return Ok(Some(event)),
                        Ok(None) => trace!(%name, "ignoring event"),
                        Err(e) => warn!(%name, "skipping malformed event: {e}"),
                    }
                }
                other => trace!(?other, "ignoring packet"),
            }
        }
    }

    /// Leaves the namespace and closes the socket.
    pub async fn close(mut self) {
        let _ = send(
            &mut self.ws,
            ClientFrame::Disconnect {
                namespace: ROOT_NAMESPACE,
            },
        )
        .await;
        let _ = self.ws.close(None).await;
    }
}

async fn send(ws: &mut WsStream, frame: ClientFrame<'_>) -> Result<(), PushError> {
    ws.send(Message::text(frame.encode()))
        .await
        .map_err(|e| PushError::Transport(e.to_string()))
}

/// Reads the next Engine.IO packet, skipping WebSocket control frames.
async fn read_packet(ws: &mut WsStream, limit: Duration) -> Result<Option<EnginePacket>, PushError> {
    loop {
        let next = if limit.is_zero() {
            ws.next().await
        } else {
            timeout(limit, ws.next())
                .await
                .map_err(|_elapsed| PushError::Transport("ping timeout".to_string()))?
        };

        match next {
            None | Some(Ok(Message::Close(_))) => return Ok(None),
            Some(Ok(Message::Text(text))) => return protocol::decode(text.as_str()).map(Some),
            Some(Ok(Message::Binary(_))) => {
                return Err(PushError::Protocol(
                    "binary frames are not supported".to_string(),
                ));
            }
            // Handled by tungstenite automatically
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
            Some(Err(e)) => return Err(PushError::Transport(e.to_string())),
        }
    }
}
