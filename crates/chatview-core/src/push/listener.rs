use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use super::channel::PushChannel;
use super::protocol::PushEvent;
use crate::message::SessionId;

/// What the listener reports to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushNotice {
    Connected,
    /// A new message arrived in the viewed session.
    Refresh(SessionId),
    Disconnected { reason: String },
}

/// Subscribes to push events for one session.
pub struct LiveUpdateListener;

impl LiveUpdateListener {
    /// Starts listening in the background.
    ///
    /// Events for other sessions are dropped. After a disconnect the listener
    /// waits `reconnect_delay` and connects again, until the returned
    /// [`Subscription`] is closed or dropped. A reconnect is followed by a
    /// `Refresh` for the active session, since events sent while the channel
    /// was down are lost.
    pub fn spawn<F>(
        url: Url,
        active_session: SessionId,
        reconnect_delay: Duration,
        sink: F,
    ) -> Subscription
    where
        F: Fn(PushNotice) + Send + Sync + 'static,
    {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            listen(url, active_session, reconnect_delay, sink, task_cancel).await;
        });
        Subscription {
            cancel,
            handle: Some(handle),
        }
    }
}

/// Keeps the push subscription alive. Dropping it stops the listener.
#[derive(Debug)]
pub struct Subscription {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stops the listener and waits until the socket is closed.
    pub async fn close(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Returns the session to refresh when `event` concerns `active`.
pub(crate) fn refresh_target(event: &PushEvent, active: &SessionId) -> Option<SessionId> {
    match event {
        PushEvent::NewMessage { session } if session == active => Some(session.clone()),
        PushEvent::NewMessage { .. } => None,
    }
}

async fn listen<F>(
    url: Url,
    active: SessionId,
    reconnect_delay: Duration,
    sink: F,
    cancel: CancellationToken,
) where
    F: Fn(PushNotice),
{
    let mut lost = false;
    loop {
        let connected = tokio::select! {
            () = cancel.cancelled() => return,
            result = PushChannel::connect(&url) => result,
        };

        let reason = match connected {
            Ok(mut channel) => {
                info!(%url, session = %active, "push channel connected");
                sink(PushNotice::Connected);
                if lost {
                    sink(PushNotice::Refresh(active.clone()));
                }

                loop {
                    let next = tokio::select! {
                        () = cancel.cancelled() => None,
                        result = channel.next_event() => Some(result),
                    };
                    let Some(result) = next else {
                        channel.close().await;
                        debug!("push channel closed");
                        return;
                    };
                    match result {
                        Ok(Some(event)) => match refresh_target(&event, &active) {
                            Some(session) => sink(PushNotice::Refresh(session)),
                            None => debug!(?event, "event for another session"),
                        },
                        Ok(None) => break "server closed the connection".to_string(),
                        Err(e) => break e.to_string(),
                    }
                }
            }
            Err(e) => e.to_string(),
        };

        warn!(%reason, "push channel disconnected");
        sink(PushNotice::Disconnected { reason });
        lost = true;

        tokio::select! {
            () = cancel.cancelled() => return,
            () = tokio::time::sleep(reconnect_delay) => {}
        }
    }
}
