//! Headless live mode.
//!
//! Prints the transcript, then reprints it every time a push notice leads to
//! an applied refresh. Runs until Ctrl+C.

use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use chatview_core::SessionId;
use chatview_core::api::ChatApi;
use chatview_core::auth::TokenSource;
use chatview_core::config::Config;
use chatview_core::interrupt::{self, InterruptedError};
use chatview_core::push::{LiveUpdateListener, PushNotice};
use chatview_core::sync::TranscriptSync;
use chatview_core::transcript::ApplyOutcome;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::show::write_transcript;

pub async fn run(config: &Config, session: SessionId, tokens: Arc<dyn TokenSource>) -> Result<()> {
    let api = ChatApi::new(&config.server_url, config.request_timeout())?;
    let push_url = config.effective_push_url()?;

    let (notice_tx, mut notices) = mpsc::unbounded_channel();
    let subscription = LiveUpdateListener::spawn(
        push_url,
        session.clone(),
        config.reconnect_delay(),
        move |notice| {
            let _ = notice_tx.send(notice);
        },
    );

    let mut sync = TranscriptSync::new(session, api, tokens);
    sync.request_refresh();

    let mut out = io::stdout();
    let result = follow(&mut sync, &mut notices, &mut out, interrupt::wait_for_interrupt()).await;
    subscription.close().await;

    result?;
    Err(InterruptedError.into())
}

enum Step {
    Stop,
    Notice(PushNotice),
    Settled(ApplyOutcome),
}

/// Applies refreshes and prints every applied snapshot until `stop` resolves.
async fn follow(
    sync: &mut TranscriptSync,
    notices: &mut mpsc::UnboundedReceiver<PushNotice>,
    out: &mut impl Write,
    stop: impl Future<Output = ()>,
) -> Result<()> {
    tokio::pin!(stop);

    loop {
        let step = tokio::select! {
            () = &mut stop => Step::Stop,
            Some(notice) = notices.recv() => Step::Notice(notice),
            Some(outcome) = sync.next_update(), if sync.in_flight() > 0 => Step::Settled(outcome),
        };

        match step {
            Step::Stop => return Ok(()),
            Step::Notice(PushNotice::Refresh(session)) => {
                debug!(%session, "push refresh");
                sync.request_refresh();
            }
            Step::Notice(PushNotice::Connected) => info!("push channel connected"),
            Step::Notice(PushNotice::Disconnected { reason }) => {
                warn!("push channel lost: {reason}");
            }
            Step::Settled(ApplyOutcome::Applied) => print_snapshot(sync, out)?,
            Step::Settled(ApplyOutcome::Stale) => {}
            Step::Settled(ApplyOutcome::Failed(err)) => warn!("refresh failed: {err}"),
        }
    }
}

fn print_snapshot(sync: &TranscriptSync, out: &mut impl Write) -> Result<()> {
    let store = sync.store();
    let count = store.snapshot().len();
    let noun = if count == 1 { "message" } else { "messages" };
    writeln!(out, "=== {} ({count} {noun}) ===", store.session())?;
    write_transcript(out, store.snapshot())?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
