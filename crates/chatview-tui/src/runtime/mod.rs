//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! The reducer stays pure and returns effects; every side effect happens
//! here. Async work (transcript fetches, the push listener) reports back
//! through the inbox, which is drained once per loop.

mod handlers;
mod inbox;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chatview_core::SessionId;
use chatview_core::api::ChatApi;
use chatview_core::auth::TokenSource;
use chatview_core::config::Config;
use chatview_core::interrupt;
use chatview_core::push::{LiveUpdateListener, Subscription};
use crossterm::event;
use crossterm::terminal::window_size;
use inbox::{UiEventReceiver, UiEventSender};
use tracing::{info, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::ViewTerminal;
use crate::{render, terminal, update};

/// Tick cadence while something is animating or the user is interacting.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick cadence when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen transcript viewer.
///
/// Terminal state is restored on drop, panic, or Ctrl+C.
pub struct TuiRuntime {
    terminal: ViewTerminal,
    pub state: AppState,
    api: ChatApi,
    tokens: Arc<dyn TokenSource>,
    subscription: Option<Subscription>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Sets up the terminal and subscribes to push events for `session`.
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the server URLs are invalid or the terminal cannot
    /// be set up.
    pub fn new(config: &Config, session: SessionId, tokens: Arc<dyn TokenSource>) -> Result<Self> {
        let api = ChatApi::new(&config.server_url, config.request_timeout())?;
        let push_url = config.effective_push_url()?;

        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = inbox::channel();

        let sink_tx = inbox_tx.clone();
        let subscription = LiveUpdateListener::spawn(
            push_url,
            session.clone(),
            config.reconnect_delay(),
            move |notice| {
                let _ = sink_tx.send(UiEvent::Push(notice));
            },
        );

        let state = AppState::new(session, config.server_url.clone(), config.layout.cell_width_px);
        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            api,
            tokens,
            subscription: Some(subscription),
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the event loop until the user quits or Ctrl+C arrives.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_mouse()?;
        self.dispatch_event(UiEvent::RefreshRequested);

        let result = self.event_loop();

        let _ = terminal::disable_mouse();
        result
    }

    /// Closes the push subscription and waits for the socket to shut down.
    pub async fn shutdown(mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.close().await;
        }
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                info!("interrupted, leaving view");
                self.state.should_quit = true;
                break;
            }

            let mut events = self.collect_events()?;

            // Layout must be current before any other event is reduced.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                    pixel_width: pixel_width(),
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick renders; other events batch until the next tick.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                self.dispatch_event(event);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let needs_fast_poll = self.state.store.is_refreshing()
            || self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn dispatch_event(&mut self, event: UiEvent) {
        for effect in update::update(&mut self.state, event) {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => self.state.should_quit = true,
            UiEffect::FetchTranscript { token } => {
                let api = self.api.clone();
                let session = self.state.store.session().clone();
                let tokens = Arc::clone(&self.tokens);
                self.spawn_effect(move || handlers::fetch_transcript(api, session, tokens, token));
            }
        }
    }

    /// Runs `f` on the tokio runtime and delivers its event to the inbox.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            if tx.send(f().await).is_err() {
                warn!("view closed before effect completed");
            }
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}

/// Viewport width in pixels, when the terminal reports it.
fn pixel_width() -> Option<u32> {
    window_size()
        .ok()
        .map(|size| u32::from(size.width))
        .filter(|width| *width > 0)
}
