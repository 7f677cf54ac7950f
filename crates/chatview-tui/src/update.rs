//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use chatview_core::push::PushNotice;
use chatview_core::transcript::{ApplyOutcome, RequestToken};
use chatview_core::{FetchError, Transcript};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::footer::footer_height;
use crate::layout::ScreenLayout;
use crate::state::AppState;
use crate::transcript;

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.spinner_frame = app.spinner_frame.wrapping_add(1);
            vec![]
        }
        UiEvent::Frame {
            width,
            height,
            pixel_width,
        } => {
            handle_frame(app, width, height, pixel_width);
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::RefreshRequested => request_refresh(app),
        UiEvent::Push(notice) => handle_push(app, notice),
        UiEvent::TranscriptFetched { token, result } => {
            handle_fetched(app, token, result);
            vec![]
        }
    }
}

fn request_refresh(app: &mut AppState) -> Vec<UiEffect> {
    let token = app.store.begin_refresh();
    vec![UiEffect::FetchTranscript { token }]
}

fn handle_push(app: &mut AppState, notice: PushNotice) -> Vec<UiEffect> {
    app.connection.on_notice(&notice);
    match notice {
        PushNotice::Refresh(session) if &session == app.store.session() => request_refresh(app),
        PushNotice::Refresh(session) => {
            debug!(%session, "ignoring refresh for another session");
            vec![]
        }
        PushNotice::Connected | PushNotice::Disconnected { .. } => vec![],
    }
}

fn handle_fetched(app: &mut AppState, token: RequestToken, result: Result<Transcript, FetchError>) {
    match app.store.apply(token, result) {
        ApplyOutcome::Applied => {
            let width = app.layout.message_cols as usize;
            transcript::relayout(
                &mut app.transcript,
                app.store.snapshot(),
                width,
                app.icons.as_ref(),
            );
        }
        ApplyOutcome::Stale => {}
        ApplyOutcome::Failed(err) => warn!(token = token.value(), "transcript fetch failed: {err}"),
    }
    // The error banner changes the footer height.
    update_layout(app, false);
}

fn handle_frame(app: &mut AppState, width: u16, height: u16, pixel_width: Option<u32>) {
    let width_changed = app.terminal_size.0 != width || app.pixel_width != pixel_width;
    app.terminal_size = (width, height);
    app.pixel_width = pixel_width;
    update_layout(app, width_changed);
}

/// Recomputes the screen split. A width change re-lays out the transcript and
/// snaps to the newest message.
fn update_layout(app: &mut AppState, width_changed: bool) {
    let (cols, rows) = app.terminal_size;
    let layout = ScreenLayout::compute(
        cols,
        rows,
        app.pixel_width,
        app.cell_width_px,
        footer_height(app),
    );
    app.layout = layout;
    app.transcript.viewport_height = layout.main_rows as usize;

    if width_changed {
        transcript::relayout(
            &mut app.transcript,
            app.store.snapshot(),
            layout.message_cols as usize,
            app.icons.as_ref(),
        );
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => {
            transcript::handle_mouse(&mut app.transcript, mouse);
            vec![]
        }
        // Resize is picked up by the next Frame event.
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            vec![UiEffect::Quit]
        }
        KeyCode::Char('q') | KeyCode::Esc => vec![UiEffect::Quit],
        KeyCode::Char('r') => request_refresh(app),
        _ => {
            transcript::handle_scroll_key(&mut app.transcript, key);
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use chatview_core::{Message, SessionId};
    use crossterm::event::{KeyEventState, MouseEvent, MouseEventKind};

    use super::*;
    use crate::footer::ConnectionState;
    use crate::transcript::ScrollMode;

    fn app() -> AppState {
        let mut app = AppState::new(SessionId::new("s1"), "http://localhost:5000", 8);
        update(
            &mut app,
            UiEvent::Frame {
                width: 80,
                height: 10,
                pixel_width: None,
            },
        );
        app
    }

    fn key(code: KeyCode) -> UiEvent {
        UiEvent::Terminal(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn fetch_token(effects: &[UiEffect]) -> RequestToken {
        match effects {
            [UiEffect::FetchTranscript { token }] => *token,
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn long_transcript(n: usize) -> Transcript {
        Transcript::new((0..n).map(|i| Message::assistant(format!("message {i}"))).collect())
    }

    fn fetched(token: RequestToken, transcript: Transcript) -> UiEvent {
        UiEvent::TranscriptFetched {
            token,
            result: Ok(transcript),
        }
    }

    #[test]
    fn test_refresh_requested_issues_fetch() {
        let mut app = app();
        let effects = update(&mut app, UiEvent::RefreshRequested);
        fetch_token(&effects);
        assert!(app.store.is_refreshing());
    }

    #[test]
    fn test_push_for_active_session_refreshes() {
        let mut app = app();
        let effects = update(
            &mut app,
            UiEvent::Push(PushNotice::Refresh(SessionId::new("s1"))),
        );
        fetch_token(&effects);

        let effects = update(
            &mut app,
            UiEvent::Push(PushNotice::Refresh(SessionId::new("other"))),
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn test_connection_state_follows_notices() {
        let mut app = app();
        update(&mut app, UiEvent::Push(PushNotice::Connected));
        assert_eq!(app.connection, ConnectionState::Live);
        update(
            &mut app,
            UiEvent::Push(PushNotice::Disconnected {
                reason: "reset".to_string(),
            }),
        );
        assert_eq!(app.connection.label(), "reconnecting");
    }

    #[test]
    fn test_reconnect_refresh_fetches_after_missed_events() {
        let mut app = app();
        let first = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        update(&mut app, fetched(first, long_transcript(1)));

        update(
            &mut app,
            UiEvent::Push(PushNotice::Disconnected {
                reason: "reset".to_string(),
            }),
        );
        assert!(update(&mut app, UiEvent::Push(PushNotice::Connected)).is_empty());
        let effects = update(
            &mut app,
            UiEvent::Push(PushNotice::Refresh(SessionId::new("s1"))),
        );
        let token = fetch_token(&effects);
        assert_ne!(token, first);
        assert_eq!(app.connection, ConnectionState::Live);
    }

    #[test]
    fn test_applied_fetch_lays_out_and_snaps_to_latest() {
        let mut app = app();
        let token = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        update(&mut app, fetched(token, long_transcript(10)));
        assert_eq!(app.store.snapshot().len(), 10);
        assert!(!app.transcript.lines().is_empty());

        update(&mut app, key(KeyCode::Home));
        assert_eq!(app.transcript.scroll.mode(), ScrollMode::Anchored { offset: 0 });

        let token = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        update(&mut app, fetched(token, long_transcript(11)));
        assert!(app.transcript.scroll.is_following());
        assert_eq!(
            app.transcript.visible_range().end,
            app.transcript.lines().len()
        );
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut app = app();
        let first = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        let second = fetch_token(&update(&mut app, UiEvent::RefreshRequested));

        update(&mut app, fetched(second, long_transcript(3)));
        update(&mut app, fetched(first, long_transcript(1)));

        assert_eq!(app.store.snapshot().len(), 3);
    }

    #[test]
    fn test_failed_fetch_shows_banner_and_keeps_snapshot() {
        let mut app = app();
        let token = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        update(&mut app, fetched(token, long_transcript(2)));
        assert_eq!(app.layout.main_rows, 9);

        let token = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        update(
            &mut app,
            UiEvent::TranscriptFetched {
                token,
                result: Err(FetchError::Network("server returned 502 Bad Gateway".to_string())),
            },
        );

        assert_eq!(app.store.snapshot().len(), 2);
        assert_eq!(footer_height(&app), 2);
        assert_eq!(app.layout.main_rows, 8);
        assert_eq!(app.transcript.viewport_height, 8);
    }

    #[test]
    fn test_width_change_snaps_to_latest() {
        let mut app = app();
        let token = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        update(&mut app, fetched(token, long_transcript(10)));
        update(&mut app, key(KeyCode::PageUp));
        assert!(!app.transcript.scroll.is_following());

        // Same width: manual position survives.
        update(
            &mut app,
            UiEvent::Frame {
                width: 80,
                height: 12,
                pixel_width: None,
            },
        );
        assert!(!app.transcript.scroll.is_following());

        update(
            &mut app,
            UiEvent::Frame {
                width: 60,
                height: 12,
                pixel_width: None,
            },
        );
        assert!(app.transcript.scroll.is_following());
        assert_eq!(app.transcript.layout_width, 60);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(update(&mut app, key(KeyCode::Char('q'))), vec![UiEffect::Quit]);
        assert_eq!(update(&mut app, key(KeyCode::Esc)), vec![UiEffect::Quit]);

        let ctrl_c = UiEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert_eq!(update(&mut app, ctrl_c), vec![UiEffect::Quit]);
    }

    #[test]
    fn test_refresh_key_issues_new_token() {
        let mut app = app();
        let first = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        let second = fetch_token(&update(&mut app, key(KeyCode::Char('r'))));
        assert!(second > first);
    }

    #[test]
    fn test_mouse_wheel_scrolls() {
        let mut app = app();
        let token = fetch_token(&update(&mut app, UiEvent::RefreshRequested));
        update(&mut app, fetched(token, long_transcript(10)));

        update(
            &mut app,
            UiEvent::Terminal(Event::Mouse(MouseEvent {
                kind: MouseEventKind::ScrollUp,
                column: 0,
                row: 0,
                modifiers: KeyModifiers::NONE,
            })),
        );
        assert!(!app.transcript.scroll.is_following());
    }
}
