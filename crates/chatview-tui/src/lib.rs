//! Full-screen transcript viewer.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod icons;
pub mod layout;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};
use std::sync::Arc;

use anyhow::Result;
use chatview_core::SessionId;
use chatview_core::auth::TokenSource;
use chatview_core::config::Config;
pub use features::{footer, sidebar, transcript};
pub use runtime::TuiRuntime;

/// Opens the interactive view for `session` and blocks until the user quits.
///
/// # Errors
/// Returns an error if stdout is not a terminal, the configured URLs are
/// invalid, or terminal I/O fails.
pub async fn run_interactive_view(
    config: &Config,
    session: SessionId,
    tokens: Arc<dyn TokenSource>,
) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The interactive view requires a terminal.\n\
             Use `chatview show <SESSION>` to print the transcript instead."
        );
    }

    let mut runtime = TuiRuntime::new(config, session, tokens)?;
    let result = runtime.run();
    runtime.shutdown().await;
    result
}
