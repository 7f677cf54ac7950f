//! Interactive view handler.

use std::sync::Arc;

use anyhow::Result;
use chatview_core::SessionId;
use chatview_core::auth::TokenSource;
use chatview_core::config::Config;

#[cfg(feature = "tui")]
pub async fn run(config: &Config, session: SessionId, tokens: Arc<dyn TokenSource>) -> Result<()> {
    use anyhow::Context;

    chatview_tui::run_interactive_view(config, session, tokens)
        .await
        .context("interactive view failed")
}

#[cfg(not(feature = "tui"))]
#[allow(clippy::unused_async)]
pub async fn run(_config: &Config, session: SessionId, _tokens: Arc<dyn TokenSource>) -> Result<()> {
    anyhow::bail!(
        "chatview was built without the interactive view.\n\
         Use `chatview show {session}` or `chatview watch {session}` instead."
    )
}
