//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use chatview_core::auth::{TokenSource, resolve_token_source};
use chatview_core::config::Config;
use chatview_core::logging::{self, LogTarget};
use chatview_core::{SessionId, interrupt};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "chatview")]
#[command(version)]
#[command(about = "Live chat transcript viewer for the terminal")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Session to open in the interactive view
    #[arg(value_name = "SESSION_ID")]
    session: Option<String>,

    /// Chat server base URL (overrides `server_url`)
    #[arg(long, global = true, value_name = "URL", env = "CHATVIEW_SERVER")]
    server: Option<String>,

    /// Authorization header value (overrides the configured token sources)
    #[arg(long, global = true, value_name = "TOKEN")]
    token: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch a transcript once and print it
    Show {
        #[arg(value_name = "SESSION_ID")]
        session: String,
    },

    /// Print a transcript and reprint it on every push update
    Watch {
        #[arg(value_name = "SESSION_ID")]
        session: String,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Write a default config file
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    interrupt::init()?;

    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    rt.block_on(dispatch(cli))
}

async fn dispatch(cli: Cli) -> Result<()> {
    let Cli {
        command,
        session,
        server,
        token,
    } = cli;

    match command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
        Some(Commands::Show { session }) => {
            let (config, tokens) = load_config(server, token.as_deref())?;
            let _guard = logging::init(&config.logging, LogTarget::Stderr)?;
            commands::show::run(&config, &SessionId::new(session), tokens.as_ref()).await
        }
        Some(Commands::Watch { session }) => {
            let (config, tokens) = load_config(server, token.as_deref())?;
            let _guard = logging::init(&config.logging, LogTarget::Stderr)?;
            commands::watch::run(&config, SessionId::new(session), tokens).await
        }
        None => {
            let Some(session) = session else {
                anyhow::bail!("Missing SESSION_ID.\nRun `chatview --help` for usage.");
            };
            let (config, tokens) = load_config(server, token.as_deref())?;
            let _guard = logging::init(&config.logging, LogTarget::Directory(config.log_dir()))?;
            commands::view::run(&config, SessionId::new(session), tokens).await
        }
    }
}

/// Loads the config file and applies command-line overrides.
fn load_config(
    server: Option<String>,
    token: Option<&str>,
) -> Result<(Config, Arc<dyn TokenSource>)> {
    let mut config = Config::load().context("load config")?;
    if let Some(server) = server {
        config.server_url = server;
    }
    let tokens = Arc::from(resolve_token_source(token, &config.auth));
    Ok((config, tokens))
}
