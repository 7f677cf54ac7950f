//! CLI command handlers.

pub mod config;
pub mod show;
pub mod view;
pub mod watch;
