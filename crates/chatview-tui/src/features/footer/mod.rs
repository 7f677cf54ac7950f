//! Footer status strip.
//!
//! One status row (session, push connection, message count) plus an error
//! banner row while the latest fetch has failed. The footer reports its own
//! height; the transcript gets whatever is left.

mod render;
mod state;

pub use render::{footer_height, render_footer};
pub use state::ConnectionState;
