//! Core chatview library (transcript model, segmentation, sync, config).

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod interrupt;
pub mod layout;
pub mod logging;
pub mod message;
pub mod push;
pub mod segment;
pub mod sync;
pub mod transcript;

pub use error::FetchError;
pub use message::{Author, Message, SessionId, Transcript};
pub use segment::{FenceEdge, Segment, SegmentKind};
