//! Shared widgets and text helpers.

mod scrollbar;
pub mod text;

pub use scrollbar::Scrollbar;
