//! Terminal cells for the pixel layout policy.
//!
//! The policy works in pixels. The viewport width in pixels is what the
//! terminal reports when it knows, otherwise `columns * cell_width_px`;
//! pixel results are converted back to columns with the same factor.

use chatview_core::layout::{LayoutDimensions, LayoutPolicy};

/// Column/row split of the screen for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub sidebar_cols: u16,
    pub main_cols: u16,
    /// Width of each message block inside the main column.
    pub message_cols: u16,
    /// Rows for the transcript (viewport minus footer).
    pub main_rows: u16,
}

impl ScreenLayout {
    pub fn compute(
        cols: u16,
        rows: u16,
        pixel_width: Option<u32>,
        cell_width_px: u32,
        footer_height: u16,
    ) -> Self {
        let cell_width_px = cell_width_px.max(1);
        let viewport_px = pixel_width
            .filter(|px| *px > 0)
            .unwrap_or_else(|| u32::from(cols) * cell_width_px);
        let dims = LayoutPolicy::for_width(viewport_px);
        let to_cols = |px: u32| px_to_cols(px, viewport_px, cols);

        let sidebar_cols = if dims.shows_sidebar() {
            to_cols(dims.sidebar_width)
        } else {
            0
        };
        let main_cols = to_cols(dims.main_width.resolve(viewport_px)).min(cols - sidebar_cols);
        let message_cols = message_cols(&dims, main_cols);
        let main_rows =
            LayoutPolicy::main_height(u32::from(rows), u32::from(footer_height)) as u16;

        Self {
            sidebar_cols,
            main_cols,
            message_cols,
            main_rows,
        }
    }
}

fn px_to_cols(px: u32, viewport_px: u32, cols: u16) -> u16 {
    if viewport_px == 0 {
        return 0;
    }
    let scaled = (u64::from(px) * u64::from(cols) + u64::from(viewport_px) / 2) / u64::from(viewport_px);
    scaled.min(u64::from(cols)) as u16
}

fn message_cols(dims: &LayoutDimensions, main_cols: u16) -> u16 {
    (dims.message_width.of(u32::from(main_cols)) as u16).max(1).min(main_cols)
}
