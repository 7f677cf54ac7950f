//! Viewport-driven layout policy.
//!
//! A pure function of the viewport width (in pixels). Recomputed on every
//! resize, no hysteresis.

use std::fmt;

/// Viewports narrower than this hide the sidebar.
pub const WIDE_BREAKPOINT_PX: u32 = 1000;

/// Fixed sidebar width on wide viewports.
pub const SIDEBAR_WIDTH_PX: u32 = 260;

/// Message column share of the main area on wide viewports.
const WIDE_MESSAGE_PERCENT: u8 = 45;

/// Width of the main area, relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainWidth {
    /// The whole viewport.
    FullViewport,
    /// The viewport minus a fixed number of pixels.
    ViewportMinus(u32),
}

impl MainWidth {
    /// Resolves against a concrete viewport width.
    pub fn resolve(&self, viewport_px: u32) -> u32 {
        match self {
            MainWidth::FullViewport => viewport_px,
            MainWidth::ViewportMinus(px) => viewport_px.saturating_sub(*px),
        }
    }
}

impl fmt::Display for MainWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MainWidth::FullViewport => write!(f, "100vw"),
            MainWidth::ViewportMinus(px) => write!(f, "calc(100vw - {px}px)"),
        }
    }
}

/// A percentage of the containing width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Percent(pub u8);

impl Percent {
    /// Applies the percentage, rounding down.
    pub fn of(&self, width: u32) -> u32 {
        (u64::from(width) * u64::from(self.0) / 100) as u32
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Layout dimensions for one viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutDimensions {
    /// Sidebar width in pixels (0 = hidden).
    pub sidebar_width: u32,
    pub main_width: MainWidth,
    /// Message column width relative to the main area.
    pub message_width: Percent,
}

impl LayoutDimensions {
    pub fn shows_sidebar(&self) -> bool {
        self.sidebar_width > 0
    }
}

/// Maps viewport sizes to layout dimensions.
pub struct LayoutPolicy;

impl LayoutPolicy {
    /// Computes layout dimensions for a viewport width in pixels.
    pub fn for_width(viewport_px: u32) -> LayoutDimensions {
        if viewport_px < WIDE_BREAKPOINT_PX {
            LayoutDimensions {
                sidebar_width: 0,
                main_width: MainWidth::FullViewport,
                message_width: Percent(100),
            }
        } else {
            LayoutDimensions {
                sidebar_width: SIDEBAR_WIDTH_PX,
                main_width: MainWidth::ViewportMinus(SIDEBAR_WIDTH_PX),
                message_width: Percent(WIDE_MESSAGE_PERCENT),
            }
        }
    }

    /// Height left for the transcript once the footer has reported its height.
    pub fn main_height(viewport_height: u32, footer_height: u32) -> u32 {
        viewport_height.saturating_sub(footer_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_viewport() {
        let dims = LayoutPolicy::for_width(1200);
        assert_eq!(dims.sidebar_width, 260);
        assert_eq!(dims.main_width.to_string(), "calc(100vw - 260px)");
        assert_eq!(dims.message_width.to_string(), "45%");
        assert_eq!(dims.main_width.resolve(1200), 940);
        assert_eq!(dims.message_width.of(940), 423);
    }

    #[test]
    fn test_narrow_viewport() {
        let dims = LayoutPolicy::for_width(800);
        assert_eq!(dims.sidebar_width, 0);
        assert!(!dims.shows_sidebar());
        assert_eq!(dims.main_width.to_string(), "100vw");
        assert_eq!(dims.message_width.to_string(), "100%");
        assert_eq!(dims.message_width.of(dims.main_width.resolve(800)), 800);
    }

    #[test]
    fn test_breakpoint_is_inclusive_on_wide_side() {
        assert_eq!(LayoutPolicy::for_width(999).sidebar_width, 0);
        assert_eq!(LayoutPolicy::for_width(1000).sidebar_width, 260);
    }

    #[test]
    fn test_main_height_subtracts_footer() {
        assert_eq!(LayoutPolicy::main_height(40, 3), 37);
        assert_eq!(LayoutPolicy::main_height(2, 3), 0);
    }
}
