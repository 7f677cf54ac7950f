//! Transcript display state.
//!
//! Holds the laid-out rows of the current snapshot and the scroll position
//! over them.

use std::ops::Range;

use super::style::StyledLine;

/// Scroll mode for the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollMode {
    /// Keep the newest message visible (bottom of the transcript).
    FollowLatest,
    /// User scrolled manually; offset is the row index shown at the top.
    Anchored { offset: usize },
}

/// Keeps the view pinned to the newest message unless the user scrolls away.
///
/// Any applied transcript change or width change calls [`snap_to_latest`],
/// discarding a manual position.
///
/// [`snap_to_latest`]: ScrollController::snap_to_latest
#[derive(Debug, Clone)]
pub struct ScrollController {
    mode: ScrollMode,
    content_height: usize,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self {
            mode: ScrollMode::FollowLatest,
            content_height: 0,
        }
    }
}

impl ScrollController {
    pub fn mode(&self) -> ScrollMode {
        self.mode
    }

    pub fn is_following(&self) -> bool {
        matches!(self.mode, ScrollMode::FollowLatest)
    }

    pub fn content_height(&self) -> usize {
        self.content_height
    }

    pub fn set_content_height(&mut self, height: usize) {
        self.content_height = height;
    }

    pub fn max_offset(&self, viewport_height: usize) -> usize {
        self.content_height.saturating_sub(viewport_height)
    }

    /// Row index shown at the top of the viewport.
    ///
    /// `FollowLatest` always sits at the maximum offset; an anchored offset is
    /// clamped in case the content shrank.
    pub fn get_offset(&self, viewport_height: usize) -> usize {
        match self.mode {
            ScrollMode::FollowLatest => self.max_offset(viewport_height),
            ScrollMode::Anchored { offset } => offset.min(self.max_offset(viewport_height)),
        }
    }

    pub fn scroll_up(&mut self, lines: usize, viewport_height: usize) {
        let offset = self.get_offset(viewport_height).saturating_sub(lines);
        self.mode = ScrollMode::Anchored { offset };
    }

    /// Scrolls down, returning to `FollowLatest` at the bottom.
    pub fn scroll_down(&mut self, lines: usize, viewport_height: usize) {
        if self.is_following() {
            return;
        }

        let max_offset = self.max_offset(viewport_height);
        let offset = (self.get_offset(viewport_height) + lines).min(max_offset);
        self.mode = if offset >= max_offset {
            ScrollMode::FollowLatest
        } else {
            ScrollMode::Anchored { offset }
        };
    }

    pub fn page_up(&mut self, viewport_height: usize) {
        self.scroll_up(viewport_height.max(1), viewport_height);
    }

    pub fn page_down(&mut self, viewport_height: usize) {
        self.scroll_down(viewport_height.max(1), viewport_height);
    }

    pub fn scroll_to_top(&mut self) {
        self.mode = ScrollMode::Anchored { offset: 0 };
    }

    /// Returns to the newest message.
    pub fn snap_to_latest(&mut self) {
        self.mode = ScrollMode::FollowLatest;
    }
}

/// Laid-out transcript rows plus scroll state.
#[derive(Debug, Clone, Default)]
pub struct TranscriptState {
    pub scroll: ScrollController,
    lines: Vec<StyledLine>,
    /// Rows available to the transcript.
    pub viewport_height: usize,
    /// Column width the rows were laid out for.
    pub layout_width: usize,
}

impl TranscriptState {
    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    pub fn set_lines(&mut self, lines: Vec<StyledLine>) {
        self.scroll.set_content_height(lines.len());
        self.lines = lines;
    }

    pub fn offset(&self) -> usize {
        self.scroll.get_offset(self.viewport_height)
    }

    /// Rows currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset();
        let end = (start + self.viewport_height).min(self.lines.len());
        start..end
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.scroll.scroll_up(lines, self.viewport_height);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.scroll.scroll_down(lines, self.viewport_height);
    }

    pub fn page_up(&mut self) {
        self.scroll.page_up(self.viewport_height);
    }

    pub fn page_down(&mut self) {
        self.scroll.page_down(self.viewport_height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(content_height: usize) -> ScrollController {
        let mut scroll = ScrollController::default();
        scroll.set_content_height(content_height);
        scroll
    }

    #[test]
    fn test_follow_latest_sits_at_max_offset() {
        let scroll = controller(100);
        assert!(scroll.is_following());
        assert_eq!(scroll.get_offset(20), 80);
    }

    #[test]
    fn test_offset_saturates_when_content_fits() {
        let scroll = controller(5);
        assert_eq!(scroll.get_offset(20), 0);
    }

    #[test]
    fn test_scroll_up_anchors() {
        let mut scroll = controller(100);
        scroll.scroll_up(5, 20);
        assert_eq!(scroll.mode(), ScrollMode::Anchored { offset: 75 });
        assert_eq!(scroll.get_offset(20), 75);
    }

    #[test]
    fn test_scroll_down_to_bottom_resumes_following() {
        let mut scroll = controller(100);
        scroll.scroll_up(10, 20);
        scroll.scroll_down(3, 20);
        assert_eq!(scroll.mode(), ScrollMode::Anchored { offset: 73 });
        scroll.scroll_down(50, 20);
        assert!(scroll.is_following());
    }

    #[test]
    fn test_snap_to_latest_discards_manual_position() {
        let mut scroll = controller(100);
        scroll.scroll_to_top();
        assert_eq!(scroll.get_offset(20), 0);

        scroll.set_content_height(130);
        scroll.snap_to_latest();
        assert_eq!(scroll.get_offset(20), 110);
    }

    #[test]
    fn test_anchored_offset_clamps_when_content_shrinks() {
        let mut scroll = controller(100);
        scroll.scroll_up(1, 20);
        scroll.set_content_height(30);
        assert_eq!(scroll.get_offset(20), 10);
    }

    #[test]
    fn test_page_keys_move_by_viewport() {
        let mut scroll = controller(100);
        scroll.page_up(20);
        assert_eq!(scroll.get_offset(20), 60);
        scroll.page_down(20);
        assert!(scroll.is_following());
    }

    #[test]
    fn test_visible_range_follows_latest() {
        let mut state = TranscriptState {
            viewport_height: 3,
            ..TranscriptState::default()
        };
        state.set_lines(vec![StyledLine::empty(); 10]);
        assert_eq!(state.visible_range(), 7..10);

        state.viewport_height = 20;
        assert_eq!(state.visible_range(), 0..10);
    }
}
