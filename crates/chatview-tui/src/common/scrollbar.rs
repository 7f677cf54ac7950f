//! Transcript scrollbar.
//!
//! The thumb length is computed once from the content/viewport ratio and then
//! positioned so it touches the bottom exactly at the maximum offset. Rounding
//! start and end separately would make the thumb grow and shrink while the
//! view moves.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

#[derive(Debug, Clone)]
pub struct Scrollbar {
    content_height: usize,
    viewport_height: usize,
    offset: usize,
}

impl Scrollbar {
    pub fn new(content_height: usize, viewport_height: usize, offset: usize) -> Self {
        Self {
            content_height,
            viewport_height,
            offset,
        }
    }

    /// Only shown when there is something to scroll.
    fn should_display(&self) -> bool {
        self.content_height > self.viewport_height
    }

    /// Returns `(thumb_start, thumb_len)` for a track of `track_len` cells.
    fn thumb(&self, track_len: usize) -> Option<(usize, usize)> {
        let max_offset = self.content_height.saturating_sub(self.viewport_height);
        if !self.should_display() || track_len == 0 || max_offset == 0 {
            return None;
        }

        let viewport_len = self.viewport_height.min(track_len);
        let denom = self
            .content_height
            .saturating_sub(1)
            .saturating_add(viewport_len) as u64;
        let thumb_len = if denom > 0 {
            let numerator = track_len as u64 * viewport_len as u64;
            (((numerator + denom / 2) / denom) as usize).clamp(1, track_len)
        } else {
            track_len
        };

        let available = track_len.saturating_sub(thumb_len) as u64;
        let offset = self.offset.min(max_offset) as u64;
        let thumb_start = (offset * available / max_offset as u64) as usize;
        Some((thumb_start, thumb_len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((thumb_start, thumb_len)) = self.thumb(area.height as usize) else {
            return;
        };

        let x = area.x + area.width.saturating_sub(1);
        let style = Style::default().fg(Color::DarkGray);
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            let symbol = if (thumb_start..thumb_start + thumb_len).contains(&idx) {
                THUMB_SYMBOL
            } else {
                TRACK_SYMBOL
            };
            buf.set_string(x, y, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_content_fits() {
        assert!(!Scrollbar::new(10, 20, 0).should_display());
        assert!(!Scrollbar::new(20, 20, 0).should_display());
        assert!(Scrollbar::new(21, 20, 0).should_display());
    }

    #[test]
    fn test_thumb_size_is_stable_across_offsets() {
        let top = Scrollbar::new(100, 20, 0).thumb(20).unwrap();
        let middle = Scrollbar::new(100, 20, 40).thumb(20).unwrap();
        let bottom = Scrollbar::new(100, 20, 80).thumb(20).unwrap();

        assert_eq!(top.1, middle.1);
        assert_eq!(middle.1, bottom.1);
        assert_eq!(top.0, 0);
        assert_eq!(bottom.0 + bottom.1, 20);
    }
}
