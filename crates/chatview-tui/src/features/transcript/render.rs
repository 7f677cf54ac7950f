//! Transcript layout and style conversion.
//!
//! `build_lines` turns a snapshot into display rows for a given message width.
//! It runs in the reducer whenever the snapshot or the width changes; the
//! renderer only slices the result and converts styles.

use chatview_core::segment::{LINE_DELIMITER, segment_message};
use chatview_core::{Author, FenceEdge, Segment, Transcript};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::style::{Style as TranscriptStyle, StyledLine, StyledSpan};
use crate::common::text::{sanitize_for_display, truncate_with_ellipsis, wrap_hard, wrap_words};
use crate::icons::IconLookup;

/// Columns of padding inside a message block on each side.
const BLOCK_PADDING: usize = 1;

/// Extra indent for code lines.
const CODE_INDENT: &str = "  ";

const FENCE_OPEN_CORNER: &str = "┌";
const FENCE_CLOSE_CORNER: &str = "└";
const RULE: &str = "─";

/// Lays out every message as a block of rows `width` columns wide.
///
/// Messages are separated by one blank row. Each block starts with a header
/// row carrying the author's icon.
pub fn build_lines(transcript: &Transcript, width: usize, icons: &dyn IconLookup) -> Vec<StyledLine> {
    let content_width = width.saturating_sub(BLOCK_PADDING * 2).max(1);
    let mut lines = Vec::new();

    for (idx, message) in transcript.iter().enumerate() {
        if idx > 0 {
            lines.push(StyledLine::empty());
        }

        let author = message.author;
        lines.push(header_line(author, content_width, icons));

        for segment in segment_message(message) {
            match segment {
                Segment::Prose(text) => {
                    // User prose is the whole message and may span several lines.
                    for source in text.split(LINE_DELIMITER) {
                        for row in wrap_words(&sanitize_for_display(source), content_width) {
                            lines.push(padded(author, row, TranscriptStyle::Prose));
                        }
                    }
                }
                Segment::Code(text) => {
                    let code_width = content_width.saturating_sub(CODE_INDENT.len()).max(1);
                    for row in wrap_hard(&sanitize_for_display(text), code_width) {
                        lines.push(padded(
                            author,
                            format!("{CODE_INDENT}{row}"),
                            TranscriptStyle::CodeLine,
                        ));
                    }
                }
                Segment::Fence { edge, .. } => {
                    lines.push(fence_line(author, edge, content_width));
                }
            }
        }
    }

    lines
}

fn header_line(author: Author, width: usize, icons: &dyn IconLookup) -> StyledLine {
    let icon = icons.icon(author);
    let label_width = width.saturating_sub(icon.width() + 1);
    StyledLine::in_block(
        author,
        vec![
            StyledSpan::new(" ".repeat(BLOCK_PADDING), TranscriptStyle::Plain),
            StyledSpan::new(icon, TranscriptStyle::Icon(author)),
            StyledSpan::new(" ", TranscriptStyle::Plain),
            StyledSpan::new(
                truncate_with_ellipsis(author.as_str(), label_width),
                TranscriptStyle::AuthorLabel(author),
            ),
        ],
    )
}

fn padded(author: Author, text: String, style: TranscriptStyle) -> StyledLine {
    StyledLine::in_block(
        author,
        vec![
            StyledSpan::new(" ".repeat(BLOCK_PADDING), TranscriptStyle::Plain),
            StyledSpan::new(text, style),
        ],
    )
}

fn fence_line(author: Author, edge: FenceEdge, width: usize) -> StyledLine {
    let (text, style) = match edge {
        FenceEdge::Open => {
            let fill = width.saturating_sub(FENCE_OPEN_CORNER.width());
            (
                format!("{FENCE_OPEN_CORNER}{}", RULE.repeat(fill)),
                TranscriptStyle::FenceOpen,
            )
        }
        FenceEdge::Close => {
            let fill = width.saturating_sub(FENCE_CLOSE_CORNER.width());
            (
                format!("{FENCE_CLOSE_CORNER}{}", RULE.repeat(fill)),
                TranscriptStyle::FenceClose,
            )
        }
    };
    padded(author, text, style)
}

/// Converts a row to a ratatui line, padding block rows to `width` so the
/// author background fills the whole block.
pub fn convert_line(line: &StyledLine, width: usize) -> Line<'static> {
    let base = line.block.map_or_else(Style::default, block_style);
    let mut used = 0;
    let mut spans: Vec<Span<'static>> = line
        .spans
        .iter()
        .map(|span| {
            used += span.text.width();
            Span::styled(span.text.clone(), base.patch(convert_style(span.style)))
        })
        .collect();

    if line.block.is_some() && used < width {
        spans.push(Span::styled(" ".repeat(width - used), base));
    }
    Line::from(spans)
}

fn block_style(author: Author) -> Style {
    match author {
        Author::User => Style::default().bg(Color::Rgb(38, 48, 64)),
        Author::Assistant => Style::default().bg(Color::Rgb(30, 30, 30)),
    }
}

fn convert_style(style: TranscriptStyle) -> Style {
    match style {
        TranscriptStyle::Plain => Style::default(),
        TranscriptStyle::Icon(Author::User) => Style::default().fg(Color::Blue),
        TranscriptStyle::Icon(Author::Assistant) => Style::default().fg(Color::Magenta),
        TranscriptStyle::AuthorLabel(_) => Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::BOLD),
        TranscriptStyle::Prose => Style::default().fg(Color::White),
        TranscriptStyle::CodeLine => Style::default().fg(Color::Cyan),
        TranscriptStyle::FenceOpen => Style::default().fg(Color::Green),
        TranscriptStyle::FenceClose => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM),
    }
}

#[cfg(test)]
mod tests {
    use chatview_core::Message;

    use super::*;
    use crate::icons::DefaultIcons;

    fn texts(lines: &[StyledLine]) -> Vec<String> {
        lines.iter().map(StyledLine::text).collect()
    }

    #[test]
    fn test_blocks_are_separated_and_headed() {
        let transcript = Transcript::new(vec![Message::user("hi"), Message::assistant("hello")]);
        let lines = build_lines(&transcript, 20, &DefaultIcons);

        assert_eq!(
            texts(&lines),
            vec![" ● user", " hi", "", " ◆ assistant", " hello"]
        );
        assert_eq!(lines[1].block, Some(Author::User));
        assert_eq!(lines[2].block, None);
        assert_eq!(lines[4].block, Some(Author::Assistant));
    }

    #[test]
    fn test_code_block_styles() {
        let transcript =
            Transcript::new(vec![Message::assistant("see:\n```rust\nlet x = 1;\n```\ndone")]);
        let lines = build_lines(&transcript, 20, &DefaultIcons);

        let styles: Vec<TranscriptStyle> = lines[1..]
            .iter()
            .map(|line| line.spans[1].style)
            .collect();
        assert_eq!(
            styles,
            vec![
                TranscriptStyle::Prose,
                TranscriptStyle::FenceOpen,
                TranscriptStyle::CodeLine,
                TranscriptStyle::FenceClose,
                TranscriptStyle::Prose,
            ]
        );
        assert!(!lines[2].text().contains("rust"));
        assert_eq!(lines[2].text().width(), 19);
        assert_eq!(lines[3].text(), "   let x = 1;");
        assert_eq!(lines[4].text().width(), 19);
    }

    #[test]
    fn test_user_message_is_never_segmented() {
        let transcript = Transcript::new(vec![Message::user("```\ncode?\n```")]);
        let lines = build_lines(&transcript, 40, &DefaultIcons);
        assert_eq!(lines.len(), 4);
        assert!(lines[1..].iter().all(|l| l.spans[1].style == TranscriptStyle::Prose));
    }

    #[test]
    fn test_prose_wraps_to_width() {
        let transcript = Transcript::new(vec![Message::assistant("aaa bbb ccc")]);
        let lines = build_lines(&transcript, 9, &DefaultIcons);
        assert_eq!(texts(&lines[1..]), vec![" aaa bbb", " ccc"]);
    }

    #[test]
    fn test_convert_line_pads_block_rows() {
        let line = padded(Author::User, "hi".to_string(), TranscriptStyle::Prose);
        let converted = convert_line(&line, 10);
        assert_eq!(converted.width(), 10);

        let separator = convert_line(&StyledLine::empty(), 10);
        assert_eq!(separator.width(), 0);
    }

    #[test]
    fn test_empty_transcript_has_no_lines() {
        assert!(build_lines(&Transcript::default(), 40, &DefaultIcons).is_empty());
    }
}
