//! Content segmentation.
//!
//! Splits a message into display segments, separating prose from fenced code.
//! The parser is a fold over the message's lines with a single boolean
//! (`inside_code`) that starts at `false` for every message and never escapes
//! the pass.
//!
//! Rules:
//! - Lines are split on `\n` only.
//! - A line containing ```` ``` ```` anywhere toggles `inside_code` and becomes a
//!   fence boundary with no display text.
//! - Any other line is code when `inside_code` is set, prose otherwise, kept
//!   verbatim (empty lines included).
//! - User messages are never segmented: the whole content is one prose segment.

use crate::message::{Author, Message};

/// Triple-backtick token that opens and closes a code region.
pub const FENCE_MARKER: &str = "```";

/// Line delimiter used when splitting message content.
pub const LINE_DELIMITER: char = '\n';

/// Which side of a code region a fence boundary sits on.
///
/// Reflects `inside_code` *after* the toggle: `Open` means the lines that
/// follow are code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceEdge {
    Open,
    Close,
}

/// Segment tag, without the borrowed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Prose,
    CodeFenceBoundary,
    CodeLine,
}

/// One rendering unit borrowed from a message's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Prose line (or, for user messages, the entire content).
    Prose(&'a str),
    /// Divider entering or leaving a code region.
    Fence { edge: FenceEdge, line: &'a str },
    /// Line inside a code region.
    Code(&'a str),
}

impl<'a> Segment<'a> {
    pub fn kind(&self) -> SegmentKind {
        match self {
            Segment::Prose(_) => SegmentKind::Prose,
            Segment::Fence { .. } => SegmentKind::CodeFenceBoundary,
            Segment::Code(_) => SegmentKind::CodeLine,
        }
    }

    /// Text to display. Fence boundaries display nothing.
    pub fn text(&self) -> &'a str {
        match *self {
            Segment::Prose(text) | Segment::Code(text) => text,
            Segment::Fence { .. } => "",
        }
    }

    /// The raw source line this segment came from (the marker line for fences).
    pub fn source_line(&self) -> &'a str {
        match *self {
            Segment::Prose(text) | Segment::Code(text) => text,
            Segment::Fence { line, .. } => line,
        }
    }
}

/// Segments a message, applying the user-message bypass.
pub fn segment_message(message: &Message) -> Vec<Segment<'_>> {
    match message.author {
        Author::User => vec![Segment::Prose(&message.content)],
        Author::Assistant => segment_content(&message.content),
    }
}

/// Segments raw content with fence detection.
pub fn segment_content(content: &str) -> Vec<Segment<'_>> {
    content
        .split(LINE_DELIMITER)
        .scan(false, |inside_code, line| {
            let segment = if line.contains(FENCE_MARKER) {
                *inside_code = !*inside_code;
                let edge = if *inside_code {
                    FenceEdge::Open
                } else {
                    FenceEdge::Close
                };
                Segment::Fence { edge, line }
            } else if *inside_code {
                Segment::Code(line)
            } else {
                Segment::Prose(line)
            };
            Some(segment)
        })
        .collect()
}

/// Rejoins segments into the content they were produced from.
pub fn rejoin(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for (idx, segment) in segments.iter().enumerate() {
        if idx > 0 {
            out.push(LINE_DELIMITER);
        }
        out.push_str(segment.source_line());
    }
    out
}
