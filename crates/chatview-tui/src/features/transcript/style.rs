use chatview_core::Author;

/// A styled span of text (UI-agnostic).
///
/// Converted to ratatui `Span`s at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    pub text: String,
    pub style: Style,
}

impl StyledSpan {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One display row of the transcript.
///
/// `block` names the message the row belongs to so the renderer can paint the
/// per-author background; separator rows between messages have none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub spans: Vec<StyledSpan>,
    pub block: Option<Author>,
}

impl StyledLine {
    pub fn empty() -> Self {
        StyledLine {
            spans: vec![],
            block: None,
        }
    }

    pub fn in_block(author: Author, spans: Vec<StyledSpan>) -> Self {
        StyledLine {
            spans,
            block: Some(author),
        }
    }

    /// Concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Semantic style identifiers (UI-agnostic).
///
/// Translated to terminal styles by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Plain,
    /// Author glyph in the block header.
    Icon(Author),
    /// Author name in the block header.
    AuthorLabel(Author),
    /// Prose text.
    Prose,
    /// Line inside a fenced code block.
    CodeLine,
    /// Divider drawn for an opening fence.
    FenceOpen,
    /// Divider drawn for a closing fence.
    FenceClose,
}
