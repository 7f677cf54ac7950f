//! Author glyphs shown at the head of each message block.

use chatview_core::Author;

/// Maps an author to the glyph drawn before its messages.
pub trait IconLookup: Send + Sync {
    fn icon(&self, author: Author) -> &str;
}

/// Built-in glyphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIcons;

impl IconLookup for DefaultIcons {
    fn icon(&self, author: Author) -> &str {
        match author {
            Author::User => "●",
            Author::Assistant => "◆",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_icons_differ_per_author() {
        let icons = DefaultIcons;
        assert_ne!(icons.icon(Author::User), icons.icon(Author::Assistant));
    }
}
