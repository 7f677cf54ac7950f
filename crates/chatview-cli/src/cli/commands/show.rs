//! One-shot transcript printing.

use std::io::{self, Write};

use anyhow::{Context, Result};
use chatview_core::api::ChatApi;
use chatview_core::auth::TokenSource;
use chatview_core::config::Config;
use chatview_core::segment::{FenceEdge, Segment, segment_message};
use chatview_core::sync::fetch_once;
use chatview_core::{SessionId, Transcript};

/// Width of fence divider rules.
const RULE_WIDTH: usize = 40;

/// Indent for lines inside a code region.
const CODE_INDENT: &str = "    ";

pub async fn run(config: &Config, session: &SessionId, tokens: &dyn TokenSource) -> Result<()> {
    let api = ChatApi::new(&config.server_url, config.request_timeout())?;
    let transcript = fetch_once(&api, session, tokens)
        .await
        .with_context(|| format!("fetch transcript for session {session}"))?;

    let mut out = io::stdout().lock();
    write_transcript(&mut out, &transcript)?;
    out.flush()?;
    Ok(())
}

/// Writes the transcript as plain text: one block per message, code lines
/// indented, fence boundaries drawn as rules.
pub fn write_transcript(out: &mut impl Write, transcript: &Transcript) -> io::Result<()> {
    for (idx, message) in transcript.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        writeln!(out, "[{}]", message.author)?;

        for segment in segment_message(message) {
            match segment {
                Segment::Prose(text) => writeln!(out, "{}", text.trim_end_matches('\r'))?,
                Segment::Code(text) => {
                    writeln!(out, "{CODE_INDENT}{}", text.trim_end_matches('\r'))?;
                }
                Segment::Fence { edge, .. } => writeln!(out, "{}", fence_rule(edge))?,
            }
        }
    }
    Ok(())
}

fn fence_rule(edge: FenceEdge) -> String {
    let corner = match edge {
        FenceEdge::Open => '┌',
        FenceEdge::Close => '└',
    };
    format!("{corner}{}", "─".repeat(RULE_WIDTH - 1))
}

#[cfg(test)]
mod tests {
    use chatview_core::Message;

    use super::*;

    fn render(transcript: &Transcript) -> String {
        let mut out = Vec::new();
        write_transcript(&mut out, transcript).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_code_is_indented_between_rules() {
        let transcript = Transcript::new(vec![Message::assistant(
            "Try this:\n```rust\nfn main() {}\n```\nDone.",
        )]);
        let text = render(&transcript);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "[assistant]");
        assert_eq!(lines[1], "Try this:");
        assert_eq!(lines[2], format!("┌{}", "─".repeat(RULE_WIDTH - 1)));
        assert_eq!(lines[3], "    fn main() {}");
        assert!(lines[4].starts_with('└'));
        assert_eq!(lines[5], "Done.");
    }

    #[test]
    fn test_user_message_is_not_segmented() {
        let transcript = Transcript::new(vec![Message::user("see ```code``` here")]);
        assert_eq!(render(&transcript), "[user]\nsee ```code``` here\n");
    }

    #[test]
    fn test_messages_are_separated_by_blank_line() {
        let transcript = Transcript::new(vec![Message::user("hi"), Message::assistant("hello")]);
        assert_eq!(render(&transcript), "[user]\nhi\n\n[assistant]\nhello\n");
    }

    #[test]
    fn test_unterminated_fence_keeps_code_indented() {
        let transcript = Transcript::new(vec![Message::assistant("```\nlet x = 1;")]);
        let text = render(&transcript);
        assert!(text.contains(&format!("┌{}", "─".repeat(RULE_WIDTH - 1))));
        assert!(text.ends_with("    let x = 1;\n"));
    }
}
