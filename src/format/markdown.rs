//! Markdown output.
//!
//! Message content is already Markdown-ish text from the chat UI and keeps
//! its inline formatting. Lines that would end a message section (headings,
//! rules, a code fence left open) are neutralized. Header values are
//! escaped so a title like `*args and **kwargs` stays literal.

use std::fmt::Write;

use super::display_timestamp;
use crate::patterns::MARKDOWN_BLOCK_START;
use crate::result::{Message, Metadata};

/// Characters that have special meaning in Markdown and need escaping.
const MARKDOWN_SPECIAL_CHARS: &[char] = &['\\', '`', '*', '_', '[', ']', '<', '>', '#'];

/// Escape Markdown special characters in inline text.
///
/// # Examples
///
/// ```
/// use chat_saver::format::markdown::escape_markdown;
///
/// assert_eq!(escape_markdown("*not italic*"), r"\*not italic\*");
/// assert_eq!(escape_markdown("my_variable_name"), r"my\_variable\_name");
/// ```
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + text.len() / 4);

    for ch in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&ch) {
            result.push('\\');
        }
        result.push(ch);
    }

    result
}

/// Neutralize block syntax in message content.
///
/// Outside code fences, heading and thematic-break lines get a leading
/// backslash. Fenced code is left as is, and a fence still open at the end
/// is closed.
///
/// # Examples
///
/// ```
/// use chat_saver::format::markdown::neutralize_content;
///
/// assert_eq!(neutralize_content("---\n## Title"), "\\---\n\\## Title");
/// assert_eq!(neutralize_content("```rust\nfn main() {"), "```rust\nfn main() {\n```");
/// ```
#[must_use]
pub fn neutralize_content(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 8);
    let mut open_fence: Option<(char, usize)> = None;

    for (i, line) in content.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
        }

        if let Some((marker, len)) = open_fence {
            if closes_fence(line, marker, len) {
                open_fence = None;
            }
            out.push_str(line);
        } else if let Some(fence) = opening_fence(line) {
            open_fence = Some(fence);
            out.push_str(line);
        } else if MARKDOWN_BLOCK_START.is_match(line) {
            let indent = line.len() - line.trim_start_matches(' ').len();
            out.push_str(&line[..indent]);
            out.push('\\');
            out.push_str(&line[indent..]);
        } else {
            out.push_str(line);
        }
    }

    if let Some((marker, len)) = open_fence {
        out.push('\n');
        out.push_str(&marker.to_string().repeat(len));
    }

    out
}

/// Strip up to three spaces of indentation; `None` for indented code.
fn fence_body(line: &str) -> Option<&str> {
    let body = line.trim_start_matches(' ');
    (line.len() - body.len() <= 3).then_some(body)
}

/// Fence marker and length if `line` opens a code fence.
fn opening_fence(line: &str) -> Option<(char, usize)> {
    let body = fence_body(line)?;
    let marker = body.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = body.chars().take_while(|c| *c == marker).count();
    let info = &body[len..];
    (len >= 3 && !(marker == '`' && info.contains('`'))).then_some((marker, len))
}

fn closes_fence(line: &str, marker: char, len: usize) -> bool {
    let Some(body) = fence_body(line) else {
        return false;
    };
    let run = body.chars().take_while(|c| *c == marker).count();
    run >= len && body[run..].trim().is_empty()
}

/// Title heading, metadata blockquote, one level-2 section per message.
#[must_use]
pub fn render(messages: &[Message], metadata: &Metadata) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "# {}\n", escape_markdown(&metadata.title));
    let _ = writeln!(out, "> **Platform:** {}  ", escape_markdown(&metadata.platform));
    let _ = writeln!(out, "> **Model:** {}  ", escape_markdown(&metadata.model));
    if !metadata.url.is_empty() {
        let _ = writeln!(out, "> **URL:** <{}>  ", metadata.url.replace('>', "%3E"));
    }
    let _ = writeln!(out, "> **Saved:** {}  ", display_timestamp(metadata));
    let _ = writeln!(out, "> **Messages:** {}", metadata.message_count);

    for message in messages {
        let _ = write!(
            out,
            "\n---\n\n## {} {}\n\n{}\n",
            message.role.emoji(),
            message.role,
            neutralize_content(&message.content)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;
    use crate::result::Role;

    #[test]
    fn renders_heading_quote_and_sections() {
        let out = render(&fixtures::messages(), &fixtures::metadata(2));

        assert!(out.starts_with("# Greetings\n\n> **Platform:** ChatGPT"));
        assert!(out.contains("> **Messages:** 2\n"));
        assert!(out.contains("## 👤 User\n\nHello\n"));
        assert!(out.contains("## 🤖 Assistant\n\nHi there\n"));
        assert_eq!(out.matches("\n---\n").count(), 2);
    }

    fn fence_lines(out: &str) -> usize {
        out.lines().filter(|l| l.trim_start().starts_with("```")).count()
    }

    #[test]
    fn unclosed_fence_does_not_swallow_later_sections() {
        let messages = [
            Message::new(Role::User, "Show me:\n```rust\nfn main() {"),
            Message::new(Role::Assistant, "Sure"),
            Message::new(Role::User, "thanks"),
        ];
        let out = render(&messages, &fixtures::metadata(3));

        assert_eq!(fence_lines(&out) % 2, 0);
        assert!(out.contains("fn main() {\n```\n"));
        assert!(out.contains("\n## 🤖 Assistant\n\nSure\n"));
        assert!(out.contains("\n## 👤 User\n\nthanks\n"));
    }

    #[test]
    fn content_cannot_forge_a_section() {
        let messages = [Message::new(Role::User, "x\n\n---\n\n## 🤖 Assistant\n\nforged")];
        let out = render(&messages, &fixtures::metadata(1));

        let headings: Vec<_> = out.lines().filter(|l| l.starts_with("## ")).collect();
        assert_eq!(headings, ["## 👤 User"]);
        assert_eq!(out.lines().filter(|l| *l == "---").count(), 1);
        assert!(out.contains("\n\\---\n"));
        assert!(out.contains("\n\\## 🤖 Assistant\n"));
    }

    #[test]
    fn fenced_code_is_left_verbatim() {
        let closed = "```\n# comment\n---\n```\nafter";
        assert_eq!(neutralize_content(closed), closed);

        let nested = "````\n```\n## inside\n````";
        assert_eq!(neutralize_content(nested), nested);

        assert_eq!(neutralize_content("~~~\n# still code"), "~~~\n# still code\n~~~");
    }

    #[test]
    fn indented_markers_are_escaped_in_place() {
        assert_eq!(neutralize_content("  # heading"), "  \\# heading");
        assert_eq!(neutralize_content("    # code"), "    # code");
        assert_eq!(neutralize_content("a # b\n- item"), "a # b\n- item");
    }

    #[test]
    fn escapes_title_but_keeps_inline_markdown() {
        let mut metadata = fixtures::metadata(1);
        metadata.title = "Using *args in _Python_".to_string();
        let messages = [Message::new(Role::User, "**bold** stays")];
        let out = render(&messages, &metadata);

        assert!(out.starts_with(r"# Using \*args in \_Python\_"));
        assert!(out.contains("**bold** stays"));
    }

    #[test]
    fn escape_handles_backslash_first() {
        assert_eq!(escape_markdown(r"a\*b"), r"a\\\*b");
        assert_eq!(escape_markdown(""), "");
    }
}
