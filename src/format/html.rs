//! Standalone HTML output.
//!
//! The page carries its own stylesheet with a dark variant, so the file
//! renders the same offline. Every interpolated value goes through
//! [`escape_html`].

use std::fmt::Write;

use super::display_timestamp;
use crate::result::{Message, Metadata};

const STYLESHEET: &str = r#"
:root { --bg: #ffffff; --fg: #1f2328; --muted: #59636e; --border: #d1d9e0; --user: #f0f6ff; --assistant: #f6f8fa; --accent: #10a37f; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #0d1117; --fg: #e6edf3; --muted: #9198a1; --border: #3d444d; --user: #112240; --assistant: #161b22; }
}
* { box-sizing: border-box; }
body { margin: 0; background: var(--bg); color: var(--fg); font: 15px/1.6 -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; }
main { max-width: 860px; margin: 0 auto; padding: 32px 20px; }
header { border-bottom: 2px solid var(--accent); margin-bottom: 24px; padding-bottom: 12px; }
header h1 { margin: 0 0 8px; font-size: 1.6em; }
header dl { display: grid; grid-template-columns: max-content 1fr; gap: 2px 12px; margin: 0; color: var(--muted); font-size: 0.9em; }
header dt { font-weight: 600; }
header dd { margin: 0; word-break: break-all; }
article { border: 1px solid var(--border); border-radius: 8px; margin: 16px 0; padding: 12px 16px; }
article.user { background: var(--user); }
article.assistant, article.unknown { background: var(--assistant); }
article h2 { margin: 0 0 8px; font-size: 0.85em; text-transform: uppercase; letter-spacing: 0.05em; color: var(--muted); }
article .content { white-space: pre-wrap; word-wrap: break-word; }
"#;

/// Escape text for HTML element content and attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Self-contained document with a header and one `<article>` per message.
#[must_use]
pub fn render(messages: &[Message], metadata: &Metadata) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&metadata.title));
    let _ = writeln!(out, "<style>{STYLESHEET}</style>");
    out.push_str("</head>\n<body>\n<main>\n<header>\n");
    let _ = writeln!(out, "<h1>{}</h1>\n<dl>", escape_html(&metadata.title));

    let mut field = |name: &str, value: &str| {
        let _ = writeln!(out, "<dt>{name}</dt><dd>{}</dd>", escape_html(value));
    };
    field("Platform", &metadata.platform);
    field("Model", &metadata.model);
    if !metadata.url.is_empty() {
        field("URL", &metadata.url);
    }
    field("Saved", &display_timestamp(metadata));
    field("Messages", &metadata.message_count.to_string());
    out.push_str("</dl>\n</header>\n");

    for message in messages {
        let _ = writeln!(
            out,
            "<article class=\"message {}\">\n<h2>{}</h2>\n<div class=\"content\">{}</div>\n</article>",
            message.role.css_class(),
            message.role,
            escape_html(&message.content)
        );
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}
