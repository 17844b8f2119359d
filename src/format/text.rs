//! Plain text output.

use std::fmt::Write;

use super::{display_timestamp, RULE_WIDTH};
use crate::result::{Message, Metadata};

/// Metadata header, then `[Role]:` blocks separated by an 80 column rule.
#[must_use]
pub fn render(messages: &[Message], metadata: &Metadata) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "Title: {}", metadata.title);
    let _ = writeln!(out, "Platform: {}", metadata.platform);
    let _ = writeln!(out, "Model: {}", metadata.model);
    if !metadata.url.is_empty() {
        let _ = writeln!(out, "URL: {}", metadata.url);
    }
    let _ = writeln!(out, "Saved: {}", display_timestamp(metadata));
    let _ = writeln!(out, "Messages: {}", metadata.message_count);
    let _ = write!(out, "\n{rule}\n\n");

    for (i, message) in messages.iter().enumerate() {
        if i > 0 {
            let _ = write!(out, "\n\n{rule}\n\n");
        }
        let _ = write!(out, "[{}]:\n{}", message.role, message.content);
    }
    out.push('\n');

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn renders_header_and_blocks_in_order() {
        let out = render(&fixtures::messages(), &fixtures::metadata(2));

        assert!(out.starts_with("Title: Greetings\nPlatform: ChatGPT\nModel: GPT-4o\n"));
        assert!(out.contains("Messages: 2\n"));

        let user = out.find("[User]:\nHello").unwrap();
        let assistant = out.find("[Assistant]:\nHi there").unwrap();
        assert!(user < assistant);
        assert_eq!(out.matches(&"=".repeat(80)).count(), 2);
    }

    #[test]
    fn omits_empty_url() {
        let mut metadata = fixtures::metadata(2);
        metadata.url.clear();
        assert!(!render(&fixtures::messages(), &metadata).contains("URL:"));
    }
}
