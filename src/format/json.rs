//! JSON output.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::result::{Message, Metadata, Role};

/// Top-level JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonExport {
    pub metadata: Metadata,
    pub messages: Vec<JsonMessage>,
}

/// A message with its 1-based position in the export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMessage {
    pub index: usize,
    pub role: Role,
    pub content: String,
}

impl JsonExport {
    #[must_use]
    pub fn new(messages: &[Message], metadata: &Metadata) -> Self {
        Self {
            metadata: metadata.clone(),
            messages: messages
                .iter()
                .enumerate()
                .map(|(i, m)| JsonMessage {
                    index: i + 1,
                    role: m.role,
                    content: m.content.clone(),
                })
                .collect(),
        }
    }
}

/// Pretty-printed `{ metadata, messages }` document.
pub fn render(messages: &[Message], metadata: &Metadata) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonExport::new(messages, metadata))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::fixtures;

    #[test]
    fn field_set_is_fixed() {
        let out = render(&fixtures::messages(), &fixtures::metadata(2)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let metadata = value["metadata"].as_object().unwrap();
        let mut keys: Vec<_> = metadata.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, ["messageCount", "model", "platform", "savedAt", "title", "url"]);

        assert_eq!(value["messages"][0]["index"], 1);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "Hi there");
    }

    #[test]
    fn round_trips_content_and_count() {
        let messages = vec![
            Message::new(Role::User, "quote \" backslash \\ newline \n tab \t"),
            Message::new(Role::Assistant, "unicode ✓ and </script>"),
        ];
        let out = render(&messages, &fixtures::metadata(2)).unwrap();
        let parsed: JsonExport = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed.metadata.message_count, 2);
        let contents: Vec<_> = parsed.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, [messages[0].content.as_str(), messages[1].content.as_str()]);
    }
}
