//! Result types for extraction output.
//!
//! This module defines the structured conversation produced by the
//! extractor and the metadata resolved for it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Author of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human side of the chat.
    User,
    /// The AI side of the chat.
    Assistant,
    /// Synthetic transcript produced by a whole-region fallback.
    Unknown,
}

impl Role {
    /// Label used in exported documents.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Assistant => "Assistant",
            Self::Unknown => "Conversation",
        }
    }

    /// Emoji shown next to the Markdown heading.
    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::User => "👤",
            Self::Assistant => "🤖",
            Self::Unknown => "💬",
        }
    }

    /// CSS class for HTML output.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    #[must_use]
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Session metadata derived once per export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Conversation title.
    pub title: String,

    /// Platform display name ("ChatGPT", "Gemini").
    pub platform: String,

    /// Model name, or `Unknown`.
    pub model: String,

    /// Page URL, empty when unknown.
    pub url: String,

    /// Moment the export was resolved.
    pub saved_at: DateTime<Utc>,

    /// Number of exported messages (after selection).
    pub message_count: usize,
}

/// A fully extracted conversation, ready for formatting.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub platform: Platform,

    /// Messages in conversation order. Never empty.
    pub messages: Vec<Message>,

    pub metadata: Metadata,

    /// Name of the extraction strategy that produced `messages`.
    pub strategy: &'static str,
}
