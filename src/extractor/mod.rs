//! Conversation extraction.
//!
//! # Module Structure
//!
//! - `strategy`: per-platform strategy tables and how each kind runs
//!
//! # Usage
//!
//! ```rust
//! use chat_saver::{dom, extractor, platform::Platform, Options};
//!
//! let doc = dom::parse(r#"<div data-message-id="1" data-message-author-role="user">Hello</div>"#);
//! let extraction = extractor::extract_messages(&doc, Platform::ChatGpt, &Options::default())?;
//! assert_eq!(extraction.strategy, "message-id");
//! assert_eq!(extraction.messages[0].content, "Hello");
//! # Ok::<(), chat_saver::Error>(())
//! ```

pub mod strategy;

use dom_query::Document;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::platform::Platform;
use crate::result::{Message, Role};
use crate::Options;

pub use strategy::{Strategy, StrategyKind};

/// Messages produced by the winning strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Never empty.
    pub messages: Vec<Message>,

    /// Name of the strategy that produced `messages`.
    pub strategy: &'static str,
}

impl Extraction {
    /// Whether the messages came from a whole-region fallback.
    #[must_use]
    pub fn is_combined_transcript(&self) -> bool {
        self.messages.len() == 1 && self.messages[0].role == Role::Unknown
    }
}

/// Extract the conversation using the platform's strategy table.
///
/// Strategies are tried in order until one yields a message. When none
/// does, the page holds no conversation and `NoConversationFound` is
/// returned.
pub fn extract_messages(doc: &Document, platform: Platform, options: &Options) -> Result<Extraction> {
    let root = doc.select("html");

    for strategy in platform.strategies() {
        let matched = strategy.match_count(&root);
        if matched == 0 {
            debug!(platform = %platform, strategy = strategy.name, "no candidate elements");
            continue;
        }

        let messages = strategy.run(&root, options);
        debug!(
            platform = %platform,
            strategy = strategy.name,
            matched,
            messages = messages.len(),
            "strategy attempted"
        );

        if !messages.is_empty() {
            let extraction = Extraction {
                messages,
                strategy: strategy.name,
            };
            if extraction.is_combined_transcript() {
                warn!(strategy = strategy.name, "no per-turn markers found, exporting page text as one transcript");
            }
            info!(
                platform = %platform,
                strategy = strategy.name,
                messages = extraction.messages.len(),
                "conversation extracted"
            );
            return Ok(extraction);
        }
    }

    Err(Error::NoConversationFound)
}
