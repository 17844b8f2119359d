//! Extraction strategy tables.
//!
//! Each platform has an ordered table of strategies. The extractor runs them
//! in order and keeps the first one that yields at least one message, so a
//! new selector or a new platform is a table entry, not new control flow.

use dom_query::Selection;

use crate::classify;
use crate::dom;
use crate::normalize;
use crate::result::{Message, Role};
use crate::Options;

/// How matched elements become messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// One message per element carrying a stable per-turn marker.
    TaggedTurns,

    /// One message per looser turn container; short content is dropped.
    TurnGroups,

    /// The whole region as one combined transcript, if long enough.
    MainRegion,

    /// Whole-page text minus navigation lines, as one combined transcript.
    VisibleText,

    /// Distinct elements for the two sides of the conversation.
    PairedTags {
        user_tag: &'static str,
        assistant_tag: &'static str,
        /// Preferred text containers inside a user element.
        user_text: &'static [&'static str],
        /// Preferred text containers inside an assistant element.
        assistant_text: &'static [&'static str],
    },
}

/// One entry of a strategy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strategy {
    /// Short name for logs and diagnostics.
    pub name: &'static str,

    /// Candidate selectors in priority order; the first that matches is used.
    pub selectors: &'static [&'static str],

    pub kind: StrategyKind,
}

/// ChatGPT (`chatgpt.com`, `chat.openai.com`).
pub const CHATGPT: &[Strategy] = &[
    Strategy {
        name: "message-id",
        selectors: &["[data-message-id]"],
        kind: StrategyKind::TaggedTurns,
    },
    Strategy {
        name: "turn-group",
        selectors: &["[data-testid^='conversation-turn']", ".group"],
        kind: StrategyKind::TurnGroups,
    },
    Strategy {
        name: "main-region",
        selectors: &["[role='main']", "main", "div[class*='prose']"],
        kind: StrategyKind::MainRegion,
    },
    Strategy {
        name: "visible-text",
        selectors: &["body"],
        kind: StrategyKind::VisibleText,
    },
];

/// Gemini (`gemini.google.com`).
pub const GEMINI: &[Strategy] = &[
    Strategy {
        name: "query-response",
        selectors: &["user-query, model-response"],
        kind: StrategyKind::PairedTags {
            user_tag: "user-query",
            assistant_tag: "model-response",
            user_text: &["div.query-text", "span.user-query-bubble-with-background"],
            assistant_text: &[".markdown.markdown-main-panel", "message-content"],
        },
    },
    Strategy {
        name: "scroll-container",
        selectors: &[
            "infinite-scroller[data-test-id='chat-history-container']",
            "infinite-scroller",
        ],
        kind: StrategyKind::MainRegion,
    },
    Strategy {
        name: "visible-text",
        selectors: &["body"],
        kind: StrategyKind::VisibleText,
    },
];

impl Strategy {
    /// Number of elements this strategy would consider.
    #[must_use]
    pub fn match_count(&self, root: &Selection) -> usize {
        match self.kind {
            StrategyKind::TaggedTurns | StrategyKind::TurnGroups | StrategyKind::PairedTags { .. } => {
                self.selectors
                    .iter()
                    .map(|s| root.select(s).length())
                    .find(|n| *n > 0)
                    .unwrap_or(0)
            }
            StrategyKind::MainRegion | StrategyKind::VisibleText => {
                usize::from(dom::first_match(root, self.selectors).is_some())
            }
        }
    }

    /// Run the strategy. An empty result means "try the next one".
    #[must_use]
    pub fn run(&self, root: &Selection, options: &Options) -> Vec<Message> {
        match self.kind {
            StrategyKind::TaggedTurns => self.turns(root, 1),
            StrategyKind::TurnGroups => self.turns(root, options.min_turn_chars.max(1)),
            StrategyKind::MainRegion => self.region(root, options.min_region_chars),
            StrategyKind::VisibleText => self.visible_text(root, options.min_fallback_chars),
            StrategyKind::PairedTags {
                user_tag,
                assistant_tag,
                user_text,
                assistant_text,
            } => self.paired(root, user_tag, assistant_tag, user_text, assistant_text),
        }
    }

    /// Elements of the first selector that matches anything.
    fn elements<'a>(&self, root: &Selection<'a>) -> Vec<Selection<'a>> {
        self.selectors
            .iter()
            .map(|s| dom::query_all(root, s))
            .find(|found| !found.is_empty())
            .unwrap_or_default()
    }

    fn turns(&self, root: &Selection, min_chars: usize) -> Vec<Message> {
        self.elements(root)
            .iter()
            .filter_map(|el| {
                let content = normalize::clean_text(&dom::inner_text(el));
                (content.chars().count() >= min_chars).then(|| Message::new(classify::classify(el), content))
            })
            .collect()
    }

    fn region(&self, root: &Selection, min_chars: usize) -> Vec<Message> {
        let Some(region) = dom::first_match(root, self.selectors) else {
            return Vec::new();
        };

        let content = normalize::clean_text(&dom::inner_text(&region));
        if content.chars().count() > min_chars {
            vec![Message::new(Role::Unknown, content)]
        } else {
            Vec::new()
        }
    }

    fn visible_text(&self, root: &Selection, min_chars: usize) -> Vec<Message> {
        let Some(region) = dom::first_match(root, self.selectors) else {
            return Vec::new();
        };

        let filtered = normalize::filter_navigation_lines(&dom::inner_text(&region));
        let content = normalize::clean_text(&filtered);
        if !content.is_empty() && content.chars().count() >= min_chars {
            vec![Message::new(Role::Unknown, content)]
        } else {
            Vec::new()
        }
    }

    fn paired(
        &self,
        root: &Selection,
        user_tag: &str,
        assistant_tag: &str,
        user_text: &[&str],
        assistant_text: &[&str],
    ) -> Vec<Message> {
        self.elements(root)
            .iter()
            .filter_map(|el| {
                let tag = dom::tag_name(el)?;
                let (role, containers) = if tag == user_tag {
                    (Role::User, user_text)
                } else if tag == assistant_tag {
                    (Role::Assistant, assistant_text)
                } else {
                    return None;
                };

                let source = dom::first_match(el, containers).unwrap_or_else(|| el.clone());
                let content = normalize::clean_text(&dom::inner_text(&source));
                (!content.is_empty()).then(|| Message::new(role, content))
            })
            .collect()
    }
}
