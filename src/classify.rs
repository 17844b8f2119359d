//! Sender classification for conversation turn elements.
//!
//! Best effort only. The rules below are ordered from the most to the least
//! reliable signal, and the keyword rule will misfire on messages that talk
//! about "you" or "GPT". There is no ground truth to check against, so a
//! wrong label after a site redesign is a known limitation.

use dom_query::Selection;

use crate::dom;
use crate::patterns::{ASSISTANT_KEYWORDS, USER_KEYWORDS};
use crate::result::Role;

/// Attribute ChatGPT puts on each authored turn.
pub const AUTHOR_ROLE_ATTR: &str = "data-message-author-role";

/// Classify a turn element as written by the user or the assistant.
///
/// First match wins:
/// 1. author role attribute on the element
/// 2. author role attribute on a descendant
/// 3. `user` / `assistant` in the class list
/// 4. sender keywords in the element text
/// 5. `Assistant`
#[must_use]
pub fn classify(el: &Selection) -> Role {
    classify_by_own_attribute(el)
        .or_else(|| classify_by_descendant_attribute(el))
        .or_else(|| classify_by_class(el))
        .or_else(|| classify_by_keywords(&dom::text_content(el)))
        .unwrap_or(Role::Assistant)
}

fn role_from_attribute(value: &str) -> Option<Role> {
    match value.trim().to_ascii_lowercase().as_str() {
        "user" => Some(Role::User),
        "assistant" => Some(Role::Assistant),
        _ => None,
    }
}

fn classify_by_own_attribute(el: &Selection) -> Option<Role> {
    dom::get_attribute(el, AUTHOR_ROLE_ATTR).and_then(|v| role_from_attribute(&v))
}

fn classify_by_descendant_attribute(el: &Selection) -> Option<Role> {
    let tagged = el.select("[data-message-author-role]");
    dom::get_attribute(&tagged, AUTHOR_ROLE_ATTR).and_then(|v| role_from_attribute(&v))
}

fn classify_by_class(el: &Selection) -> Option<Role> {
    let class = dom::class_name(el)?.to_ascii_lowercase();
    let tokens: Vec<&str> = class.split_whitespace().collect();

    if tokens.iter().any(|t| t.contains("user")) {
        Some(Role::User)
    } else if tokens.iter().any(|t| t.contains("assistant")) {
        Some(Role::Assistant)
    } else {
        None
    }
}

/// Lowest-confidence rule: look for sender words in the text itself.
///
/// Plain case-insensitive containment, not whole words: "Your code" reads
/// as the user and "gpt-4" as the assistant.
#[must_use]
pub fn classify_by_keywords(text: &str) -> Option<Role> {
    let text = text.to_lowercase();
    if USER_KEYWORDS.iter().any(|word| text.contains(word)) {
        Some(Role::User)
    } else if ASSISTANT_KEYWORDS.iter().any(|word| text.contains(word)) {
        Some(Role::Assistant)
    } else {
        None
    }
}
