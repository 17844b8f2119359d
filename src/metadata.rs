//! Metadata resolution.
//!
//! Title and model are read from the page first and derived from the
//! messages only when the page does not say.

use chrono::{DateTime, Utc};
use dom_query::Document;

use crate::dom;
use crate::patterns::{KNOWN_MODELS, WHITESPACE_RUN};
use crate::platform::{self, Platform};
use crate::result::{Message, Metadata, Role};
use crate::Options;

/// Model value when nothing on the page names one.
pub const UNKNOWN_MODEL: &str = "Unknown";

/// Resolve metadata for an export of `messages`.
///
/// `messages` must already have the selection applied, since
/// `message_count` is its length.
#[must_use]
pub fn resolve_metadata(
    doc: &Document,
    messages: &[Message],
    platform: Platform,
    options: &Options,
    saved_at: DateTime<Utc>,
) -> Metadata {
    Metadata {
        title: resolve_title(doc, messages, platform, options),
        platform: platform.name().to_string(),
        model: resolve_model(doc, platform),
        url: options
            .url
            .clone()
            .or_else(|| platform::document_url(doc))
            .unwrap_or_default(),
        saved_at,
        message_count: messages.len(),
    }
}

/// Title: page title without the platform suffix, then the active sidebar
/// item, then the opening user message, then a generic label.
#[must_use]
pub fn resolve_title(doc: &Document, messages: &[Message], platform: Platform, options: &Options) -> String {
    let page_title = options
        .title
        .clone()
        .unwrap_or_else(|| doc.select("title").text().to_string());

    if let Some(title) = strip_platform_suffix(&page_title, platform) {
        return title;
    }

    if let Some(title) = active_nav_title(doc, platform) {
        return title;
    }

    messages
        .iter()
        .find(|m| m.role == Role::User)
        .map(|m| truncate_with_ellipsis(&collapse_whitespace(&m.content), options.title_max_chars))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("{} Conversation", platform.name()))
}

/// Remove platform suffixes. `None` when nothing specific is left.
#[must_use]
pub fn strip_platform_suffix(title: &str, platform: Platform) -> Option<String> {
    let mut title = collapse_whitespace(title);

    for suffix in platform.title_suffixes() {
        if let Some(stripped) = title.strip_suffix(suffix) {
            title = stripped.trim().to_string();
            break;
        }
    }

    let generic = platform
        .generic_titles()
        .iter()
        .any(|g| g.eq_ignore_ascii_case(&title));

    (!title.is_empty() && !generic).then_some(title)
}

fn active_nav_title(doc: &Document, platform: Platform) -> Option<String> {
    let root = doc.select("html");
    platform.active_nav_selectors().iter().find_map(|selector| {
        let el = dom::first_match(&root, &[*selector])?;
        let text = collapse_whitespace(&dom::inner_text(&el));
        (!text.is_empty()).then_some(text)
    })
}

/// Model: the model picker's label, then the first known model name in the
/// page text, then `Unknown`.
#[must_use]
pub fn resolve_model(doc: &Document, platform: Platform) -> String {
    let root = doc.select("html");

    if let Some(picker) = dom::first_match(&root, platform.model_selectors()) {
        let label = collapse_whitespace(&dom::inner_text(&picker));
        if !label.is_empty() {
            return label;
        }
    }

    let page_text = dom::inner_text(&doc.select("body"));
    KNOWN_MODELS
        .iter()
        .find(|model| contains_word(&page_text, model))
        .map_or_else(|| UNKNOWN_MODEL.to_string(), |model| (*model).to_string())
}

/// Case-sensitive search for `needle` not embedded in a longer word.
fn contains_word(haystack: &str, needle: &str) -> bool {
    let joins = |c: char| c.is_alphanumeric() || c == '-';

    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let mut after = haystack[start + needle.len()..].chars();
        let continues = match after.next() {
            Some('.') => after.next().is_some_and(|c| c.is_ascii_digit()),
            Some(c) => joins(c),
            None => false,
        };
        !before.is_some_and(|c| joins(c) || c == '.') && !continues
    })
}

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Cut `text` to `max` characters, appending `...` when it was longer.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}
