//! Compiled regex patterns and literal tables used across the pipeline.
//!
//! All patterns are compiled once at first use with `LazyLock`.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches three or more consecutive newlines.
pub static MULTIPLE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n{3,}").expect("MULTIPLE_NEWLINES regex")
});

/// Matches trailing spaces and tabs at the end of each line.
pub static TRAILING_LINE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)[ \t\u{a0}]+$").expect("TRAILING_LINE_WHITESPACE regex")
});

/// Lines that are labels of message action buttons, not message text.
pub const UI_ARTIFACT_LINES: &[&str] = &[
    "Copy code",
    "Copy",
    "Regenerate response",
    "Regenerate",
];

/// Matches sidebar, toolbar and footer labels in whole-page text.
pub static NAVIGATION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(menu|home|explore|new chat|settings|log ?out|upgrade|plus|conversations|sidebar|copy|regenerate|delete|edit|share|fork|dark mode|light mode|feedback|help|about)\b",
    )
    .expect("NAVIGATION_LINE regex")
});

// =============================================================================
// Sender Classification Patterns
// =============================================================================

/// Words hinting that a turn was written by the user.
///
/// Matched by lowercase containment, so "your" counts as well.
pub const USER_KEYWORDS: &[&str] = &["you"];

/// Words hinting that a turn was written by the assistant.
pub const ASSISTANT_KEYWORDS: &[&str] = &["assistant", "chatgpt", "gpt", "gemini"];

// =============================================================================
// Metadata Patterns
// =============================================================================

/// Model names searched for in page text, most specific first.
pub const KNOWN_MODELS: &[&str] = &[
    "GPT-4o mini",
    "GPT-4o",
    "GPT-4.5",
    "GPT-4.1",
    "GPT-4",
    "GPT-3.5",
    "GPT-5",
    "o4-mini",
    "o3-mini",
    "o3",
    "o1-mini",
    "o1",
    "Gemini 2.5 Pro",
    "Gemini 2.5 Flash",
    "Gemini 2.0 Flash",
    "Gemini 1.5 Pro",
    "Gemini 1.5 Flash",
    "Gemini Advanced",
];

/// Matches runs of whitespace.
pub static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+").expect("WHITESPACE_RUN regex")
});

// =============================================================================
// Filename Patterns
// =============================================================================

/// Characters that are not allowed in file names on common filesystems.
/// Tabs and line breaks are left for whitespace collapsing.
pub static INVALID_FILENAME_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[<>:"/\\|?*\x00-\x08\x0b\x0c\x0e-\x1f\x7f]"#).expect("INVALID_FILENAME_CHARS regex")
});

// =============================================================================
// Markdown Output Patterns
// =============================================================================

/// Lines that would open a heading, a thematic break or a setext underline.
pub static MARKDOWN_BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(?:#|(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,}|=+[ \t]*)$)")
        .expect("MARKDOWN_BLOCK_START regex")
});
