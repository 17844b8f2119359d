//! Export file naming.
//!
//! `{platform}_{title}_{model}_{date}_{time}.{extension}`, e.g.
//! `ChatGPT_Rust_lifetimes_GPT-4o_2026-10-16_09-30-00.md`.

use crate::format::Format;
use crate::patterns::{INVALID_FILENAME_CHARS, WHITESPACE_RUN};
use crate::result::Metadata;

/// Make `text` safe as part of a file name.
///
/// Characters invalid on common filesystems are removed, whitespace runs
/// become one underscore, and the result is cut to `max_chars` characters.
///
/// # Examples
///
/// ```
/// use chat_saver::filename::sanitize;
///
/// assert_eq!(sanitize("What is <T>? A: generics", 50), "What_is_T_A_generics");
/// ```
#[must_use]
pub fn sanitize(text: &str, max_chars: usize) -> String {
    let cleaned = INVALID_FILENAME_CHARS.replace_all(text, "");
    let joined = WHITESPACE_RUN.replace_all(cleaned.trim(), "_");
    let cut: String = joined.chars().take(max_chars).collect();
    let cut = cut.trim_matches(|c| c == '_' || c == '.');
    if cut.is_empty() {
        "untitled".to_string()
    } else {
        cut.to_string()
    }
}

/// File name for an export of `metadata` in `format`.
#[must_use]
pub fn export_filename(metadata: &Metadata, format: Format, max_chars: usize) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        sanitize(&metadata.platform, max_chars),
        sanitize(&metadata.title, max_chars),
        sanitize(&metadata.model, max_chars),
        metadata.saved_at.format("%Y-%m-%d_%H-%M-%S"),
        format.extension()
    )
}
