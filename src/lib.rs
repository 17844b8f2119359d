//! # chat-saver
//!
//! Extracts AI chat conversations (ChatGPT, Gemini) from a saved copy of the
//! chat page and exports them as plain text, Markdown, HTML or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use chat_saver::{export, ExportRequest, Format, Options, SelectionMode};
//!
//! let html = r#"<html><head><title>Greeting - ChatGPT</title></head><body>
//! <div data-message-id="1" data-message-author-role="user">Hello</div>
//! <div data-message-id="2" data-message-author-role="assistant">Hi there</div>
//! </body></html>"#;
//!
//! let options = Options {
//!     url: Some("https://chatgpt.com/c/123".to_string()),
//!     ..Options::default()
//! };
//! let request = ExportRequest { format: Format::Txt, selection: SelectionMode::Full };
//!
//! let document = export(html, &options, &request)?;
//! assert!(document.contents.contains("[User]:\nHello"));
//! assert!(document.filename.starts_with("ChatGPT_Greeting_"));
//! # Ok::<(), chat_saver::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! - **Extraction**: ordered, per-platform strategy tables, from per-turn
//!   markers down to whole-page text
//! - **Classification**: user/assistant labels from attributes, classes and,
//!   as a last resort, keywords
//! - **Normalization**: whitespace and UI-label cleanup
//! - **Metadata**: title, platform, model, URL, timestamp
//! - **Formatting**: txt, md, html, json (PDF is left to an external renderer)

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers and `innerText`-style rendering.
pub mod dom;

/// Sender classification.
pub mod classify;

/// Text cleanup.
pub mod normalize;

/// Strategy tables and conversation extraction.
pub mod extractor;

/// Platform detection.
pub mod platform;

/// Metadata resolution.
pub mod metadata;

/// Output formatters.
pub mod format;

/// Export file naming.
pub mod filename;

/// Snapshot charset detection and decoding.
pub mod encoding;

/// Pipeline orchestration and the download collaborator.
pub mod export;

/// Extension request/response messages.
pub mod protocol;

/// Bounded retry with backoff.
pub mod retry;

/// Per-strategy snapshot reports.
pub mod diagnostics;

// Public API - re-exports
pub use error::{Error, Result};
pub use export::{Downloader, DirectoryDownloader, ExportedDocument};
pub use format::Format;
pub use options::{ExportRequest, Options, SelectionMode, DEFAULT_LAST_N};
pub use platform::Platform;
pub use result::{Conversation, Message, Metadata, Role};

/// Extracts the full conversation from a saved chat page.
///
/// # Example
///
/// ```rust
/// use chat_saver::{extract, Options, Role};
///
/// let html = r#"<link rel="canonical" href="https://gemini.google.com/app/1">
/// <user-query>Hi</user-query><model-response>Hello!</model-response>"#;
/// let conversation = extract(html, &Options::default())?;
/// assert_eq!(conversation.messages[1].role, Role::Assistant);
/// # Ok::<(), chat_saver::Error>(())
/// ```
pub fn extract(html: &str, options: &Options) -> Result<Conversation> {
    export::extract_conversation(html, options, SelectionMode::Full, chrono::Utc::now())
}

/// Runs a complete export request against a saved chat page.
///
/// Returns the rendered document and its file name; saving it is up to
/// the caller (see [`export::save`]).
pub fn export(html: &str, options: &Options, request: &ExportRequest) -> Result<ExportedDocument> {
    export::export_document(html, options, request, chrono::Utc::now())
}

/// Like [`export`], for raw snapshot bytes in any declared charset.
pub fn export_bytes(html: &[u8], options: &Options, request: &ExportRequest) -> Result<ExportedDocument> {
    let html = encoding::decode_snapshot(html);
    export(&html, options, request)
}
