//! Output formatters.
//!
//! Every formatter is a pure function of the messages and the metadata.
//! The timestamp is already part of [`Metadata`], so the same inputs always
//! render the same document.

pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::result::{Message, Metadata};

/// Width of the separator rule in text output.
pub const RULE_WIDTH: usize = 80;

/// Export encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Txt,
    Md,
    Html,
    Json,
    /// Paginated image document, produced by an external renderer.
    Pdf,
}

impl Format {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Md => "md",
            Self::Html => "html",
            Self::Json => "json",
            Self::Pdf => "pdf",
        }
    }

    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Txt => "text/plain;charset=utf-8",
            Self::Md => "text/markdown;charset=utf-8",
            Self::Html => "text/html;charset=utf-8",
            Self::Json => "application/json;charset=utf-8",
            Self::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(Self::Txt),
            "md" | "markdown" => Ok(Self::Md),
            "html" | "htm" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "pdf" => Ok(Self::Pdf),
            other => Err(Error::InvalidRequest(format!("unknown format: {other}"))),
        }
    }
}

/// Render `messages` in `format`.
///
/// PDF output needs a page renderer outside this crate and fails with
/// [`Error::RendererUnavailable`].
pub fn render(messages: &[Message], metadata: &Metadata, format: Format) -> Result<String> {
    match format {
        Format::Txt => Ok(text::render(messages, metadata)),
        Format::Md => Ok(markdown::render(messages, metadata)),
        Format::Html => Ok(html::render(messages, metadata)),
        Format::Json => json::render(messages, metadata),
        Format::Pdf => Err(Error::RendererUnavailable(format)),
    }
}

/// Timestamp as shown in document headers.
#[must_use]
pub fn display_timestamp(metadata: &Metadata) -> String {
    metadata.saved_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_format_names() {
        assert_eq!("MD".parse::<Format>().unwrap(), Format::Md);
        assert_eq!("markdown".parse::<Format>().unwrap(), Format::Md);
        assert_eq!("text".parse::<Format>().unwrap(), Format::Txt);
        assert!("docx".parse::<Format>().is_err());
    }

    #[test]
    fn pdf_is_rendered_elsewhere() {
        let err = render(&fixtures::messages(), &fixtures::metadata(2), Format::Pdf).unwrap_err();
        assert!(matches!(err, Error::RendererUnavailable(Format::Pdf)));
    }

    #[test]
    fn timestamp_is_utc() {
        assert_eq!(display_timestamp(&fixtures::metadata(0)), "2026-10-16 08:05:09 UTC");
    }
}
