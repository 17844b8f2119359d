//! Error types for chat-saver.
//!
//! Every failure in the pipeline is a synchronous return value. Nothing is
//! retried inside the core and no export file is written unless extraction
//! and formatting both succeeded.

use std::path::PathBuf;

use crate::format::Format;

/// Error type for extraction and export operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every extraction strategy came back empty.
    #[error("No conversation found. Please open a conversation and try again.")]
    NoConversationFound,

    /// The page does not belong to a recognized chat platform.
    #[error("Unsupported platform: {0}. Open a ChatGPT or Gemini conversation first.")]
    UnsupportedPlatform(String),

    /// The save collaborator failed to store the exported document.
    #[error("Download failed for {filename}: {message}")]
    DownloadFailed {
        filename: String,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The format is rendered outside the core (PDF).
    #[error("No renderer available for {0} output")]
    RendererUnavailable(Format),

    /// A wire request could not be understood.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Reading a snapshot failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O failure from the download collaborator.
    pub fn download(filename: impl Into<String>, err: std::io::Error) -> Self {
        Self::DownloadFailed {
            filename: filename.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Wrap an I/O failure while reading `path`.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: err,
        }
    }
}

/// Result type alias for chat-saver operations.
pub type Result<T> = std::result::Result<T, Error>;
