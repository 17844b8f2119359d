//! Export orchestration.
//!
//! Parses the snapshot, extracts and selects messages, resolves metadata,
//! renders the requested format and names the file. Saving is left to a
//! [`Downloader`], so the pipeline itself never touches the filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::dom;
use crate::error::{Error, Result};
use crate::extractor;
use crate::filename;
use crate::format;
use crate::metadata;
use crate::options::{ExportRequest, Options, SelectionMode};
use crate::platform;
use crate::result::Conversation;

/// A rendered export, ready to be saved.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub mime_type: &'static str,
    pub contents: String,
    pub conversation: Conversation,
}

/// Collaborator that stores a named file with a MIME type.
pub trait Downloader {
    /// Store `contents` as `filename`. Returns where it ended up.
    fn save(&self, filename: &str, mime_type: &str, contents: &[u8]) -> io::Result<PathBuf>;
}

/// Writes exports into a directory.
///
/// Files are written under a temporary name and renamed into place, so a
/// failed write never leaves a partial export behind.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Downloader for DirectoryDownloader {
    fn save(&self, filename: &str, mime_type: &str, contents: &[u8]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;

        let target = self.dir.join(filename);
        let partial = self.dir.join(format!(".{filename}.part"));
        debug!(path = %target.display(), mime_type, bytes = contents.len(), "writing export");

        if let Err(err) = fs::write(&partial, contents).and_then(|()| fs::rename(&partial, &target)) {
            let _ = fs::remove_file(&partial);
            return Err(err);
        }
        Ok(target)
    }
}

/// Extract the conversation from `html` and resolve its metadata.
pub fn extract_conversation(
    html: &str,
    options: &Options,
    selection: SelectionMode,
    saved_at: DateTime<Utc>,
) -> Result<Conversation> {
    let doc = dom::parse(html);
    let platform = platform::detect(&doc, options)?;

    let extraction = extractor::extract_messages(&doc, platform, options)?;
    let messages = selection.apply(extraction.messages);
    if messages.is_empty() {
        return Err(Error::NoConversationFound);
    }

    let metadata = metadata::resolve_metadata(&doc, &messages, platform, options, saved_at);

    Ok(Conversation {
        platform,
        messages,
        metadata,
        strategy: extraction.strategy,
    })
}

/// Run the whole pipeline for one request, without saving.
pub fn export_document(
    html: &str,
    options: &Options,
    request: &ExportRequest,
    saved_at: DateTime<Utc>,
) -> Result<ExportedDocument> {
    let conversation = extract_conversation(html, options, request.selection, saved_at)?;
    let contents = format::render(&conversation.messages, &conversation.metadata, request.format)?;
    let filename = filename::export_filename(&conversation.metadata, request.format, options.filename_max_chars);

    info!(
        filename = %filename,
        format = %request.format,
        selection = %request.selection,
        messages = conversation.messages.len(),
        "export rendered"
    );

    Ok(ExportedDocument {
        filename,
        mime_type: request.format.mime_type(),
        contents,
        conversation,
    })
}

/// Hand a rendered export to `downloader`. Failures are not retried.
pub fn save(document: &ExportedDocument, downloader: &dyn Downloader) -> Result<PathBuf> {
    downloader
        .save(&document.filename, document.mime_type, document.contents.as_bytes())
        .map_err(|err| Error::download(&document.filename, err))
}
