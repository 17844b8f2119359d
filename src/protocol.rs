//! Request/response messages exchanged with the extension surfaces.
//!
//! The popup and the keyboard shortcut both send
//! `{ "action": "generateText", "format": "md", "selectionMode": "lastN", "lastN": 5 }`
//! and expect `{ "success": true, "message": "..." }` or
//! `{ "success": false, "error": "..." }` back.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};
use crate::export::{self, Downloader};
use crate::format::Format;
use crate::options::{ExportRequest, Options, SelectionMode};

/// The only action the core answers.
pub const GENERATE_ACTION: &str = "generateText";

/// Selection mode as spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WireSelectionMode {
    #[default]
    Full,
    LastN,
}

/// Incoming export request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub action: String,

    #[serde(default)]
    pub format: Format,

    #[serde(default)]
    pub selection_mode: WireSelectionMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_n: Option<usize>,
}

impl GenerateRequest {
    /// A `generateText` request for `request`.
    #[must_use]
    pub fn new(request: ExportRequest) -> Self {
        let (selection_mode, last_n) = match request.selection {
            SelectionMode::Full => (WireSelectionMode::Full, None),
            SelectionMode::LastN(n) => (WireSelectionMode::LastN, Some(n)),
        };
        Self {
            action: GENERATE_ACTION.to_string(),
            format: request.format,
            selection_mode,
            last_n,
        }
    }

    /// Parse a JSON request body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|err| Error::InvalidRequest(err.to_string()))
    }
}

impl TryFrom<&GenerateRequest> for ExportRequest {
    type Error = Error;

    fn try_from(request: &GenerateRequest) -> Result<Self> {
        if request.action != GENERATE_ACTION {
            return Err(Error::InvalidRequest(format!("unknown action: {}", request.action)));
        }

        let selection = match request.selection_mode {
            WireSelectionMode::Full => SelectionMode::Full,
            WireSelectionMode::LastN => SelectionMode::last(request.last_n.unwrap_or(0)),
        };

        Ok(Self {
            format: request.format,
            selection,
        })
    }
}

/// Outgoing result of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerateResponse {
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(error: &Error) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
        }
    }
}

/// Answer one request against the snapshot in `html`.
///
/// Never panics and never returns an error; failures become an
/// unsuccessful response with a readable message.
#[must_use]
pub fn handle_request(
    html: &str,
    options: &Options,
    request: &GenerateRequest,
    downloader: &dyn Downloader,
) -> GenerateResponse {
    let outcome = ExportRequest::try_from(request)
        .and_then(|req| export::export_document(html, options, &req, Utc::now()))
        .and_then(|document| export::save(&document, downloader).map(|path| (document, path)));

    match outcome {
        Ok((document, path)) => GenerateResponse::ok(format!(
            "Saved {} messages to {}",
            document.conversation.messages.len(),
            path.display()
        )),
        Err(err) => {
            warn!(error = %err, "request failed");
            GenerateResponse::failed(&err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_popup_request() {
        let request =
            GenerateRequest::from_json(r#"{"action":"generateText","format":"md","selectionMode":"lastN","lastN":5}"#)
                .unwrap();
        let export = ExportRequest::try_from(&request).unwrap();
        assert_eq!(export.format, Format::Md);
        assert_eq!(export.selection, SelectionMode::LastN(5));
    }

    #[test]
    fn shortcut_request_uses_defaults() {
        let request = GenerateRequest::from_json(r#"{"action":"generateText","selectionMode":"full"}"#).unwrap();
        let export = ExportRequest::try_from(&request).unwrap();
        assert_eq!(export, ExportRequest::default());
    }

    #[test]
    fn missing_count_defaults_to_ten() {
        let request = GenerateRequest::from_json(r#"{"action":"generateText","selectionMode":"lastN"}"#).unwrap();
        assert_eq!(ExportRequest::try_from(&request).unwrap().selection, SelectionMode::LastN(10));
    }

    #[test]
    fn rejects_unknown_action_and_bad_json() {
        let request = GenerateRequest::from_json(r#"{"action":"ping"}"#).unwrap();
        assert!(matches!(ExportRequest::try_from(&request), Err(Error::InvalidRequest(_))));
        assert!(GenerateRequest::from_json(r#"{"format":"doc"}"#).is_err());
    }

    #[test]
    fn request_survives_serialization() {
        let request = GenerateRequest::new(ExportRequest {
            format: Format::Json,
            selection: SelectionMode::LastN(3),
        });
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""selectionMode":"lastN""#));
        assert_eq!(GenerateRequest::from_json(&json).unwrap(), request);
    }

    #[test]
    fn response_omits_absent_fields() {
        let json = serde_json::to_string(&GenerateResponse::failed(&Error::NoConversationFound)).unwrap();
        assert_eq!(
            json,
            r#"{"success":false,"error":"No conversation found. Please open a conversation and try again."}"#
        );
    }
}
