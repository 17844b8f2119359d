//! Chat platform detection.
//!
//! A snapshot is dispatched to a strategy table by the hostname of the page
//! it was saved from. The URL comes from [`Options::url`](crate::Options)
//! or, for a bare snapshot, from its canonical link or `og:url` meta tag.

use std::fmt;
use std::str::FromStr;

use dom_query::Document;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::extractor::strategy::{self, Strategy};
use crate::Options;

/// Supported chat platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    ChatGpt,
    Gemini,
}

impl Platform {
    pub const ALL: [Self; 2] = [Self::ChatGpt, Self::Gemini];

    /// Display name, also the filename prefix.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ChatGpt => "ChatGPT",
            Self::Gemini => "Gemini",
        }
    }

    /// Hostnames served by this platform.
    #[must_use]
    pub const fn hosts(self) -> &'static [&'static str] {
        match self {
            Self::ChatGpt => &["chatgpt.com", "chat.openai.com"],
            Self::Gemini => &["gemini.google.com"],
        }
    }

    /// Ordered extraction strategies for this platform.
    #[must_use]
    pub const fn strategies(self) -> &'static [Strategy] {
        match self {
            Self::ChatGpt => strategy::CHATGPT,
            Self::Gemini => strategy::GEMINI,
        }
    }

    /// Suffixes the platform appends to `<title>`.
    #[must_use]
    pub const fn title_suffixes(self) -> &'static [&'static str] {
        match self {
            Self::ChatGpt => &[" - ChatGPT", " | ChatGPT", " – ChatGPT"],
            Self::Gemini => &[" - Google Gemini", " - Gemini", " | Gemini"],
        }
    }

    /// Page titles that carry no conversation name.
    #[must_use]
    pub const fn generic_titles(self) -> &'static [&'static str] {
        match self {
            Self::ChatGpt => &["ChatGPT", "New chat"],
            Self::Gemini => &["Gemini", "Google Gemini", "Conversation with Gemini"],
        }
    }

    /// Selectors for the highlighted conversation in the sidebar.
    #[must_use]
    pub const fn active_nav_selectors(self) -> &'static [&'static str] {
        match self {
            Self::ChatGpt => &[
                "nav a[aria-current='page']",
                "nav [data-active] a",
                "nav li.active a",
            ],
            Self::Gemini => &[
                ".conversation.selected .conversation-title",
                "[data-test-id='conversation'].selected",
            ],
        }
    }

    /// Selectors for the model picker.
    #[must_use]
    pub const fn model_selectors(self) -> &'static [&'static str] {
        match self {
            Self::ChatGpt => &[
                "[data-testid='model-switcher-dropdown-button']",
                "button[aria-label*='Model selector']",
            ],
            Self::Gemini => &[
                "[data-test-id='bard-mode-menu-button']",
                ".current-mode-title",
            ],
        }
    }

    /// Match a hostname against the known platform hosts.
    #[must_use]
    pub fn from_host(host: &str) -> Option<Self> {
        let host = host.trim_start_matches("www.").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.hosts().iter().any(|h| host == *h))
    }

    /// Match a URL against the known platform hosts.
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().and_then(Self::from_host))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "chatgpt" | "openai" => Ok(Self::ChatGpt),
            "gemini" => Ok(Self::Gemini),
            other => Err(Error::UnsupportedPlatform(other.to_string())),
        }
    }
}

/// URL the snapshot declares for itself.
#[must_use]
pub fn document_url(doc: &Document) -> Option<String> {
    const URL_SOURCES: &[(&str, &str)] = &[
        ("link[rel='canonical']", "href"),
        ("meta[property='og:url']", "content"),
    ];

    URL_SOURCES.iter().find_map(|(selector, attr)| {
        doc.select(selector)
            .attr(attr)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Decide which platform a snapshot belongs to.
///
/// Priority: explicit override, `options.url`, then the document's own URL.
pub fn detect(doc: &Document, options: &Options) -> Result<Platform> {
    if let Some(platform) = options.platform {
        return Ok(platform);
    }

    let url = options.url.clone().or_else(|| document_url(doc));
    match url {
        Some(url) => Platform::from_url(&url).ok_or(Error::UnsupportedPlatform(url)),
        None => Err(Error::UnsupportedPlatform("page URL unknown".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn detects_platform_from_hostname() {
        assert_eq!(Platform::from_url("https://chatgpt.com/c/abc"), Some(Platform::ChatGpt));
        assert_eq!(Platform::from_url("https://chat.openai.com/"), Some(Platform::ChatGpt));
        assert_eq!(Platform::from_url("https://gemini.google.com/app/1"), Some(Platform::Gemini));
        assert_eq!(Platform::from_url("https://example.com/chatgpt.com"), None);
        assert_eq!(Platform::from_url("not a url"), None);
    }

    #[test]
    fn detect_prefers_override_then_options_url() {
        let doc = dom::parse(r#"<link rel="canonical" href="https://gemini.google.com/app/x">"#);

        let forced = Options {
            platform: Some(Platform::ChatGpt),
            ..Options::default()
        };
        assert_eq!(detect(&doc, &forced).unwrap(), Platform::ChatGpt);

        let with_url = Options {
            url: Some("https://chatgpt.com/c/1".to_string()),
            ..Options::default()
        };
        assert_eq!(detect(&doc, &with_url).unwrap(), Platform::ChatGpt);

        assert_eq!(detect(&doc, &Options::default()).unwrap(), Platform::Gemini);
    }

    #[test]
    fn detect_rejects_unknown_pages() {
        let doc = dom::parse(r#"<meta property="og:url" content="https://example.com/">"#);
        assert!(matches!(
            detect(&doc, &Options::default()),
            Err(Error::UnsupportedPlatform(_))
        ));

        let bare = dom::parse("<p>hi</p>");
        assert!(matches!(
            detect(&bare, &Options::default()),
            Err(Error::UnsupportedPlatform(_))
        ));
    }

    #[test]
    fn parses_platform_names() {
        assert_eq!("ChatGPT".parse::<Platform>().unwrap(), Platform::ChatGpt);
        assert_eq!("gemini".parse::<Platform>().unwrap(), Platform::Gemini);
        assert!("claude".parse::<Platform>().is_err());
    }
}
