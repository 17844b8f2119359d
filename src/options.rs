//! Configuration options for extraction and export.
//!
//! The `Options` struct carries page context a bare snapshot cannot supply
//! (URL, title) together with the thresholds used by the extraction
//! strategies. [`ExportRequest`] describes a single user action.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::format::Format;
use crate::platform::Platform;
use crate::result::Message;

/// Number of messages kept by `lastN` when the caller gives none.
pub const DEFAULT_LAST_N: usize = 10;

/// Configuration options for extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use chat_saver::Options;
///
/// let options = Options {
///     url: Some("https://chatgpt.com/c/abc".to_string()),
///     ..Options::default()
/// };
/// assert_eq!(options.min_turn_chars, 20);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// URL the page was saved from. Drives platform detection.
    ///
    /// Default: `None` (read from the snapshot's canonical link)
    pub url: Option<String>,

    /// Live page title, when the snapshot's `<title>` is stale.
    ///
    /// Default: `None`
    pub title: Option<String>,

    /// Force a platform instead of detecting it.
    ///
    /// Default: `None`
    pub platform: Option<Platform>,

    /// Turn groups shorter than this (characters) are UI chrome.
    ///
    /// Default: `20`
    pub min_turn_chars: usize,

    /// A main content region must exceed this many characters.
    ///
    /// Default: `100`
    pub min_region_chars: usize,

    /// Minimum visible page text for the last-resort fallback.
    ///
    /// Default: `20`
    pub min_fallback_chars: usize,

    /// Length of a title derived from the first user message.
    ///
    /// Default: `50`
    pub title_max_chars: usize,

    /// Length cap of each sanitized filename component.
    ///
    /// Default: `50`
    pub filename_max_chars: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            url: None,
            title: None,
            platform: None,
            min_turn_chars: 20,
            min_region_chars: 100,
            min_fallback_chars: 20,
            title_max_chars: 50,
            filename_max_chars: 50,
        }
    }
}

/// Which part of the conversation to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Every message.
    #[default]
    Full,
    /// The final `n` messages.
    LastN(usize),
}

impl SelectionMode {
    /// `LastN`, with zero replaced by [`DEFAULT_LAST_N`].
    #[must_use]
    pub const fn last(n: usize) -> Self {
        if n == 0 {
            Self::LastN(DEFAULT_LAST_N)
        } else {
            Self::LastN(n)
        }
    }

    /// Truncate `messages` to the selection, preserving order.
    #[must_use]
    pub fn apply(self, mut messages: Vec<Message>) -> Vec<Message> {
        if let Self::LastN(n) = self {
            let n = if n == 0 { DEFAULT_LAST_N } else { n };
            if messages.len() > n {
                messages.drain(..messages.len() - n);
            }
        }
        messages
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::LastN(n) => write!(f, "last {n}"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = Error;

    /// Accepts `full`, `lastN` (default count) or `lastN:<count>`.
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            None if s.eq_ignore_ascii_case("full") => Ok(Self::Full),
            None if s.eq_ignore_ascii_case("lastn") => Ok(Self::last(DEFAULT_LAST_N)),
            Some((mode, n)) if mode.eq_ignore_ascii_case("lastn") => n
                .trim()
                .parse::<usize>()
                .map(Self::last)
                .map_err(|_| Error::InvalidRequest(format!("bad message count: {n}"))),
            _ => Err(Error::InvalidRequest(format!("unknown selection mode: {s}"))),
        }
    }
}

/// One export action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportRequest {
    pub format: Format,
    pub selection: SelectionMode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Role;

    fn numbered(n: usize) -> Vec<Message> {
        (1..=n).map(|i| Message::new(Role::User, format!("m{i}"))).collect()
    }

    #[test]
    fn last_n_keeps_tail_in_order() {
        let kept = SelectionMode::LastN(5).apply(numbered(15));
        let contents: Vec<_> = kept.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["m11", "m12", "m13", "m14", "m15"]);
    }

    #[test]
    fn last_n_larger_than_sequence_keeps_all() {
        assert_eq!(SelectionMode::LastN(50).apply(numbered(3)).len(), 3);
    }

    #[test]
    fn zero_count_uses_default() {
        assert_eq!(SelectionMode::last(0), SelectionMode::LastN(DEFAULT_LAST_N));
        assert_eq!(SelectionMode::LastN(0).apply(numbered(15)).len(), DEFAULT_LAST_N);
    }

    #[test]
    fn full_keeps_everything() {
        assert_eq!(SelectionMode::Full.apply(numbered(15)).len(), 15);
    }

    #[test]
    fn parses_selection_modes() {
        assert_eq!("full".parse::<SelectionMode>().unwrap(), SelectionMode::Full);
        assert_eq!("lastN".parse::<SelectionMode>().unwrap(), SelectionMode::LastN(10));
        assert_eq!("lastN:3".parse::<SelectionMode>().unwrap(), SelectionMode::LastN(3));
        assert!("some".parse::<SelectionMode>().is_err());
        assert!("lastN:x".parse::<SelectionMode>().is_err());
    }
}
