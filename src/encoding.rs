//! Snapshot decoding.
//!
//! "Save page as" keeps the original bytes, usually UTF-8 for chat apps,
//! but older saves or proxies may declare another charset. The declared
//! charset is honoured and undecodable bytes become U+FFFD.

#![allow(clippy::expect_used)]

use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Declared charset in `<meta charset>` or an http-equiv Content-Type.
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("META_CHARSET regex")
});

/// Bytes searched for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Encoding the snapshot declares, UTF-8 when it declares none.
///
/// A byte order mark wins over any declaration.
#[must_use]
pub fn detect_encoding(bytes: &[u8]) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(SNIFF_LEN)]);
    META_CHARSET
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode snapshot bytes to UTF-8 text.
///
/// # Examples
///
/// ```
/// use chat_saver::encoding::decode_snapshot;
///
/// let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>";
/// assert!(decode_snapshot(html).contains("Café"));
/// ```
#[must_use]
pub fn decode_snapshot(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, _) = detect_encoding(bytes).decode(bytes);
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_utf8() {
        assert_eq!(detect_encoding(b"<p>plain</p>"), UTF_8);
    }

    #[test]
    fn reads_meta_charset_and_http_equiv() {
        let meta = br#"<head><meta charset="ISO-8859-1"></head>"#;
        assert_eq!(detect_encoding(meta).name(), "windows-1252");

        let equiv = br#"<meta http-equiv="Content-Type" content="text/html; charset=shift_jis">"#;
        assert_eq!(detect_encoding(equiv).name(), "Shift_JIS");
    }

    #[test]
    fn byte_order_mark_wins() {
        let bytes = b"\xEF\xBB\xBF<meta charset=\"windows-1252\"><p>x</p>";
        assert_eq!(detect_encoding(bytes), UTF_8);
        assert!(!decode_snapshot(bytes).starts_with('\u{feff}'));
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let text = decode_snapshot(b"<p>ok \xFF\xFE end</p>");
        assert!(text.contains("ok"));
        assert!(text.contains('\u{fffd}'));
    }
}
