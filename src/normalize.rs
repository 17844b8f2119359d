//! Text normalization for extracted message text.
//!
//! [`clean_text`] is a pure function over strings and never touches the DOM,
//! so it can be applied to text from any extraction strategy.

use crate::patterns::{MULTIPLE_NEWLINES, NAVIGATION_LINE, TRAILING_LINE_WHITESPACE, UI_ARTIFACT_LINES};

/// Clean raw extracted text.
///
/// Line endings become `\n`, trailing whitespace is removed from every
/// line, message action labels ("Copy code", "Regenerate response") are
/// blanked out, runs of three or more newlines collapse to a single blank
/// line and the result is trimmed.
///
/// Artifact lines are blanked before newlines are collapsed, so applying
/// the function twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use chat_saver::normalize::clean_text;
///
/// let raw = "python\nCopy code\nprint(1)\n\n\n\nDone  ";
/// assert_eq!(clean_text(raw), "python\n\nprint(1)\n\nDone");
/// ```
#[must_use]
pub fn clean_text(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    let text = TRAILING_LINE_WHITESPACE.replace_all(&text, "");

    let text = text
        .split('\n')
        .map(|line| if is_ui_artifact(line) { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n");

    let text = MULTIPLE_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Whether `line` is the label of a message action button.
#[must_use]
pub fn is_ui_artifact(line: &str) -> bool {
    let line = line.trim();
    UI_ARTIFACT_LINES.iter().any(|artifact| line == *artifact)
}

/// Whether `line` is navigation or toolbar chrome rather than conversation text.
#[must_use]
pub fn is_navigation_text(line: &str) -> bool {
    NAVIGATION_LINE.is_match(line.trim())
}

/// Keep the lines of whole-page text that look like conversation content.
#[must_use]
pub fn filter_navigation_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_navigation_text(line))
        .collect::<Vec<_>>()
        .join("\n")
}
