//! Snapshot diagnostics.
//!
//! Reports what each extraction strategy sees in a page. Useful when a
//! chat site changes its markup and exports start coming back empty.

use serde::Serialize;

use crate::dom;
use crate::extractor;
use crate::platform::{self, Platform};
use crate::Options;

/// What one strategy found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StrategyReport {
    pub name: &'static str,
    /// Candidate elements matched by the strategy's selectors.
    pub matched: usize,
    /// Messages the strategy would produce.
    pub messages: usize,
}

/// Summary of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    /// `None` when the page is not a supported platform.
    pub platform: Option<Platform>,
    pub title: String,
    pub body_text_chars: usize,
    pub strategies: Vec<StrategyReport>,
    /// The strategy an export would use.
    pub winner: Option<&'static str>,
}

/// Inspect `html` without exporting anything.
#[must_use]
pub fn inspect(html: &str, options: &Options) -> Diagnostics {
    let doc = dom::parse(html);
    let platform = platform::detect(&doc, options).ok();
    let root = doc.select("html");

    let strategies: Vec<StrategyReport> = platform
        .map(|p| {
            p.strategies()
                .iter()
                .map(|strategy| StrategyReport {
                    name: strategy.name,
                    matched: strategy.match_count(&root),
                    messages: strategy.run(&root, options).len(),
                })
                .collect()
        })
        .unwrap_or_default();

    let winner = platform.and_then(|p| {
        extractor::extract_messages(&doc, p, options)
            .ok()
            .map(|e| e.strategy)
    });

    Diagnostics {
        platform,
        title: doc.select("title").text().trim().to_string(),
        body_text_chars: dom::inner_text(&doc.select("body")).chars().count(),
        strategies,
        winner,
    }
}
