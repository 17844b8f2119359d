//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate, plus [`inner_text`], which
//! renders an element the way a browser's `innerText` would: block
//! elements on their own lines, collapsed whitespace, preformatted text
//! kept verbatim and non-rendered elements skipped.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

/// Elements whose content is never rendered as text.
const SKIPPED_ELEMENTS: &[&str] = &[
    "script", "style", "noscript", "template", "svg", "head", "title", "meta", "link",
];

/// Elements that start and end a line.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "details", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "header", "hr", "li", "main",
    "nav", "ol", "section", "summary", "table", "tbody", "thead", "tfoot", "tr", "ul",
    "user-query", "model-response", "infinite-scroller",
];

/// Elements separated from their neighbours by a blank line.
const PARAGRAPH_ELEMENTS: &[&str] = &["p", "pre", "h1", "h2", "h3", "h4", "h5", "h6"];

/// Table cells are separated by a tab, like `innerText` does.
const CELL_ELEMENTS: &[&str] = &["td", "th"];

// === Attribute Operations ===

/// Get element class attribute
#[inline]
#[must_use]
pub fn class_name(sel: &Selection) -> Option<String> {
    sel.attr("class").map(|s| s.to_string())
}

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Querying ===

/// Every element matched by `selector`, in document order, as single-node selections.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, selector: &str) -> Vec<Selection<'a>> {
    root.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

/// First selector in `selectors` that matches anything under `root`.
///
/// Unlike a comma-joined selector this respects priority, not document order.
#[must_use]
pub fn first_match<'a>(root: &Selection<'a>, selectors: &[&str]) -> Option<Selection<'a>> {
    selectors.iter().find_map(|selector| {
        let found = root.select(selector);
        found
            .nodes()
            .first()
            .map(|node| Selection::from(*node))
    })
}

// === Text Content ===

/// Raw concatenated text of the node and its descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Text of the first node in `sel`, laid out like a browser's `innerText`.
#[must_use]
pub fn inner_text(sel: &Selection) -> String {
    let mut builder = TextBuilder::default();
    if let Some(node) = sel.nodes().first() {
        walk(&Selection::from(*node), &mut builder, false);
    }
    builder.out
}

fn walk(el: &Selection, out: &mut TextBuilder, preformatted: bool) {
    let Some(node) = el.nodes().first() else {
        return;
    };

    for child_node in node.children() {
        if child_node.is_element() {
            let child = Selection::from(child_node);
            let tag = tag_name(&child).unwrap_or_default();

            if SKIPPED_ELEMENTS.contains(&tag.as_str()) || child.has_attr("hidden") {
                continue;
            }

            if tag == "br" {
                out.push_literal("\n");
                continue;
            }

            let breaks = if PARAGRAPH_ELEMENTS.contains(&tag.as_str()) {
                2
            } else if BLOCK_ELEMENTS.contains(&tag.as_str()) {
                1
            } else {
                0
            };

            out.request_break(breaks);
            if CELL_ELEMENTS.contains(&tag.as_str()) && !out.at_line_start() {
                out.push_literal("\t");
            }
            walk(&child, out, preformatted || tag == "pre" || tag == "textarea");
            out.request_break(breaks);
        } else if child_node.is_text() {
            let text = child_node.text();
            if preformatted {
                out.push_literal(&text);
            } else {
                out.push_collapsed(&text);
            }
        }
    }
}

/// Accumulates rendered text, deferring separators until real text follows.
#[derive(Default)]
struct TextBuilder {
    out: String,
    pending_breaks: usize,
    pending_space: bool,
}

impl TextBuilder {
    fn request_break(&mut self, count: usize) {
        self.pending_breaks = self.pending_breaks.max(count);
    }

    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n') || self.pending_breaks > 0
    }

    fn flush_separator(&mut self) {
        if self.pending_breaks > 0 {
            if !self.out.is_empty() {
                let have = self.out.len() - self.out.trim_end_matches('\n').len();
                for _ in have..self.pending_breaks {
                    self.out.push('\n');
                }
            }
        } else if self.pending_space && !self.out.is_empty() && !self.out.ends_with(char::is_whitespace) {
            self.out.push(' ');
        }
        self.pending_breaks = 0;
        self.pending_space = false;
    }

    fn push_literal(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.flush_separator();
        self.out.push_str(text);
    }

    fn push_collapsed(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                self.pending_space = true;
            } else {
                self.flush_separator();
                self.out.push(ch);
            }
        }
    }
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_text(html: &str) -> String {
        let doc = parse(html);
        inner_text(&doc.select("body"))
    }

    #[test]
    fn test_parse_and_attributes() {
        let doc = parse(r#"<div id="main" class="container" data-x="1">content</div>"#);
        let div = doc.select("div");

        assert_eq!(class_name(&div), Some("container".to_string()));
        assert_eq!(get_attribute(&div, "data-x"), Some("1".to_string()));
        assert_eq!(get_attribute(&div, "data-y"), None);
        assert_eq!(tag_name(&div), Some("div".to_string()));
    }

    #[test]
    fn test_query_all_preserves_document_order() {
        let doc = parse("<user-query>a</user-query><model-response>b</model-response><user-query>c</user-query>");
        let found = query_all(&doc.select("body"), "user-query, model-response");
        let tags: Vec<_> = found.iter().filter_map(tag_name).collect();
        assert_eq!(tags, ["user-query", "model-response", "user-query"]);
    }

    #[test]
    fn test_first_match_respects_priority() {
        let doc = parse(r#"<main>second</main><div role="main">first</div>"#);
        let found = first_match(&doc.select("body"), &["[role='main']", "main"]).unwrap();
        assert_eq!(text_content(&found), "first".into());
        assert!(first_match(&doc.select("body"), &["article"]).is_none());
    }

    #[test]
    fn test_inner_text_separates_blocks() {
        assert_eq!(body_text("<div>one</div><div>two</div>"), "one\ntwo");
        assert_eq!(body_text("<p>one</p><p>two</p>"), "one\n\ntwo");
        assert_eq!(body_text("<span>one</span> <b>two</b>"), "one two");
        assert_eq!(body_text("line<br>break"), "line\nbreak");
    }

    #[test]
    fn test_inner_text_collapses_whitespace() {
        assert_eq!(body_text("<div>\n   hello \n\t world  </div>"), "hello world");
    }

    #[test]
    fn test_inner_text_keeps_preformatted_text() {
        let text = body_text("<p>code:</p><pre><code>fn main() {\n    run();\n}</code></pre>");
        assert_eq!(text, "code:\n\nfn main() {\n    run();\n}");
    }

    #[test]
    fn test_inner_text_skips_hidden_and_scripts() {
        let text = body_text(r#"<div>shown<script>var x = 1;</script><style>p{}</style><span hidden>secret</span></div>"#);
        assert_eq!(text, "shown");
    }

    #[test]
    fn test_inner_text_of_empty_selection() {
        let doc = parse("<div>content</div>");
        assert_eq!(inner_text(&doc.select("article")), "");
    }

    #[test]
    fn test_inner_text_table_cells() {
        let text = body_text("<table><tr><td>a</td><td>b</td></tr><tr><td>c</td><td>d</td></tr></table>");
        assert_eq!(text, "a\tb\nc\td");
    }
}
