//! Plain-text rendering of converted HTML
//!
//! Used as the clipboard fallback when rich text cannot be written.

use scraper::{ElementRef, Html, Node};

/// Tags whose entire subtree should be ignored
const SKIP_TAGS: [&str; 4] = ["script", "style", "noscript", "svg"];

/// Tags that start a new line of text
const BLOCK_TAGS: [&str; 18] = [
    "p", "div", "section", "article", "header", "footer", "h1", "h2", "h3", "h4", "h5", "h6",
    "li", "blockquote", "pre", "tr", "table", "figure",
];

/// Extract readable text from an HTML fragment, keeping block boundaries
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    collect_text(fragment.root_element(), &mut out);
    clean_whitespace(&out)
}

fn collect_text(element: ElementRef, out: &mut String) {
    let tag_name = element.value().name();
    if SKIP_TAGS.contains(&tag_name) {
        return;
    }
    if tag_name == "br" {
        out.push('\n');
        return;
    }

    let is_block = BLOCK_TAGS.contains(&tag_name);
    if is_block {
        out.push('\n');
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }

    if is_block {
        out.push('\n');
    }
}

/// Collapse runs of spaces, keep at most one blank line between blocks
fn clean_whitespace(text: &str) -> String {
    let lines: Vec<String> = text
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();

    let mut result = String::with_capacity(text.len());
    let mut blank_run = 0;
    for line in lines {
        if line.is_empty() {
            blank_run += 1;
            continue;
        }
        if !result.is_empty() {
            result.push_str(if blank_run > 0 { "\n\n" } else { "\n" });
        }
        result.push_str(&line);
        blank_run = 0;
    }
    result
}
