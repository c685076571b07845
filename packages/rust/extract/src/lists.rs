//! Numbered reading lists (`TEXT BOOKS:`, `REFERENCES:`).

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::paragraph::{Displaced, ParagraphKind, ReservedLabel, displaced_content};
use crate::segment::CourseBlock;
use crate::text::text_lines;

/// `1. ...`, `12. ...`
static NUMBERED_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.").expect("numbered item regex"));

/// Numbered items listed under `label` anywhere in the block.
pub fn harvest(block: &CourseBlock<'_>, label: ReservedLabel) -> Vec<String> {
    block
        .paragraphs()
        .iter()
        .filter(|p| matches!(p.kind, ParagraphKind::ReservedList { .. }))
        .flat_map(|p| harvest_text(&paragraph_lines(p.element), label))
        .collect()
}

/// Line view of `p`, including any list the parser split off it.
fn paragraph_lines(p: ElementRef<'_>) -> String {
    let mut lines = vec![text_lines(p)];
    for node in displaced_content(p) {
        match node {
            Displaced::List(el) => lines.push(text_lines(el)),
            Displaced::Text(text) => lines.push(text.to_string()),
        }
    }
    lines.join("\n")
}

/// Numbered lines following `label` in `text`, stopping at the next
/// reserved label. Textbooks and references often share one paragraph.
pub fn harvest_text(text: &str, label: ReservedLabel) -> Vec<String> {
    let Some(start) = text.find(label.as_str()) else {
        return Vec::new();
    };
    let rest = &text[start + label.as_str().len()..];

    let end = ReservedLabel::ALL
        .iter()
        .filter(|other| **other != label)
        .filter_map(|other| rest.find(other.as_str()))
        .min()
        .unwrap_or(rest.len());

    rest[..end]
        .lines()
        .map(str::trim)
        .filter(|line| NUMBERED_ITEM_RE.is_match(line))
        .map(String::from)
        .collect()
}
