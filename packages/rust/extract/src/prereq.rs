//! Prerequisite list resolution.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};
use syllabi_shared::PrerequisiteEntry;

use crate::paragraph::{Displaced, ParagraphKind, displaced_content};
use crate::segment::CourseBlock;
use crate::text::collect_text;

/// Suffix the syllabus pages append to in-page course anchors.
pub const ANCHOR_SUFFIX: &str = "#a";

static ITEM_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li").expect("list item selector"));

static LINK_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a").expect("link selector"));

/// Resolve the block's prerequisite banner.
///
/// `None` means the block has no banner; `Some(vec![])` means the banner
/// lists nothing.
pub fn resolve_prerequisites(block: &CourseBlock<'_>) -> Option<Vec<PrerequisiteEntry>> {
    let banner = block.find(&ParagraphKind::Prerequisite)?;
    Some(banner_items(banner.element).into_iter().map(resolve_item).collect())
}

/// List items belonging to the banner: those still nested in it, otherwise
/// those the parser moved out of it. Lists that merely follow a closed
/// banner are not its items.
fn banner_items(banner: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let nested: Vec<_> = banner.select(&ITEM_SEL).collect();
    if !nested.is_empty() {
        return nested;
    }

    displaced_content(banner)
        .into_iter()
        .flat_map(|node| match node {
            Displaced::List(el) if el.value().name() == "li" => vec![el],
            Displaced::List(el) => el.select(&ITEM_SEL).collect(),
            Displaced::Text(_) => Vec::new(),
        })
        .collect()
}

fn resolve_item(item: ElementRef<'_>) -> PrerequisiteEntry {
    match item.select(&LINK_SEL).next() {
        Some(link) => PrerequisiteEntry::CrossReference {
            course_name: collect_text(link).trim().to_string(),
            linked_code: link
                .value()
                .attr("href")
                .map(strip_anchor)
                .filter(|code| !code.is_empty()),
        },
        None => PrerequisiteEntry::Label(collect_text(item).trim().to_string()),
    }
}

/// `20XT11#a` → `20XT11`.
pub fn strip_anchor(href: &str) -> String {
    href.trim().replace(ANCHOR_SUFFIX, "")
}
