//! Per-paragraph classification of a course block.
//!
//! Every `<p>` inside a block is tagged exactly once. The content extractor,
//! list harvester and prerequisite resolver dispatch on the tag instead of
//! re-checking styles and labels, so no paragraph is emitted twice.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::text::collect_text;

/// Inline style of the right-aligned credit line (`L T P C`).
pub const CREDIT_LINE_STYLE: &str = "text-align:right";

/// Inline style of the coloured box holding the prerequisite list.
pub const PREREQUISITE_BANNER_STYLE: &str = "background-color: #92a8d1;color:white";

static PARAGRAPH_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("paragraph selector"));

static BOLD_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("b").expect("bold selector"));

// ---------------------------------------------------------------------------
// Reserved labels
// ---------------------------------------------------------------------------

/// Bold labels whose paragraphs are reading lists rather than course content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedLabel {
    TextBooks,
    References,
    TutorialPractice,
}

impl ReservedLabel {
    pub const ALL: [ReservedLabel; 3] = [
        ReservedLabel::TextBooks,
        ReservedLabel::References,
        ReservedLabel::TutorialPractice,
    ];

    /// The label text as printed in the syllabus.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TextBooks => "TEXT BOOKS:",
            Self::References => "REFERENCES:",
            Self::TutorialPractice => "TUTORIAL PRACTICE:",
        }
    }

    /// The reserved label occurring earliest in `text`, if any.
    pub fn find_in(text: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .filter_map(|kind| text.find(kind.as_str()).map(|pos| (pos, *kind)))
            .min_by_key(|(pos, _)| *pos)
            .map(|(_, kind)| kind)
    }
}

// ---------------------------------------------------------------------------
// Paragraph
// ---------------------------------------------------------------------------

/// What a paragraph is, decided once per paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphKind {
    /// The block's credit line.
    Credit,
    /// The block's prerequisite banner.
    Prerequisite,
    /// A paragraph whose label mentions a reserved reading-list label.
    ReservedList { kind: ReservedLabel, label: String },
    /// A paragraph opening with an ordinary bold label.
    ContentLabeled(String),
    Unlabeled,
}

impl ParagraphKind {
    /// The label under which this paragraph is course content. Reserved
    /// lists count only when their label says more than the bare reserved
    /// text, e.g. `TEXT BOOKS: (latest editions)`.
    pub fn content_label(&self) -> Option<&str> {
        match self {
            Self::ContentLabeled(label) => Some(label.as_str()),
            Self::ReservedList { kind, label } if label != kind.as_str() => Some(label.as_str()),
            _ => None,
        }
    }
}

/// A `<p>` element of a course block together with its classification.
#[derive(Debug, Clone)]
pub struct Paragraph<'a> {
    pub element: ElementRef<'a>,
    pub kind: ParagraphKind,
}

/// Classify all paragraphs below `block`, in document order.
///
/// Only the first credit line and the first prerequisite banner are tagged
/// as such; later look-alikes are classified by their label.
pub fn classify_paragraphs<'a>(block: ElementRef<'a>) -> Vec<Paragraph<'a>> {
    let mut credit_seen = false;
    let mut banner_seen = false;

    block
        .select(&PARAGRAPH_SEL)
        .map(|element| {
            let kind = if !credit_seen && is_credit_line(element) {
                credit_seen = true;
                ParagraphKind::Credit
            } else if !banner_seen && is_prerequisite_banner(element) {
                banner_seen = true;
                ParagraphKind::Prerequisite
            } else {
                match bold_label(element) {
                    Some(label) => match ReservedLabel::find_in(&label) {
                        Some(kind) => ParagraphKind::ReservedList { kind, label },
                        None => ParagraphKind::ContentLabeled(label),
                    },
                    None => ParagraphKind::Unlabeled,
                }
            };
            Paragraph { element, kind }
        })
        .collect()
}

/// Whether `p` is the prerequisite box. The box is recognised only by its
/// inline colours, so this is the single place that knows about them.
pub fn is_prerequisite_banner(p: ElementRef<'_>) -> bool {
    style_matches(p, PREREQUISITE_BANNER_STYLE)
}

/// Whether `p` is the right-aligned credit line.
pub fn is_credit_line(p: ElementRef<'_>) -> bool {
    style_matches(p, CREDIT_LINE_STYLE)
}

/// Text of the first bold run in `p`, trimmed. Empty runs count as no label.
pub fn bold_label(p: ElementRef<'_>) -> Option<String> {
    p.select(&BOLD_SEL)
        .next()
        .map(|b| collect_text(b).trim().to_string())
        .filter(|label| !label.is_empty())
}

// ---------------------------------------------------------------------------
// Displaced lists
// ---------------------------------------------------------------------------

/// A node the HTML parser moved out of a paragraph.
#[derive(Debug, Clone, Copy)]
pub enum Displaced<'a> {
    List(ElementRef<'a>),
    Text(&'a str),
}

/// Nodes that belong to `p` but were placed after it.
///
/// A list start tag closes an open `<p>`, so the list lands behind the
/// paragraph and the source's own `</p>` turns into an empty `<p>` after it.
/// Only a run of lists (and text between them) ending at such an empty `<p>`
/// is returned; any other sibling sequence yields nothing.
pub fn displaced_content<'a>(p: ElementRef<'a>) -> Vec<Displaced<'a>> {
    let mut run = Vec::new();

    for node in p.next_siblings() {
        if let Some(text) = node.value().as_text() {
            run.push(Displaced::Text(&text[..]));
            continue;
        }
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        match el.value().name() {
            "ul" | "ol" | "li" => run.push(Displaced::List(el)),
            "p" if is_parser_closing_marker(el) => {
                let has_list = run.iter().any(|n| matches!(n, Displaced::List(_)));
                return if has_list { run } else { Vec::new() };
            }
            _ => break,
        }
    }

    Vec::new()
}

/// Text of `p` followed by the text of its displaced lists.
pub fn paragraph_text(p: ElementRef<'_>) -> String {
    let mut text = collect_text(p);
    for node in displaced_content(p) {
        match node {
            Displaced::List(el) => text.push_str(&collect_text(el)),
            Displaced::Text(t) => text.push_str(t),
        }
    }
    text
}

/// The empty `<p>` the parser creates for an unmatched `</p>`.
fn is_parser_closing_marker(el: ElementRef<'_>) -> bool {
    el.value().attrs().next().is_none() && !el.has_children()
}

fn style_matches(el: ElementRef<'_>, expected: &str) -> bool {
    el.value()
        .attr("style")
        .is_some_and(|style| normalize_style(style) == normalize_style(expected))
}

/// Lowercase, drop whitespace and trailing semicolons.
fn normalize_style(style: &str) -> String {
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();
    compact.trim_end_matches(';').to_string()
}
