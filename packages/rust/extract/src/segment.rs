//! Splits a syllabus page into course blocks.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use crate::paragraph::{Paragraph, ParagraphKind, classify_paragraphs};
use crate::text::collect_text;

static COURSE_SECTION_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.section").expect("course section selector"));

static HEADING_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3").expect("heading selector"));

/// One course's region of the page, with its paragraphs already classified.
#[derive(Debug, Clone)]
pub struct CourseBlock<'a> {
    element: ElementRef<'a>,
    paragraphs: Vec<Paragraph<'a>>,
}

impl<'a> CourseBlock<'a> {
    pub fn new(element: ElementRef<'a>) -> Self {
        Self {
            element,
            paragraphs: classify_paragraphs(element),
        }
    }

    pub fn element(&self) -> ElementRef<'a> {
        self.element
    }

    /// Text of the block's first `h3`, trimmed.
    pub fn heading(&self) -> Option<String> {
        self.element
            .select(&HEADING_SEL)
            .next()
            .map(|h| collect_text(h).trim().to_string())
    }

    pub fn paragraphs(&self) -> &[Paragraph<'a>] {
        &self.paragraphs
    }

    /// The first paragraph tagged with `kind`.
    pub fn find(&self, kind: &ParagraphKind) -> Option<&Paragraph<'a>> {
        self.paragraphs.iter().find(|p| &p.kind == kind)
    }
}

/// All course sections of `doc` (nested ones included), in document order.
pub fn segment(doc: &Html) -> Vec<CourseBlock<'_>> {
    doc.select(&COURSE_SECTION_SEL).map(CourseBlock::new).collect()
}
