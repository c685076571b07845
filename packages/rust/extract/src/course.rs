//! Course record extraction for one block and for a whole page.

use scraper::Html;
use syllabi_shared::CourseRecord;
use tracing::{debug, instrument};

use crate::classify::classify_heading;
use crate::lists::harvest;
use crate::paragraph::{ParagraphKind, ReservedLabel};
use crate::prereq::resolve_prerequisites;
use crate::sections::extract_content_sections;
use crate::segment::{CourseBlock, segment};
use crate::text::collect_text;

/// Build the record for a single block. Every field is derived from the
/// block's own subtree.
pub fn extract_course(block: &CourseBlock<'_>) -> CourseRecord {
    let heading = block.heading().unwrap_or_default();
    let classification = classify_heading(&heading);

    CourseRecord {
        code: classification.code,
        title: classification.title,
        semester: classification.semester,
        course_type: classification.course_type,
        credits: credit_line(block),
        prerequisites: resolve_prerequisites(block),
        content_sections: extract_content_sections(block),
        textbooks: harvest(block, ReservedLabel::TextBooks),
        references: harvest(block, ReservedLabel::References),
    }
}

/// Records for every course block of `doc`, in page order. Blocks without a
/// usable heading are kept here; the assembler decides what to emit.
#[instrument(skip_all)]
pub fn extract_courses(doc: &Html) -> Vec<CourseRecord> {
    let blocks = segment(doc);
    debug!(blocks = blocks.len(), "segmented syllabus page");

    blocks.iter().map(extract_course).collect()
}

/// The credit line's text, unless it is a `Total ...` summary.
fn credit_line(block: &CourseBlock<'_>) -> Option<String> {
    let paragraph = block.find(&ParagraphKind::Credit)?;
    let text = collect_text(paragraph.element);
    let text = text.trim();

    if text.starts_with("Total") {
        None
    } else {
        Some(text.to_string())
    }
}
