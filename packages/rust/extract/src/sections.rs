//! Labelled content paragraphs of a course block.

use syllabi_shared::ContentSection;

use crate::paragraph::paragraph_text;
use crate::segment::CourseBlock;

/// One [`ContentSection`] per content-labelled paragraph, in document order.
///
/// Credit and prerequisite paragraphs never appear here, nor do paragraphs
/// labelled exactly `TEXT BOOKS:`, `REFERENCES:` or `TUTORIAL PRACTICE:`.
/// Lists the parser split off a paragraph are part of its body.
pub fn extract_content_sections(block: &CourseBlock<'_>) -> Vec<ContentSection> {
    block
        .paragraphs()
        .iter()
        .filter_map(|p| {
            let label = p.kind.content_label()?;
            Some(ContentSection {
                title: label.to_string(),
                content: paragraph_text(p.element)
                    .replacen(label, "", 1)
                    .trim()
                    .to_string(),
            })
        })
        .collect()
}
