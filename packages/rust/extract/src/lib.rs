//! HTML extraction for syllabus and faculty pages.
//!
//! This crate provides:
//! - [`segment`] — Splits a syllabus page into course blocks
//! - [`paragraph`] — Tags each block paragraph (credit line, banner, labelled)
//! - [`classify`] — Course code detection and classification
//! - [`sections`], [`lists`], [`prereq`] — Per-block field extractors
//! - [`course`] — Combines the extractors into [`CourseRecord`](syllabi_shared::CourseRecord)s
//! - [`faculty`] — Faculty profile pages

pub mod classify;
pub mod course;
pub mod faculty;
pub mod lists;
pub mod paragraph;
pub mod prereq;
pub mod sections;
pub mod segment;

mod text;

pub use classify::{CodeClassification, classify_code, classify_heading};
pub use course::{extract_course, extract_courses};
pub use faculty::extract_faculty_profile;
pub use lists::{harvest, harvest_text};
pub use paragraph::{
    Displaced, Paragraph, ParagraphKind, ReservedLabel, classify_paragraphs, displaced_content,
    is_credit_line, is_prerequisite_banner, paragraph_text,
};
pub use prereq::{resolve_prerequisites, strip_anchor};
pub use sections::extract_content_sections;
pub use segment::{CourseBlock, segment};
