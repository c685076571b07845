//! Core domain types for scraped curriculum and faculty records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current schema version for the run manifest format.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// CourseType
// ---------------------------------------------------------------------------

/// Course category derived from the shape of the course code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    /// `DD LL DD`, e.g. `20CS21`.
    Regular,
    /// `DD LL [E|A] D`, e.g. `20CSE2`.
    ProfessionalElective,
    /// `DD LL O D`, e.g. `20CSO1`.
    OpenElective,
    #[default]
    Unclassified,
}

impl CourseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::ProfessionalElective => "professional_elective",
            Self::OpenElective => "open_elective",
            Self::Unclassified => "unclassified",
        }
    }
}

impl std::fmt::Display for CourseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CourseRecord
// ---------------------------------------------------------------------------

/// One prerequisite line of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PrerequisiteEntry {
    /// A link to another course on the same page.
    CrossReference {
        #[serde(rename = "course")]
        course_name: String,
        #[serde(rename = "code", default, skip_serializing_if = "Option::is_none")]
        linked_code: Option<String>,
    },
    /// Free text, kept as written.
    Label(String),
}

/// A bold-labelled paragraph of course content (e.g. a unit description).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    pub title: String,
    pub content: String,
}

/// Everything extracted from one course block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    /// Course code, absent when the heading carried none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Heading text without the code.
    pub title: String,
    /// Only set for [`CourseType::Regular`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semester: Option<u8>,
    #[serde(default)]
    pub course_type: CourseType,
    /// Credit line as printed (e.g. `3 0 0 3`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credits: Option<String>,
    /// `None` when the block has no prerequisite banner at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisites: Option<Vec<PrerequisiteEntry>>,
    #[serde(rename = "content", default)]
    pub content_sections: Vec<ContentSection>,
    #[serde(default)]
    pub textbooks: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
}

impl CourseRecord {
    /// Whether the record carries a code or a non-empty title.
    pub fn is_identifiable(&self) -> bool {
        self.code.is_some() || !self.title.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ProgramRecord
// ---------------------------------------------------------------------------

/// Page-level metadata of one syllabus document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    pub program_name: String,
    pub year: String,
    pub url: String,
}

/// All courses of one program for one regulation year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub program_name: String,
    pub year: String,
    pub courses: Vec<CourseRecord>,
    #[serde(rename = "url")]
    pub source_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinator: Option<String>,
}

// ---------------------------------------------------------------------------
// FacultyProfile
// ---------------------------------------------------------------------------

/// One row of a faculty member's publication table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub journal: String,
    pub title: String,
    pub year: String,
    pub role: String,
    pub volume: String,
}

/// Data scraped from a single faculty profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joining_date: Option<String>,
    #[serde(default)]
    pub qualifications: Vec<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub google_scholar: String,
    #[serde(default)]
    pub in_brief: String,
    #[serde(default)]
    pub research_areas: Vec<String>,
    #[serde(default)]
    pub subject_expertise: Vec<String>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    /// Image path as it appears in the page (usually relative).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub url_id: String,
}

// ---------------------------------------------------------------------------
// RunManifest
// ---------------------------------------------------------------------------

/// The `manifest.json` written next to the program records after a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub schema_version: u32,
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<ManifestEntry>,
}

/// One written program record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub program_name: String,
    pub year: String,
    pub url: String,
    /// File name relative to the manifest's directory.
    pub path: String,
    pub course_count: usize,
    /// SHA-256 of the fetched markup.
    pub content_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regular_course() -> CourseRecord {
        CourseRecord {
            code: Some("20CS21".into()),
            title: "Data Structures".into(),
            semester: Some(2),
            course_type: CourseType::Regular,
            credits: Some("3 0 0 3".into()),
            prerequisites: None,
            content_sections: vec![],
            textbooks: vec![],
            references: vec![],
        }
    }

    #[test]
    fn absent_fields_are_omitted() {
        let json = serde_json::to_value(regular_course()).expect("serialize");
        let obj = json.as_object().unwrap();

        assert!(!obj.contains_key("prerequisites"));
        assert_eq!(obj["course_type"], "regular");
        assert_eq!(obj["semester"], 2);
        // Empty sequences are still emitted.
        assert_eq!(obj["content"], serde_json::json!([]));
        assert_eq!(obj["textbooks"], serde_json::json!([]));
    }

    #[test]
    fn empty_prerequisites_differ_from_absent() {
        let mut course = regular_course();
        course.prerequisites = Some(vec![]);
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(json["prerequisites"], serde_json::json!([]));
    }

    #[test]
    fn prerequisite_entry_shapes() {
        let entries = vec![
            PrerequisiteEntry::Label("Basic programming".into()),
            PrerequisiteEntry::CrossReference {
                course_name: "Problem Solving".into(),
                linked_code: Some("20CS11".into()),
            },
            PrerequisiteEntry::CrossReference {
                course_name: "Calculus".into(),
                linked_code: None,
            },
        ];

        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0], "Basic programming");
        assert_eq!(json[1], serde_json::json!({"course": "Problem Solving", "code": "20CS11"}));
        assert_eq!(json[2], serde_json::json!({"course": "Calculus"}));

        let parsed: Vec<PrerequisiteEntry> = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, entries);
    }

    #[test]
    fn program_record_field_names() {
        let record = ProgramRecord {
            program_name: "M.Sc Software Systems".into(),
            year: "2020".into(),
            courses: vec![regular_course()],
            source_url: "https://example.edu/syllabus".into(),
            coordinator: None,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["url"], "https://example.edu/syllabus");
        assert!(json.get("coordinator").is_none());
        assert_eq!(json["courses"][0]["code"], "20CS21");
    }

    #[test]
    fn unclassified_is_default() {
        let course: CourseRecord = serde_json::from_str(r#"{"title": "Introduction"}"#).unwrap();
        assert_eq!(course.course_type, CourseType::Unclassified);
        assert!(course.is_identifiable());
        assert!(!CourseRecord::default().is_identifiable());
    }

    #[test]
    fn program_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/program.fixture.json")
            .expect("read fixture");
        let parsed: ProgramRecord =
            serde_json::from_str(&fixture).expect("deserialize fixture program");
        assert_eq!(parsed.program_name, "M.Sc Theoretical Computer Science");
        assert_eq!(parsed.courses.len(), 2);
        assert_eq!(parsed.courses[0].course_type, CourseType::Regular);
        assert_eq!(parsed.courses[1].course_type, CourseType::ProfessionalElective);
        assert!(parsed.courses[1].prerequisites.is_none());
    }
}
