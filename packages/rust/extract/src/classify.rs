//! Course code detection and classification from block headings.

use std::sync::LazyLock;

use regex::Regex;
use syllabi_shared::CourseType;

/// Any `digits + capitals + digits` token, e.g. `20XT21`.
static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[A-Z]+\d+").expect("course code regex"));

/// `DD LL DD`; the first digit after the letters is the semester.
static REGULAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}[A-Z]{2}(\d)(\d)").expect("regular code regex"));

/// `DD LL [E|A] D`.
static PROFESSIONAL_ELECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{2}[A-Z]{2}[EA]\d").expect("professional elective code regex")
});

/// `DD LL O D`.
static OPEN_ELECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}[A-Z]{2}O\d").expect("open elective code regex"));

/// Result of parsing a course heading.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeClassification {
    pub code: Option<String>,
    pub title: String,
    pub course_type: CourseType,
    pub semester: Option<u8>,
}

/// Split a heading into code and title and classify the code.
///
/// A heading without a code is valid: it becomes an unclassified record
/// titled with the whole heading.
pub fn classify_heading(heading: &str) -> CodeClassification {
    let Some(found) = CODE_RE.find(heading) else {
        return CodeClassification {
            title: heading.trim().to_string(),
            ..Default::default()
        };
    };

    let code = found.as_str();
    let (course_type, semester) = classify_code(code);

    CodeClassification {
        code: Some(code.to_string()),
        title: heading.replace(code, "").trim().to_string(),
        course_type,
        semester,
    }
}

/// Classify a code by shape. Rules are tried Regular, then professional
/// elective, then open elective; the first match wins.
pub fn classify_code(code: &str) -> (CourseType, Option<u8>) {
    if let Some(caps) = REGULAR_RE.captures(code) {
        // Only the first of the two trailing digits is the semester.
        let semester = caps[1].parse().ok();
        (CourseType::Regular, semester)
    } else if PROFESSIONAL_ELECTIVE_RE.is_match(code) {
        (CourseType::ProfessionalElective, None)
    } else if OPEN_ELECTIVE_RE.is_match(code) {
        (CourseType::OpenElective, None)
    } else {
        (CourseType::Unclassified, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_course() {
        let c = classify_heading("Data Structures 20CS21");
        assert_eq!(c.code.as_deref(), Some("20CS21"));
        assert_eq!(c.title, "Data Structures");
        assert_eq!(c.course_type, CourseType::Regular);
        assert_eq!(c.semester, Some(2));
    }

    #[test]
    fn semester_is_first_trailing_digit() {
        for (code, semester) in [("20XT11", 1), ("20XT35", 3), ("18MA92", 9), ("20CS07", 0)] {
            let (course_type, sem) = classify_code(code);
            assert_eq!(course_type, CourseType::Regular, "{code}");
            assert_eq!(sem, Some(semester), "{code}");
        }
    }

    #[test]
    fn professional_elective() {
        let c = classify_heading("Elective III 20CSE2");
        assert_eq!(c.code.as_deref(), Some("20CSE2"));
        assert_eq!(c.title, "Elective III");
        assert_eq!(c.course_type, CourseType::ProfessionalElective);
        assert_eq!(c.semester, None);

        assert_eq!(classify_code("20XTA1"), (CourseType::ProfessionalElective, None));
    }

    #[test]
    fn open_elective() {
        let c = classify_heading("20XTO2 Data Visualization");
        assert_eq!(c.course_type, CourseType::OpenElective);
        assert_eq!(c.title, "Data Visualization");
        assert_eq!(c.semester, None);
    }

    #[test]
    fn unknown_shape_keeps_code() {
        let c = classify_heading("Project Work 20XTP1");
        assert_eq!(c.code.as_deref(), Some("20XTP1"));
        assert_eq!(c.title, "Project Work");
        assert_eq!(c.course_type, CourseType::Unclassified);
        assert_eq!(c.semester, None);

        // Three-digit year prefix does not fit any rule.
        assert_eq!(classify_code("202CS21"), (CourseType::Unclassified, None));
    }

    #[test]
    fn heading_without_code() {
        let c = classify_heading("  Programme Educational Objectives ");
        assert_eq!(c.code, None);
        assert_eq!(c.title, "Programme Educational Objectives");
        assert_eq!(c.course_type, CourseType::Unclassified);

        // Lowercase letters are not a code.
        assert_eq!(classify_heading("Lab 20cs21").code, None);
    }

    #[test]
    fn empty_heading() {
        let c = classify_heading("");
        assert_eq!(c, CodeClassification::default());
    }

    #[test]
    fn first_code_wins_and_all_copies_are_removed() {
        let c = classify_heading("20CS21 Data Structures (20CS21)");
        assert_eq!(c.code.as_deref(), Some("20CS21"));
        assert_eq!(c.title, "Data Structures ()");
    }
}
