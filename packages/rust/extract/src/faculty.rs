//! Faculty profile page extraction.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use syllabi_shared::{FacultyProfile, Publication};
use tracing::{debug, instrument};
use url::Url;

use crate::text::{collect_text, stripped_strings};

/// Path fragment identifying profile photos.
const PHOTO_PATH: &str = "../educms/upload/faculty/";

const ACADEMIC_TITLE: &str = "Academic Title:";
const DEPARTMENT_MARKER: &str = "Dept.";
const JOINING_DATE: &str = "Date of Joining:";
const QUALIFICATIONS: &str = "Educational Qualification(s):";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {css:?}: {e}"))
}

static H1_SEL: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static H5_SEL: LazyLock<Selector> = LazyLock::new(|| selector("h5"));
static H3_SEL: LazyLock<Selector> = LazyLock::new(|| selector("h3"));
static MAILTO_SEL: LazyLock<Selector> = LazyLock::new(|| selector(r#"a[href*="mailto:"]"#));
static SCHOLAR_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"a[href*="scholar.google"]"#));
static LAST_PARAGRAPH_SEL: LazyLock<Selector> = LazyLock::new(|| selector("p.last"));
static TABLE_SEL: LazyLock<Selector> = LazyLock::new(|| selector("table.table"));
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static CELL_SEL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static PHOTO_SEL: LazyLock<Selector> =
    LazyLock::new(|| selector(&format!(r#"img[src*="{PHOTO_PATH}"]"#)));

/// Extract a profile from a parsed faculty page fetched from `url`.
#[instrument(skip(doc))]
pub fn extract_faculty_profile(doc: &Html, url: &str) -> FacultyProfile {
    let name = doc
        .select(&H1_SEL)
        .next()
        .map(|h| collect_text(h).trim().to_string())
        .unwrap_or_default();

    let mut profile = FacultyProfile {
        name,
        url: url.to_string(),
        url_id: url_id(url),
        ..Default::default()
    };

    if let Some(summary) = doc.select(&H5_SEL).next() {
        apply_summary(&mut profile, &collect_text(summary));
    }

    profile.email = first_href(doc, &MAILTO_SEL)
        .map(|href| href.replace("mailto:", ""))
        .unwrap_or_default();
    profile.google_scholar = first_href(doc, &SCHOLAR_SEL).unwrap_or_default();

    profile.in_brief = cv_item_paragraph(doc, "In Brief")
        .map(|p| collect_text(p).trim().to_string())
        .unwrap_or_default();
    profile.research_areas = cv_item_paragraph(doc, "Research Area")
        .map(stripped_strings)
        .unwrap_or_default();
    profile.subject_expertise = cv_item_paragraph(doc, "Subject Expertise")
        .map(stripped_strings)
        .unwrap_or_default();

    profile.publications = publications(doc);

    if let Some(src) = doc
        .select(&PHOTO_SEL)
        .next()
        .and_then(|img| img.value().attr("src"))
    {
        profile.faculty_id = src
            .split_once("faculty/")
            .map(|(_, id)| id.to_string());
        profile.image_url = Some(src.to_string());
    }

    debug!(
        name = %profile.name,
        publications = profile.publications.len(),
        "extracted faculty profile"
    );
    profile
}

/// The query string of the profile URL (`faculty.php?amcs101` → `amcs101`).
fn url_id(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.query().map(String::from))
        .or_else(|| url.split_once('?').map(|(_, q)| q.to_string()))
        .filter(|q| !q.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Fill title, department, joining date and qualifications from the `<h5>` summary.
fn apply_summary(profile: &mut FacultyProfile, text: &str) {
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.contains(ACADEMIC_TITLE) {
            profile.academic_title = Some(line.replace(ACADEMIC_TITLE, "").trim().to_string());
        }
        if line.contains(DEPARTMENT_MARKER) {
            profile.department = Some(line.to_string());
        }
        if line.contains(JOINING_DATE) {
            profile.joining_date = Some(line.replace(JOINING_DATE, "").trim().to_string());
        }
    }

    if let Some((_, rest)) = text.split_once(QUALIFICATIONS) {
        profile.qualifications = rest
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with("Date of"))
            .map(String::from)
            .collect();
    }
}

fn first_href(doc: &Html, sel: &Selector) -> Option<String> {
    doc.select(sel)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(String::from)
}

/// The `p.last` of the `div.cv-item` whose `<h3>` mentions `heading`.
fn cv_item_paragraph<'a>(doc: &'a Html, heading: &str) -> Option<ElementRef<'a>> {
    let h3 = doc
        .select(&H3_SEL)
        .find(|h| collect_text(*h).contains(heading))?;

    let item = h3.ancestors().filter_map(ElementRef::wrap).find(|el| {
        el.value().name() == "div" && el.value().classes().any(|c| c == "cv-item")
    })?;

    item.select(&LAST_PARAGRAPH_SEL).next()
}

/// Rows of the publication table after the header; short rows are skipped.
fn publications(doc: &Html) -> Vec<Publication> {
    let Some(table) = doc.select(&TABLE_SEL).next() else {
        return Vec::new();
    };

    table
        .select(&ROW_SEL)
        .skip(1)
        .filter_map(|row| {
            let cells: Vec<String> = row
                .select(&CELL_SEL)
                .map(|td| collect_text(td).trim().to_string())
                .collect();
            if cells.len() < 6 {
                return None;
            }
            Some(Publication {
                journal: cells[1].clone(),
                title: cells[2].clone(),
                year: cells[3].clone(),
                role: cells[4].clone(),
                volume: cells[5].clone(),
            })
        })
        .collect()
}
