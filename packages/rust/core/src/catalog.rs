//! Regulation and faculty catalogs.
//!
//! Both catalogs are hand-maintained JSON files keyed by display name, so
//! their field names are fixed by the file format rather than by our types.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::debug;

use syllabi_shared::{ProgramSource, Result, SyllabiError};

// ---------------------------------------------------------------------------
// Regulations
// ---------------------------------------------------------------------------

/// Program name → regulation metadata. Ordered so runs are deterministic.
pub type RegulationsCatalog = BTreeMap<String, ProgramMeta>;

/// One program's entry in the regulations catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProgramMeta {
    #[serde(rename = "Program Co-ordinator", default)]
    pub coordinator: Option<String>,
    #[serde(rename = "Year", default, deserialize_with = "year_list")]
    pub years: Vec<String>,
    #[serde(rename = "url", default)]
    pub urls: Vec<String>,
}

impl ProgramMeta {
    /// `(year, url)` pairs for `program_name`, positionally matched. Extra
    /// years or URLs without a partner are dropped.
    pub fn sources(&self, program_name: &str) -> Vec<ProgramSource> {
        if self.years.len() != self.urls.len() {
            debug!(
                program = program_name,
                years = self.years.len(),
                urls = self.urls.len(),
                "year/url count mismatch, extra entries ignored"
            );
        }

        self.years
            .iter()
            .zip(&self.urls)
            .map(|(year, url)| ProgramSource {
                program_name: program_name.to_string(),
                year: year.clone(),
                url: url.clone(),
            })
            .collect()
    }
}

/// Years appear both as strings and as bare numbers.
fn year_list<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Year {
        Text(String),
        Number(i64),
    }

    let years = Vec::<Year>::deserialize(deserializer)?;
    Ok(years
        .into_iter()
        .map(|y| match y {
            Year::Text(s) => s.trim().to_string(),
            Year::Number(n) => n.to_string(),
        })
        .collect())
}

/// Load the regulations catalog from `path`.
pub fn load_regulations(path: &Path) -> Result<RegulationsCatalog> {
    load_json(path, "regulations catalog")
}

// ---------------------------------------------------------------------------
// Faculty
// ---------------------------------------------------------------------------

/// Department → faculty name → profile URL (`null` when unpublished).
pub type FacultyCatalog = BTreeMap<String, BTreeMap<String, Option<String>>>;

/// A faculty member with a profile page to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacultyTarget {
    pub department: String,
    pub name: String,
    pub url: String,
}

/// Every entry with a URL, department by department.
pub fn faculty_targets(catalog: &FacultyCatalog) -> Vec<FacultyTarget> {
    catalog
        .iter()
        .flat_map(|(department, members)| {
            members.iter().filter_map(move |(name, url)| {
                let url = url.as_deref().map(str::trim).filter(|u| !u.is_empty())?;
                Some(FacultyTarget {
                    department: department.clone(),
                    name: name.clone(),
                    url: url.to_string(),
                })
            })
        })
        .collect()
}

/// Load the faculty catalog from `path`.
pub fn load_faculty(path: &Path) -> Result<FacultyCatalog> {
    load_json(path, "faculty catalog")
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|e| SyllabiError::io(path, e))?;
    serde_json::from_str(&content)
        .map_err(|e| SyllabiError::config(format!("invalid {what} {}: {e}", path.display())))
}
