//! Program assembly and output writing.
//!
//! Combines extracted course records with their source metadata and writes
//! program records, faculty profiles and the run manifest to disk.

use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use syllabi_shared::{
    CURRENT_SCHEMA_VERSION, CourseRecord, FacultyProfile, ManifestEntry, ProgramRecord,
    ProgramSource, Result, RunManifest, SyllabiError,
};

/// File name of the run manifest inside the regulations directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Tool version recorded in manifests.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the program record for one regulation document.
///
/// Records with neither a code nor a title are dropped; everything else is
/// kept in page order. `coordinator` is left for enrichment.
#[instrument(skip_all, fields(program = %source.program_name, year = %source.year))]
pub fn assemble_program(source: &ProgramSource, courses: Vec<CourseRecord>) -> ProgramRecord {
    let total = courses.len();
    let courses: Vec<CourseRecord> = courses
        .into_iter()
        .filter(CourseRecord::is_identifiable)
        .collect();

    if courses.len() < total {
        debug!(dropped = total - courses.len(), "dropped unidentifiable blocks");
    }

    ProgramRecord {
        program_name: source.program_name.clone(),
        year: source.year.clone(),
        courses,
        source_url: source.url.clone(),
        coordinator: None,
    }
}

// ---------------------------------------------------------------------------
// Output paths
// ---------------------------------------------------------------------------

/// `M.Sc Software Systems`, `2020` → `M.Sc_Software_Systems_2020.json`.
pub fn program_file_name(program_name: &str, year: &str) -> String {
    format!("{}_{}.json", sanitize(program_name), sanitize(year))
}

/// Profile file name: the member's name, or the URL id when the page had none.
pub fn faculty_file_name(profile: &FacultyProfile) -> String {
    let stem = if profile.name.trim().is_empty() {
        profile.url_id.as_str()
    } else {
        profile.name.trim()
    };
    format!("{}.json", sanitize(stem))
}

/// Spaces become `_`; path separators become `-`.
fn sanitize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' => '_',
            '/' | '\\' => '-',
            other => other,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// A program file written during a run.
#[derive(Debug, Clone)]
pub struct WrittenProgram {
    pub path: PathBuf,
    pub entry: ManifestEntry,
}

/// Write `record` into `dir`, returning the manifest entry for it.
///
/// `markup` is the page the record was extracted from; its hash goes into the
/// manifest entry.
pub fn write_program(dir: &Path, record: &ProgramRecord, markup: &str) -> Result<WrittenProgram> {
    let file_name = program_file_name(&record.program_name, &record.year);
    let path = dir.join(&file_name);
    write_json(&path, record)?;

    info!(
        path = %path.display(),
        courses = record.courses.len(),
        "wrote program record"
    );

    Ok(WrittenProgram {
        entry: ManifestEntry {
            program_name: record.program_name.clone(),
            year: record.year.clone(),
            url: record.source_url.clone(),
            path: file_name,
            course_count: record.courses.len(),
            content_hash: compute_hash(markup),
        },
        path,
    })
}

/// Write a faculty profile into `dir`.
pub fn write_faculty(dir: &Path, profile: &FacultyProfile) -> Result<PathBuf> {
    let path = dir.join(faculty_file_name(profile));
    write_json(&path, profile)?;
    info!(path = %path.display(), name = %profile.name, "wrote faculty profile");
    Ok(path)
}

/// Write `manifest.json` for the programs written in this run.
pub fn write_manifest(dir: &Path, entries: Vec<ManifestEntry>) -> Result<RunManifest> {
    let manifest = RunManifest {
        schema_version: CURRENT_SCHEMA_VERSION,
        tool_version: TOOL_VERSION.to_string(),
        generated_at: Utc::now(),
        entries,
    };
    write_json(&dir.join(MANIFEST_FILE), &manifest)?;
    Ok(manifest)
}

/// Read back a manifest written by [`write_manifest`].
pub fn read_manifest(dir: &Path) -> Result<RunManifest> {
    let path = dir.join(MANIFEST_FILE);
    let content = std::fs::read_to_string(&path).map_err(|e| SyllabiError::io(&path, e))?;
    let manifest: RunManifest = serde_json::from_str(&content)
        .map_err(|e| SyllabiError::validation(format!("invalid {MANIFEST_FILE}: {e}")))?;

    if manifest.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(SyllabiError::validation(format!(
            "unsupported schema_version: {} (expected {})",
            manifest.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(manifest)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Write pretty JSON atomically (temp file, then rename).
fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| SyllabiError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(data)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp = path.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, &json).map_err(|e| SyllabiError::io(&temp, e))?;
    std::fs::rename(&temp, path).map_err(|e| SyllabiError::io(path, e))?;

    debug!(path = %path.display(), "wrote JSON file");
    Ok(())
}

/// Compute SHA-256 hash of content.
pub(crate) fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use syllabi_shared::CourseType;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "syllabi-assembler-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn source() -> ProgramSource {
        ProgramSource {
            program_name: "M.Sc Theoretical Computer Science".into(),
            year: "2020".into(),
            url: "https://www.psgtech.edu/syllabus/xt2020.php".into(),
        }
    }

    fn course(code: Option<&str>, title: &str) -> CourseRecord {
        CourseRecord {
            code: code.map(String::from),
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn assemble_drops_unidentifiable_records() {
        let record = assemble_program(
            &source(),
            vec![
                course(Some("20XT21"), "Graph Theory"),
                course(None, ""),
                course(None, "Programme Educational Objectives"),
                course(Some("20XTP1"), ""),
            ],
        );

        assert_eq!(record.program_name, "M.Sc Theoretical Computer Science");
        assert_eq!(record.year, "2020");
        assert_eq!(record.source_url, "https://www.psgtech.edu/syllabus/xt2020.php");
        assert_eq!(record.coordinator, None);

        let titles: Vec<&str> = record.courses.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Graph Theory", "Programme Educational Objectives", ""]);
    }

    #[test]
    fn file_names() {
        assert_eq!(
            program_file_name("M.Sc Software Systems", "2020"),
            "M.Sc_Software_Systems_2020.json"
        );
        assert_eq!(program_file_name("B.E. CSE/AI", "2022"), "B.E._CSE-AI_2022.json");

        let mut profile = FacultyProfile {
            name: "Dr. A. Example".into(),
            url_id: "amcs101".into(),
            ..Default::default()
        };
        assert_eq!(faculty_file_name(&profile), "Dr._A._Example.json");

        profile.name = "  ".into();
        assert_eq!(faculty_file_name(&profile), "amcs101.json");
    }

    #[test]
    fn write_program_and_manifest() {
        let dir = temp_dir();
        let mut record = assemble_program(&source(), vec![course(Some("20XT21"), "Graph Theory")]);
        record.courses[0].course_type = CourseType::Regular;

        let markup = "<html><body><section class=\"section\"></section></body></html>";
        let written = write_program(&dir.join("regulations"), &record, markup).unwrap();
        assert!(written.path.exists());
        assert_eq!(written.entry.course_count, 1);
        assert_eq!(written.entry.content_hash.len(), 64);

        // No temp file left behind.
        let leftovers: Vec<_> = std::fs::read_dir(dir.join("regulations"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());

        let content = std::fs::read_to_string(&written.path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["url"], "https://www.psgtech.edu/syllabus/xt2020.php");
        assert!(json.get("coordinator").is_none());
        assert_eq!(json["courses"][0]["course_type"], "regular");

        write_manifest(&dir.join("regulations"), vec![written.entry.clone()]).unwrap();
        let manifest = read_manifest(&dir.join("regulations")).unwrap();
        assert_eq!(manifest.schema_version, CURRENT_SCHEMA_VERSION);
        assert_eq!(manifest.entries.len(), 1);
        assert_eq!(manifest.entries[0].path, "M.Sc_Theoretical_Computer_Science_2020.json");
        assert_eq!(manifest.entries[0].content_hash, compute_hash(markup));
        assert_ne!(manifest.entries[0].content_hash, compute_hash(&content));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rewrite_replaces_previous_file() {
        let dir = temp_dir();
        let markup = "<html><body></body></html>";
        let mut record = assemble_program(&source(), vec![course(Some("20XT21"), "Graph Theory")]);
        let first = write_program(&dir, &record, markup).unwrap();

        record.coordinator = Some("Dr. A. Example".into());
        let second = write_program(&dir, &record, markup).unwrap();

        assert_eq!(first.path, second.path);
        // Same page, same hash, whatever enrichment changed in the record.
        assert_eq!(first.entry.content_hash, second.entry.content_hash);
        let content = std::fs::read_to_string(&second.path).unwrap();
        assert!(content.contains("Dr. A. Example"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_manifest_rejects_unknown_schema() {
        let dir = temp_dir();
        let manifest = RunManifest {
            schema_version: 99,
            tool_version: "0.0.0".into(),
            generated_at: Utc::now(),
            entries: vec![],
        };
        std::fs::write(
            dir.join(MANIFEST_FILE),
            serde_json::to_string(&manifest).unwrap(),
        )
        .unwrap();

        let err = read_manifest(&dir).unwrap_err();
        assert!(err.to_string().contains("schema_version"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn compute_hash_is_sha256() {
        assert_eq!(
            compute_hash("hello world"),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }
}
