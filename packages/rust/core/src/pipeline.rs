//! End-to-end runs: catalog → fetch → extract → assemble → enrich → write.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use scraper::Html;
use tracing::{info, instrument, warn};

use syllabi_crawler::PageFetcher;
use syllabi_extract::{extract_courses, extract_faculty_profile};
use syllabi_shared::{
    FacultyProfile, ManifestEntry, ProgramRecord, ProgramSource, Result, SyllabiError,
};

use crate::assembler::{self, MANIFEST_FILE};
use crate::catalog::{self, RegulationsCatalog};
use crate::enrichment::attach_coordinator;

/// Configuration for a regulations run.
#[derive(Debug, Clone)]
pub struct RegulationsRunConfig {
    /// Path to the regulations catalog JSON.
    pub catalog_path: PathBuf,
    /// Directory program records and the manifest are written to.
    pub output_dir: PathBuf,
    /// Restrict the run to a single program.
    pub program: Option<String>,
}

/// Configuration for a faculty run.
#[derive(Debug, Clone)]
pub struct FacultyRunConfig {
    /// Path to the faculty catalog JSON.
    pub catalog_path: PathBuf,
    /// Directory profiles are written to.
    pub output_dir: PathBuf,
}

/// A document that could not be processed.
#[derive(Debug, Clone)]
pub struct DocumentFailure {
    /// Human-readable label, e.g. `M.Sc Software Systems 2020`.
    pub label: String,
    pub url: String,
    pub error: String,
}

/// Result of a regulations run.
#[derive(Debug)]
pub struct RegulationsRunResult {
    /// Manifest entries for every program file written.
    pub written: Vec<ManifestEntry>,
    pub failures: Vec<DocumentFailure>,
    pub manifest_path: PathBuf,
    pub elapsed: Duration,
}

/// Result of a faculty run.
#[derive(Debug)]
pub struct FacultyRunResult {
    pub written: Vec<PathBuf>,
    pub failures: Vec<DocumentFailure>,
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before each document is fetched.
    fn document_started(&self, label: &str, current: usize, total: usize);
    /// Called when a document is skipped because of an error.
    fn document_failed(&self, label: &str, error: &str);
    /// Called when the run completes.
    fn done(&self, written: usize, failed: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn document_started(&self, _label: &str, _current: usize, _total: usize) {}
    fn document_failed(&self, _label: &str, _error: &str) {}
    fn done(&self, _written: usize, _failed: usize) {}
}

// ---------------------------------------------------------------------------
// Regulations
// ---------------------------------------------------------------------------

/// Fetch, extract and write every `(program, year)` document in the catalog.
///
/// A failing document is logged, recorded in the result and skipped; only
/// catalog and manifest errors abort the run.
#[instrument(skip_all, fields(catalog = %config.catalog_path.display(), program = ?config.program))]
pub async fn run_regulations<F: PageFetcher>(
    config: &RegulationsRunConfig,
    fetcher: &F,
    progress: &dyn ProgressReporter,
) -> Result<RegulationsRunResult> {
    let start = Instant::now();

    progress.phase("Loading regulations catalog");
    let catalog = catalog::load_regulations(&config.catalog_path)?;

    if let Some(program) = &config.program {
        if !catalog.contains_key(program) {
            return Err(SyllabiError::validation(format!(
                "program {program:?} is not in the regulations catalog"
            )));
        }
    }

    let sources: Vec<ProgramSource> = catalog
        .iter()
        .filter(|(name, _)| config.program.as_ref().is_none_or(|p| p == *name))
        .flat_map(|(name, meta)| meta.sources(name))
        .collect();

    info!(documents = sources.len(), "starting regulations run");
    progress.phase("Extracting regulations");

    let mut written = Vec::new();
    let mut failures = Vec::new();
    let total = sources.len();

    for (i, source) in sources.iter().enumerate() {
        let label = format!("{} {}", source.program_name, source.year);
        progress.document_started(&label, i + 1, total);

        match process_program(fetcher, source, &catalog, &config.output_dir).await {
            Ok(entry) => written.push(entry),
            Err(e) => {
                warn!(url = %source.url, error = %e, "skipping regulation document");
                progress.document_failed(&label, &e.to_string());
                failures.push(DocumentFailure {
                    label,
                    url: source.url.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    progress.phase("Writing manifest");
    assembler::write_manifest(&config.output_dir, written.clone())?;

    let result = RegulationsRunResult {
        written,
        failures,
        manifest_path: config.output_dir.join(MANIFEST_FILE),
        elapsed: start.elapsed(),
    };

    progress.done(result.written.len(), result.failures.len());

    info!(
        written = result.written.len(),
        failed = result.failures.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "regulations run complete"
    );

    Ok(result)
}

async fn process_program<F: PageFetcher>(
    fetcher: &F,
    source: &ProgramSource,
    catalog: &RegulationsCatalog,
    output_dir: &Path,
) -> Result<ManifestEntry> {
    let html = fetcher.fetch(&source.url).await?;

    let mut record = program_from_html(source, &html);
    attach_coordinator(&mut record, catalog);

    Ok(assembler::write_program(output_dir, &record, &html)?.entry)
}

/// Extract and assemble a program from raw syllabus HTML.
pub fn program_from_html(source: &ProgramSource, html: &str) -> ProgramRecord {
    let doc = Html::parse_document(html);
    assembler::assemble_program(source, extract_courses(&doc))
}

/// Extract a saved syllabus page without touching the network.
#[instrument(skip(source), fields(program = %source.program_name, year = %source.year))]
pub fn extract_file(
    path: &Path,
    source: &ProgramSource,
    coordinator: Option<&str>,
) -> Result<ProgramRecord> {
    let html = std::fs::read_to_string(path).map_err(|e| SyllabiError::io(path, e))?;
    if html.trim().is_empty() {
        return Err(SyllabiError::parse(format!("{}: empty document", path.display())));
    }

    let mut record = program_from_html(source, &html);
    record.coordinator = coordinator.map(String::from);
    Ok(record)
}

// ---------------------------------------------------------------------------
// Faculty
// ---------------------------------------------------------------------------

/// Fetch and write a profile for every catalog entry that has a URL.
#[instrument(skip_all, fields(catalog = %config.catalog_path.display()))]
pub async fn run_faculty<F: PageFetcher>(
    config: &FacultyRunConfig,
    fetcher: &F,
    progress: &dyn ProgressReporter,
) -> Result<FacultyRunResult> {
    let start = Instant::now();

    progress.phase("Loading faculty catalog");
    let catalog = catalog::load_faculty(&config.catalog_path)?;
    let targets = catalog::faculty_targets(&catalog);

    info!(profiles = targets.len(), "starting faculty run");
    progress.phase("Extracting faculty profiles");

    let mut written = Vec::new();
    let mut failures = Vec::new();
    let total = targets.len();

    for (i, target) in targets.iter().enumerate() {
        progress.document_started(&target.name, i + 1, total);

        let outcome = match fetcher.fetch(&target.url).await {
            Ok(html) => {
                let profile = profile_from_html(&html, &target.url);
                assembler::write_faculty(&config.output_dir, &profile)
            }
            Err(e) => Err(e),
        };

        match outcome {
            Ok(path) => written.push(path),
            Err(e) => {
                warn!(url = %target.url, error = %e, "skipping faculty profile");
                progress.document_failed(&target.name, &e.to_string());
                failures.push(DocumentFailure {
                    label: format!("{} ({})", target.name, target.department),
                    url: target.url.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    let result = FacultyRunResult {
        written,
        failures,
        elapsed: start.elapsed(),
    };

    progress.done(result.written.len(), result.failures.len());

    info!(
        written = result.written.len(),
        failed = result.failures.len(),
        elapsed_ms = result.elapsed.as_millis(),
        "faculty run complete"
    );

    Ok(result)
}

fn profile_from_html(html: &str, url: &str) -> FacultyProfile {
    let doc = Html::parse_document(html);
    extract_faculty_profile(&doc, url)
}
