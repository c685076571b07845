//! Core orchestration for Syllabi.
//!
//! This crate wires the extractor, fetcher and writers together:
//! - [`catalog`] — Regulations and faculty catalogs
//! - [`assembler`] — Program assembly and JSON output
//! - [`enrichment`] — Catalog metadata attached to program records
//! - [`pipeline`] — Regulations, faculty and offline extraction runs

pub mod assembler;
pub mod catalog;
pub mod enrichment;
pub mod pipeline;

pub use assembler::{assemble_program, program_file_name};
pub use catalog::{FacultyCatalog, ProgramMeta, RegulationsCatalog};
pub use enrichment::attach_coordinator;
pub use pipeline::{
    FacultyRunConfig, ProgressReporter, RegulationsRunConfig, SilentProgress, extract_file,
    run_faculty, run_regulations,
};
