//! Shared types, error model, and configuration for Syllabi.
//!
//! This crate is the foundation depended on by all other Syllabi crates.
//! It provides:
//! - [`SyllabiError`] — the unified error type
//! - Domain types ([`ProgramRecord`], [`CourseRecord`], [`FacultyProfile`], [`RunManifest`])
//! - Configuration ([`AppConfig`], [`FetchConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, FetchConfig, FetchSettings, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{Result, SyllabiError};
pub use types::{
    CURRENT_SCHEMA_VERSION, ContentSection, CourseRecord, CourseType, FacultyProfile,
    ManifestEntry, PrerequisiteEntry, ProgramRecord, ProgramSource, Publication, RunManifest,
};
