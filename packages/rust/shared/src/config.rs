//! Application configuration for Syllabi.
//!
//! User config lives at `~/.syllabi/syllabi.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyllabiError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "syllabi.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".syllabi";

// ---------------------------------------------------------------------------
// Config structs (matching syllabi.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Input catalogs and output directories.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Page fetching settings.
    #[serde(default)]
    pub fetch: FetchSettings,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Directory receiving one JSON file per (program, year).
    #[serde(default = "default_regulations_dir")]
    pub regulations_dir: String,

    /// Directory receiving one JSON file per faculty profile.
    #[serde(default = "default_faculty_dir")]
    pub faculty_dir: String,

    /// Program metadata catalog (`regulations.json`).
    #[serde(default = "default_regulations_catalog")]
    pub regulations_catalog: String,

    /// Faculty URL catalog (`faculties.json`).
    #[serde(default = "default_faculty_catalog")]
    pub faculty_catalog: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            regulations_dir: default_regulations_dir(),
            faculty_dir: default_faculty_dir(),
            regulations_catalog: default_regulations_catalog(),
            faculty_catalog: default_faculty_catalog(),
        }
    }
}

fn default_regulations_dir() -> String {
    "regulations".into()
}
fn default_faculty_dir() -> String {
    "faculty_data".into()
}
fn default_regulations_catalog() -> String {
    "regulations.json".into()
}
fn default_faculty_catalog() -> String {
    "faculties.json".into()
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Accept self-signed or expired certificates.
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,

    /// Override the User-Agent header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
            accept_invalid_certs: true,
            user_agent: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}
fn default_max_redirects() -> usize {
    5
}
fn default_true() -> bool {
    true
}

// ---------------------------------------------------------------------------
// Fetch config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime fetch configuration.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout.
    pub timeout: Duration,
    /// Redirect limit.
    pub max_redirects: usize,
    /// Whether TLS certificate errors are ignored.
    pub accept_invalid_certs: bool,
    /// User-Agent override; the crawler supplies its own default.
    pub user_agent: Option<String>,
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            timeout: Duration::from_secs(config.fetch.timeout_secs),
            max_redirects: config.fetch.max_redirects,
            accept_invalid_certs: config.fetch.accept_invalid_certs,
            user_agent: config.fetch.user_agent.clone(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.syllabi/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| SyllabiError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.syllabi/syllabi.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| SyllabiError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| SyllabiError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| SyllabiError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| SyllabiError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| SyllabiError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("regulations_dir"));
        assert!(toml_str.contains("timeout_secs"));
        assert!(!toml_str.contains("user_agent"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.defaults.faculty_dir, "faculty_data");
        assert_eq!(parsed.fetch.max_redirects, 5);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
regulations_dir = "/tmp/regs"

[fetch]
accept_invalid_certs = false
user_agent = "syllabi-test"
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.regulations_dir, "/tmp/regs");
        assert_eq!(config.defaults.regulations_catalog, "regulations.json");
        assert!(!config.fetch.accept_invalid_certs);
        assert_eq!(config.fetch.timeout_secs, 60);
    }

    #[test]
    fn fetch_config_from_app_config() {
        let fetch = FetchConfig::from(&AppConfig::default());
        assert_eq!(fetch.timeout, Duration::from_secs(60));
        assert_eq!(fetch.max_redirects, 5);
        assert!(fetch.accept_invalid_certs);
        assert!(fetch.user_agent.is_none());
    }

    #[test]
    fn malformed_config_is_config_error() {
        let dir = std::env::temp_dir().join(format!("syllabi-config-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[defaults\nregulations_dir = 1").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, SyllabiError::Config { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
