//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use syllabi_core::pipeline::{
    self, FacultyRunConfig, ProgressReporter, RegulationsRunConfig,
};
use syllabi_crawler::HttpFetcher;
use syllabi_shared::{AppConfig, FetchConfig, ProgramSource, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Syllabi: extract structured course data from regulation pages.
#[derive(Parser)]
#[command(
    name = "syllabi",
    version,
    about = "Extract structured course records from syllabus and faculty pages.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Fetch every regulation page in the catalog and write program records.
    Regulations {
        /// Regulations catalog (defaults to the configured path).
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output directory (defaults to the configured path).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Only process this program.
        #[arg(short, long)]
        program: Option<String>,
    },

    /// Fetch every faculty profile in the catalog.
    Faculty {
        /// Faculty catalog (defaults to the configured path).
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output directory (defaults to the configured path).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Extract a saved syllabus page and print the program record as JSON.
    Extract {
        /// Saved HTML file.
        file: PathBuf,

        /// Program name recorded in the output.
        #[arg(long)]
        program: String,

        /// Regulation year recorded in the output.
        #[arg(long)]
        year: String,

        /// Source URL recorded in the output.
        #[arg(long)]
        url: Option<String>,

        /// Program coordinator recorded in the output.
        #[arg(long)]
        coordinator: Option<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "syllabi=info",
        1 => "syllabi=debug",
        _ => "syllabi=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so `extract` output can be piped.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Regulations {
            catalog,
            out,
            program,
        } => cmd_regulations(catalog, out, program).await,
        Command::Faculty { catalog, out } => cmd_faculty(catalog, out).await,
        Command::Extract {
            file,
            program,
            year,
            url,
            coordinator,
        } => cmd_extract(&file, program, year, url, coordinator.as_deref()),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_regulations(
    catalog: Option<PathBuf>,
    out: Option<PathBuf>,
    program: Option<String>,
) -> Result<()> {
    let config = load_config()?;
    let fetcher = HttpFetcher::new(&FetchConfig::from(&config))?;

    let run_config = RegulationsRunConfig {
        catalog_path: catalog.unwrap_or_else(|| config.defaults.regulations_catalog.clone().into()),
        output_dir: out.unwrap_or_else(|| config.defaults.regulations_dir.clone().into()),
        program,
    };

    info!(
        catalog = %run_config.catalog_path.display(),
        out = %run_config.output_dir.display(),
        "extracting regulations"
    );

    let reporter = CliProgress::new();
    let result = pipeline::run_regulations(&run_config, &fetcher, &reporter).await?;

    println!();
    println!("  Regulations extracted.");
    println!("  Written:  {}", result.written.len());
    println!("  Failed:   {}", result.failures.len());
    println!("  Manifest: {}", result.manifest_path.display());
    println!("  Time:     {:.1}s", result.elapsed.as_secs_f64());
    for failure in &result.failures {
        println!("    ✗ {}: {}", failure.label, failure.error);
    }
    println!();

    Ok(())
}

async fn cmd_faculty(catalog: Option<PathBuf>, out: Option<PathBuf>) -> Result<()> {
    let config = load_config()?;
    let fetcher = HttpFetcher::new(&FetchConfig::from(&config))?;

    let run_config = FacultyRunConfig {
        catalog_path: catalog.unwrap_or_else(|| config.defaults.faculty_catalog.clone().into()),
        output_dir: out.unwrap_or_else(|| config.defaults.faculty_dir.clone().into()),
    };

    info!(
        catalog = %run_config.catalog_path.display(),
        out = %run_config.output_dir.display(),
        "extracting faculty profiles"
    );

    let reporter = CliProgress::new();
    let result = pipeline::run_faculty(&run_config, &fetcher, &reporter).await?;

    println!();
    println!("  Faculty profiles extracted.");
    println!("  Written: {}", result.written.len());
    println!("  Failed:  {}", result.failures.len());
    println!("  Time:    {:.1}s", result.elapsed.as_secs_f64());
    for failure in &result.failures {
        println!("    ✗ {}: {}", failure.label, failure.error);
    }
    println!();

    Ok(())
}

fn cmd_extract(
    file: &Path,
    program_name: String,
    year: String,
    url: Option<String>,
    coordinator: Option<&str>,
) -> Result<()> {
    if !file.is_file() {
        return Err(eyre!("'{}' is not a file", file.display()));
    }

    let source = ProgramSource {
        program_name,
        year,
        url: url.unwrap_or_else(|| file.display().to_string()),
    };

    let record = pipeline::extract_file(file, &source, coordinator)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn document_started(&self, label: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {label}"));
    }

    fn document_failed(&self, label: &str, error: &str) {
        self.spinner.println(format!("  ✗ {label}: {error}"));
    }

    fn done(&self, _written: usize, _failed: usize) {
        self.spinner.finish_and_clear();
    }
}
