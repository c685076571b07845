//! Syllabi CLI — syllabus and faculty page extraction.
//!
//! Turns published regulation pages into structured per-program course
//! records and faculty pages into profile records.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
