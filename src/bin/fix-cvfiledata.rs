//! Make `CandidateApplication.cvFileData` nullable.
//!
//! Connects with DATABASE_URL, applies the statement once and exits
//! non-zero if anything goes wrong.

use clap::Parser;
use recruiter_portal::cli::{commands::fix, OutputFormat};
use recruiter_portal::maintenance::AdminFix;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fix-cvfiledata")]
#[command(about = "Drop the NOT NULL constraint on CandidateApplication.cvFileData")]
#[command(version)]
struct Args {}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let Args {} = Args::parse();

    if let Err(e) = fix::apply(AdminFix::DropCvNotNull, OutputFormat::Text).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
