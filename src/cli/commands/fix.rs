use anyhow::Context;
use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_progress, output_success};
use crate::cli::OutputFormat;
use crate::config;
use crate::database::{DatabaseManager, PgGateway};
use crate::maintenance::{self, AdminFix};

#[derive(Subcommand)]
pub enum FixCommands {
    #[command(about = "List available schema fixes")]
    List,

    #[command(about = "Run a schema fix against DATABASE_URL")]
    Run {
        #[arg(help = "Fix name (see `fix list`)")]
        fix: String,
    },
}

pub async fn handle(cmd: FixCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        FixCommands::List => list_fixes(output_format),
        FixCommands::Run { fix } => {
            let fix: AdminFix = fix.parse()?;
            apply(fix, output_format).await
        }
    }
}

fn list_fixes(output_format: OutputFormat) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let fixes: Vec<_> = AdminFix::ALL
                .iter()
                .map(|fix| json!({ "slug": fix.slug(), "description": fix.description() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&json!({ "fixes": fixes }))?);
        }
        OutputFormat::Text => {
            for fix in AdminFix::ALL {
                println!("{:<20} {}", fix.slug(), fix.description());
            }
        }
    }
    Ok(())
}

/// Connect straight to the database and run one fix
///
/// Shared by `recruiter-admin fix run` and the `fix-cvfiledata` binary.
/// Any failure comes back as an error so the caller can exit non-zero.
pub async fn apply(fix: AdminFix, output_format: OutputFormat) -> anyhow::Result<()> {
    let database = &config::config().database;

    output_progress(
        &output_format,
        &format!("Connecting to {}...", DatabaseManager::redacted(&database.url)),
    );
    let pool = DatabaseManager::connect(database)
        .await
        .context("could not connect to the database")?;
    let gateway = PgGateway::new(pool.clone());

    output_progress(&output_format, &format!("Applying {}: {}", fix, fix.statement()));
    let result = maintenance::run_fix(&gateway, fix).await;
    DatabaseManager::close(&pool).await;

    let report = result?;
    output_success(
        &output_format,
        &report.message,
        Some(json!({ "fix": report.fix.slug() })),
    )
}
