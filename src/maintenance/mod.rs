//! One-off administrative schema fixes.
//!
//! Every fix is a single fixed SQL statement. The HTTP endpoint and the
//! command-line tools both go through [`run_fix`], so they behave the same.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{error, info};

use crate::database::gateway::AdminMigrator;
use crate::database::manager::DatabaseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdminFix {
    /// Allow candidate applications without an uploaded CV
    DropCvNotNull,
}

impl AdminFix {
    pub const ALL: [AdminFix; 1] = [AdminFix::DropCvNotNull];

    pub fn slug(self) -> &'static str {
        match self {
            AdminFix::DropCvNotNull => "drop-cv-not-null",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AdminFix::DropCvNotNull => "Make CandidateApplication.cvFileData nullable",
        }
    }

    pub fn statement(self) -> &'static str {
        match self {
            AdminFix::DropCvNotNull => {
                r#"ALTER TABLE "CandidateApplication" ALTER COLUMN "cvFileData" DROP NOT NULL"#
            }
        }
    }

    fn success_message(self) -> &'static str {
        match self {
            AdminFix::DropCvNotNull => "cvFileData is now nullable",
        }
    }
}

impl fmt::Display for AdminFix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for AdminFix {
    type Err = MaintenanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdminFix::ALL
            .into_iter()
            .find(|fix| fix.slug() == s)
            .ok_or_else(|| MaintenanceError::UnknownFix(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum MaintenanceError {
    #[error("Unknown fix: {0}")]
    UnknownFix(String),

    #[error("Fix {fix} failed: {source}")]
    Execution {
        fix: AdminFix,
        #[source]
        source: DatabaseError,
    },
}

/// Outcome of a successful fix
#[derive(Debug, Clone, Serialize)]
pub struct FixReport {
    pub fix: AdminFix,
    pub message: String,
}

/// Execute the fix's statement once
pub async fn run_fix(
    migrator: &dyn AdminMigrator,
    fix: AdminFix,
) -> Result<FixReport, MaintenanceError> {
    info!("Running admin fix {}", fix);

    match migrator.apply(fix.statement()).await {
        Ok(()) => {
            info!("Admin fix {} applied", fix);
            Ok(FixReport {
                fix,
                message: fix.success_message().to_string(),
            })
        }
        Err(source) => {
            error!("Admin fix {} failed: {}", fix, source);
            Err(MaintenanceError::Execution { fix, source })
        }
    }
}
