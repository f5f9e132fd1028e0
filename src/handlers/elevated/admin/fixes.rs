use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::{json, Value};

use crate::maintenance::{self, AdminFix};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FixInfo {
    pub slug: &'static str,
    pub description: &'static str,
    pub statement: &'static str,
}

/// GET /api/admin/fixes - List the available fixes
pub async fn fix_list() -> ApiResult<Value> {
    let fixes: Vec<FixInfo> = AdminFix::ALL
        .into_iter()
        .map(|fix| FixInfo {
            slug: fix.slug(),
            description: fix.description(),
            statement: fix.statement(),
        })
        .collect();

    Ok(ApiResponse::success(json!({ "fixes": fixes })))
}

/// POST /api/admin/fixes/:fix - Run one fix
///
/// - 200 `{ "ok": true, "message": "..." }` once the statement has run
/// - 404 for an unknown fix
/// - 500 `{ "ok": false, "error": "<database error>" }` when the statement fails
pub async fn fix_run(State(state): State<AppState>, Path(slug): Path<String>) -> ApiResult<Value> {
    let fix: AdminFix = slug.parse()?;
    let report = maintenance::run_fix(state.migrator.as_ref(), fix).await?;

    Ok(ApiResponse::success(json!({
        "fix": report.fix,
        "message": report.message,
    })))
}
