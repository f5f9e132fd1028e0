use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use sha2::{Digest, Sha256};

use crate::config::AdminGatePolicy;
use crate::error::ApiError;
use crate::state::AppState;

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

/// Outcome of comparing the caller's admin key with the configured one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    /// No key configured and the policy lets requests through
    AllowUnconfigured,
    DenyMismatch,
    DenyUnconfigured,
}

/// Decide whether an admin request may proceed
pub fn evaluate(expected: Option<&str>, supplied: Option<&str>, policy: AdminGatePolicy) -> GateDecision {
    match (expected.filter(|k| !k.is_empty()), policy) {
        (None, AdminGatePolicy::Open) => GateDecision::AllowUnconfigured,
        (None, AdminGatePolicy::Closed) => GateDecision::DenyUnconfigured,
        (Some(expected), _) => match supplied {
            Some(supplied) if digest_eq(expected, supplied) => GateDecision::Allow,
            _ => GateDecision::DenyMismatch,
        },
    }
}

// Compare fixed-size digests so timing does not track the matching prefix
fn digest_eq(a: &str, b: &str) -> bool {
    Sha256::digest(a.as_bytes()) == Sha256::digest(b.as_bytes())
}

fn supplied_key(headers: &HeaderMap) -> Option<&str> {
    headers.get(ADMIN_KEY_HEADER).and_then(|v| v.to_str().ok())
}

/// Middleware guarding the admin maintenance routes with `x-admin-key`
pub async fn admin_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let security = &state.config.security;
    let decision = evaluate(
        security.admin_maint_key.as_deref(),
        supplied_key(request.headers()),
        security.admin_gate_policy,
    );

    match decision {
        GateDecision::Allow => next.run(request).await,
        GateDecision::AllowUnconfigured => {
            tracing::warn!(
                "ADMIN_MAINT_KEY is not configured; admin request to {} passes the open gate",
                request.uri().path()
            );
            next.run(request).await
        }
        GateDecision::DenyMismatch => {
            tracing::warn!("Rejected admin request to {}: bad admin key", request.uri().path());
            ApiError::unauthorized("Unauthorized").into_response()
        }
        GateDecision::DenyUnconfigured => {
            tracing::warn!(
                "Rejected admin request to {}: ADMIN_MAINT_KEY is not configured",
                request.uri().path()
            );
            ApiError::unauthorized("Admin key not configured").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_key_is_allowed() {
        assert_eq!(evaluate(Some("s3cret"), Some("s3cret"), AdminGatePolicy::Closed), GateDecision::Allow);
    }

    #[test]
    fn wrong_or_missing_key_is_denied_under_either_policy() {
        for policy in [AdminGatePolicy::Open, AdminGatePolicy::Closed] {
            assert_eq!(evaluate(Some("s3cret"), Some("guess"), policy), GateDecision::DenyMismatch);
            assert_eq!(evaluate(Some("s3cret"), None, policy), GateDecision::DenyMismatch);
        }
    }

    #[test]
    fn unconfigured_key_follows_policy() {
        assert_eq!(evaluate(None, None, AdminGatePolicy::Open), GateDecision::AllowUnconfigured);
        assert_eq!(evaluate(Some(""), Some("x"), AdminGatePolicy::Open), GateDecision::AllowUnconfigured);
        assert_eq!(evaluate(None, Some("x"), AdminGatePolicy::Closed), GateDecision::DenyUnconfigured);
    }
}
