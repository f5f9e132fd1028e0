use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use std::convert::Infallible;

use crate::auth::{cookie::token_from_headers, validate_session_token, Session};
use crate::state::AppState;

/// Session of the caller, if any. Missing, expired or forged tokens all
/// resolve to `None`; callers decide whether that means redirect or 401.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = token_from_headers(&parts.headers) else {
            return Ok(CurrentSession(None));
        };

        match validate_session_token(&token, &state.config.security) {
            Ok(session) => Ok(CurrentSession(Some(session))),
            Err(e) => {
                tracing::debug!("Ignoring session token: {}", e);
                Ok(CurrentSession(None))
            }
        }
    }
}
