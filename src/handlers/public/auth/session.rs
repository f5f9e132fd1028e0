use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::utils::{non_blank, normalize_email, safe_redirect};
use crate::auth::cookie::{clear_session_cookie, session_cookie};
use crate::auth::{issue_session_token, verify_password};
use crate::error::ApiError;
use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

/// Error code appended to the sign-in route after a failed login
pub const CREDENTIALS_ERROR: &str = "CredentialsSignin";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignOutForm {
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// POST /api/auth/login - Sign in with email and password
///
/// Form fields: `email`, `password`, optional `callbackUrl`.
/// On success the session cookie is set and the browser is sent to
/// `callbackUrl` (same-site paths only) or the home route. Bad credentials
/// send it back to the sign-in page with `?error=CredentialsSignin`.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, ApiError> {
    let config = &state.config;
    let failed = || {
        Redirect::to(&format!("{}?error={}", config.auth.sign_in_route, CREDENTIALS_ERROR)).into_response()
    };

    let (Some(email), Some(password)) = (non_blank(form.email), non_blank(form.password)) else {
        return Ok(failed());
    };
    let email = normalize_email(&email);

    let Some(user) = state.gateway.find_user_by_email(&email).await? else {
        warn!("Sign-in failed: unknown email");
        return Ok(failed());
    };

    if !verify_password(password, user.password_hash.clone()).await? {
        warn!("Sign-in failed for user {}", user.id);
        return Ok(failed());
    }

    let token = issue_session_token(&user, &config.security)?;
    let max_age = config.security.session_lifetime_secs();
    let cookie = session_cookie(&token, max_age, config.security.require_https);
    let target = safe_redirect(form.callback_url.as_deref(), &config.auth.home_route);

    info!("User {} signed in", user.id);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(&target)).into_response())
}

/// POST /api/auth/signout - Drop the session cookie and redirect
pub async fn sign_out(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    form: Option<Form<SignOutForm>>,
) -> Response {
    let config = &state.config;
    let form = form.map(|Form(form)| form).unwrap_or_default();
    let target = safe_redirect(form.callback_url.as_deref(), &config.auth.sign_out_redirect);

    if let Some(session) = session {
        info!("User {} signed out", session.user_id);
    }

    (
        [(header::SET_COOKIE, clear_session_cookie(config.security.require_https))],
        Redirect::to(&target),
    )
        .into_response()
}

/// GET /api/auth/session - Current session, or `{}` when signed out
pub async fn session(CurrentSession(session): CurrentSession) -> Json<Value> {
    match session {
        Some(session) => Json(json!({
            "user": {
                "id": session.user_id,
                "name": session.name,
                "email": session.email,
            },
            "expires": session.expires,
        })),
        None => Json(json!({})),
    }
}
