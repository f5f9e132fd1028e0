use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::{escape_html, layout};
use crate::handlers::public::auth::utils::safe_redirect;
use crate::messages::Message;
use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SignInQuery {
    pub error: Option<String>,
    #[serde(rename = "callbackUrl")]
    pub callback_url: Option<String>,
}

/// GET /login - Sign-in form; signed-in visitors go straight home
pub async fn sign_in_page(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(query): Query<SignInQuery>,
) -> Response {
    let auth = &state.config.auth;

    if session.is_some() {
        return Redirect::to(&auth.home_route).into_response();
    }

    let banner = match query.error {
        Some(_) => format!(
            r#"<p class="sign-in-error" role="alert">{}</p>"#,
            escape_html(Message::InvalidCredentials.text(state.config.locale))
        ),
        None => String::new(),
    };
    let callback_url = safe_redirect(query.callback_url.as_deref(), &auth.home_route);

    let body = format!(
        r#"<main class="sign-in">
  <h1>Sign in</h1>
  {banner}
  <form method="post" action="/api/auth/login">
    <input type="hidden" name="callbackUrl" value="{callback_url}">
    <label>Email <input type="email" name="email" autocomplete="email" required></label>
    <label>Password <input type="password" name="password" autocomplete="current-password" required></label>
    <button type="submit">Sign in</button>
  </form>
</main>"#,
        banner = banner,
        callback_url = escape_html(&callback_url),
    );

    Html(layout::render_document("Sign in", &body)).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::testing::{self, TestApp};

    async fn get(app: &TestApp, uri: &str, cookie: Option<String>) -> axum::response::Response {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        app.router().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn renders_form_with_error_banner() {
        let app = TestApp::new(testing::test_config());

        let response = get(&app, "/login?error=CredentialsSignin", None).await;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"action="/api/auth/login""#));
        assert!(html.contains("Invalid email or password"));
        assert!(html.contains(r#"name="callbackUrl" value="/calendar""#));
    }

    #[tokio::test]
    async fn signed_in_visitor_goes_home() {
        let app = TestApp::new(testing::test_config());
        let user = testing::seed_user(&app.gateway, "ada@example.com", "hunter22").await;
        let token = crate::auth::issue_session_token(&user, &app.state.config.security).unwrap();

        let response = get(&app, "/login", Some(format!("session={token}"))).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/calendar");
    }
}
