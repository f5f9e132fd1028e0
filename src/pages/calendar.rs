use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::{escape_html, layout};
use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

pub const CALENDAR_ROUTE: &str = "/calendar";

/// GET /calendar - Calendar page for signed-in recruiters
///
/// Without a session the browser is redirected to the sign-in route and
/// nothing is rendered.
pub async fn calendar_page(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Response {
    let Some(session) = session else {
        return Redirect::temporary(&state.config.auth.sign_in_route).into_response();
    };

    let widget = format!(
        r#"<section class="calendar">
      <div id="calendar-root" data-user-id="{}"></div>
      <noscript>The calendar needs JavaScript enabled.</noscript>
    </section>"#,
        escape_html(&session.user_id)
    );

    Html(layout::render_app_shell(
        "Calendar",
        CALENDAR_ROUTE,
        &session,
        &state.config.auth.sign_out_redirect,
        &widget,
    ))
    .into_response()
}
