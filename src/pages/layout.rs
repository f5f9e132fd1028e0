use super::escape_html;
use crate::auth::Session;

/// Entry of the navigation sidebar
pub struct NavItem {
    pub href: &'static str,
    pub label: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[NavItem { href: "/calendar", label: "Calendar" }];

/// Full page for a signed-in user: sidebar, header, then `content`
pub fn render_app_shell(title: &str, active: &str, session: &Session, sign_out_redirect: &str, content: &str) -> String {
    let body = format!(
        r#"<div class="app-shell">
  {sidebar}
  <main class="app-main">
    <header class="app-header">
      <h1>{title}</h1>
      <span class="app-user">{user}</span>
    </header>
    {content}
  </main>
</div>"#,
        sidebar = render_sidebar(active, sign_out_redirect),
        title = escape_html(title),
        user = escape_html(session.display_name()),
        content = content,
    );
    render_document(title, &body)
}

/// Bare HTML document
pub fn render_document(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body,
    )
}

fn render_sidebar(active: &str, sign_out_redirect: &str) -> String {
    let links: String = NAV_ITEMS
        .iter()
        .map(|item| {
            let current = if item.href == active { r#" aria-current="page""# } else { "" };
            format!(
                r#"<li><a href="{}"{}>{}</a></li>"#,
                escape_html(item.href),
                current,
                escape_html(item.label)
            )
        })
        .collect();

    format!(
        r#"<nav class="app-sidebar">
    <ul>{links}</ul>
    {sign_out}
  </nav>"#,
        links = links,
        sign_out = render_sign_out_control(sign_out_redirect),
    )
}

/// Sign-out button: posts to the sign-out endpoint with the redirect target
pub fn render_sign_out_control(callback_url: &str) -> String {
    format!(
        r#"<form class="sign-out" method="post" action="/api/auth/signout">
      <input type="hidden" name="callbackUrl" value="{}">
      <button type="submit">Sign out</button>
    </form>"#,
        escape_html(callback_url)
    )
}
