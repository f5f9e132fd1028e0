use axum::http::HeaderValue;
use url::Url;

// Placeholder origin used to check that a path stays on this site
const PLACEHOLDER_ORIGIN: &str = "http://localhost/";

/// Pick a redirect target: the candidate if it is a same-site path,
/// otherwise the fallback.
pub fn safe_redirect(candidate: Option<&str>, fallback: &str) -> String {
    candidate
        .map(str::trim)
        .filter(|c| is_same_site_path(c))
        .unwrap_or(fallback)
        .to_string()
}

fn is_same_site_path(candidate: &str) -> bool {
    if !candidate.starts_with('/') || candidate.starts_with("//") || candidate.contains('\\') {
        return false;
    }
    // The URL parser drops tabs and newlines, but the raw string becomes a Location header
    if candidate.chars().any(char::is_control) || HeaderValue::from_str(candidate).is_err() {
        return false;
    }

    let Ok(base) = Url::parse(PLACEHOLDER_ORIGIN) else {
        return false;
    };
    base.join(candidate)
        .map(|resolved| resolved.origin() == base.origin())
        .unwrap_or(false)
}

/// Trim an email and lower-case it for lookups and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Keep a field only if it has non-whitespace content
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
