//! Server-rendered HTML pages.
//!
//! Pages resolve the session first and redirect before rendering anything
//! when it is missing. Interactive widgets mount client-side into the
//! placeholders rendered here.

pub mod calendar;
pub mod layout;
pub mod sign_in;

pub use calendar::calendar_page;
pub use sign_in::sign_in_page;

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
