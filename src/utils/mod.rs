//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::Result;

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> String {
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Resolve a data-source location against an optional base URL.
///
/// Absolute URLs and locations without a base are returned unchanged, the
/// way a browser leaves `https://…` alone but resolves `./Members.csv`
/// against the page.
pub fn resolve_location(location: &str, base_url: Option<&str>) -> Result<String> {
    let Some(base) = base_url else {
        return Ok(location.to_string());
    };
    if Url::parse(location).is_ok() {
        return Ok(location.to_string());
    }
    let base = Url::parse(base)?;
    Ok(resolve_url(&base, location))
}

/// Escape text for use in HTML content and double- or single-quoted attributes.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
