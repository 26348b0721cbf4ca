//! URL handling module for Learn-Digest
//!
//! This module decides which anchors belong to which catalog level and turns
//! their hrefs into absolute URLs.

mod matcher;

pub use matcher::PathMarker;

use url::Url;

/// Resolves a link href against a base URL and validates it
///
/// Returns None if the link should be excluded:
/// - empty or fragment-only hrefs
/// - javascript:, mailto:, tel:, data: schemes
/// - hrefs that do not resolve to an HTTP(S) URL
///
/// # Examples
///
/// ```
/// use learn_digest::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://learn.example.com/en-us/training/courses/az-900/").unwrap();
/// let resolved = resolve_link("/en-us/training/paths/cloud-concepts/", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://learn.example.com/en-us/training/paths/cloud-concepts/");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}

/// Picks the base URL relative links on a page resolve against
///
/// A `<base href>` value wins when present and resolvable (it may itself be
/// relative to the page URL); otherwise the page URL is used.
pub fn document_base(page_url: &Url, base_href: Option<&str>) -> Url {
    base_href
        .and_then(|href| page_url.join(href.trim()).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or_else(|| page_url.clone())
}
