//! HTML extraction for rendered catalog pages
//!
//! This module turns a DOM snapshot into the fields the crawler cares about:
//! - child links on course and learning path pages
//! - heading and main text on module pages

use crate::model::{LinkRef, ModuleContent};
use crate::url::{document_base, resolve_link, PathMarker};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Anchors listing learning paths on a course page
pub const COURSE_LINK_SELECTOR: &str = "a.card-title";

/// Anchors listing modules on a learning path page
pub const MODULE_LINK_SELECTOR: &str = "a.unit-title, a.module-title";

/// Generic in-site anchors, used when no module anchors are marked up
pub const RELATIVE_LINK_SELECTOR: &str = "a[data-linktype='relative-path']";

/// Element whose text becomes the module title
pub const HEADING_SELECTOR: &str = "h1";

/// Title used when a module page has no heading
pub const NO_TITLE: &str = "No Title Found";

/// Elements whose text never counts as page content
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Extracts learning path links from a course page
///
/// Only `a.card-title` anchors whose href contains `/training/paths/` are
/// kept, in document order.
pub fn extract_path_links(html: &str, page_url: &Url) -> Vec<LinkRef> {
    let document = Html::parse_document(html);
    let base = base_url(&document, page_url);

    collect_links(select_all(&document, COURSE_LINK_SELECTOR), PathMarker::Paths, &base)
}

/// Extracts module links from a learning path page
///
/// `a.unit-title` / `a.module-title` anchors are authoritative. Only when the
/// page has none of them at all are `data-linktype="relative-path"` anchors
/// considered. Either way, only hrefs containing `/training/modules/` survive.
pub fn extract_module_links(html: &str, page_url: &Url) -> Vec<LinkRef> {
    let document = Html::parse_document(html);
    let base = base_url(&document, page_url);

    let mut anchors = select_all(&document, MODULE_LINK_SELECTOR);
    if anchors.is_empty() {
        tracing::debug!(
            "No module-title anchors on {}, falling back to relative links",
            page_url
        );
        anchors = select_all(&document, RELATIVE_LINK_SELECTOR);
    }

    collect_links(anchors, PathMarker::Modules, &base)
}

/// Extracts the title and body text of a module page
///
/// The first `h1` gives the title ([`NO_TITLE`] if there is none). The body
/// is the text of `main`, or of `body` when the page has no `main`, or empty.
pub fn extract_content(html: &str) -> ModuleContent {
    let document = Html::parse_document(html);

    let title = select_all(&document, HEADING_SELECTOR)
        .into_iter()
        .next()
        .map(inline_text)
        .unwrap_or_else(|| NO_TITLE.to_string());

    let body = select_all(&document, "main")
        .into_iter()
        .next()
        .or_else(|| select_all(&document, "body").into_iter().next())
        .map(block_text)
        .unwrap_or_default();

    ModuleContent { title, body }
}

fn select_all<'a>(document: &'a Html, css: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(css) {
        Ok(selector) => document.select(&selector).collect(),
        Err(e) => {
            tracing::error!("Invalid selector {:?}: {:?}", css, e);
            Vec::new()
        }
    }
}

fn base_url(document: &Html, page_url: &Url) -> Url {
    let base_href = select_all(document, "base[href]")
        .into_iter()
        .next()
        .and_then(|element| element.value().attr("href"));

    document_base(page_url, base_href)
}

fn collect_links(anchors: Vec<ElementRef<'_>>, marker: PathMarker, base: &Url) -> Vec<LinkRef> {
    anchors
        .into_iter()
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !marker.matches(href) {
                return None;
            }
            let url = resolve_link(href, base)?;
            Some(LinkRef {
                url: url.to_string(),
                title: inline_text(anchor),
            })
        })
        .collect()
}

/// Text of an element on one line with whitespace collapsed
fn inline_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of an element with one line per non-empty text fragment
fn block_text(element: ElementRef<'_>) -> String {
    let mut lines = Vec::new();

    for node in element.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|e| SKIPPED_TAGS.contains(&e.name()))
        });
        if hidden {
            continue;
        }

        lines.extend(text.lines().map(str::trim).filter(|line| !line.is_empty()));
    }

    lines.join("\n")
}
