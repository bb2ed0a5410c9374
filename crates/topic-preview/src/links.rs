//! Video and storefront link extraction from raw post HTML
//!
//! Runs on the unsanitized content: sanitization drops the iframes and
//! anchors these URLs usually live in.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::ExtractedLinks;

/// YouTube watch, embed and short links; group 1 is the 11-character video id
static VIDEO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?(?:youtube\.com/(?:watch\?v=|embed/)|youtu\.be/)([a-z0-9_-]{11})",
    )
    .expect("video regex should compile")
});

/// Tebex storefront links on any subdomain
static STORE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[a-z0-9.-]*\.?tebex\.io/[^\s<>"']*"#)
        .expect("store regex should compile")
});

/// Canonical URL for a video id
fn canonical_video_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={id}")
}

/// Extract every distinct video link and the first store link
///
/// Video links are unbounded while only one store link is kept; the store
/// link is the first match in document order, emitted verbatim.
pub fn extract_links(html: &str) -> ExtractedLinks {
    let mut video_links: Vec<String> = Vec::new();
    for caps in VIDEO_RE.captures_iter(html) {
        let url = canonical_video_url(&caps[1]);
        if !video_links.contains(&url) {
            video_links.push(url);
        }
    }

    let store_links = STORE_RE
        .find(html)
        .map(|m| vec![m.as_str().to_string()])
        .unwrap_or_default();

    ExtractedLinks {
        video_links,
        store_links,
    }
}
