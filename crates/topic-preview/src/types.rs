//! Core types for the topic preview service

use serde::{Deserialize, Serialize};
use ttl_cache::CacheStats;

/// Media and store links found in a post
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedLinks {
    /// Canonical video URLs, unique, in first-seen order
    pub video_links: Vec<String>,
    /// At most one storefront URL
    pub store_links: Vec<String>,
}

/// Preview of a topic's first post, as cached and returned to callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewResult {
    #[serde(rename = "preview")]
    pub preview_html: String,
    #[serde(rename = "youtubeLinks")]
    pub video_links: Vec<String>,
    #[serde(rename = "tebexLinks")]
    pub store_links: Vec<String>,
}

impl PreviewResult {
    pub fn new(preview_html: String, links: ExtractedLinks) -> Self {
        Self {
            preview_html,
            video_links: links.video_links,
            store_links: links.store_links,
        }
    }

    /// Result with no content and no links
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Value stored in the preview cache
///
/// Older writers stored the bare preview HTML. Both shapes are read back as a
/// [`PreviewResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CachedPreview {
    Legacy(String),
    Current(PreviewResult),
}

impl CachedPreview {
    pub fn into_result(self) -> PreviewResult {
        match self {
            CachedPreview::Legacy(preview_html) => PreviewResult {
                preview_html,
                ..PreviewResult::default()
            },
            CachedPreview::Current(result) => result,
        }
    }
}

impl From<PreviewResult> for CachedPreview {
    fn from(result: PreviewResult) -> Self {
        CachedPreview::Current(result)
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
    pub cache: CacheStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_result_wire_names() {
        let result = PreviewResult {
            preview_html: "<p>hi</p>".to_string(),
            video_links: vec!["https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string()],
            store_links: vec![],
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["preview"], "<p>hi</p>");
        assert_eq!(
            json["youtubeLinks"][0],
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
        assert_eq!(json["tebexLinks"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_legacy_cached_preview_normalizes() {
        let cached = CachedPreview::Legacy("<p>old</p>".to_string());
        let result = cached.into_result();

        assert_eq!(result.preview_html, "<p>old</p>");
        assert!(result.video_links.is_empty());
        assert!(result.store_links.is_empty());
    }

    #[test]
    fn test_current_cached_preview_is_unchanged() {
        let result = PreviewResult {
            preview_html: "<p>new</p>".to_string(),
            video_links: vec![],
            store_links: vec!["https://shop.tebex.io/package/1".to_string()],
        };

        assert_eq!(CachedPreview::from(result.clone()).into_result(), result);
    }

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            uptime_secs: 3600,
            cache: CacheStats {
                entries: 12,
                hits: 40,
                misses: 12,
            },
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("3600"));
        assert!(json.contains("\"hits\":40"));
    }
}
