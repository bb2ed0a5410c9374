//! Cache-first preview generation
//!
//! On a miss the first post is fetched, then run through link extraction,
//! sanitization and truncation, in that order. Every outcome, failures
//! included, is written back to the cache so repeated requests for a broken
//! topic do not hammer the forum.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use ttl_cache::TtlCache;

use crate::error::PreviewError;
use crate::links::extract_links;
use crate::sanitize::sanitize_html;
use crate::source::TopicSource;
use crate::truncate::truncate_html;
use crate::types::{CachedPreview, PreviewResult};

/// How long a successfully built preview stays cached (15 minutes)
pub const PREVIEW_TTL: Duration = Duration::from_secs(15 * 60);

/// How long a failed fetch is remembered (5 minutes)
pub const FAILURE_TTL: Duration = Duration::from_secs(5 * 60);

/// The process-wide preview cache
pub type PreviewCache = TtlCache<CachedPreview>;

/// Cache key for a topic's preview
pub fn preview_cache_key(id: &str) -> String {
    format!("topic-preview-{id}")
}

/// Build the preview for a first post's raw HTML
pub fn build_preview(raw_html: &str) -> PreviewResult {
    let links = extract_links(raw_html);
    let sanitized = sanitize_html(raw_html);
    PreviewResult::new(truncate_html(&sanitized), links)
}

/// Produces topic previews, consulting the shared cache before the forum
pub struct PreviewService {
    cache: Arc<PreviewCache>,
    source: Arc<dyn TopicSource>,
}

impl PreviewService {
    pub fn new(cache: Arc<PreviewCache>, source: Arc<dyn TopicSource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &Arc<PreviewCache> {
        &self.cache
    }

    /// Preview for topic `id`, returned together with whether it came from cache
    pub async fn preview(&self, id: &str, slug: &str) -> Result<(PreviewResult, bool), PreviewError> {
        let id = id.trim();
        let slug = slug.trim();
        if id.is_empty() || slug.is_empty() {
            return Err(PreviewError::MissingInput);
        }

        let key = preview_cache_key(id);

        if let Some(cached) = self.cache.get(&key).await {
            debug!(topic_id = %id, "Using cached preview");
            return Ok((cached.into_result(), true));
        }

        info!(topic_id = %id, slug = %slug, "Fetching preview");

        let content = match self.source.first_post_html(slug, id).await {
            Ok(content) => content,
            Err(err) => {
                warn!(topic_id = %id, error = %err, "Failed to fetch topic, caching empty preview");
                self.cache
                    .set(key, PreviewResult::empty().into(), FAILURE_TTL)
                    .await;
                return Err(PreviewError::Upstream(err));
            }
        };

        let result = match content {
            Some(raw_html) => build_preview(&raw_html),
            None => {
                debug!(topic_id = %id, "Topic has no first post content");
                PreviewResult::empty()
            }
        };

        self.cache.set(key, result.clone().into(), PREVIEW_TTL).await;

        Ok((result, false))
    }
}
