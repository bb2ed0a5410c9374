//! Forum HTTP client

use crate::error::{ForumError, Result};
use crate::types::TopicDetail;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Client for the JSON endpoints of a Discourse forum
pub struct ForumClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ForumClient {
    /// Default forum host
    pub const DEFAULT_BASE_URL: &'static str = "https://forum.cfx.re";

    /// Create a client for the default forum with a 30 second timeout
    pub fn new() -> Result<Self> {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Create a client for another forum host
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_base_url_and_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a client for another forum host with a custom timeout
    pub fn with_base_url_and_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        // `Url::join` replaces the last path segment unless the base ends in '/'
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the topic detail document
    pub fn topic_url(&self, slug: &str, id: &str) -> Result<Url> {
        let path = format!(
            "t/{}/{}.json",
            urlencoding::encode(slug),
            urlencoding::encode(id)
        );
        Ok(self.base_url.join(&path)?)
    }

    /// Fetch a topic with its post stream
    ///
    /// Any non-success status is reported as [`ForumError::Status`].
    pub async fn get_topic(&self, slug: &str, id: &str) -> Result<TopicDetail> {
        let url = self.topic_url(slug, id)?;
        debug!(url = %url, "Fetching forum topic");

        let response = self
            .http
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), url = %url, "Forum returned error status");
            return Err(ForumError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_url() {
        let client = ForumClient::new().unwrap();
        let url = client.topic_url("my-resource", "12345").unwrap();
        assert_eq!(url.as_str(), "https://forum.cfx.re/t/my-resource/12345.json");
    }

    #[test]
    fn test_topic_url_with_base_path() {
        let client = ForumClient::with_base_url("https://example.com/forum").unwrap();
        assert_eq!(client.base_url().as_str(), "https://example.com/forum/");

        let url = client.topic_url("slug", "7").unwrap();
        assert_eq!(url.as_str(), "https://example.com/forum/t/slug/7.json");
    }

    #[test]
    fn test_topic_url_encodes_segments() {
        let client = ForumClient::new().unwrap();
        let url = client.topic_url("a/b c", "1?x").unwrap();
        assert_eq!(url.as_str(), "https://forum.cfx.re/t/a%2Fb%20c/1%3Fx.json");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = ForumClient::with_base_url("not a url");
        assert!(matches!(result, Err(ForumError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_get_topic_connection_refused() {
        let client =
            ForumClient::with_base_url_and_timeout("http://127.0.0.1:9", Duration::from_secs(2))
                .unwrap();

        let result = client.get_topic("slug", "1").await;
        let err = result.unwrap_err();
        assert!(matches!(err, ForumError::Http(_)));
        assert_eq!(err.status(), None);
    }
}
