//! Where first-post content comes from

use async_trait::async_trait;
use forum_client::{ForumClient, ForumError, TopicDetail};

/// Source of a topic's opening post
#[async_trait]
pub trait TopicSource: Send + Sync {
    /// Raw HTML of the topic's first post
    ///
    /// `Ok(None)` means the topic was fetched but has no opening post content.
    async fn first_post_html(&self, slug: &str, id: &str) -> Result<Option<String>, ForumError>;
}

/// Non-empty HTML of the opening post, if the topic has one
pub fn first_post_content(topic: &TopicDetail) -> Option<String> {
    topic
        .first_post()
        .and_then(|post| post.cooked.clone())
        .filter(|cooked| !cooked.is_empty())
}

#[async_trait]
impl TopicSource for ForumClient {
    async fn first_post_html(&self, slug: &str, id: &str) -> Result<Option<String>, ForumError> {
        let topic = self.get_topic(slug, id).await?;
        Ok(first_post_content(&topic))
    }
}
