use serde::Deserialize;

/// Response of `GET /t/{slug}/{id}.json`, trimmed to the fields we read
#[derive(Debug, Clone, Deserialize)]
pub struct TopicDetail {
    pub post_stream: PostStream,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostStream {
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// A single post; `cooked` is the forum-rendered HTML body
///
/// Fields other than `post_number` may be missing or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    #[serde(default)]
    pub id: Option<u64>,
    pub post_number: u32,
    #[serde(default)]
    pub cooked: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TopicDetail {
    /// The opening post of the topic (`post_number == 1`)
    pub fn first_post(&self) -> Option<&Post> {
        self.post_stream.posts.iter().find(|p| p.post_number == 1)
    }
}
