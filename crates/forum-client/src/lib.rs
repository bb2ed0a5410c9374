//! Discourse Forum Client
//!
//! A small client for the topic endpoint of a Discourse forum:
//!
//! - `GET /t/{slug}/{id}.json` - Topic detail with its post stream
//!
//! # Example
//!
//! ```no_run
//! use forum_client::ForumClient;
//!
//! # async fn example() -> Result<(), forum_client::ForumError> {
//! let client = ForumClient::new()?;
//!
//! let topic = client.get_topic("my-resource", "12345").await?;
//! if let Some(post) = topic.first_post() {
//!     println!("{}", post.cooked.as_deref().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::ForumClient;
pub use error::{ForumError, Result};
pub use types::{Post, PostStream, TopicDetail};
