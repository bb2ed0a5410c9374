//! Forum topic preview service
//!
//! Fetches the opening post of a forum topic and turns it into a short,
//! sanitized HTML preview plus the video and store links it mentions.
//! Results are kept in an in-memory TTL cache in front of the forum.

pub mod config;
pub mod error;
pub mod links;
pub mod preview;
pub mod sanitize;
pub mod server;
pub mod source;
pub mod truncate;
pub mod types;

pub use config::Config;
pub use error::{PreviewError, ServiceError};
pub use preview::{PreviewCache, PreviewService};
pub use source::TopicSource;
pub use types::{CachedPreview, ExtractedLinks, PreviewResult};
