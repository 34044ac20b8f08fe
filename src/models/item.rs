use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One candidate paper entering the pipeline, produced by the ingestion
/// collaborator. Immutable in transit; the canonical link is its identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    /// Canonical item URL — the de-duplication key.
    pub link: String,
    pub authors: String,
    /// Abstract or body text. May be empty (title-only feeds).
    pub abstract_text: String,
    /// Journal/conference name.
    pub source: String,
    /// Origin feed identifier.
    pub feed_url: String,
    /// Operator-assigned classification bucket for the origin feed.
    pub feed_group: String,
    pub published: Option<DateTime<Utc>>,
}

impl FeedItem {
    /// The de-duplication key for this item.
    pub fn identity(&self) -> &str {
        &self.link
    }
}

/// Fallback group for feeds without an explicit bucket.
pub const DEFAULT_FEED_GROUP: &str = "default";
