use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One admitted item as the notification collaborator sees it: the run's
/// admitted sequence and the assembled report both carry this shape.
#[derive(Debug, Clone, Serialize)]
pub struct AdmittedPaper {
    pub title: String,
    pub source: String,
    pub authors: String,
    pub link: String,
    pub feed_group: String,
    pub summary: String,
}

impl From<ProcessingRecord> for AdmittedPaper {
    fn from(rec: ProcessingRecord) -> Self {
        Self {
            title: rec.title,
            source: rec.source,
            authors: rec.authors,
            link: rec.paper_url,
            feed_group: rec.feed_group,
            summary: rec.summary,
        }
    }
}

/// One persisted screening row. Keyed uniquely by `paper_url`; a repeat
/// insert with the same key replaces the prior row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingRecord {
    pub paper_url: String,
    pub feed_url: String,
    pub title: String,
    pub authors: String,
    pub source: String,
    pub feed_group: String,
    pub field_match: bool,
    pub method_match: bool,
    pub admitted: bool,
    pub summary: String,
    pub processed_at: DateTime<Utc>,
}
