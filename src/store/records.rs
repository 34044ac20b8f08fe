use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, Row};
use serde::Serialize;

use super::{open_database, open_memory_database, StoreError};
use crate::models::{ProcessingRecord, DEFAULT_FEED_GROUP};

/// Aggregate view over the filtered record set. Counts are zero and the
/// timestamp bounds absent when nothing matches.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub total: i64,
    pub admitted: i64,
    pub rejected: i64,
    pub distinct_feeds: i64,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

/// Durable record of "item identity → verdict" — the de-duplication
/// authority. One row per paper URL, upserted, never deleted by the
/// pipeline.
pub struct RelevanceStore {
    conn: Connection,
}

impl RelevanceStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_database(path)?,
        })
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: open_memory_database()?,
        })
    }

    /// Raw connection for tests that need to sabotage the store.
    #[cfg(test)]
    pub(crate) fn connection(&self) -> &Connection {
        &self.conn
    }

    /// True iff a record with this identity already exists.
    pub fn has_seen(&self, paper_url: &str) -> Result<bool, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT 1 FROM papers WHERE paper_url = ?1")?;
        Ok(stmt.exists(params![paper_url])?)
    }

    /// Upsert one processing record, keyed by `paper_url`.
    ///
    /// The write is committed before this returns — a crash immediately
    /// after a successful call must not lose the row.
    pub fn record(&self, rec: &ProcessingRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO papers
             (feed_url, paper_url, title, authors, source, feed_group,
              admitted, field_match, method_match, summary, processed_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                rec.feed_url,
                rec.paper_url,
                rec.title,
                rec.authors,
                rec.source,
                rec.feed_group,
                rec.admitted,
                rec.field_match,
                rec.method_match,
                rec.summary,
                rec.processed_at,
            ],
        )?;
        Ok(())
    }

    /// Records processed within the window (all records when `within` is
    /// None), newest first. Optionally restricted to admitted records.
    pub fn query_recent(
        &self,
        within: Option<Duration>,
        admitted_only: bool,
    ) -> Result<Vec<ProcessingRecord>, StoreError> {
        let cutoff = within.map(|d| Utc::now() - d);
        let mut stmt = self.conn.prepare(
            "SELECT paper_url, feed_url, title, authors, source, feed_group,
                    field_match, method_match, admitted, summary, processed_at
             FROM papers
             WHERE (?1 IS NULL OR processed_at >= ?1)
               AND (?2 = FALSE OR admitted = TRUE)
             ORDER BY processed_at DESC",
        )?;

        let rows = stmt.query_map(params![cutoff, admitted_only], record_from_row)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Pure aggregation over the windowed record set.
    pub fn aggregate_stats(&self, within: Option<Duration>) -> Result<StoreStats, StoreError> {
        let cutoff = within.map(|d| Utc::now() - d);
        let stats = self.conn.query_row(
            "SELECT COUNT(*),
                    COALESCE(SUM(admitted), 0),
                    COUNT(DISTINCT feed_url),
                    MIN(processed_at),
                    MAX(processed_at)
             FROM papers
             WHERE (?1 IS NULL OR processed_at >= ?1)",
            params![cutoff],
            |row| {
                let total: i64 = row.get(0)?;
                let admitted: i64 = row.get(1)?;
                Ok(StoreStats {
                    total,
                    admitted,
                    rejected: total - admitted,
                    distinct_feeds: row.get(2)?,
                    earliest: row.get(3)?,
                    latest: row.get(4)?,
                })
            },
        )?;
        Ok(stats)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ProcessingRecord> {
    Ok(ProcessingRecord {
        paper_url: row.get(0)?,
        feed_url: row.get(1)?,
        title: row.get(2)?,
        // Nullable since v2 — rows persisted before the migration read back
        // as NULL.
        authors: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        source: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        feed_group: row
            .get::<_, Option<String>>(5)?
            .unwrap_or_else(|| DEFAULT_FEED_GROUP.to_string()),
        field_match: row.get(6)?,
        method_match: row.get(7)?,
        admitted: row.get(8)?,
        summary: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
        processed_at: row.get(10)?,
    })
}
