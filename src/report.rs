//! Relevance report assembly.
//!
//! Pulls recent admitted records and period stats out of the store and
//! hands them to the notification collaborator as one assembled payload.
//! Formatting and transport are the collaborator's problem; its boolean
//! result is surfaced, never retried.

use chrono::Duration;
use serde::Serialize;

use crate::models::AdmittedPaper;
use crate::store::{RelevanceStore, StoreError, StoreStats};

/// Assembled relevance report: admitted papers newest first, plus the
/// period's aggregate stats. Entries share [`AdmittedPaper`] with the run
/// output so the notifier sees one shape everywhere.
#[derive(Debug, Clone, Serialize)]
pub struct RelevanceReport {
    pub papers: Vec<AdmittedPaper>,
    pub stats: StoreStats,
    /// Window the report covers, in days. None = everything.
    pub window_days: Option<i64>,
}

impl RelevanceReport {
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

/// Out-of-scope notification collaborator. Owns formatting and transport;
/// reports success as a boolean.
pub trait Notifier {
    fn deliver(&self, report: &RelevanceReport) -> bool;
}

/// Assemble the report for the given window from the store.
pub fn assemble_report(
    store: &RelevanceStore,
    window: Option<Duration>,
) -> Result<RelevanceReport, StoreError> {
    let papers = store
        .query_recent(window, true)?
        .into_iter()
        .map(AdmittedPaper::from)
        .collect();
    let stats = store.aggregate_stats(window)?;

    Ok(RelevanceReport {
        papers,
        stats,
        window_days: window.map(|w| w.num_days()),
    })
}

/// Assemble and hand off the report. An empty report is not delivered.
/// Returns whether the notifier reported success.
pub fn dispatch_report(
    store: &RelevanceStore,
    window: Option<Duration>,
    notifier: &dyn Notifier,
) -> Result<bool, StoreError> {
    let report = assemble_report(store, window)?;

    if report.is_empty() {
        tracing::info!("No admitted papers in window, nothing to deliver");
        return Ok(false);
    }

    tracing::info!(
        papers = report.papers.len(),
        screened = report.stats.total,
        "Delivering relevance report"
    );
    let delivered = notifier.deliver(&report);
    if !delivered {
        tracing::warn!("Notifier reported delivery failure");
    }
    Ok(delivered)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use super::*;
    use crate::models::{ProcessingRecord, DEFAULT_FEED_GROUP};

    struct RecordingNotifier {
        deliveries: AtomicUsize,
        succeed: bool,
    }

    impl RecordingNotifier {
        fn new(succeed: bool) -> Self {
            Self {
                deliveries: AtomicUsize::new(0),
                succeed,
            }
        }
    }

    impl Notifier for RecordingNotifier {
        fn deliver(&self, _report: &RelevanceReport) -> bool {
            self.deliveries.fetch_add(1, Ordering::SeqCst);
            self.succeed
        }
    }

    fn seed(store: &RelevanceStore, url: &str, admitted: bool, age_days: i64) {
        store
            .record(&ProcessingRecord {
                paper_url: url.to_string(),
                feed_url: "https://feed.example/rss".to_string(),
                title: format!("Paper {url}"),
                authors: "Doe, J.".to_string(),
                source: "Journal".to_string(),
                feed_group: DEFAULT_FEED_GROUP.to_string(),
                field_match: admitted,
                method_match: admitted,
                admitted,
                summary: "Problem: X".to_string(),
                processed_at: Utc::now() - Duration::days(age_days),
            })
            .unwrap();
    }

    #[test]
    fn report_contains_only_recent_admitted() {
        let store = RelevanceStore::open_in_memory().unwrap();
        seed(&store, "https://e/in", true, 1);
        seed(&store, "https://e/rejected", false, 1);
        seed(&store, "https://e/old", true, 30);

        let report = assemble_report(&store, Some(Duration::days(7))).unwrap();
        assert_eq!(report.papers.len(), 1);
        assert_eq!(report.papers[0].link, "https://e/in");
        assert_eq!(report.window_days, Some(7));
        // Stats cover the whole window's record set, not just admitted
        assert_eq!(report.stats.total, 2);
        assert_eq!(report.stats.admitted, 1);
    }

    #[test]
    fn empty_report_is_not_delivered() {
        let store = RelevanceStore::open_in_memory().unwrap();
        let notifier = RecordingNotifier::new(true);
        let delivered = dispatch_report(&store, Some(Duration::days(7)), &notifier).unwrap();
        assert!(!delivered);
        assert_eq!(notifier.deliveries.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn delivery_failure_surfaced_not_retried() {
        let store = RelevanceStore::open_in_memory().unwrap();
        seed(&store, "https://e/in", true, 1);

        let notifier = RecordingNotifier::new(false);
        let delivered = dispatch_report(&store, None, &notifier).unwrap();
        assert!(!delivered);
        assert_eq!(notifier.deliveries.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn successful_delivery_reports_true() {
        let store = RelevanceStore::open_in_memory().unwrap();
        seed(&store, "https://e/in", true, 1);

        let notifier = RecordingNotifier::new(true);
        assert!(dispatch_report(&store, None, &notifier).unwrap());
    }
}
