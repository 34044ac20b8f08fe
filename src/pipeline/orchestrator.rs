//! Screening pipeline orchestrator.
//!
//! Drives each incoming item through dedup check → classification →
//! policy → persistence, collecting admitted items in encounter order.
//! Backend failures are isolated per item; store failures abort the run.
//!
//! Collaborators are injected as handles (store, backend, profile) so the
//! whole pipeline runs against mocks in tests — no process-wide state.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::PipelineError;
use crate::backend::ClassifierBackend;
use crate::config::{ScreeningConfig, DEFAULT_SCREEN_WINDOW_DAYS};
use crate::models::{AdmittedPaper, FeedItem, PreferenceProfile, ProcessingRecord};
use crate::policy;
use crate::protocol::{build_screening_prompt, parse_screening_response};
use crate::store::RelevanceStore;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Per-run pipeline knobs, taken from the validated config.
#[derive(Debug, Clone)]
pub struct ScreenOptions {
    /// Items published before now − window are skipped without
    /// classification. None disables the filter. Items without a
    /// publication timestamp always pass.
    pub recency_window: Option<Duration>,
    /// Max items per origin feed accepted into one run's classification
    /// set. 0 = unlimited.
    pub max_per_feed: usize,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            recency_window: Some(Duration::days(DEFAULT_SCREEN_WINDOW_DAYS)),
            max_per_feed: 0,
        }
    }
}

impl From<&ScreeningConfig> for ScreenOptions {
    fn from(config: &ScreeningConfig) -> Self {
        Self {
            recency_window: config.screen_window(),
            max_per_feed: config.max_per_feed,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Terminal state of one item in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemOutcome {
    /// Already recorded in the store, or a repeat identity in this batch.
    /// Nothing classified, nothing written.
    SkippedDuplicate,
    /// Published before the recency window. Not classified, not persisted.
    SkippedStale,
    /// Over the per-feed cap. Not persisted — eligible in a future run.
    SkippedCapped,
    Admitted,
    Rejected,
    /// Backend call failed; no record written, run continued.
    Errored { reason: String },
}

/// Per-item report line for the run.
#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub paper_url: String,
    pub title: String,
    pub outcome: ItemOutcome,
}

/// Run-level counters, logged at the end of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub received: usize,
    pub skipped_duplicate: usize,
    pub skipped_stale: usize,
    pub skipped_capped: usize,
    pub admitted: usize,
    pub rejected: usize,
    pub errored: usize,
}

/// Everything a run produced: the ordered admitted sequence for the
/// notifier plus the per-item audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub admitted: Vec<AdmittedPaper>,
    pub items: Vec<ItemReport>,
    pub summary: RunSummary,
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Drives items through the fixed pipeline shape:
/// ingest → dedup check → classify → persist → report.
pub struct ScreeningPipeline<'a> {
    store: &'a RelevanceStore,
    backend: &'a dyn ClassifierBackend,
    profile: &'a PreferenceProfile,
    options: ScreenOptions,
}

impl<'a> ScreeningPipeline<'a> {
    pub fn new(
        store: &'a RelevanceStore,
        backend: &'a dyn ClassifierBackend,
        profile: &'a PreferenceProfile,
        options: ScreenOptions,
    ) -> Self {
        Self {
            store,
            backend,
            profile,
            options,
        }
    }

    /// Screen one batch of items, in encounter order.
    ///
    /// Returns Err only on a store failure — silently dropping a classified
    /// verdict would break the at-most-once guarantee. Backend failures are
    /// recorded per item and the run continues.
    pub fn run(&self, items: &[FeedItem]) -> Result<RunOutcome, PipelineError> {
        let cutoff = self.options.recency_window.map(|w| Utc::now() - w);

        let mut admitted = Vec::new();
        let mut reports = Vec::new();
        let mut summary = RunSummary {
            received: items.len(),
            ..Default::default()
        };

        // Duplicate identities inside one batch are settled here, before any
        // write, so the store upsert is never raced for one key within a run.
        let mut batch_identities: HashSet<&str> = HashSet::new();
        let mut feed_counts: HashMap<&str, usize> = HashMap::new();

        tracing::info!(
            items = items.len(),
            provider = self.backend.provider(),
            model = self.backend.model(),
            "Starting screening run"
        );

        for item in items {
            let outcome = if !batch_identities.insert(item.identity()) {
                tracing::debug!(url = %item.link, "Repeat identity in batch, keeping first");
                ItemOutcome::SkippedDuplicate
            } else if is_stale(item, cutoff) {
                tracing::debug!(url = %item.link, "Older than recency window");
                ItemOutcome::SkippedStale
            } else if self.store.has_seen(item.identity())? {
                tracing::debug!(url = %item.link, "Already screened in a previous run");
                ItemOutcome::SkippedDuplicate
            } else if self.feed_cap_reached(&mut feed_counts, item) {
                tracing::debug!(url = %item.link, feed = %item.feed_url, "Per-feed cap reached");
                ItemOutcome::SkippedCapped
            } else {
                self.classify_and_record(item, &mut admitted)?
            };

            match &outcome {
                ItemOutcome::SkippedDuplicate => summary.skipped_duplicate += 1,
                ItemOutcome::SkippedStale => summary.skipped_stale += 1,
                ItemOutcome::SkippedCapped => summary.skipped_capped += 1,
                ItemOutcome::Admitted => summary.admitted += 1,
                ItemOutcome::Rejected => summary.rejected += 1,
                ItemOutcome::Errored { .. } => summary.errored += 1,
            }

            reports.push(ItemReport {
                paper_url: item.link.clone(),
                title: item.title.clone(),
                outcome,
            });
        }

        tracing::info!(
            received = summary.received,
            admitted = summary.admitted,
            rejected = summary.rejected,
            duplicate = summary.skipped_duplicate,
            stale = summary.skipped_stale,
            capped = summary.skipped_capped,
            errored = summary.errored,
            "Screening run finished"
        );

        Ok(RunOutcome {
            admitted,
            items: reports,
            summary,
        })
    }

    /// Count the item against its feed's cap. True when the cap is already
    /// spent; counters are per-run only, never persisted.
    fn feed_cap_reached<'b>(
        &self,
        feed_counts: &mut HashMap<&'b str, usize>,
        item: &'b FeedItem,
    ) -> bool {
        if self.options.max_per_feed == 0 {
            return false;
        }
        let count = feed_counts.entry(item.feed_url.as_str()).or_insert(0);
        if *count >= self.options.max_per_feed {
            return true;
        }
        *count += 1;
        false
    }

    /// Classify one item end to end: prompt → backend → parse → policy →
    /// durable record. Nothing is written until the verdict is complete.
    fn classify_and_record(
        &self,
        item: &FeedItem,
        admitted: &mut Vec<AdmittedPaper>,
    ) -> Result<ItemOutcome, PipelineError> {
        tracing::info!(group = %item.feed_group, title = %item.title, "Screening");

        let prompt = build_screening_prompt(self.profile, item);
        let response = match self.backend.classify(&prompt) {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(url = %item.link, error = %e, "Backend call failed, skipping item");
                return Ok(ItemOutcome::Errored {
                    reason: e.to_string(),
                });
            }
        };

        let signals = parse_screening_response(&response);
        let verdict = policy::evaluate_verdict(signals, &item.feed_group);

        self.store.record(&ProcessingRecord {
            paper_url: item.link.clone(),
            feed_url: item.feed_url.clone(),
            title: item.title.clone(),
            authors: item.authors.clone(),
            source: item.source.clone(),
            feed_group: item.feed_group.clone(),
            field_match: verdict.field_match,
            method_match: verdict.method_match,
            admitted: verdict.admitted,
            summary: verdict.summary.clone(),
            processed_at: Utc::now(),
        })?;

        tracing::debug!(
            field = verdict.field_match,
            method = verdict.method_match,
            admitted = verdict.admitted,
            "Verdict recorded"
        );

        if verdict.admitted {
            admitted.push(AdmittedPaper {
                title: item.title.clone(),
                source: item.source.clone(),
                authors: item.authors.clone(),
                link: item.link.clone(),
                feed_group: item.feed_group.clone(),
                summary: verdict.summary,
            });
            Ok(ItemOutcome::Admitted)
        } else {
            Ok(ItemOutcome::Rejected)
        }
    }
}

fn is_stale(item: &FeedItem, cutoff: Option<DateTime<Utc>>) -> bool {
    // Unknown age is never excluded — conservative.
    match (cutoff, item.published) {
        (Some(cutoff), Some(published)) => published < cutoff,
        _ => false,
    }
}
