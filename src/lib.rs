//! papersieve — academic-paper feed screening.
//!
//! Feed items arrive from an external ingestion collaborator, each unseen
//! item is classified by an interchangeable LLM backend against the
//! researcher's stated interests, a group-conditioned policy turns the two
//! match signals into an admit/reject decision, and the verdict is recorded
//! durably in SQLite so no item is ever screened twice. Admitted items are
//! handed to an external notifier as an ordered relevance report.

pub mod backend;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod policy;
pub mod protocol;
pub mod report;
pub mod store;

pub use backend::{create_backend, BackendError, ClassifierBackend};
pub use config::{ConfigError, ScreeningConfig};
pub use models::*;
pub use pipeline::{ItemOutcome, PipelineError, RunOutcome, ScreenOptions, ScreeningPipeline};
pub use report::{assemble_report, dispatch_report, Notifier, RelevanceReport};
pub use store::{RelevanceStore, StoreError};
