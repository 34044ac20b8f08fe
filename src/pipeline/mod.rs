pub mod orchestrator;

pub use orchestrator::*;

use thiserror::Error;

use crate::store::StoreError;

/// Run-fatal pipeline errors. Backend failures are not here — they are
/// isolated per item and reported in the run outcome instead.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Losing a classified verdict would break the at-most-once guarantee,
    /// so store failures abort the run where they occur.
    #[error("Relevance store error: {0}")]
    Store(#[from] StoreError),
}
