use std::time::Duration;

use timeloom_core::{CoreError, ProviderError};

/// Errors surfaced by the orchestration layer.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A domain invariant or input validation failed.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// The provider call failed or returned no usable content.
    #[error("{0}")]
    Provider(#[from] ProviderError),

    /// A step after the first found no previous frame to evolve from.
    #[error("Missing previous frame for the {decade}s step")]
    MissingImage { decade: u16 },

    /// An operation was requested in a state that forbids it. Rejected
    /// before any network call.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The video job reached a terminal state without a download
    /// reference.
    #[error("The video job finished without a download reference")]
    MissingDownloadUri,

    /// The video job did not finish within the configured deadline.
    #[error("Video job still pending after {waited:?}")]
    DeadlineExceeded { waited: Duration },

    /// The caller cancelled the operation.
    #[error("Operation cancelled")]
    Cancelled,
}
