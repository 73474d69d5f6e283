//! Progress events emitted while a run is in flight.
//!
//! These events are the pipeline's caller-facing progress surface: a
//! front-end subscribes to the broadcast channel and renders them however
//! it likes. They are observable side effects only; control flow never
//! depends on whether anyone is listening.

use serde::Serialize;

/// An event describing the state of a timeline or video run.
#[derive(Debug, Clone, Serialize)]
pub enum TimelineEvent {
    /// A timeline run began.
    TimelineStarted { subject: String, total: usize },

    /// A synthesis step finished and its frame was appended.
    FrameCompleted {
        decade: u16,
        /// Human-readable decade label, e.g. `"1870s"`.
        label: String,
        /// Zero-based step index.
        index: usize,
        /// Total number of steps in this run.
        total: usize,
        /// Completion fraction, `(index + 1) / total`.
        fraction: f64,
        /// Free-text status line for display.
        message: String,
    },

    /// All decades were synthesized.
    TimelineCompleted { frames: usize },

    /// A step failed; the run stopped with a partial result.
    TimelineFailed { frames_completed: usize, error: String },

    /// The caller cancelled the run; the partial result is retained.
    TimelineCancelled { frames_completed: usize },

    /// The video job was accepted by the provider.
    VideoSubmitted { operation: String },

    /// The video job is still pending; rotating status line for display.
    VideoProgress { message: String },

    /// The video job finished; the artifact download started.
    VideoDownloading,

    /// Video assembly succeeded.
    VideoCompleted { bytes: usize, mime_type: String },

    /// Video assembly failed; no artifact was produced.
    VideoFailed { error: String },

    /// The caller cancelled video assembly.
    VideoCancelled,
}
