//! The media-provider contract driven by the pipeline.
//!
//! [`MediaProvider`] abstracts the external generative-media service:
//! text-to-image, image-edit, and asynchronous video-synthesis jobs.
//! The pipeline crate only ever talks to this trait, which keeps the
//! orchestration loop testable with scripted doubles and keeps the
//! concrete backend (the `timeloom-gemini` crate) swappable.

use async_trait::async_trait;

// ---------------------------------------------------------------------------
// Exchanged data
// ---------------------------------------------------------------------------

/// Raw image bytes plus their MIME type.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Handle for a submitted asynchronous video-synthesis job.
#[derive(Debug, Clone)]
pub struct VideoJob {
    /// Provider-assigned operation name used for polling.
    pub operation: String,
}

/// Result of polling a [`VideoJob`].
#[derive(Debug, Clone)]
pub enum VideoJobStatus {
    /// The job is still running; poll again later.
    Pending,
    /// The job reached a terminal state. `download_uri` is `None` when
    /// the provider finished without producing a usable artifact.
    Finished { download_uri: Option<String> },
}

/// The final assembled video binary.
#[derive(Debug, Clone)]
pub struct VideoArtifact {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced by a media provider implementation.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request never completed (network, DNS, TLS, etc.).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The response was syntactically valid but missing expected content.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),

    /// A synthesis call succeeded but carried no usable image.
    #[error("No image returned by the provider")]
    MissingImage,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// External generative-media service: the three operation kinds the
/// timeline pipeline consumes.
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Text-to-image synthesis: one image from a prompt.
    async fn generate_image(&self, prompt: &str) -> Result<ImageData, ProviderError>;

    /// Image-edit synthesis: one output image from a seed image plus an
    /// instruction.
    async fn edit_image(
        &self,
        seed: &ImageData,
        instruction: &str,
    ) -> Result<ImageData, ProviderError>;

    /// Submit an asynchronous video-synthesis job seeded with an image.
    async fn submit_video(
        &self,
        seed: &ImageData,
        instruction: &str,
    ) -> Result<VideoJob, ProviderError>;

    /// Poll a previously submitted video job.
    async fn poll_video(&self, job: &VideoJob) -> Result<VideoJobStatus, ProviderError>;

    /// Fetch the finished video binary from its download reference.
    async fn fetch_video(&self, download_uri: &str) -> Result<VideoArtifact, ProviderError>;
}
