//! Domain types and the provider contract for the timeloom pipeline.
//!
//! This crate carries everything that is independent of the concrete
//! generative-media backend:
//!
//! - [`timeline`]: the fixed decade sequence, generated frames, and the
//!   ordered timeline result.
//! - [`prompts`]: the fixed prompt templates for the three synthesis
//!   branches plus video-assembly wording.
//! - [`request`]: validated user input (subject text, optional seed image).
//! - [`provider`]: the [`MediaProvider`] trait the pipeline drives, with
//!   the image/video data types it exchanges.

pub mod error;
pub mod prompts;
pub mod provider;
pub mod request;
pub mod timeline;

pub use error::CoreError;
pub use provider::{
    ImageData, MediaProvider, ProviderError, VideoArtifact, VideoJob, VideoJobStatus,
};
pub use request::SeedImage;
pub use timeline::{decade_sequence, GeneratedFrame, TimelineResult};
