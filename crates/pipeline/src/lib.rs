//! Timeline orchestration over a generative-media provider.
//!
//! This crate drives a [`timeloom_core::MediaProvider`] through the two
//! operations the product exposes:
//!
//! - [`timeline::generate_timeline`]: the sequential synthesis loop that
//!   produces one frame per decade, chaining each step's output image
//!   into the next step's input.
//! - [`video::generate_video`]: optional video assembly with one async
//!   job submission, a bounded cancellable polling wait, and the
//!   artifact download.
//!
//! State for one user session lives in an explicit [`TimelineSession`];
//! progress is fanned out as [`TimelineEvent`]s over a
//! `tokio::sync::broadcast` channel.

pub mod error;
pub mod events;
pub mod session;
pub mod timeline;
pub mod video;

pub use error::PipelineError;
pub use events::TimelineEvent;
pub use session::{TimelineSession, VideoOffer};
pub use timeline::{generate_timeline, generate_timeline_over};
pub use video::{generate_video, VideoConfig};
