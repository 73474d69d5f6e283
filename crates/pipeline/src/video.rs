//! Optional video assembly: one async job, a bounded polling wait, one
//! artifact.
//!
//! The provider synthesizes the video from the earliest frame plus a
//! fixed time-lapse instruction. The polling wait has an explicit
//! deadline and honors the cancellation token at every interval, so a
//! job the provider never finishes cannot hang the session.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use timeloom_core::prompts;
use timeloom_core::provider::{MediaProvider, VideoArtifact, VideoJobStatus};

use crate::error::PipelineError;
use crate::events::TimelineEvent;
use crate::session::TimelineSession;

/// Tunable parameters for the video polling wait.
#[derive(Debug, Clone)]
pub struct VideoConfig {
    /// Delay between status polls.
    pub poll_interval: Duration,
    /// Hard ceiling on the total wait for the job to finish.
    pub deadline: Duration,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            deadline: Duration::from_secs(600),
        }
    }
}

/// Assemble a time-lapse video from the session's timeline result.
///
/// Preconditions (a non-empty result and a non-empty subject) are
/// checked before any provider call. Exactly one job is submitted per
/// invocation, and at most one artifact is produced. On any failure no
/// partial artifact exists.
pub async fn generate_video<P>(
    provider: &P,
    session: &TimelineSession,
    config: &VideoConfig,
    events: &broadcast::Sender<TimelineEvent>,
    cancel: &CancellationToken,
) -> Result<VideoArtifact, PipelineError>
where
    P: MediaProvider + ?Sized,
{
    let outcome = run_video(provider, session, config, events, cancel).await;

    match &outcome {
        Ok(artifact) => {
            tracing::info!(
                bytes = artifact.bytes.len(),
                mime_type = %artifact.mime_type,
                "Video assembled"
            );
            let _ = events.send(TimelineEvent::VideoCompleted {
                bytes: artifact.bytes.len(),
                mime_type: artifact.mime_type.clone(),
            });
        }
        Err(PipelineError::Cancelled) => {
            tracing::info!("Video assembly cancelled");
            let _ = events.send(TimelineEvent::VideoCancelled);
        }
        Err(e) => {
            tracing::error!(error = %e, "Video assembly failed");
            let _ = events.send(TimelineEvent::VideoFailed {
                error: e.to_string(),
            });
        }
    }

    outcome
}

async fn run_video<P>(
    provider: &P,
    session: &TimelineSession,
    config: &VideoConfig,
    events: &broadcast::Sender<TimelineEvent>,
    cancel: &CancellationToken,
) -> Result<VideoArtifact, PipelineError>
where
    P: MediaProvider + ?Sized,
{
    // Preconditions come first: a violated one must not reach the network.
    let first = session.result().first().ok_or_else(|| {
        PipelineError::Precondition("cannot assemble a video without a completed timeline".into())
    })?;
    if session.subject().is_empty() {
        return Err(PipelineError::Precondition(
            "cannot assemble a video without a subject".into(),
        ));
    }
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }

    let instruction = prompts::video_time_lapse(session.subject());
    let job = provider.submit_video(&first.image, &instruction).await?;
    let _ = events.send(TimelineEvent::VideoSubmitted {
        operation: job.operation.clone(),
    });

    let started = tokio::time::Instant::now();
    let mut tick = 0usize;

    let download_uri = loop {
        let _ = events.send(TimelineEvent::VideoProgress {
            message: prompts::video_status_message(tick).to_string(),
        });

        match provider.poll_video(&job).await? {
            VideoJobStatus::Finished { download_uri } => {
                break download_uri.ok_or(PipelineError::MissingDownloadUri)?;
            }
            VideoJobStatus::Pending => {}
        }

        let waited = started.elapsed();
        if waited >= config.deadline {
            return Err(PipelineError::DeadlineExceeded { waited });
        }

        tokio::select! {
            _ = cancel.cancelled() => return Err(PipelineError::Cancelled),
            _ = tokio::time::sleep(config.poll_interval) => {}
        }

        tick += 1;
    };

    let _ = events.send(TimelineEvent::VideoDownloading);
    Ok(provider.fetch_video(&download_uri).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_contract() {
        let config = VideoConfig::default();
        assert_eq!(config.poll_interval, Duration::from_secs(10));
        assert!(config.deadline > config.poll_interval);
    }
}
