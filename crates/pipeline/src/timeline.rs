//! The sequential timeline synthesis loop.
//!
//! Frames are produced in strict decade order: step 0 is either an
//! image-edit call on the user's seed image or a text-to-image call,
//! and every later step is an image-edit call seeded by the immediately
//! preceding frame's output. Frame *i+1* is never requested before frame
//! *i* completes; that chaining is the product contract, not an
//! implementation accident.
//!
//! Any failed step aborts the remaining loop. Frames already appended to
//! the session are retained; nothing is rolled back and nothing retries.

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use timeloom_core::prompts;
use timeloom_core::provider::{ImageData, MediaProvider};
use timeloom_core::timeline::{decade_label, decade_sequence, progress_fraction, GeneratedFrame};

use crate::error::PipelineError;
use crate::events::TimelineEvent;
use crate::session::TimelineSession;

/// Run the synthesis loop over the standard decade sequence.
///
/// Each call starts a fresh sequence: any prior result and video offer
/// held by the session are invalidated before the first step.
/// Produces one frame per decade into `session`, emitting a
/// [`TimelineEvent::FrameCompleted`] after each step with fraction
/// `(index + 1) / total`. On full success the session's video offer is
/// raised. The cancellation token is checked before every synthesis
/// step; cancelling mid-step lets the in-flight call finish but stops
/// the loop before the next one.
pub async fn generate_timeline<P>(
    provider: &P,
    session: &mut TimelineSession,
    events: &broadcast::Sender<TimelineEvent>,
    cancel: &CancellationToken,
) -> Result<(), PipelineError>
where
    P: MediaProvider + ?Sized,
{
    generate_timeline_over(provider, session, &decade_sequence(), events, cancel).await
}

/// [`generate_timeline`] over an explicit decade schedule.
///
/// An empty schedule performs zero iterations and completes with an
/// empty result.
pub async fn generate_timeline_over<P>(
    provider: &P,
    session: &mut TimelineSession,
    decades: &[u16],
    events: &broadcast::Sender<TimelineEvent>,
    cancel: &CancellationToken,
) -> Result<(), PipelineError>
where
    P: MediaProvider + ?Sized,
{
    // Each run starts a fresh sequence; any prior result is invalidated.
    session.begin_run();

    let total = decades.len();
    let _ = events.send(TimelineEvent::TimelineStarted {
        subject: session.subject().to_string(),
        total,
    });
    tracing::info!(subject = %session.subject(), total, "Timeline run started");

    let outcome = run_loop(provider, session, decades, events, cancel).await;

    match &outcome {
        Ok(()) => {
            if !session.result().is_empty() {
                session.offer_video();
            }
            tracing::info!(frames = session.result().len(), "Timeline run completed");
            let _ = events.send(TimelineEvent::TimelineCompleted {
                frames: session.result().len(),
            });
        }
        Err(PipelineError::Cancelled) => {
            tracing::info!(
                frames = session.result().len(),
                "Timeline run cancelled"
            );
            let _ = events.send(TimelineEvent::TimelineCancelled {
                frames_completed: session.result().len(),
            });
        }
        Err(e) => {
            tracing::error!(
                frames = session.result().len(),
                error = %e,
                "Timeline run failed"
            );
            let _ = events.send(TimelineEvent::TimelineFailed {
                frames_completed: session.result().len(),
                error: e.to_string(),
            });
        }
    }

    outcome
}

/// The loop proper: synthesize, append, emit, repeat.
async fn run_loop<P>(
    provider: &P,
    session: &mut TimelineSession,
    decades: &[u16],
    events: &broadcast::Sender<TimelineEvent>,
    cancel: &CancellationToken,
) -> Result<(), PipelineError>
where
    P: MediaProvider + ?Sized,
{
    let total = decades.len();

    for (index, &decade) in decades.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let image = synthesize_step(provider, session, index, decade).await?;
        session
            .result_mut()
            .push(GeneratedFrame::new(decade, image))?;

        let label = decade_label(decade);
        let fraction = progress_fraction(index, total);
        tracing::debug!(decade, index, total, fraction, "Frame generated");
        let _ = events.send(TimelineEvent::FrameCompleted {
            decade,
            message: format!("Generated image for the {label}"),
            label,
            index,
            total,
            fraction,
        });
    }

    Ok(())
}

/// One synthesis step, with the three-way prompt branch:
///
/// - index 0, seed present: image-edit on the seed with the transform
///   instruction referencing the subject;
/// - index 0, no seed: text-to-image from the composed prompt;
/// - index >= 1: image-edit on the previous frame's output with the
///   evolution instruction.
async fn synthesize_step<P>(
    provider: &P,
    session: &TimelineSession,
    index: usize,
    decade: u16,
) -> Result<ImageData, PipelineError>
where
    P: MediaProvider + ?Sized,
{
    if index == 0 {
        return match session.seed() {
            Some(seed) => {
                let instruction = prompts::seeded_first_frame(session.subject(), decade);
                Ok(provider.edit_image(&seed.to_image_data(), &instruction).await?)
            }
            None => {
                let prompt = prompts::text_first_frame(session.subject(), decade);
                Ok(provider.generate_image(&prompt).await?)
            }
        };
    }

    let previous = session
        .result()
        .last()
        .ok_or(PipelineError::MissingImage { decade })?;
    let instruction = prompts::evolution(decade);
    Ok(provider.edit_image(&previous.image, &instruction).await?)
}
