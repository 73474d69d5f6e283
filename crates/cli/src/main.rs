//! Command-line front-end: run a full timeline synthesis against the
//! Gemini API, write the frames to disk, and optionally assemble the
//! time-lapse video.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use timeloom_core::provider::VideoArtifact;
use timeloom_gemini::GeminiClient;
use timeloom_pipeline::{
    generate_timeline, generate_video, TimelineEvent, TimelineSession, VideoConfig,
};

/// Synthesize a subject evolving decade by decade, 1800 through 2100.
#[derive(Debug, Parser)]
#[command(name = "timeloom", version, about)]
struct Args {
    /// What to depict, e.g. "a city street corner".
    subject: String,

    /// Seed image (PNG, JPEG, or WebP) to transform for the first frame.
    /// Without one the first frame is generated from text alone.
    #[arg(long, value_name = "PATH")]
    seed: Option<PathBuf>,

    /// Directory to write frames (and the video) into.
    #[arg(long, value_name = "DIR", default_value = "timeloom-out")]
    out: PathBuf,

    /// Also assemble a time-lapse video after the timeline completes.
    #[arg(long)]
    video: bool,

    /// Seconds between video job status polls.
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    poll_interval_secs: u64,

    /// Give up on the video job after this many seconds.
    #[arg(long, value_name = "SECS", default_value_t = 600)]
    video_timeout_secs: u64,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "timeloom=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "Run failed");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let client = GeminiClient::from_env().context("failed to configure the Gemini client")?;

    let mut session = TimelineSession::new();
    session.submit(&args.subject)?;

    if let Some(path) = &args.seed {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read seed image {}", path.display()))?;
        session.attach_seed(bytes)?;
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create output directory {}", args.out.display()))?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current step");
            ctrl_c.cancel();
        }
    });

    let (events, rx) = broadcast::channel(256);
    let printer = tokio::spawn(print_events(rx));

    let timeline = generate_timeline(&client, &mut session, &events, &cancel).await;

    write_frames(&session, &args.out)?;
    timeline.context("timeline synthesis failed")?;

    if args.video {
        let config = VideoConfig {
            poll_interval: Duration::from_secs(args.poll_interval_secs),
            deadline: Duration::from_secs(args.video_timeout_secs),
        };
        let artifact = generate_video(&client, &session, &config, &events, &cancel)
            .await
            .context("video assembly failed")?;
        write_video(&artifact, &args.out)?;
    }

    drop(events);
    let _ = printer.await;
    Ok(())
}

/// Render pipeline events as terminal status lines.
async fn print_events(mut rx: broadcast::Receiver<TimelineEvent>) {
    while let Ok(event) = rx.recv().await {
        match event {
            TimelineEvent::TimelineStarted { subject, total } => {
                println!("Generating {total} frames for \"{subject}\"");
            }
            TimelineEvent::FrameCompleted {
                index,
                total,
                message,
                ..
            } => {
                println!("[{}/{total}] {message}", index + 1);
            }
            TimelineEvent::TimelineCompleted { frames } => {
                println!("Timeline complete: {frames} frames");
            }
            TimelineEvent::TimelineFailed {
                frames_completed,
                error,
            } => {
                println!("Timeline failed after {frames_completed} frames: {error}");
            }
            TimelineEvent::TimelineCancelled { frames_completed } => {
                println!("Timeline cancelled after {frames_completed} frames");
            }
            TimelineEvent::VideoSubmitted { .. } => {
                println!("Video job submitted");
            }
            TimelineEvent::VideoProgress { message } => {
                println!("{message}");
            }
            TimelineEvent::VideoDownloading => {
                println!("Downloading video...");
            }
            TimelineEvent::VideoCompleted { bytes, .. } => {
                println!("Video ready ({bytes} bytes)");
            }
            TimelineEvent::VideoFailed { error } => {
                println!("Video assembly failed: {error}");
            }
            TimelineEvent::VideoCancelled => {
                println!("Video assembly cancelled");
            }
        }
    }
}

/// Write every frame in the session, even after a partial run.
fn write_frames(session: &TimelineSession, out: &Path) -> anyhow::Result<()> {
    for frame in session.result().frames() {
        let path = out.join(format!(
            "{}.{}",
            frame.decade,
            extension_for(&frame.image.mime_type)
        ));
        std::fs::write(&path, &frame.image.bytes)
            .with_context(|| format!("failed to write frame {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Frame written");
    }
    tracing::info!(frames = session.result().len(), out = %out.display(), "Frames written");
    Ok(())
}

fn write_video(artifact: &VideoArtifact, out: &Path) -> anyhow::Result<()> {
    let path = out.join(format!("timelapse.{}", extension_for(&artifact.mime_type)));
    std::fs::write(&path, &artifact.bytes)
        .with_context(|| format!("failed to write video {}", path.display()))?;
    tracing::info!(path = %path.display(), "Video written");
    Ok(())
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "image/png" => "png",
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        _ => "bin",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_covers_supported_formats() {
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("image/jpeg"), "jpg");
        assert_eq!(extension_for("image/webp"), "webp");
        assert_eq!(extension_for("video/mp4"), "mp4");
        assert_eq!(extension_for("application/octet-stream"), "bin");
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::parse_from(["timeloom", "a lighthouse"]);
        assert_eq!(args.subject, "a lighthouse");
        assert!(args.seed.is_none());
        assert!(!args.video);
        assert_eq!(args.poll_interval_secs, 10);
        assert_eq!(args.video_timeout_secs, 600);
    }
}
