//! Fixed prompt templates for the synthesis branches.
//!
//! Three distinct templates form a behavioral contract:
//!
//! 1. **Seeded first frame**: transform a user-supplied image toward the
//!    first decade, referencing the subject.
//! 2. **Text-only first frame**: pure text-to-image generation for the
//!    first decade.
//! 3. **Subsequent frame**: evolve the previous frame's output to the
//!    next decade, keeping subject and perspective stable.
//!
//! Video assembly adds a fourth, fixed time-lapse instruction plus a
//! rotating set of user-facing status messages for the polling wait.

use crate::timeline::{DECADE_END, DECADE_START};

// ---------------------------------------------------------------------------
// Image synthesis templates
// ---------------------------------------------------------------------------

/// Instruction for the first frame when the user supplied a seed image.
pub fn seeded_first_frame(subject: &str, decade: u16) -> String {
    format!(
        "Transform this image to look like it's from the {decade}s, \
         based on the prompt: {subject}. Maintain the core composition."
    )
}

/// Prompt for the first frame when no seed image was supplied.
pub fn text_first_frame(subject: &str, decade: u16) -> String {
    format!("A high-quality photo of {subject} in the {decade}s.")
}

/// Instruction for every frame after the first, seeded by the previous
/// frame's output.
pub fn evolution(decade: u16) -> String {
    format!("Evolve this scene to the {decade}s. Keep the main subject and perspective consistent.")
}

// ---------------------------------------------------------------------------
// Video assembly
// ---------------------------------------------------------------------------

/// Instruction for the time-lapse video job, seeded by the earliest frame.
pub fn video_time_lapse(subject: &str) -> String {
    format!(
        "Create a short, animated time-lapse video showing the evolution \
         of this scene from the {DECADE_START}s to {DECADE_END}. Subject: {subject}"
    )
}

/// Status messages rotated through while the video job is pending.
///
/// Pure user feedback; the cycle has no effect on control flow.
pub const VIDEO_STATUS_MESSAGES: [&str; 5] = [
    "Gathering temporal energy...",
    "Rendering keyframes from across the centuries...",
    "Stitching the timeline into a moving picture...",
    "Finalizing the cinematic time-lapse...",
    "Polishing the final reel...",
];

/// The status message to show on the given poll tick (wraps around).
pub fn video_status_message(tick: usize) -> &'static str {
    VIDEO_STATUS_MESSAGES[tick % VIDEO_STATUS_MESSAGES.len()]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
