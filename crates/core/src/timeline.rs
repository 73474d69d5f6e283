//! Decade sequence constants, generated frames, and progress math.
//!
//! The decade sequence is the fixed schedule that drives how many
//! synthesis steps a timeline run performs. It is derived from constants
//! and is strictly increasing by construction; [`TimelineResult`] enforces
//! the same ordering on the frames appended to it.

use crate::error::CoreError;
use crate::provider::ImageData;

// ---------------------------------------------------------------------------
// Decade sequence
// ---------------------------------------------------------------------------

/// First target decade (inclusive).
pub const DECADE_START: u16 = 1800;
/// Last target decade (inclusive).
pub const DECADE_END: u16 = 2100;
/// Spacing between consecutive target decades, in years.
pub const DECADE_STEP: u16 = 10;

/// The fixed ordered list of target decades: 1800, 1810, .., 2100.
///
/// Strictly increasing, 31 entries. Every timeline run iterates this
/// sequence front to back.
pub fn decade_sequence() -> Vec<u16> {
    (DECADE_START..=DECADE_END)
        .step_by(DECADE_STEP as usize)
        .collect()
}

/// Human-readable label for a decade, e.g. `"1870s"`.
pub fn decade_label(decade: u16) -> String {
    format!("{decade}s")
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Fraction of the run completed once the frame at `index` is done.
///
/// Returns `(index + 1) / total`, clamped to 1.0. A zero `total` (empty
/// decade sequence) yields 0.0; no frame events are emitted in that case
/// anyway.
pub fn progress_fraction(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (((index + 1) as f64) / total as f64).min(1.0)
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

/// One synthesized image tied to a specific decade.
///
/// Immutable once created; ownership moves into the [`TimelineResult`]
/// when the frame is appended.
#[derive(Debug, Clone)]
pub struct GeneratedFrame {
    /// The target decade this frame depicts.
    pub decade: u16,
    /// The synthesized image bytes and their MIME type.
    pub image: ImageData,
}

impl GeneratedFrame {
    pub fn new(decade: u16, image: ImageData) -> Self {
        Self { decade, image }
    }
}

/// The ordered collection of frames produced by one orchestration run.
///
/// Frames are appended in decade order only; [`push`](Self::push) rejects
/// any frame that does not strictly follow the previous one. On a failed
/// run the result holds the prefix of frames completed before the failure.
#[derive(Debug, Clone, Default)]
pub struct TimelineResult {
    frames: Vec<GeneratedFrame>,
}

impl TimelineResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame, enforcing strictly increasing decades.
    pub fn push(&mut self, frame: GeneratedFrame) -> Result<(), CoreError> {
        if let Some(last) = self.frames.last() {
            if frame.decade <= last.decade {
                return Err(CoreError::FrameOrder {
                    pushed: frame.decade,
                    last: last.decade,
                });
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// All frames in decade order.
    pub fn frames(&self) -> &[GeneratedFrame] {
        &self.frames
    }

    /// The earliest frame, if any. Seeds video assembly.
    pub fn first(&self) -> Option<&GeneratedFrame> {
        self.frames.first()
    }

    /// The most recent frame, if any. Seeds the next synthesis step.
    pub fn last(&self) -> Option<&GeneratedFrame> {
        self.frames.last()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Discard all frames (a new submission invalidates the prior result).
    pub fn clear(&mut self) {
        self.frames.clear();
    }

    /// The decades covered so far, in order.
    pub fn decades(&self) -> Vec<u16> {
        self.frames.iter().map(|f| f.decade).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn frame(decade: u16) -> GeneratedFrame {
        GeneratedFrame::new(decade, ImageData::new(vec![0u8; 4], "image/png"))
    }

    // -- decade sequence --

    #[test]
    fn sequence_spans_full_range() {
        let seq = decade_sequence();
        assert_eq!(seq.first(), Some(&DECADE_START));
        assert_eq!(seq.last(), Some(&DECADE_END));
        assert_eq!(seq.len(), 31);
    }

    #[test]
    fn sequence_is_strictly_increasing_by_step() {
        let seq = decade_sequence();
        for pair in seq.windows(2) {
            assert_eq!(pair[1] - pair[0], DECADE_STEP);
        }
    }

    #[test]
    fn label_appends_s() {
        assert_eq!(decade_label(1870), "1870s");
    }

    // -- progress --

    #[test]
    fn progress_first_and_last_frame() {
        let total = decade_sequence().len();
        assert!(progress_fraction(0, total) > 0.0);
        assert!((progress_fraction(total - 1, total) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn progress_is_monotonic() {
        let total = decade_sequence().len();
        let mut prev = 0.0;
        for i in 0..total {
            let f = progress_fraction(i, total);
            assert!(f >= prev);
            prev = f;
        }
    }

    #[test]
    fn progress_empty_sequence_is_zero() {
        assert_eq!(progress_fraction(0, 0), 0.0);
    }

    // -- timeline result --

    #[test]
    fn push_in_order_accumulates() {
        let mut result = TimelineResult::new();
        result.push(frame(1800)).unwrap();
        result.push(frame(1810)).unwrap();
        assert_eq!(result.decades(), vec![1800, 1810]);
        assert_eq!(result.first().unwrap().decade, 1800);
        assert_eq!(result.last().unwrap().decade, 1810);
    }

    #[test]
    fn push_out_of_order_rejected() {
        let mut result = TimelineResult::new();
        result.push(frame(1810)).unwrap();
        assert_matches!(
            result.push(frame(1800)),
            Err(CoreError::FrameOrder { pushed: 1800, last: 1810 })
        );
        // The bad frame must not have been appended.
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn push_duplicate_decade_rejected() {
        let mut result = TimelineResult::new();
        result.push(frame(1900)).unwrap();
        assert_matches!(result.push(frame(1900)), Err(CoreError::FrameOrder { .. }));
    }

    #[test]
    fn clear_discards_frames() {
        let mut result = TimelineResult::new();
        result.push(frame(1800)).unwrap();
        result.clear();
        assert!(result.is_empty());
        assert!(result.first().is_none());
    }
}
