//! Explicit per-session state for timeline runs.
//!
//! A [`TimelineSession`] owns everything one front-end session mutates:
//! the current subject, the optional seed image, the accumulated result,
//! and the video-offer state. Operations take the session by reference,
//! so there is no process-wide mutable state and no implicit coupling
//! between runs; starting a new submission simply discards the prior
//! result held here.

use timeloom_core::request::validate_subject;
use timeloom_core::{CoreError, SeedImage, TimelineResult};

/// Whether video assembly is currently on offer for the session's result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VideoOffer {
    /// No completed timeline to assemble, or the offer was consumed.
    #[default]
    NotOffered,
    /// The last run completed fully; video assembly is available.
    Offered,
    /// The user declined the offer for the current result.
    Declined,
}

/// Mutable state for one user session. One timeline may be outstanding
/// at a time; [`submit`](Self::submit) starts a fresh run and discards
/// the previous result.
#[derive(Debug, Default)]
pub struct TimelineSession {
    subject: String,
    seed: Option<SeedImage>,
    result: TimelineResult,
    video_offer: VideoOffer,
}

impl TimelineSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a seed image for the next run.
    ///
    /// The bytes are format-sniffed immediately; on failure the seed is
    /// cleared and the error returned. This is recoverable and never
    /// affects a run already in progress.
    pub fn attach_seed(&mut self, bytes: Vec<u8>) -> Result<(), CoreError> {
        match SeedImage::from_bytes(bytes) {
            Ok(seed) => {
                self.seed = Some(seed);
                Ok(())
            }
            Err(e) => {
                self.seed = None;
                Err(e)
            }
        }
    }

    /// Remove the seed image, if any.
    pub fn clear_seed(&mut self) {
        self.seed = None;
    }

    pub fn seed(&self) -> Option<&SeedImage> {
        self.seed.as_ref()
    }

    /// Begin a new submission: validate and store the subject, discard
    /// any prior result and video offer.
    pub fn submit(&mut self, subject: &str) -> Result<(), CoreError> {
        self.subject = validate_subject(subject)?;
        self.result.clear();
        self.video_offer = VideoOffer::NotOffered;
        Ok(())
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// The frames produced so far (partial while running or after a
    /// failed run).
    pub fn result(&self) -> &TimelineResult {
        &self.result
    }

    pub(crate) fn result_mut(&mut self) -> &mut TimelineResult {
        &mut self.result
    }

    /// Invalidate the prior result and video offer ahead of a fresh run.
    pub(crate) fn begin_run(&mut self) {
        self.result.clear();
        self.video_offer = VideoOffer::NotOffered;
    }

    /// Clear all session state: subject, seed, result, video offer.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn video_offer(&self) -> VideoOffer {
        self.video_offer
    }

    /// Mark video assembly as available for the current result.
    pub(crate) fn offer_video(&mut self) {
        self.video_offer = VideoOffer::Offered;
    }

    /// Decline the video offer. Local state only; nothing in flight is
    /// affected.
    pub fn decline_video(&mut self) {
        self.video_offer = VideoOffer::Declined;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use timeloom_core::provider::ImageData;
    use timeloom_core::GeneratedFrame;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    #[test]
    fn submit_validates_and_stores_subject() {
        let mut session = TimelineSession::new();
        session.submit("  a lighthouse ").unwrap();
        assert_eq!(session.subject(), "a lighthouse");
    }

    #[test]
    fn submit_empty_subject_rejected() {
        let mut session = TimelineSession::new();
        assert_matches!(session.submit("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn submit_discards_prior_result_and_offer() {
        let mut session = TimelineSession::new();
        session.submit("first").unwrap();
        session
            .result_mut()
            .push(GeneratedFrame::new(
                1800,
                ImageData::new(vec![1], "image/png"),
            ))
            .unwrap();
        session.offer_video();

        session.submit("second").unwrap();
        assert!(session.result().is_empty());
        assert_eq!(session.video_offer(), VideoOffer::NotOffered);
    }

    #[test]
    fn attach_seed_accepts_png() {
        let mut session = TimelineSession::new();
        session.attach_seed(PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(session.seed().unwrap().mime_type(), "image/png");
    }

    #[test]
    fn attach_seed_failure_clears_previous_seed() {
        let mut session = TimelineSession::new();
        session.attach_seed(PNG_MAGIC.to_vec()).unwrap();
        assert_matches!(
            session.attach_seed(b"garbage".to_vec()),
            Err(CoreError::SeedImage(_))
        );
        assert!(session.seed().is_none());
    }

    #[test]
    fn decline_video_records_choice() {
        let mut session = TimelineSession::new();
        session.offer_video();
        session.decline_video();
        assert_eq!(session.video_offer(), VideoOffer::Declined);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = TimelineSession::new();
        session.submit("a harbor").unwrap();
        session.attach_seed(PNG_MAGIC.to_vec()).unwrap();
        session.offer_video();

        session.reset();
        assert_eq!(session.subject(), "");
        assert!(session.seed().is_none());
        assert!(session.result().is_empty());
        assert_eq!(session.video_offer(), VideoOffer::NotOffered);
    }
}
