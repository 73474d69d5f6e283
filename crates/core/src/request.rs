//! Validated user input for one timeline run.
//!
//! Seed images are only constructible through format sniffing, so an
//! undecodable upload is rejected here, before any network traffic, as a
//! recoverable input-conversion failure.

use crate::error::CoreError;
use crate::provider::ImageData;

// ---------------------------------------------------------------------------
// Seed image
// ---------------------------------------------------------------------------

/// A user-supplied image that seeds the first synthesis step.
#[derive(Debug, Clone)]
pub struct SeedImage {
    bytes: Vec<u8>,
    mime_type: &'static str,
}

impl SeedImage {
    /// Sniff the image format from the byte header and derive its MIME
    /// type. Unrecognized or truncated data is a [`CoreError::SeedImage`].
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CoreError> {
        let format =
            image::guess_format(&bytes).map_err(|e| CoreError::SeedImage(e.to_string()))?;
        Ok(Self {
            bytes,
            mime_type: format.to_mime_type(),
        })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// The seed as provider-facing image data.
    pub fn to_image_data(&self) -> ImageData {
        ImageData::new(self.bytes.clone(), self.mime_type)
    }
}

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

/// Validate and normalize a subject: trimmed and non-empty.
pub fn validate_subject(subject: &str) -> Result<String, CoreError> {
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Subject text must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    /// Minimal PNG header: enough for format sniffing.
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
    /// Minimal JPEG header.
    const JPEG_MAGIC: &[u8] = &[0xff, 0xd8, 0xff, 0xe0];

    #[test]
    fn seed_png_detected() {
        let seed = SeedImage::from_bytes(PNG_MAGIC.to_vec()).unwrap();
        assert_eq!(seed.mime_type(), "image/png");
    }

    #[test]
    fn seed_jpeg_detected() {
        let seed = SeedImage::from_bytes(JPEG_MAGIC.to_vec()).unwrap();
        assert_eq!(seed.mime_type(), "image/jpeg");
    }

    #[test]
    fn seed_garbage_rejected() {
        assert_matches!(
            SeedImage::from_bytes(b"definitely not an image".to_vec()),
            Err(CoreError::SeedImage(_))
        );
    }

    #[test]
    fn seed_empty_rejected() {
        assert_matches!(SeedImage::from_bytes(Vec::new()), Err(CoreError::SeedImage(_)));
    }

    #[test]
    fn seed_round_trips_to_image_data() {
        let seed = SeedImage::from_bytes(PNG_MAGIC.to_vec()).unwrap();
        let data = seed.to_image_data();
        assert_eq!(data.bytes, PNG_MAGIC);
        assert_eq!(data.mime_type, "image/png");
    }

    #[test]
    fn subject_trimmed() {
        assert_eq!(validate_subject("  a lighthouse  ").unwrap(), "a lighthouse");
    }

    #[test]
    fn subject_empty_rejected() {
        assert_matches!(validate_subject("   "), Err(CoreError::Validation(_)));
        assert_matches!(validate_subject(""), Err(CoreError::Validation(_)));
    }

}
