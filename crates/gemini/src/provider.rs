//! [`MediaProvider`] implementation backed by the Gemini REST client.
//!
//! Translates between the pipeline's provider contract (raw bytes plus
//! MIME types) and the wire format (base64-encoded inline payloads), and
//! maps [`GeminiApiError`] into the provider error taxonomy.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use timeloom_core::provider::{
    ImageData, MediaProvider, ProviderError, VideoArtifact, VideoJob, VideoJobStatus,
};

use crate::client::{GeminiApiError, GeminiClient};
use crate::wire::{InlineData, InlineImage, Part};

/// MIME type assumed for a downloaded video when the server does not
/// declare one.
const FALLBACK_VIDEO_MIME: &str = "video/mp4";
/// MIME type assumed for a predicted image when the server does not
/// declare one.
const FALLBACK_IMAGE_MIME: &str = "image/png";

impl From<GeminiApiError> for ProviderError {
    fn from(err: GeminiApiError) -> Self {
        match err {
            GeminiApiError::Config(msg) => ProviderError::Transport(msg),
            GeminiApiError::Request(e) => ProviderError::Transport(e.to_string()),
            GeminiApiError::Api { status, body } => ProviderError::Api { status, body },
        }
    }
}

/// Decode a base64 payload into image data, surfacing corrupt encodings
/// as an invalid-response error.
fn decode_image(data: &str, mime_type: &str) -> Result<ImageData, ProviderError> {
    let bytes = BASE64
        .decode(data)
        .map_err(|e| ProviderError::InvalidResponse(format!("invalid base64 image: {e}")))?;
    Ok(ImageData::new(bytes, mime_type))
}

fn decode_inline(inline: &InlineData) -> Result<ImageData, ProviderError> {
    decode_image(&inline.data, &inline.mime_type)
}

fn encode_inline_image(image: &ImageData) -> InlineImage {
    InlineImage {
        bytes_base64_encoded: BASE64.encode(&image.bytes),
        mime_type: image.mime_type.clone(),
    }
}

#[async_trait]
impl MediaProvider for GeminiClient {
    async fn generate_image(&self, prompt: &str) -> Result<ImageData, ProviderError> {
        let response = self.predict_image(prompt).await?;
        let prediction = response
            .predictions
            .first()
            .ok_or(ProviderError::MissingImage)?;
        let data = prediction
            .bytes_base64_encoded
            .as_deref()
            .ok_or(ProviderError::MissingImage)?;
        let mime = prediction.mime_type.as_deref().unwrap_or(FALLBACK_IMAGE_MIME);
        decode_image(data, mime)
    }

    async fn edit_image(
        &self,
        seed: &ImageData,
        instruction: &str,
    ) -> Result<ImageData, ProviderError> {
        let parts = vec![
            Part::inline(seed.mime_type.clone(), BASE64.encode(&seed.bytes)),
            Part::text(instruction),
        ];
        let response = self.generate_content(parts).await?;
        let inline = response
            .first_inline_image()
            .ok_or(ProviderError::MissingImage)?;
        decode_inline(inline)
    }

    async fn submit_video(
        &self,
        seed: &ImageData,
        instruction: &str,
    ) -> Result<VideoJob, ProviderError> {
        let operation = self
            .submit_video_job(instruction, encode_inline_image(seed))
            .await?;
        Ok(VideoJob {
            operation: operation.name,
        })
    }

    async fn poll_video(&self, job: &VideoJob) -> Result<VideoJobStatus, ProviderError> {
        let operation = self.get_operation(&job.operation).await?;

        if let Some(error) = operation.error {
            let message = error.message.unwrap_or_else(|| "unknown error".to_string());
            return Err(ProviderError::InvalidResponse(format!(
                "video operation failed: {message}"
            )));
        }

        if !operation.done {
            return Ok(VideoJobStatus::Pending);
        }

        Ok(VideoJobStatus::Finished {
            download_uri: operation.download_uri().map(str::to_string),
        })
    }

    async fn fetch_video(&self, download_uri: &str) -> Result<VideoArtifact, ProviderError> {
        let (bytes, mime) = self.download(download_uri).await?;
        Ok(VideoArtifact {
            bytes,
            mime_type: mime.unwrap_or_else(|| FALLBACK_VIDEO_MIME.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn decode_image_round_trip() {
        let encoded = BASE64.encode(b"pixels");
        let image = decode_image(&encoded, "image/png").unwrap();
        assert_eq!(image.bytes, b"pixels");
        assert_eq!(image.mime_type, "image/png");
    }

    #[test]
    fn decode_image_rejects_bad_base64() {
        assert_matches!(
            decode_image("!!not-base64!!", "image/png"),
            Err(ProviderError::InvalidResponse(_))
        );
    }

    #[test]
    fn encode_inline_image_preserves_mime() {
        let image = ImageData::new(b"pixels".to_vec(), "image/jpeg");
        let inline = encode_inline_image(&image);
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.bytes_base64_encoded, BASE64.encode(b"pixels"));
    }

    #[test]
    fn api_error_maps_to_provider_api() {
        let err: ProviderError = GeminiApiError::Api {
            status: 429,
            body: "quota".into(),
        }
        .into();
        assert_matches!(err, ProviderError::Api { status: 429, .. });
    }
}
