//! Typed request and response shapes for the Gemini REST endpoints.
//!
//! Field names follow the API's camelCase JSON. Binary payloads travel
//! base64-encoded inside [`InlineData`] / [`InlineImage`]; encoding and
//! decoding happen in the provider layer, not here.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Shared content parts
// ---------------------------------------------------------------------------

/// Base64-encoded inline binary payload inside a content part.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64-encoded bytes.
    pub data: String,
}

/// One part of a multimodal content block: text, inline data, or both
/// absent (other part kinds are ignored).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineData>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    pub fn inline(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            }),
        }
    }
}

/// An ordered list of parts forming one content block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

// ---------------------------------------------------------------------------
// generateContent (multimodal image edit)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Requested output modalities, e.g. `["IMAGE", "TEXT"]`.
    pub response_modalities: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// The first inline-data part of the first candidate, if any.
    ///
    /// This is where an image-edit call carries its output image; text
    /// parts may precede it and are skipped.
    pub fn first_inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|p| p.inline_data.as_ref())
    }
}

// ---------------------------------------------------------------------------
// predict (Imagen text-to-image)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct PredictRequest {
    pub instances: Vec<PredictInstance>,
    pub parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
pub struct PredictInstance {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictParameters {
    pub sample_count: u32,
    pub aspect_ratio: String,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
}

// ---------------------------------------------------------------------------
// predictLongRunning (Veo video synthesis)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct VideoRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

#[derive(Debug, Serialize)]
pub struct VideoInstance {
    pub prompt: String,
    pub image: InlineImage,
}

/// Seed image attached to a video-synthesis instance.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    pub sample_count: u32,
}

/// Long-running operation envelope, returned both by job submission and
/// by polling.
#[derive(Debug, Deserialize)]
pub struct Operation {
    /// Server-assigned operation name, e.g.
    /// `models/veo-2.0-generate-001/operations/abc123`.
    pub name: String,
    #[serde(default)]
    pub done: bool,
    pub response: Option<OperationResponse>,
    pub error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedSample {
    pub video: Option<VideoRef>,
}

#[derive(Debug, Deserialize)]
pub struct VideoRef {
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OperationError {
    pub code: Option<i64>,
    pub message: Option<String>,
}

impl Operation {
    /// Download URI of the first generated video, if the operation
    /// finished with one.
    pub fn download_uri(&self) -> Option<&str> {
        self.response
            .as_ref()?
            .generate_video_response
            .as_ref()?
            .generated_samples
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_predict_response() {
        let json = r#"{"predictions":[{"bytesBase64Encoded":"aGVsbG8=","mimeType":"image/png"}]}"#;
        let resp: PredictResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.predictions.len(), 1);
        assert_eq!(
            resp.predictions[0].bytes_base64_encoded.as_deref(),
            Some("aGVsbG8=")
        );
        assert_eq!(resp.predictions[0].mime_type.as_deref(), Some("image/png"));
    }

    #[test]
    fn parse_predict_response_without_predictions() {
        let resp: PredictResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.predictions.is_empty());
    }

    #[test]
    fn parse_generate_content_finds_inline_image() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        {"text": "Here is your image."},
                        {"inlineData": {"mimeType": "image/jpeg", "data": "aGk="}}
                    ]
                }
            }]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let inline = resp.first_inline_image().unwrap();
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.data, "aGk=");
    }

    #[test]
    fn parse_generate_content_text_only_has_no_image() {
        let json = r#"{"candidates":[{"content":{"parts":[{"text":"sorry"}]}}]}"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert!(resp.first_inline_image().is_none());
    }

    #[test]
    fn parse_generate_content_empty_candidates() {
        let resp: GenerateContentResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(resp.first_inline_image().is_none());
    }

    #[test]
    fn parse_pending_operation() {
        let json = r#"{"name":"models/veo-2.0-generate-001/operations/op1"}"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert!(!op.done);
        assert!(op.download_uri().is_none());
    }

    #[test]
    fn parse_finished_operation_with_uri() {
        let json = r#"{
            "name": "models/veo-2.0-generate-001/operations/op1",
            "done": true,
            "response": {
                "generateVideoResponse": {
                    "generatedSamples": [
                        {"video": {"uri": "https://example.com/video.mp4"}}
                    ]
                }
            }
        }"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert!(op.done);
        assert_eq!(op.download_uri(), Some("https://example.com/video.mp4"));
    }

    #[test]
    fn parse_finished_operation_without_samples() {
        let json = r#"{
            "name": "ops/op1",
            "done": true,
            "response": {"generateVideoResponse": {"generatedSamples": []}}
        }"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert!(op.done);
        assert!(op.download_uri().is_none());
    }

    #[test]
    fn parse_failed_operation() {
        let json = r#"{"name":"ops/op1","done":true,"error":{"code":13,"message":"internal"}}"#;
        let op: Operation = serde_json::from_str(json).unwrap();
        assert!(op.done);
        assert_eq!(op.error.as_ref().unwrap().message.as_deref(), Some("internal"));
    }

    #[test]
    fn serialize_edit_request_shape() {
        let req = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part::inline("image/png", "aGk="), Part::text("evolve")],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".into(), "TEXT".into()],
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["inlineData"]["data"], "aGk=");
        assert_eq!(json["contents"][0]["parts"][1]["text"], "evolve");
        assert_eq!(json["generationConfig"]["responseModalities"][0], "IMAGE");
        // A text part must not serialize an inlineData key and vice versa.
        assert!(json["contents"][0]["parts"][1]
            .as_object()
            .unwrap()
            .get("inlineData")
            .is_none());
    }

    #[test]
    fn serialize_video_request_shape() {
        let req = VideoRequest {
            instances: vec![VideoInstance {
                prompt: "time-lapse".into(),
                image: InlineImage {
                    bytes_base64_encoded: "aGk=".into(),
                    mime_type: "image/jpeg".into(),
                },
            }],
            parameters: VideoParameters { sample_count: 1 },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["instances"][0]["image"]["bytesBase64Encoded"], "aGk=");
        assert_eq!(json["instances"][0]["image"]["mimeType"], "image/jpeg");
        assert_eq!(json["parameters"]["sampleCount"], 1);
    }
}
