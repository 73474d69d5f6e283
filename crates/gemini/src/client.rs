//! REST client for the Gemini generative-media endpoints.
//!
//! Wraps the endpoint calls (text-to-image prediction, multimodal image
//! edit, video job submission, operation polling, artifact download)
//! using [`reqwest`]. Authentication is an API key sent via the
//! `x-goog-api-key` header on every request.

use crate::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, InlineImage,
    Operation, Part, PredictInstance, PredictParameters, PredictRequest, PredictResponse,
    VideoInstance, VideoParameters, VideoRequest,
};

/// Public Gemini API base URL.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for text-to-image synthesis.
pub const IMAGE_MODEL: &str = "imagen-4.0-generate-001";
/// Model used for image-edit (multimodal) synthesis.
pub const EDIT_MODEL: &str = "gemini-2.5-flash-image-preview";
/// Model used for video synthesis.
pub const VIDEO_MODEL: &str = "veo-2.0-generate-001";

/// Aspect ratio requested for text-to-image frames.
pub const ASPECT_RATIO: &str = "16:9";

/// HTTP client for the Gemini API.
#[derive(Debug)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Errors from the Gemini REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GeminiApiError {
    /// The client could not be constructed (e.g. missing credential).
    /// Fatal for the whole session.
    #[error("Gemini client misconfigured: {0}")]
    Config(String),

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Gemini API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl GeminiClient {
    /// Create a client for the public API endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiApiError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base URL (proxies, test servers).
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GeminiApiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiApiError::Config(
                "API key must not be empty".to_string(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Build a client from the environment.
    ///
    /// | Env Var           | Meaning                              |
    /// |-------------------|--------------------------------------|
    /// | `GEMINI_API_KEY`  | API credential (required)            |
    /// | `GEMINI_BASE_URL` | Override the API base URL (optional) |
    pub fn from_env() -> Result<Self, GeminiApiError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiApiError::Config("GEMINI_API_KEY is not set".to_string()))?;
        match std::env::var("GEMINI_BASE_URL") {
            Ok(url) => Self::with_base_url(api_key, url),
            Err(_) => Self::new(api_key),
        }
    }

    /// Synthesize one image from a text prompt (Imagen `:predict`).
    pub async fn predict_image(&self, prompt: &str) -> Result<PredictResponse, GeminiApiError> {
        let body = PredictRequest {
            instances: vec![PredictInstance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: ASPECT_RATIO.to_string(),
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:predict",
                self.base_url, IMAGE_MODEL
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Run a multimodal generation request (Gemini `:generateContent`)
    /// asking for IMAGE and TEXT output modalities.
    ///
    /// The caller assembles the parts: for an image edit that is one
    /// inline-data part (the seed) followed by one text part (the
    /// instruction).
    pub async fn generate_content(
        &self,
        parts: Vec<Part>,
    ) -> Result<GenerateContentResponse, GeminiApiError> {
        let body = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, EDIT_MODEL
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Submit an asynchronous video-synthesis job (Veo
    /// `:predictLongRunning`). Returns the operation envelope whose
    /// `name` is used for polling.
    pub async fn submit_video_job(
        &self,
        prompt: &str,
        image: InlineImage,
    ) -> Result<Operation, GeminiApiError> {
        let body = VideoRequest {
            instances: vec![VideoInstance {
                prompt: prompt.to_string(),
                image,
            }],
            parameters: VideoParameters { sample_count: 1 },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:predictLongRunning",
                self.base_url, VIDEO_MODEL
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let operation: Operation = Self::parse_response(response).await?;
        tracing::info!(operation = %operation.name, "Video job submitted");
        Ok(operation)
    }

    /// Fetch the current state of a long-running operation.
    pub async fn get_operation(&self, name: &str) -> Result<Operation, GeminiApiError> {
        let response = self
            .client
            .get(format!("{}/v1beta/{}", self.base_url, name))
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Download a finished artifact from its URI.
    ///
    /// Returns the raw bytes plus the `Content-Type` header, if present.
    pub async fn download(&self, uri: &str) -> Result<(Vec<u8>, Option<String>), GeminiApiError> {
        let response = self
            .client
            .get(uri)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let mime = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?.to_vec();
        Ok((bytes, mime))
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`GeminiApiError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GeminiApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeminiApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeminiApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_api_key_rejected() {
        assert_matches!(GeminiClient::new(""), Err(GeminiApiError::Config(_)));
        assert_matches!(GeminiClient::new("   "), Err(GeminiApiError::Config(_)));
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client =
            GeminiClient::with_base_url("key", "http://localhost:9999/").expect("valid key");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
