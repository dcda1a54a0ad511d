//! Gemini `generateContent` client.
//!
//! One request per image: the image goes out as an inline-data part followed
//! by the prompt text, and the first inline-data part of the first candidate
//! comes back as the result.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::options::ProcessingOptions;
use crate::payload::{split_data_uri, ImagePayload, RESULT_MIME_TYPE};
use crate::prompt::build_prompt;

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataRef<'a>,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataRef<'a> {
    mime_type: &'a str,
    data: &'a str,
}

/// Decoded `generateContent` response body.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidate completions; only the first is consulted.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Provider error object, present on some failure responses.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// One candidate completion.
#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    /// Returned content; absent when the candidate was blocked.
    #[serde(default)]
    pub content: Option<Content>,
}

/// Content of a candidate.
#[derive(Debug, Default, Deserialize)]
pub struct Content {
    /// Ordered content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single content part. Either field may be missing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Text content.
    #[serde(default)]
    pub text: Option<String>,
    /// Inline binary content.
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

/// Inline base64 data with its MIME type.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    /// MIME type reported by the model.
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Base64 data.
    #[serde(default)]
    pub data: String,
}

/// Provider error object.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> &[Part] {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| c.parts.as_slice())
            .unwrap_or_default()
    }

    /// Concatenated text parts, used for diagnostics.
    #[must_use]
    pub fn text(&self) -> String {
        self.parts()
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Base64 data of the first part carrying a non-empty inline image.
    #[must_use]
    pub fn first_inline_image(&self) -> Option<&str> {
        self.parts()
            .iter()
            .filter_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
            .find(|d| !d.is_empty())
    }
}

/// Turn a decoded response into the result payload.
///
/// The result is always labelled [`RESULT_MIME_TYPE`].
///
/// # Errors
///
/// Returns [`Error::NoVisualResult`] when no part carries inline image data,
/// whether or not the response had text.
pub fn extract_result(response: &GenerateContentResponse) -> Result<ImagePayload> {
    match response.first_inline_image() {
        Some(data) => Ok(ImagePayload::new(data, RESULT_MIME_TYPE)),
        None => {
            tracing::warn!(text = %response.text(), "no image found in model response");
            Err(Error::NoVisualResult)
        }
    }
}

// ============================================================================
// Client
// ============================================================================

/// Client for the Gemini image model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: Config,
}

impl GeminiClient {
    /// Create a client from an explicit configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create a client, reading the API key from the environment now.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingApiKey`] if no key is set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Config::from_env()?))
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    /// Send the image and the prompt for `options`, returning the re-rendered image.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if the request cannot be sent or the body not decoded.
    /// - [`Error::Api`] on a non-success status or a provider error object.
    /// - [`Error::NoVisualResult`] if the response holds no image.
    pub async fn humanize(
        &self,
        image: &ImagePayload,
        options: &ProcessingOptions,
    ) -> Result<ImagePayload> {
        let (uri_mime, data) = split_data_uri(&image.data);
        let mime_type = uri_mime.unwrap_or(&image.mime_type);
        let prompt = build_prompt(options);

        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::InlineData {
                        inline_data: InlineDataRef {
                            mime_type,
                            data,
                        },
                    },
                    RequestPart::Text { text: &prompt },
                ],
            }],
        };

        tracing::info!(
            model = %self.config.model,
            %mime_type,
            realism = %options.realism_level,
            camera = %options.camera_profile,
            grain = options.grain_amount,
            "submitting image to Gemini"
        );
        tracing::debug!(%prompt, "prompt");

        let response = self
            .client
            .post(self.endpoint())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            let message = serde_json::from_str::<GenerateContentResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map_or(body, |e| e.message);
            tracing::error!(status = status.as_u16(), %message, "Gemini API error");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        if let Some(error) = body.error {
            return Err(Error::Api {
                status: status.as_u16(),
                message: error.message,
            });
        }

        let result = extract_result(&body)?;
        tracing::info!(size = result.data.len(), "received image from Gemini");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn image_after_text_part_is_found() {
        let response = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your photo." },
                        { "inlineData": { "mimeType": "image/png", "data": "SU1BR0U=" } }
                    ]
                }
            }]
        }));
        let result = extract_result(&response).unwrap();
        assert_eq!(result.data, "SU1BR0U=");
        assert_eq!(result.mime_type, RESULT_MIME_TYPE);
    }

    #[test]
    fn first_image_wins() {
        let response = parse(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "Rmlyc3Q=" } },
                        { "inlineData": { "mimeType": "image/png", "data": "U2Vjb25k" } }
                    ]
                }
            }]
        }));
        assert_eq!(response.first_inline_image(), Some("Rmlyc3Q="));
    }

    #[test]
    fn text_only_response_is_no_visual_result() {
        let response = parse(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "I can't edit this image." }] }
            }]
        }));
        assert!(matches!(extract_result(&response), Err(Error::NoVisualResult)));
        assert_eq!(response.text(), "I can't edit this image.");
    }

    #[test]
    fn empty_and_missing_content_is_no_visual_result() {
        for value in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{ "finishReason": "SAFETY" }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "" } }] } }] }),
        ] {
            assert!(matches!(
                extract_result(&parse(value)),
                Err(Error::NoVisualResult)
            ));
        }
    }

    #[test]
    fn request_serializes_inline_data_then_text() {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![
                    RequestPart::InlineData {
                        inline_data: InlineDataRef {
                            mime_type: "image/png",
                            data: "AAAA",
                        },
                    },
                    RequestPart::Text { text: "prompt" },
                ],
            }],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } },
                        { "text": "prompt" }
                    ]
                }]
            })
        );
    }

    #[test]
    fn endpoint_joins_base_url_and_model() {
        let config = Config {
            base_url: "http://localhost:9999/".to_string(),
            model: "gemini-test".to_string(),
            ..Config::with_api_key("k")
        };
        let client = GeminiClient::new(config);
        assert_eq!(
            client.endpoint(),
            "http://localhost:9999/v1beta/models/gemini-test:generateContent"
        );
    }
}
