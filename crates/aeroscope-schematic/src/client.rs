//! HTTP client for the generative image provider.
//!
//! Requests go to the Gemini `generateContent` REST endpoint. The first
//! candidate part carrying inline data is taken as the image.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prompt::schematic_prompt;

/// Base URL of the Gemini REST API.
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Image generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

/// Environment variables checked for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// A generated image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schematic {
    /// MIME type reported by the provider, e.g. `image/png`.
    pub mime_type: String,
    /// Decoded image bytes.
    pub data: Vec<u8>,
}

impl Schematic {
    /// The image as a `data:` URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.data))
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Extract the image from a `generateContent` response body.
pub fn decode_response(body: &[u8]) -> Result<Schematic> {
    let response: GenerateResponse = serde_json::from_slice(body)?;
    let inline = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.inline_data))
        .ok_or(Error::EmptyResponse)?;

    let data = STANDARD.decode(inline.data.as_bytes())?;
    if data.is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(Schematic {
        mime_type: inline.mime_type,
        data,
    })
}

/// Read the API key from the environment.
pub fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
}

/// Client for generating part schematics.
#[derive(Debug, Clone)]
pub struct SchematicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl SchematicClient {
    /// Create a client with an explicit API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a client with the key from `GEMINI_API_KEY` or `API_KEY`.
    pub fn from_env() -> Result<Self> {
        api_key_from_env().map(Self::new).ok_or(Error::MissingApiKey)
    }

    /// Set a custom base URL for testing.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Generate a schematic of `part` for a `propulsion`-powered aircraft.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the provider answers with a
    /// non-success status, or the response holds no decodable image.
    pub async fn generate(&self, part: &str, propulsion: &str) -> Result<Schematic> {
        let url = self.endpoint();
        let prompt = schematic_prompt(part, propulsion);
        let body = serde_json::to_vec(&GenerateRequest {
            contents: [RequestContent {
                parts: [TextPart { text: &prompt }],
            }],
        })?;

        tracing::debug!(url, part, propulsion, "requesting schematic");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", &self.api_key)
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Http {
                url: url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url,
                status: status.as_u16(),
            });
        }

        let data = response.bytes().await.map_err(|e| Error::Http {
            url: url.clone(),
            message: e.to_string(),
        })?;

        decode_response(&data)
    }
}
