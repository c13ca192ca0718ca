//! Reqwest-backed Gemini suggestion source.
//!
//! This adapter owns transport details only: endpoint construction, the API
//! key header, timeout and HTTP error mapping, and JSON decoding into domain
//! suggestions.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{Client, StatusCode, Url};
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{
    CandidateText, GenerateContentRequestDto, GenerateContentResponseDto, decode_suggestions,
};
use crate::domain::ports::{SkillSuggestionSource, SkillSuggestionSourceError};
use crate::domain::{SkillDescription, SkillSuggestions};

const API_KEY_HEADER: HeaderName = HeaderName::from_static("x-goog-api-key");

/// Connection settings for [`GeminiHttpSource`].
pub struct GeminiSourceConfig {
    /// API root, for example `https://generativelanguage.googleapis.com/`.
    pub base_url: Url,
    /// Model name such as `gemini-2.0-flash`.
    pub model: String,
    /// Secret API key.
    pub api_key: Zeroizing<String>,
    /// Whole-request timeout.
    pub timeout: Duration,
}

/// Suggestion source calling Gemini `generateContent`.
pub struct GeminiHttpSource {
    client: Client,
    endpoint: Url,
    api_key: HeaderValue,
}

/// Errors raised while building a [`GeminiHttpSource`].
#[derive(Debug, thiserror::Error)]
pub enum GeminiSourceBuildError {
    /// The endpoint could not be derived from the base URL and model.
    #[error("invalid Gemini endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The API key contains characters not allowed in a header.
    #[error("Gemini API key is not a valid header value")]
    ApiKey,
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl GeminiHttpSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the endpoint URL, API key header or reqwest
    /// client cannot be constructed.
    pub fn new(config: GeminiSourceConfig) -> Result<Self, GeminiSourceBuildError> {
        let endpoint = generate_content_endpoint(&config.base_url, &config.model)?;
        let mut api_key = HeaderValue::from_str(config.api_key.as_str())
            .map_err(|_| GeminiSourceBuildError::ApiKey)?;
        api_key.set_sensitive(true);
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl SkillSuggestionSource for GeminiHttpSource {
    async fn generate(
        &self,
        description: &SkillDescription,
    ) -> Result<SkillSuggestions, SkillSuggestionSourceError> {
        let request = GenerateContentRequestDto::for_prompt(description.render_prompt());
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_suggestions(body.as_ref())
    }
}

fn generate_content_endpoint(base_url: &Url, model: &str) -> Result<Url, url::ParseError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(&format!("v1beta/models/{}:generateContent", model.trim()))
}

fn parse_suggestions(body: &[u8]) -> Result<SkillSuggestions, SkillSuggestionSourceError> {
    let decoded: GenerateContentResponseDto = serde_json::from_slice(body).map_err(|error| {
        SkillSuggestionSourceError::decode(format!("invalid Gemini JSON payload: {error}"))
    })?;
    match decoded.first_candidate_text() {
        CandidateText::Text(text) => {
            decode_suggestions(&text).map_err(SkillSuggestionSourceError::decode)
        }
        CandidateText::Missing { finish_reason } => {
            debug!(?finish_reason, "Gemini returned no candidate text");
            Err(SkillSuggestionSourceError::empty())
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> SkillSuggestionSourceError {
    if error.is_timeout() {
        SkillSuggestionSourceError::timeout(error.to_string())
    } else {
        SkillSuggestionSourceError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SkillSuggestionSourceError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => SkillSuggestionSourceError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SkillSuggestionSourceError::timeout(message)
        }
        _ if status.is_client_error() => SkillSuggestionSourceError::invalid_request(message),
        _ => SkillSuggestionSourceError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
