//! Structured job content generation through the Gemini REST API.
//!
//! The pipeline talks to the backend through the [`ContentGenerator`] trait.  [`GeminiClient`] is
//! the production implementation: a single blocking `generateContent` call per candidate model,
//! no retries and no request timeout.

use std::time::Duration;

use log::{debug, info, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::record::JobRecord;

pub mod prompts;

/// Model used when no candidate list is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Base URL of the Gemini REST API.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Gemini API key not found. Set GEMINI_API_KEY in the environment or a .env file, or pass --api-key")]
    CredentialMissing,

    #[error("no available Gemini model: {0}")]
    ModelUnavailable(String),

    #[error("failed to parse the Gemini response as a job record: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Produces a [`JobRecord`] from a free-text request.
pub trait ContentGenerator {
    fn generate(&self, prompt: &str) -> Result<JobRecord, GenerateError>;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate.
    fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Blocking Gemini client that tries each configured model in turn.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    api_base: String,
    models: Vec<String>,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        models: Vec<String>,
        api_base: impl Into<String>,
    ) -> Result<Self, GenerateError> {
        if models.is_empty() {
            return Err(GenerateError::ModelUnavailable(
                "no candidate models configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(|err| GenerateError::ModelUnavailable(err.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            models,
        })
    }

    /// Creates a client from configuration, preferring an explicit `credential` over the one in
    /// the environment.
    pub fn from_config(config: &Config, credential: Option<&str>) -> Result<Self, GenerateError> {
        let api_key = resolve_credential(credential, config.gemini_api_key.as_deref())?;
        Self::new(api_key, config.gemini_models.clone(), config.gemini_api_base.clone())
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base, model)
    }

    /// Sends `prompt` to the first model that exists and returns its text answer.
    pub fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        for model in &self.models {
            debug!("Requesting content from {}", model);
            let response = self
                .client
                .post(self.endpoint(model))
                .header("x-goog-api-key", &self.api_key)
                .json(&request)
                .send()?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                warn!("Gemini model {} is not available; trying the next one", model);
                continue;
            }

            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|err| err.error.message)
                    .unwrap_or(body);
                return Err(GenerateError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let body: GenerateResponse = response.json()?;
            info!("Generated content with {}", model);
            return body.text().map(str::to_string).ok_or_else(|| {
                GenerateError::MalformedResponse("response contained no text".to_string())
            });
        }

        Err(GenerateError::ModelUnavailable(format!(
            "none of [{}] exist for this API key",
            self.models.join(", ")
        )))
    }
}

impl ContentGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<JobRecord, GenerateError> {
        let text = self.generate_text(&prompts::job_description_prompt(prompt))?;
        parse_record(&text)
    }
}

/// Picks the explicit credential, then the configured one. Blank values do not count.
pub fn resolve_credential(
    explicit: Option<&str>,
    configured: Option<&str>,
) -> Result<String, GenerateError> {
    explicit
        .into_iter()
        .chain(configured)
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(str::to_string)
        .ok_or(GenerateError::CredentialMissing)
}

/// Parses model output into a record, tolerating Markdown code fences around the JSON.
pub fn parse_record(text: &str) -> Result<JobRecord, GenerateError> {
    JobRecord::from_json(strip_json_fences(text))
        .map_err(|err| GenerateError::MalformedResponse(err.to_string()))
}

/// Generates a record for `prompt` with Gemini, using `credential` or the configured key.
pub fn generate_with_gemini(
    config: &Config,
    prompt: &str,
    credential: Option<&str>,
) -> Result<JobRecord, GenerateError> {
    GeminiClient::from_config(config, credential)?.generate(prompt)
}

/// Strips a leading ```json (or bare ```) fence and a trailing ``` fence from model output.
/// Either fence may appear without the other.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let text = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    text.strip_suffix("```").unwrap_or(text).trim()
}
