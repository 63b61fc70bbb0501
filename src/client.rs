//! HTTP client for the DotOCR service.
//!
//! Three thin request/response operations against a configured base URL:
//!
//! | Operation | Request | Response |
//! |-----------|---------|----------|
//! | [`ApiClient::get_prompts`] | `GET /api/v1/prompts/` | `{ prompts: [...] }` |
//! | [`ApiClient::parse_document`] | `POST /api/v1/parse/` (multipart) | [`ParseResponse`] |
//! | [`ApiClient::health_check`] | `GET /` | `{ status, message }` |
//!
//! Every non-2xx response goes through [`check_response`]: 422 becomes
//! [`DotOcrError::Validation`] with the first validation message, anything
//! else becomes [`DotOcrError::Http`]. There is no retry, no timeout and no
//! caching; one `reqwest::Client` (and its connection pool) is shared by all
//! calls made through the same `ApiClient`.

use crate::config::ClientConfig;
use crate::document::SelectedFile;
use crate::error::{DotOcrError, Result, VALIDATION_FALLBACK};
use crate::types::{ErrorBody, HealthStatus, ParseResponse, Prompt, PromptList};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const PROMPTS_PATH: &str = "/api/v1/prompts/";
pub const PARSE_PATH: &str = "/api/v1/parse/";
pub const HEALTH_PATH: &str = "/";

/// Multipart field carrying the document bytes.
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying the prompt identifier.
pub const PROMPT_FIELD: &str = "promptId";

/// Client for the DotOCR REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    /// Create a client for the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder().user_agent(config.user_agent.clone()).build()?;
        Ok(Self { http, config })
    }

    /// Create a client from `DOTOCR_API_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch the prompts the server offers, unmodified.
    pub async fn get_prompts(&self) -> Result<Vec<Prompt>> {
        let url = self.config.endpoint(PROMPTS_PATH);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        let list: PromptList = decode(check_response(response).await?, "prompts").await?;
        debug!("Received {} prompts", list.prompts.len());
        Ok(list.prompts)
    }

    /// Upload `file` and parse it with `prompt_id`.
    ///
    /// The whole file is sent in one multipart request with exactly two
    /// fields, `file` and `promptId`. An empty prompt id is rejected before
    /// anything goes on the wire.
    pub async fn parse_document(&self, file: &SelectedFile, prompt_id: &str) -> Result<ParseResponse> {
        if prompt_id.trim().is_empty() {
            return Err(DotOcrError::InvalidRequest(
                "a prompt must be selected before parsing".into(),
            ));
        }

        let url = self.config.endpoint(PARSE_PATH);
        info!(
            "Parsing '{}' ({} bytes, {}) with prompt '{}'",
            file.name, file.size, file.mime_type, prompt_id
        );

        let form = parse_form(file, prompt_id)?;
        let start = Instant::now();
        let response = self.http.post(&url).multipart(form).send().await?;
        let parsed: ParseResponse = decode(check_response(response).await?, "parse").await?;

        debug!(
            "Parse of '{}' finished in {}ms (server: {:?}ms)",
            file.name,
            start.elapsed().as_millis(),
            parsed.metadata.as_ref().map(|m| m.processing_time_ms)
        );
        Ok(parsed)
    }

    /// Ping the service root.
    pub async fn health_check(&self) -> Result<HealthStatus> {
        let url = self.config.endpoint(HEALTH_PATH);
        debug!("GET {}", url);
        let response = self.http.get(&url).send().await?;
        decode(check_response(response).await?, "health").await
    }
}

/// Build the two-field multipart body for a parse request.
fn parse_form(file: &SelectedFile, prompt_id: &str) -> Result<Form> {
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.name.clone())
        .mime_str(&file.mime_type)
        .map_err(|e| DotOcrError::InvalidRequest(format!("bad MIME type '{}': {e}", file.mime_type)))?;

    Ok(Form::new()
        .part(FILE_FIELD, part)
        .text(PROMPT_FIELD, prompt_id.to_string()))
}

/// Turn a non-2xx response into the matching error.
pub async fn check_response(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();

    if status == StatusCode::UNPROCESSABLE_ENTITY {
        let message = body
            .first_issue_message()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(VALIDATION_FALLBACK)
            .to_string();
        warn!("Validation error from service: {}", message);
        return Err(DotOcrError::Validation { message });
    }

    let status_text = status.canonical_reason().unwrap_or("").to_string();
    warn!("Service returned HTTP {} {}", status.as_u16(), status_text);
    Err(DotOcrError::Http {
        status: status.as_u16(),
        status_text,
        detail: body.detail_message().map(String::from),
    })
}

async fn decode<T: DeserializeOwned>(response: Response, what: &'static str) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| DotOcrError::Decode { what, source })
}
