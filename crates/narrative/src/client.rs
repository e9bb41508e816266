//! Generative Language HTTP client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Anything that turns a prompt into text for a named target.
pub trait TextGenerator {
    fn generate(&self, target: &str, prompt: &str) -> Result<String, NarrativeError>;
}

/// Failure of a single candidate target.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeError {
    /// No API key configured
    MissingKey,
    /// Connection or transport error
    Network(String),
    /// Request exceeded the client timeout
    Timeout(String),
    /// HTTP 429 or a RESOURCE_EXHAUSTED body
    RateLimited(String),
    /// Any other non-success status
    Http(u16, String),
    /// Response body did not have the expected shape
    Parse(String),
}

impl std::fmt::Display for NarrativeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NarrativeError::MissingKey => write!(f, "API key not configured"),
            NarrativeError::Network(msg) => write!(f, "Network error: {}", msg),
            NarrativeError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            NarrativeError::RateLimited(msg) => write!(f, "Rate limited: {}", msg),
            NarrativeError::Http(code, msg) => write!(f, "HTTP {}: {}", code, msg),
            NarrativeError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for NarrativeError {}

impl NarrativeError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, NarrativeError::RateLimited(_))
    }

    fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            NarrativeError::Timeout(e.to_string())
        } else {
            NarrativeError::Network(e.to_string())
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Blocking client for `POST {base}/v1beta/models/{target}:generateContent`.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, NarrativeError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("shelfcheck/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| NarrativeError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, target: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, target)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, target: &str, prompt: &str) -> Result<String, NarrativeError> {
        if self.api_key.trim().is_empty() {
            return Err(NarrativeError::MissingKey);
        }

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint(target))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .map_err(NarrativeError::from_transport)?;

        let status = response.status().as_u16();
        let body = response.text().map_err(NarrativeError::from_transport)?;

        if !(200..300).contains(&status) {
            if status == 429 || body.contains("RESOURCE_EXHAUSTED") {
                return Err(NarrativeError::RateLimited(format!("HTTP {}", status)));
            }
            return Err(NarrativeError::Http(status, body));
        }

        extract_text(&body)
    }
}

/// Concatenate `candidates[0].content.parts[*].text`.
fn extract_text(body: &str) -> Result<String, NarrativeError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|e| NarrativeError::Parse(e.to_string()))?;

    let parts = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .ok_or_else(|| NarrativeError::Parse("No candidates in response".to_string()))?;

    let text: String = parts.into_iter().filter_map(|p| p.text).collect();
    if text.trim().is_empty() {
        return Err(NarrativeError::Parse("Empty text in response".to_string()));
    }
    Ok(text)
}
