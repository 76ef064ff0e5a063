//! News fetcher backed by a generative search model.
//!
//! [`NewsProvider`] is the seam between the dashboard and the network: the
//! Gemini implementation issues one `generateContent` call with the Google
//! Search tool enabled, and [`StaticProvider`] serves canned responses.

use crate::config::Config;
use crate::news::{GroundingSource, NewsResponse};
use crate::prompt::build_prompt;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("educafoco/", env!("CARGO_PKG_VERSION"));

/// Text used when the model answers with no text at all
pub const NO_TEXT_FALLBACK: &str = "Não foi possível carregar as notícias no momento.";

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("configuration error: {0}")]
    ConfigError(#[from] crate::config::ConfigError),
}

/// Anything that can produce one round of categorised-news text.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Fetch the current news text and its sources. Errors are not retried.
    async fn fetch_news(&self) -> Result<NewsResponse, AgentError>;
}

// --- Gemini wire format -------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
struct WebChunk {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, thought parts excluded.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter(|p| p.thought != Some(true))
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    fn sources(&self) -> Vec<GroundingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .map(|web| GroundingSource::new(web.title.clone(), web.uri.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn into_news(self) -> NewsResponse {
        let text = self.text();
        let summary = if text.is_empty() {
            NO_TEXT_FALLBACK.to_string()
        } else {
            text
        };
        NewsResponse::new(summary, self.sources())
    }
}

// --- Providers ----------------------------------------------------------

/// Gemini `generateContent` with Google Search grounding.
pub struct GeminiProvider {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(config: &Config) -> Result<Self, AgentError> {
        let api_key = config.api_key()?.to_string();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.agent.timeout_secs))
            .build()?;
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.agent.base_url.trim_end_matches('/'),
            config.agent.model
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

#[async_trait]
impl NewsProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn fetch_news(&self) -> Result<NewsResponse, AgentError> {
        let prompt = build_prompt(chrono::Local::now().date_naive());
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: &prompt }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        tracing::info!(endpoint = %self.endpoint, "requesting news");
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "news request rejected");
            return Err(AgentError::Status {
                status: status.as_u16(),
                body: raw,
            });
        }

        let parsed: GenerateContentResponse =
            serde_json::from_str(&raw).map_err(|e| AgentError::ParseError(e.to_string()))?;
        let news = parsed.into_news();
        tracing::info!(
            chars = news.summary.len(),
            sources = news.sources.len(),
            "news received"
        );
        Ok(news)
    }
}

/// Serves a fixed outcome; stands in for the network in tests.
pub struct StaticProvider {
    outcome: Result<NewsResponse, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl StaticProvider {
    pub fn new(news: NewsResponse) -> Self {
        Self {
            outcome: Ok(news),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider whose every fetch fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Wait `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsProvider for StaticProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_news(&self) -> Result<NewsResponse, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome
            .clone()
            .map_err(AgentError::RequestFailed)
    }
}
