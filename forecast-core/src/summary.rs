//! Short natural-language weather summaries.
//!
//! A [`Summarizer`] never fails: when the hosted model cannot be reached or
//! answers with nothing usable, the summary is built from the snapshot alone.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{Config, WeatherSnapshot, provider::ServiceId};

pub const DEFAULT_BASE_URL: &str = "https://api.cohere.ai/v1";
pub const DEFAULT_MODEL: &str = "command-r-plus";
const MAX_TOKENS: u32 = 60;
const TEMPERATURE: f64 = 0.7;

#[async_trait]
pub trait Summarizer: Send + Sync + Debug {
    async fn summarize(&self, snapshot: &WeatherSnapshot) -> String;
}

/// Deterministic summary from the snapshot fields; never empty.
pub fn fallback_summary(snapshot: &WeatherSnapshot) -> String {
    let condition = snapshot.condition.trim();
    let condition = if condition.is_empty() {
        "unknown conditions"
    } else {
        condition
    };

    let temperature = snapshot.temperature_c();
    if temperature.is_finite() {
        format!("Current weather: {condition} at {temperature:.1}°C")
    } else {
        format!("Current weather: {condition}")
    }
}

fn prompt_for(snapshot: &WeatherSnapshot) -> String {
    format!(
        "The current weather in {} is {} with a temperature of {:.1}°C. \
         Generate a short, friendly weather summary.",
        snapshot.location_name,
        snapshot.condition,
        snapshot.temperature_c(),
    )
}

/// Summaries without any model call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackSummarizer;

#[async_trait]
impl Summarizer for FallbackSummarizer {
    async fn summarize(&self, snapshot: &WeatherSnapshot) -> String {
        fallback_summary(snapshot)
    }
}

#[derive(Debug, Error)]
enum SummaryError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("no text generated")]
    Empty,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    generations: Vec<Generation>,
}

#[derive(Debug, Deserialize)]
struct Generation {
    text: String,
}

/// Cohere `generate` client.
#[derive(Debug, Clone)]
pub struct CohereSummarizer {
    api_key: String,
    base_url: String,
    model: String,
    http: Client,
}

impl CohereSummarizer {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    async fn generate(&self, prompt: &str) -> Result<String, SummaryError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let res = self
            .http
            .post(format!("{}/generate", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(SummaryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = res.json().await?;

        parsed
            .generations
            .into_iter()
            .next()
            .map(|g| g.text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(SummaryError::Empty)
    }
}

#[async_trait]
impl Summarizer for CohereSummarizer {
    async fn summarize(&self, snapshot: &WeatherSnapshot) -> String {
        let prompt = prompt_for(snapshot);
        debug!(model = %self.model, "requesting weather summary");

        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "summary generation failed, using fallback");
                fallback_summary(snapshot)
            }
        }
    }
}

/// Cohere when a key is configured, the offline fallback otherwise.
pub fn summarizer_from_config(config: &Config) -> Box<dyn Summarizer> {
    let id = ServiceId::Cohere;

    let Some(api_key) = config.provider_api_key(id) else {
        info!("no {id} API key configured, summaries use the offline fallback");
        return Box::new(FallbackSummarizer);
    };

    let mut summarizer = CohereSummarizer::new(api_key.to_owned());
    if let Some(base_url) = config.provider_base_url(id) {
        summarizer = summarizer.with_base_url(base_url);
    }
    if let Some(model) = config.provider_model(id) {
        summarizer = summarizer.with_model(model);
    }

    Box::new(summarizer)
}
