//! The contract with the external analysis model.
//!
//! Owns the fixed instruction payload, the HTTP call, and the
//! classification of transport failures. Nothing upstream — status codes,
//! bodies, quota detail — ever crosses this boundary; callers only see a
//! [`GatewayError`] kind.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_AI_URL: &str = "https://ai.gateway.lovable.dev/v1/chat/completions";
pub const DEFAULT_AI_MODEL: &str = "google/gemini-2.5-flash";

/// The fixed analysis instruction. Always requests a sentiment label, a
/// one-word mood tag, an integer stress score 0-10, and 3-5 short
/// suggestions, as strict JSON.
const SYSTEM_PROMPT: &str = r#"You are a compassionate mental health analysis assistant. Analyze the user's message and provide:
1. A sentiment label: "positive", "neutral", or "negative"
2. A mood tag (one word that best describes their emotional state, e.g., "anxious", "hopeful", "overwhelmed", "calm", "frustrated", "content")
3. A stress score from 0-10 (0 = completely relaxed, 10 = extremely stressed)
4. 3-5 short, actionable suggestions to help them feel better (each under 15 words)

Respond ONLY with valid JSON in this exact format:
{
  "sentiment": "positive" | "neutral" | "negative",
  "moodTag": "string",
  "stressScore": number,
  "suggestions": ["string", "string", "string"]
}

Be empathetic in your analysis. Consider context clues about workload, relationships, physical symptoms, and overall tone."#;

/// Classified transport failure. The only error detail callers get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Upstream quota/rate limit — the user may retry after a delay
    #[error("analysis backend rate limited the request")]
    RateLimited,
    /// Billing, outage, misconfiguration, or any other non-success status
    #[error("analysis backend is unavailable")]
    Unavailable,
    /// The call succeeded but carried no usable reply content
    #[error("analysis backend returned an empty reply")]
    EmptyReply,
}

/// Endpoint configuration, read once at startup and passed in explicitly.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub url: String,
    pub model: String,
    /// Missing key is tolerated at startup; calls fail as `Unavailable`
    /// so the rest of the service (history, trend) keeps working.
    pub api_key: Option<String>,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("MINDTRACK_AI_URL").unwrap_or_else(|_| DEFAULT_AI_URL.to_string()),
            model: std::env::var("MINDTRACK_AI_MODEL")
                .unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string()),
            api_key: std::env::var("MINDTRACK_AI_API_KEY")
                .ok()
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),
        }
    }
}

/// Seam between the check-in flow and the model call, so orchestration is
/// testable without a network.
pub trait AnalysisBackend {
    fn analyze(
        &self,
        text: &str,
    ) -> impl std::future::Future<Output = Result<String, GatewayError>> + Send;
}

#[derive(Debug, Clone)]
pub struct AnalysisGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl AnalysisGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

impl AnalysisBackend for AnalysisGateway {
    async fn analyze(&self, text: &str) -> Result<String, GatewayError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            tracing::error!("MINDTRACK_AI_API_KEY is not configured");
            return Err(GatewayError::Unavailable);
        };

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "analysis backend request failed");
                GatewayError::Unavailable
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "analysis backend returned an error");
            return Err(classify_status(status.as_u16()));
        }

        let completion = response.json::<ChatCompletion>().await.map_err(|err| {
            tracing::error!(error = %err, "analysis backend reply was not a completion");
            GatewayError::EmptyReply
        })?;

        extract_content(completion)
    }
}

/// Map an upstream non-success status to a classified error: quota responses
/// are retryable, everything else (billing, outage, 5xx) is generic.
fn classify_status(status: u16) -> GatewayError {
    match status {
        429 => GatewayError::RateLimited,
        _ => GatewayError::Unavailable,
    }
}

fn extract_content(completion: ChatCompletion) -> Result<String, GatewayError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(GatewayError::EmptyReply)
}
