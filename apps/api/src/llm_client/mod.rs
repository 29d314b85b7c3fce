/// LLM Client: the single point of entry for chat-completion calls.
///
/// No other module talks to the completion service directly. Callers go
/// through the `CompletionClient` trait so tests can swap in a double.
///
/// One request per call: no streaming, no retries, and no timeout beyond the
/// HTTP client's defaults. Every failure comes back as a `GenerationError`.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// Groq's OpenAI-compatible chat-completion endpoint.
pub const DEFAULT_COMPLETION_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// 70B general model used for resume content.
pub const GENERATION_MODEL: &str = "llama3-70b-8192";
/// Mixture-of-experts model used by the email advisor.
pub const ADVISOR_MODEL: &str = "mixtral-8x7b-32768";

/// Why a generation attempt produced no usable content.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("no JSON object found in completion text")]
    NoJsonObject,

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl GenerationError {
    /// Coarse failure class, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Transport(_) | GenerationError::Api { .. } => "transport",
            GenerationError::MalformedResponse(_) => "malformed_response",
            GenerationError::NoJsonObject | GenerationError::Parse(_) => "extraction",
        }
    }
}

/// One chat-completion call: a system instruction followed by a user prompt.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub system: &'a str,
    pub prompt: &'a str,
}

/// Sends a prompt to a hosted chat-completion service and returns the raw
/// assistant text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GenerationError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl<'a> ChatRequest<'a> {
    fn from_request(request: &CompletionRequest<'a>) -> Self {
        Self {
            model: request.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.prompt,
                },
            ],
            stream: false,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Pulls `choices[0].message.content` out of a raw response body.
fn extract_message_text(body: &str) -> Result<String, GenerationError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(format!("invalid response body: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::MalformedResponse("response has no choices".to_string()))?
        .message
        .content
        .ok_or_else(|| GenerationError::MalformedResponse("first choice has no content".to_string()))
}

/// Chat-completion client for Groq (or any OpenAI-compatible endpoint).
/// Configuration is passed in at construction; nothing is read from globals.
#[derive(Clone)]
pub struct GroqClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GroqClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }
}

#[async_trait]
impl CompletionClient for GroqClient {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, GenerationError> {
        let body = ChatRequest::from_request(&request);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(
            "Completion call succeeded: model={}, response_bytes={}",
            request.model,
            text.len()
        );

        extract_message_text(&text)
    }
}
