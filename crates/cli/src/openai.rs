//! Generation client for OpenAI-compatible chat completion endpoints.

use crate::config::GenerationSettings;
use async_trait::async_trait;
use proofmark_core::{CollaboratorError, Reviser};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Reviser backed by a chat completions API
pub struct OpenAiReviser {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiReviser {
    /// Create a client for the configured endpoint.
    ///
    /// `api_base` should be like `https://api.openai.com/v1` (trailing slash optional).
    pub fn new(settings: &GenerationSettings) -> Result<Self, CollaboratorError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CollaboratorError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.api_base.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
        })
    }

    fn request_body<'a>(&'a self, instruction: &str, text: &str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!("{instruction}\n{text}"),
                },
            ],
        }
    }
}

#[async_trait]
impl Reviser for OpenAiReviser {
    async fn revise(&self, instruction: &str, text: &str) -> Result<String, CollaboratorError> {
        let url = format!("{}/chat/completions", self.base_url);
        info!(url = %url, model = %self.model, "requesting revision");

        let mut request = self.client.post(&url).json(&self.request_body(instruction, text));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| CollaboratorError::Http(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CollaboratorError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(CollaboratorError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let revised = parse_reply(&body)?;
        debug!(chars = revised.chars().count(), "received revision");
        Ok(revised)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Extract the first choice's message content from a response body
fn parse_reply(body: &str) -> Result<String, CollaboratorError> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CollaboratorError::MalformedResponse(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            CollaboratorError::MalformedResponse("response has no message content".into())
        })
}
