//! Chat-completion client.
//!
//! [`CompletionClient`] is the seam between prompt execution and the remote
//! service: an ordered message list and a model go in, one assistant message
//! comes out. [`OpenAiClient`] implements it against an OpenAI-compatible
//! `/v1/chat/completions` endpoint.

use crate::context::{Message, Role};
use crate::error::CompletionError;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;

/// A service that turns a conversation into the next assistant message.
pub trait CompletionClient {
    fn complete(
        &self,
        model: &str,
        messages: &[Message],
    ) -> impl Future<Output = Result<Message, CompletionError>>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

// Providers send `content: null` on some replies; treat it as empty text.
#[derive(Deserialize)]
struct ResponseMessage {
    role: Option<Role>,
    content: Option<String>,
}

/// Client for OpenAI-style chat completions with bearer authentication.
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    url: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<Message, CompletionError> {
        let body = ChatRequest { model, messages };

        let response = self
            .http
            .post(&self.url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await.map_err(CompletionError::Transport)?;
        parse_chat_response(&text)
    }
}

/// Extract the first choice from a chat-completions response body.
fn parse_chat_response(body: &str) -> Result<Message, CompletionError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| CompletionError::Decode(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or(CompletionError::EmptyResponse)?;

    Ok(Message::new(
        choice.message.role.unwrap_or(Role::Assistant),
        choice.message.content.unwrap_or_default(),
    ))
}
