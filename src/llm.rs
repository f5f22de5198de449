//! Rewrite backend seam and the OpenAI-compatible implementation.

use anyhow::{Context, anyhow};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// External generative backend that produces a corrected rewrite.
///
/// May fail or return an empty/unchanged string; the corrector handles both
/// by falling back to deterministic edits.
#[async_trait]
pub trait RewriteBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

#[derive(Serialize, Deserialize, Clone)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

const SYSTEM_PROMPT: &str =
    "You are a fiction line editor. Rewrite passages to fix the storytelling \
     violations you are given, changing as little text as possible. \
     Return only the corrected passage, with no commentary.";

/// OpenAI-compatible rewrite backend over chat completions
pub struct OpenAiRewriter {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: u32,
}

impl OpenAiRewriter {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: Option<f32>,
        max_tokens: u32,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
            temperature,
            max_tokens,
        }
    }
}

#[async_trait]
impl RewriteBackend for OpenAiRewriter {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        trace!("Rewrite request: {} chars", prompt.len());

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("rewrite request failed")?
            .error_for_status()
            .context("rewrite request rejected")?;

        let chat_response: ChatResponse =
            response.json().await.context("malformed rewrite response")?;
        trace!("Response has {} choices", chat_response.choices.len());

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("rewrite response had no choices"))?;
        Ok(choice.message.content)
    }
}
