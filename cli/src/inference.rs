use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sous_core::generation::InferenceProvider;
use sous_core::prompt::ChatPrompt;

use crate::config::InferenceConfig;

const MAX_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

/// Content of the first choice, if the model produced any.
#[must_use]
pub fn first_choice_content(resp: ChatCompletionResponse) -> Option<String> {
    resp.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
}

/// OpenAI-compatible chat completions client, defaulting to the Hugging Face
/// inference router.
pub struct HuggingFaceClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    token: Option<String>,
}

impl HuggingFaceClient {
    pub fn new(config: &InferenceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(format!(
                "sous/{} (recipe generator)",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(std::time::Duration::from_secs(120))
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.api_base),
            model: config.model.clone(),
            token: config.access_token.clone(),
        })
    }

    fn request_body<'a>(&'a self, prompt: &'a ChatPrompt) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &prompt.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    pub async fn chat_async(&self, prompt: &ChatPrompt) -> Result<String> {
        let token = self
            .token
            .as_deref()
            .context("HF_ACCESS_TOKEN is not set")?;

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(token)
            .json(&self.request_body(prompt))
            .send()
            .await
            .context("Failed to reach inference API")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("Inference API returned {status}: {body}");
        }

        let data: ChatCompletionResponse = resp
            .json()
            .await
            .context("Failed to parse chat completion response")?;

        first_choice_content(data).context("Chat completion response had no content")
    }
}

#[async_trait]
impl InferenceProvider for HuggingFaceClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String> {
        self.chat_async(prompt).await
    }
}
