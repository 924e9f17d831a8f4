#[cfg(test)]
#[path = "openai_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::domain::models::Backend;
use crate::domain::models::CompletionPrompt;

pub const DEFAULT_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4.1";

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<MessageRequest>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionMessageResponse {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorDetailResponse {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: ErrorDetailResponse,
}

pub struct OpenAI {
    url: String,
    token: String,
    model: String,
    timeout: Duration,
    health_check_timeout: Duration,
}

impl OpenAI {
    pub fn new(url: &str, token: &str, model: &str) -> OpenAI {
        return OpenAI {
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            model: model.to_string(),
            timeout: Duration::from_secs(60),
            health_check_timeout: Duration::from_secs(1),
        };
    }

    pub fn with_timeouts(mut self, timeout: Duration, health_check_timeout: Duration) -> OpenAI {
        self.timeout = timeout;
        self.health_check_timeout = health_check_timeout;
        return self;
    }
}

#[async_trait]
impl Backend for OpenAI {
    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("OpenAI URL is not defined");
        }
        if self.token.is_empty() {
            bail!("OpenAI token is not defined");
        }

        // The official API answers its index with a 404 or a 418, so there is
        // nothing useful to check against it.
        if self.url == DEFAULT_URL {
            return Ok(());
        }

        let res = reqwest::Client::new()
            .get(&self.url)
            .timeout(self.health_check_timeout)
            .send()
            .await;

        let status = match res {
            Ok(result) => result.status().as_u16(),
            Err(err) => {
                tracing::error!(error = ?err, "OpenAI is not reachable");
                bail!("OpenAI is not reachable");
            }
        };

        if status >= 400 {
            tracing::error!(status = status, "OpenAI health check failed");
            bail!("OpenAI health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn get_completion(&self, prompt: CompletionPrompt) -> Result<String> {
        let messages = prompt
            .messages()
            .into_iter()
            .map(|(role, content)| {
                return MessageRequest {
                    role: role.to_string(),
                    content: content.to_string(),
                };
            })
            .collect::<Vec<MessageRequest>>();

        let req = CompletionRequest {
            model: self.model.to_string(),
            messages,
            temperature: prompt.sampling.temperature,
            max_tokens: prompt.sampling.max_tokens,
            stream: false,
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/v1/chat/completions", url = self.url))
            .header("Authorization", format!("Bearer {}", self.token))
            .timeout(self.timeout)
            .json(&req)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err_res) => err_res.error.message,
                Err(_) => body,
            };

            tracing::error!(
                status = status,
                error_message = %message,
                "Failed to make completion request to OpenAI"
            );
            bail!("OpenAI returned status {status}: {message}");
        }

        let ores = res.json::<CompletionResponse>().await?;
        tracing::debug!(body = ?ores, "Completion response");

        let text = ores
            .choices
            .into_iter()
            .next()
            .and_then(|choice| return choice.message.content)
            .unwrap_or_default();

        return Ok(text);
    }
}
