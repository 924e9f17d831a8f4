#[cfg(test)]
#[path = "proxy_client_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::ErrorResponse;
use crate::domain::models::GenerationRequest;
use crate::domain::models::GenerationResponse;
use crate::domain::models::GenerationResult;

/// HTTP client for a running ComponentLab server.
#[derive(Clone, Debug)]
pub struct ProxyClient {
    url: String,
    timeout: Duration,
}

impl ProxyClient {
    pub fn new(url: &str, timeout: Duration) -> ProxyClient {
        return ProxyClient {
            url: url.trim_end_matches('/').to_string(),
            timeout,
        };
    }

    pub fn url(&self) -> &str {
        return &self.url;
    }

    #[allow(clippy::implicit_return)]
    pub async fn health_check(&self) -> Result<()> {
        let res = reqwest::Client::new()
            .get(format!("{url}/health", url = self.url))
            .timeout(Duration::from_secs(2))
            .send()
            .await?;

        if !res.status().is_success() {
            bail!("Server health check failed with status {}", res.status().as_u16());
        }

        return Ok(());
    }

    /// Never fails: transport errors come back as `GenerationResult::Failed`
    /// so callers handle every failure the same way.
    pub async fn generate(&self, prompt: &str) -> GenerationResult {
        match self.request(prompt).await {
            Ok(result) => return result,
            Err(err) => {
                tracing::error!(error = ?err, "Generation request failed");
                return GenerationResult::Failed(format!(
                    "Could not reach the server at {}: {err}",
                    self.url
                ));
            }
        }
    }

    #[allow(clippy::implicit_return)]
    async fn request(&self, prompt: &str) -> Result<GenerationResult> {
        let req = GenerationRequest {
            prompt: prompt.to_string(),
        };

        let res = reqwest::Client::new()
            .post(format!("{url}/generate", url = self.url))
            .timeout(self.timeout)
            .json(&req)
            .send()
            .await?;

        let status = res.status().as_u16();
        if !res.status().is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err_res) => err_res.message(),
                Err(_) => format!("Failed to generate component (status {status})"),
            };

            tracing::warn!(status = status, error_message = %message, "Server rejected generation");
            return Ok(GenerationResult::Failed(message));
        }

        let body = res.text().await?;
        match serde_json::from_str::<GenerationResponse>(&body) {
            Ok(generated) => return Ok(GenerationResult::Code(generated.code)),
            Err(err) => {
                tracing::warn!(error = %err, "Server returned an unreadable generation");
                return Ok(GenerationResult::Failed(format!(
                    "Unexpected response from the server at {}",
                    self.url
                )));
            }
        }
    }
}
