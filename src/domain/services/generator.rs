#[cfg(test)]
#[path = "generator_test.rs"]
mod tests;

use anyhow::Result;

use super::sanitizer::sanitize;
use crate::domain::models::BackendBox;
use crate::domain::models::CompletionPrompt;
use crate::domain::models::GenerationError;
use crate::domain::models::SamplingConfig;

/// Sent as the system message with every request. Output quality hinges on
/// it, so it is never altered per request.
pub const SYSTEM_INSTRUCTION: &str = r#"You are an expert UI component generator. Given a description of a UI component, respond with ONLY the raw code that implements it.

Rules:
- Return either plain HTML with CSS (inline <style> block or classes), or a single React component styled with Tailwind CSS utility classes.
- Do not include explanations, comments about the code, or any prose before or after it.
- Do not wrap the code in markdown fences or backticks.
- Start directly with any necessary imports, or with the markup itself.
- The component must be responsive, accessible (semantic elements, labels, aria attributes, keyboard focus styles) and include interactive states such as hover, focus, active and disabled where they apply.
- When you are given existing component code together with a change request, return the complete updated component, not a diff."#;

/// Turns a raw prompt into component code through the injected upstream
/// backend. A proxy built without a backend answers every request with
/// `NotConfigured`.
pub struct GenerationProxy {
    backend: Option<BackendBox>,
    sampling: SamplingConfig,
}

impl GenerationProxy {
    pub fn new(backend: Option<BackendBox>) -> GenerationProxy {
        return GenerationProxy {
            backend,
            sampling: SamplingConfig::default(),
        };
    }

    pub fn is_configured(&self) -> bool {
        return self.backend.is_some();
    }

    pub async fn health_check(&self) -> Result<()> {
        if let Some(backend) = &self.backend {
            return backend.health_check().await;
        }

        return Err(GenerationError::NotConfigured.into());
    }

    pub async fn generate(&self, prompt: Option<&str>) -> Result<String, GenerationError> {
        let text = match prompt {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(GenerationError::InvalidRequest),
        };

        let backend = match &self.backend {
            Some(backend) => backend,
            None => return Err(GenerationError::NotConfigured),
        };

        let completion = backend
            .get_completion(CompletionPrompt::new(
                SYSTEM_INSTRUCTION,
                text,
                self.sampling,
            ))
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, "Upstream completion failed");
                return GenerationError::UpstreamFailure {
                    details: format!("{err:#}"),
                };
            })?;

        let code = sanitize(&completion);
        if code.is_empty() {
            tracing::warn!(raw_len = completion.len(), "Upstream returned no code");
            return Err(GenerationError::UpstreamFailure {
                details: "The model returned an empty response.".to_string(),
            });
        }

        tracing::debug!(
            prompt_len = text.len(),
            code_len = code.len(),
            "Generated component"
        );

        return Ok(code);
    }
}
