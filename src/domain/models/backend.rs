#[cfg(test)]
#[path = "backend_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;

/// Sampling settings sent along with every completion request. Generated
/// output has to be machine consumable code, so randomness stays low and the
/// output length is capped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for SamplingConfig {
    fn default() -> SamplingConfig {
        return SamplingConfig {
            temperature: 0.3,
            max_tokens: 2048,
        };
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CompletionPrompt {
    pub system: String,
    pub text: String,
    pub sampling: SamplingConfig,
}

impl CompletionPrompt {
    pub fn new(system: &str, text: &str, sampling: SamplingConfig) -> CompletionPrompt {
        return CompletionPrompt {
            system: system.to_string(),
            text: text.to_string(),
            sampling,
        };
    }

    /// Messages in the order the upstream receives them: the system
    /// instruction first, then the user prompt.
    pub fn messages(&self) -> Vec<(&'static str, &str)> {
        return vec![("system", &self.system), ("user", &self.text)];
    }
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify the upstream is reachable with the configured
    /// credentials. Failures are reported but never stop the server.
    async fn health_check(&self) -> Result<()>;

    /// Requests a single, non streamed completion and returns the raw text the
    /// model replied with.
    async fn get_completion(&self, prompt: CompletionPrompt) -> Result<String>;
}

pub type BackendBox = Box<dyn Backend + Send + Sync>;
