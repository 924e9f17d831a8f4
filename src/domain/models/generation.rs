#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn message(&self) -> String {
        if let Some(details) = &self.details {
            if !details.is_empty() {
                return format!("{} ({details})", self.error);
            }
        }

        return self.error.to_string();
    }
}

/// Failures the generation proxy reports to its callers.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    #[error("Invalid request. Expected JSON body with a non-empty string 'prompt' field.")]
    InvalidRequest,
    #[error("Server is not configured with an OpenAI API token. Set OPENAI_API_KEY or --openai-token and restart.")]
    NotConfigured,
    #[error("Failed to generate component code.")]
    UpstreamFailure { details: String },
}

impl GenerationError {
    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            GenerationError::UpstreamFailure { details } => Some(details.to_string()),
            _ => None,
        };

        return ErrorResponse {
            error: self.to_string(),
            details,
        };
    }
}

/// What a client ends up with after asking the server for code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenerationResult {
    Code(String),
    Failed(String),
}

/// A generation request that left the client and has not been resolved yet.
/// `epoch` is the conversation epoch at dispatch time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingGeneration {
    pub ticket: u64,
    pub epoch: u64,
    pub user_text: String,
    pub prompt: String,
}
