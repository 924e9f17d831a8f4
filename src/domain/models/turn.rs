use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;

/// One user instruction and the sanitized code the model produced for it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub user_prompt: String,
    pub artifact: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// First line of the user prompt, shortened for list views.
    pub fn summary(&self) -> String {
        let mut line = self
            .user_prompt
            .trim()
            .split('\n')
            .next()
            .unwrap_or_default()
            .to_string();

        if line.chars().count() >= 70 {
            line = format!("{}...", line.chars().take(67).collect::<String>());
        }

        return line;
    }
}
