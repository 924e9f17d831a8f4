#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::bail;
use anyhow::Result;
use chrono::Utc;

use super::Turn;

/// Ordered, append only history of turns for one component. Appending or
/// resetting never mutates an existing value, it returns a new conversation
/// sharing nothing mutable with the old one.
///
/// `epoch` increases on every reset and lets in-flight requests detect that
/// the conversation they were built from is gone.
#[derive(Clone, Debug)]
pub struct Conversation {
    turns: Arc<[Turn]>,
    epoch: u64,
}

impl Default for Conversation {
    fn default() -> Conversation {
        return Conversation {
            turns: Arc::from(Vec::new()),
            epoch: 0,
        };
    }
}

impl Conversation {
    pub fn is_empty(&self) -> bool {
        return self.turns.is_empty();
    }

    pub fn len(&self) -> usize {
        return self.turns.len();
    }

    pub fn epoch(&self) -> u64 {
        return self.epoch;
    }

    pub fn turns(&self) -> &[Turn] {
        return &self.turns;
    }

    pub fn last(&self) -> Option<&Turn> {
        return self.turns.last();
    }

    pub fn current_artifact(&self) -> Option<&str> {
        return self.last().map(|turn| return turn.artifact.as_str());
    }

    pub fn append_turn(&self, user_prompt: &str, artifact: &str) -> Result<Conversation> {
        if artifact.trim().is_empty() {
            bail!("Refusing to append a turn without generated code");
        }

        // Wall clocks can step backwards, turns never do.
        let mut timestamp = Utc::now();
        if let Some(last) = self.last() {
            if last.timestamp > timestamp {
                timestamp = last.timestamp;
            }
        }

        let mut turns = self.turns.to_vec();
        turns.push(Turn {
            user_prompt: user_prompt.to_string(),
            artifact: artifact.to_string(),
            timestamp,
        });

        return Ok(Conversation {
            turns: Arc::from(turns),
            epoch: self.epoch,
        });
    }

    pub fn reset(&self) -> Conversation {
        return Conversation {
            turns: Arc::from(Vec::new()),
            epoch: self.epoch + 1,
        };
    }
}
