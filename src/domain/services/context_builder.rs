#[cfg(test)]
#[path = "context_builder_test.rs"]
mod tests;

use crate::domain::models::Conversation;
use crate::domain::models::GenerationResult;
use crate::domain::models::PendingGeneration;

pub const PREVIOUS_CODE_LABEL: &str = "Here is the current component code:";
pub const NEW_REQUEST_LABEL: &str = "Update the component with the following request:";

/// Builds the prompt actually sent to the server. The server keeps no memory
/// between requests, so follow-up prompts carry the last artifact with them.
pub fn build_prompt(conversation: &Conversation, user_text: &str) -> String {
    if let Some(artifact) = conversation.current_artifact() {
        return format!("{PREVIOUS_CODE_LABEL}\n{artifact}\n\n{NEW_REQUEST_LABEL}\n{user_text}");
    }

    return user_text.to_string();
}

#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    /// Blank input. Nothing is sent and nothing is reported.
    Suppressed,
    /// A generation for this conversation is still in flight.
    Busy,
    Dispatched(PendingGeneration),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    Failed(String),
    /// The result belongs to a request that is no longer pending, usually
    /// because the conversation was reset while it was in flight.
    Discarded,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Status<'a> {
    Empty,
    Current(&'a str),
    FailedWithoutArtifact(&'a str),
    FailedKeepingArtifact { artifact: &'a str, error: &'a str },
}

/// Owns the conversation of one client session along with the single
/// generation that may be in flight for it.
#[derive(Default)]
pub struct ContextBuilder {
    conversation: Conversation,
    pending: Option<u64>,
    last_failure: Option<String>,
    next_ticket: u64,
}

impl ContextBuilder {
    pub fn conversation(&self) -> &Conversation {
        return &self.conversation;
    }

    pub fn is_pending(&self) -> bool {
        return self.pending.is_some();
    }

    pub fn submit(&mut self, user_text: &str) -> Submission {
        if user_text.trim().is_empty() {
            return Submission::Suppressed;
        }

        if self.pending.is_some() {
            return Submission::Busy;
        }

        self.next_ticket += 1;
        self.pending = Some(self.next_ticket);
        self.last_failure = None;

        return Submission::Dispatched(PendingGeneration {
            ticket: self.next_ticket,
            epoch: self.conversation.epoch(),
            user_text: user_text.to_string(),
            prompt: build_prompt(&self.conversation, user_text),
        });
    }

    pub fn resolve(&mut self, pending: &PendingGeneration, result: GenerationResult) -> Resolution {
        if self.pending != Some(pending.ticket) || self.conversation.epoch() != pending.epoch {
            tracing::debug!(
                ticket = pending.ticket,
                epoch = pending.epoch,
                current_epoch = self.conversation.epoch(),
                "Discarding stale generation result"
            );
            return Resolution::Discarded;
        }

        self.pending = None;

        let failure = match result {
            GenerationResult::Code(code) => {
                match self.conversation.append_turn(&pending.user_text, &code) {
                    Ok(conversation) => {
                        self.conversation = conversation;
                        tracing::debug!(turns = self.conversation.len(), "Applied generation");
                        return Resolution::Applied;
                    }
                    Err(err) => err.to_string(),
                }
            }
            GenerationResult::Failed(message) => message,
        };

        self.last_failure = Some(failure.to_string());
        return Resolution::Failed(failure);
    }

    pub fn reset(&mut self) {
        self.conversation = self.conversation.reset();
        self.pending = None;
        self.last_failure = None;
    }

    pub fn status(&self) -> Status<'_> {
        let artifact = self.conversation.current_artifact();
        match (artifact, &self.last_failure) {
            (None, None) => return Status::Empty,
            (Some(artifact), None) => return Status::Current(artifact),
            (None, Some(error)) => return Status::FailedWithoutArtifact(error),
            (Some(artifact), Some(error)) => {
                return Status::FailedKeepingArtifact { artifact, error };
            }
        }
    }
}
