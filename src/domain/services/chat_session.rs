#[cfg(test)]
#[path = "chat_session_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::actions::help_text;
use super::ContextBuilder;
use super::Resolution;
use super::Status;
use super::Submission;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::models::SlashCommand;

pub const MANUAL_COPY_BEGIN: &str = "----- BEGIN COMPONENT -----";
pub const MANUAL_COPY_END: &str = "----- END COMPONENT -----";

fn info(text: &str) -> Message {
    return Message::new(Author::ComponentLab, text);
}

fn error(text: &str) -> Message {
    return Message::new_with_type(Author::ComponentLab, MessageType::Error, text);
}

/// State of the interactive client: one conversation plus the messages that
/// should be shown for each input line or finished action.
#[derive(Default)]
pub struct ChatSession {
    pub builder: ContextBuilder,
    pub should_quit: bool,
}

impl ChatSession {
    pub fn handle_input(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<Vec<Message>> {
        if let Some(command) = SlashCommand::parse(text) {
            return self.handle_slash_command(&command, tx);
        }

        match self.builder.submit(text) {
            Submission::Suppressed => return Ok(vec![]),
            Submission::Busy => {
                return Ok(vec![info(
                    "Still generating the previous prompt, hang tight. Your input was not sent.",
                )]);
            }
            Submission::Dispatched(pending) => {
                tracing::debug!(ticket = pending.ticket, "Dispatching generation");
                tx.send(Action::Generate(pending))?;
                return Ok(vec![info("Generating...")]);
            }
        }
    }

    fn handle_slash_command(
        &mut self,
        command: &SlashCommand,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<Vec<Message>> {
        if command.is_quit() {
            self.should_quit = true;
            return Ok(vec![]);
        }

        if command.is_help() {
            return Ok(vec![info(&help_text())]);
        }

        if command.is_new() {
            let was_pending = self.builder.is_pending();
            self.builder.reset();
            if was_pending {
                return Ok(vec![info(
                    "Started a new component. The prompt that was still generating will be ignored.",
                )]);
            }
            return Ok(vec![info("Started a new component.")]);
        }

        if command.is_history() {
            let conversation = self.builder.conversation();
            if conversation.is_empty() {
                return Ok(vec![info("No prompts yet. Describe a component to get started.")]);
            }

            let lines = conversation
                .turns()
                .iter()
                .enumerate()
                .map(|(idx, turn)| {
                    return format!(
                        "- ({}) {}, {}",
                        idx + 1,
                        turn.timestamp.format("%H:%M:%S"),
                        turn.summary()
                    );
                })
                .collect::<Vec<String>>();

            return Ok(vec![info(&lines.join("\n"))]);
        }

        let artifact = match self.builder.conversation().current_artifact() {
            Some(artifact) => artifact.to_string(),
            None => {
                return Ok(vec![error(
                    "There is no component yet. Describe one to get started.",
                )]);
            }
        };

        if command.is_show() {
            return Ok(vec![Message::new_with_type(
                Author::Model,
                MessageType::Code,
                &artifact,
            )]);
        }

        if command.is_copy() {
            tx.send(Action::CopyArtifact(artifact))?;
            return Ok(vec![]);
        }

        if command.is_preview() {
            tx.send(Action::RenderPreview(artifact))?;
            return Ok(vec![]);
        }

        return Ok(vec![]);
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Message> {
        match event {
            Event::GenerationFinished(pending, result) => {
                match self.builder.resolve(&pending, result) {
                    Resolution::Applied => {
                        let artifact = self
                            .builder
                            .conversation()
                            .current_artifact()
                            .unwrap_or_default();
                        return vec![Message::new_with_type(
                            Author::Model,
                            MessageType::Code,
                            artifact,
                        )];
                    }
                    Resolution::Failed(_) => return vec![self.failure_message()],
                    Resolution::Discarded => return vec![],
                }
            }
            Event::ArtifactCopied(code, res) => {
                if let Err(err) = res {
                    return vec![
                        error(&format!(
                            "{err} Select the code between the markers below to copy it manually."
                        )),
                        Message::new_with_type(
                            Author::ComponentLab,
                            MessageType::Code,
                            &format!("{MANUAL_COPY_BEGIN}\n{code}\n{MANUAL_COPY_END}"),
                        ),
                    ];
                }

                return vec![info("Copied the current component to your clipboard.")];
            }
            Event::PreviewRendered(res) => match res {
                Ok(path) => {
                    return vec![info(&format!(
                        "Preview written to {}",
                        path.to_string_lossy()
                    ))];
                }
                Err(err) => return vec![error(&format!("Failed to write preview: {err}"))],
            },
        }
    }

    fn failure_message(&self) -> Message {
        match self.builder.status() {
            Status::FailedKeepingArtifact { error: err, .. } => {
                return error(&format!(
                    "Updating the component failed: {err}\nThe previous version is still current, try again or rephrase."
                ));
            }
            Status::FailedWithoutArtifact(err) => {
                return error(&format!("Generating the component failed: {err}"));
            }
            Status::Empty | Status::Current(_) => {
                return error("Generating the component failed.");
            }
        }
    }
}
