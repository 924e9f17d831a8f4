#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;

use super::clipboard::ClipboardService;
use super::Preview;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::infrastructure::proxy_client::ProxyClient;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- Any text that is not a command is sent as a prompt. The first prompt describes a new component, every prompt after that refines the current one.
- /new (/n, /reset) - Forget the current component and start a new, unrelated one.
- /show (/s) - Prints the current component code.
- /history (/hi) - Lists every prompt of the current component.
- /copy (/c) - Copies the current component code to your clipboard.
- /preview (/p) - Writes the current component to an HTML file you can open in a browser.
- /quit /exit (/q) - Exit ComponentLab.
- /help (/h) - Provides this help menu.

While a prompt is generating, new prompts are ignored until the result arrives. Starting a new component while a prompt is generating drops its result.
        "#;

    return text.trim().to_string();
}

/// Runs the slow parts of the chat client off the input loop. Each action
/// reports back through exactly one event.
pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        client: ProxyClient,
        preview: Preview,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let client = Arc::new(client);
        let preview = Arc::new(preview);

        while let Some(action) = rx.recv().await {
            let worker_tx = tx.clone();
            match action {
                Action::Generate(pending) => {
                    let worker_client = client.clone();
                    tokio::spawn(async move {
                        let result = worker_client.generate(&pending.prompt).await;
                        if worker_tx
                            .send(Event::GenerationFinished(pending, result))
                            .is_err()
                        {
                            tracing::debug!("Chat loop closed before generation finished");
                        }
                    });
                }
                Action::CopyArtifact(code) => {
                    tokio::spawn(async move {
                        let res = ClipboardService::set(code.to_string()).await;
                        if let Err(err) = &res {
                            tracing::warn!(error = %err, "Clipboard copy failed");
                        }
                        if worker_tx.send(Event::ArtifactCopied(code, res)).is_err() {
                            tracing::debug!("Chat loop closed before copy finished");
                        }
                    });
                }
                Action::RenderPreview(code) => {
                    let res = preview.render(&code).await;
                    tx.send(Event::PreviewRendered(res))?;
                }
            }
        }

        return Ok(());
    }
}
