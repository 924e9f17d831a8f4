#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use yansi::Paint;

use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::Message;
use crate::domain::models::MessageType;
use crate::domain::services::ChatSession;
use crate::infrastructure::proxy_client::ProxyClient;

pub fn format_message(message: &Message) -> String {
    match message.message_type() {
        MessageType::Code => return message.text.to_string(),
        MessageType::Error => {
            return Paint::red(format!("{}: {}", message.author, message.text)).to_string();
        }
        MessageType::Normal => {
            let author = Paint::cyan(message.author.to_string()).bold();
            return format!("{author}: {}", message.text);
        }
    }
}

fn print_messages(messages: &[Message]) {
    for message in messages {
        println!("{}\n", format_message(message));
    }
}

fn welcome(server_url: &str) -> Message {
    return Message::new(
        Author::ComponentLab,
        &format!(
            "Connected to {server_url}. Describe the UI component you want, then keep typing to refine it. Type /help for commands."
        ),
    );
}

pub async fn start(
    client: &ProxyClient,
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    if let Err(err) = client.health_check().await {
        tracing::warn!(error = ?err, url = client.url(), "Server health check failed");
        print_messages(&[Message::new_with_type(
            Author::ComponentLab,
            MessageType::Error,
            &format!(
                "Could not reach the server at {}. Start it with `componentlab serve`; prompts will fail until it is up.",
                client.url()
            ),
        )]);
    }

    let mut session = ChatSession::default();
    print_messages(&[welcome(client.url())]);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let text = match line? {
                    Some(text) => text,
                    None => break,
                };
                let messages = session.handle_input(&text, &tx)?;
                print_messages(&messages);
            }
            event = rx.recv() => {
                let event = match event {
                    Some(event) => event,
                    None => bail!("Actions service stopped unexpectedly"),
                };
                let messages = session.handle_event(event);
                print_messages(&messages);
            }
        }

        if session.should_quit {
            break;
        }
    }

    return Ok(());
}
