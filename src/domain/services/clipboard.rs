use anyhow::bail;
use anyhow::Result;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;
use tokio::sync::oneshot;

type ClipboardRequest = (String, oneshot::Sender<Result<(), ClipboardError>>);

static SENDER: OnceCell<mpsc::UnboundedSender<ClipboardRequest>> = OnceCell::new();

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("Clipboard service is not initialized.")]
    NotInitialized,
    #[error("Clipboard service stopped before the copy finished.")]
    Stopped,
    #[error("Failed to write to the clipboard: {0}")]
    Write(String),
}

/// Keeps a single clipboard handle alive for the whole session. Some
/// platforms drop the copied text as soon as the owning handle goes away.
pub struct ClipboardService {}

impl ClipboardService {
    pub async fn start() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<ClipboardRequest>();
        let mut clipboard = arboard::Clipboard::new()?;
        if SENDER.set(tx).is_err() {
            bail!("Clipboard service is already running.");
        }

        while let Some((text, reply)) = rx.recv().await {
            let res = clipboard
                .set_text(text)
                .map_err(|err| return ClipboardError::Write(err.to_string()));
            if reply.send(res).is_err() {
                tracing::debug!("Clipboard result receiver went away");
            }
        }

        return Ok(());
    }

    pub fn healthcheck() -> Result<()> {
        if SENDER.get().is_some() {
            return Ok(());
        }

        arboard::Clipboard::new()?;
        return Ok(());
    }

    pub async fn set(text: String) -> Result<(), ClipboardError> {
        let tx = match SENDER.get() {
            Some(tx) => tx,
            None => return Err(ClipboardError::NotInitialized),
        };

        let (reply_tx, reply_rx) = oneshot::channel();
        if tx.send((text, reply_tx)).is_err() {
            return Err(ClipboardError::Stopped);
        }

        match reply_rx.await {
            Ok(res) => return res,
            Err(_) => return Err(ClipboardError::Stopped),
        }
    }
}
