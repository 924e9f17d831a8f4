use std::path::PathBuf;

use super::GenerationResult;
use super::PendingGeneration;
use crate::domain::services::clipboard::ClipboardError;

pub enum Event {
    ArtifactCopied(String, Result<(), ClipboardError>),
    GenerationFinished(PendingGeneration, GenerationResult),
    PreviewRendered(anyhow::Result<PathBuf>),
}
