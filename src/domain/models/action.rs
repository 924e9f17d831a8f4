use super::PendingGeneration;

pub enum Action {
    CopyArtifact(String),
    Generate(PendingGeneration),
    RenderPreview(String),
}
