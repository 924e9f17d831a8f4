#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;

use std::env;
use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Writes the current artifact to a file a browser can open. The artifact is
/// written as is, the same way a sandboxed iframe would receive it.
pub struct Preview {
    pub dir: path::PathBuf,
}

impl Default for Preview {
    fn default() -> Preview {
        let dir = dirs::cache_dir()
            .unwrap_or_else(env::temp_dir)
            .join("componentlab");

        return Preview::new(dir);
    }
}

impl Preview {
    pub fn new(dir: path::PathBuf) -> Preview {
        return Preview { dir };
    }

    pub fn file_path(&self) -> path::PathBuf {
        return self.dir.join("preview.html");
    }

    pub async fn render(&self, code: &str) -> Result<path::PathBuf> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).await?;
        }

        let file_path = self.file_path();
        let mut file = fs::File::create(&file_path).await?;
        file.write_all(code.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = ?file_path, "Rendered preview");
        return Ok(file_path);
    }
}
