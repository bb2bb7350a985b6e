use super::error::ApiError;
use axum::extract::multipart::Field;
use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;

/// A private directory owned by one request. Deleted when dropped, so every
/// exit path of the request cleans up after itself.
#[derive(Debug)]
pub struct Scratch {
    dir: TempDir,
    files: usize,
}

impl Scratch {
    pub fn new(root: &Path) -> io::Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("pdf-toolkit-")
            .tempdir_in(root)?;
        Ok(Scratch { dir, files: 0 })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Stream a multipart field to a new file in this directory.
    ///
    /// Files are named by position; the client's filename never reaches the
    /// filesystem.
    pub async fn spool(&mut self, mut field: Field<'_>) -> Result<PathBuf, ApiError> {
        let path = self.dir.path().join(format!("input_{}.pdf", self.files));
        self.files += 1;

        let mut file = tokio::fs::File::create(&path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create scratch file: {}", e))?;

        while let Some(chunk) = field.chunk().await? {
            file.write_all(&chunk)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to write scratch file: {}", e))?;
        }
        file.flush()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to flush scratch file: {}", e))?;

        Ok(path)
    }
}
