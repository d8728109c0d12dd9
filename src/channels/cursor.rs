use std::io;
use std::path::{Path, PathBuf};

/// Single-line file holding the id of the last status message we sent.
#[derive(Debug, Clone)]
pub struct CursorStore {
    path: PathBuf,
}

impl CursorStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` when no marker exists or its content is not an id.
    pub async fn load(&self) -> io::Result<Option<i64>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let trimmed = contents.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                match trimmed.parse() {
                    Ok(id) => Ok(Some(id)),
                    Err(_) => {
                        tracing::warn!(path = %self.path.display(), "ignoring malformed message cursor");
                        Ok(None)
                    }
                }
            }
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error),
        }
    }

    pub async fn store(&self, message_id: i64) -> io::Result<()> {
        tokio::fs::write(&self.path, message_id.to_string()).await
    }

    pub async fn clear(&self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
            _ => Ok(()),
        }
    }
}
