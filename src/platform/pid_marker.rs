use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// File holding the current process id while the monitor runs. The
/// supervisor uses it for liveness tracking. Removed on drop.
#[derive(Debug)]
pub struct PidMarker {
    path: PathBuf,
}

impl PidMarker {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create pid marker directory {}", parent.display())
            })?;
        }
        std::fs::write(&path, std::process::id().to_string())
            .with_context(|| format!("Failed to write pid marker {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidMarker {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path)
            && error.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(%error, path = %self.path.display(), "failed to remove pid marker");
        }
    }
}
