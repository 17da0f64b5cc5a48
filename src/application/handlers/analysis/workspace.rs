//! Scoped working directory for one analysis batch.

use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Directory `<base_dir>/<request_id>` holding one subdirectory per repository.
///
/// Call [`release`](Self::release) once all tasks have finished. If the guard
/// is dropped unreleased (early return, panic, cancelled future), the
/// directory is removed synchronously in `Drop`.
#[derive(Debug)]
pub struct BatchWorkspace {
    root: PathBuf,
    released: bool,
}

impl BatchWorkspace {
    /// Creates the batch directory.
    pub async fn create(base_dir: &Path, request_id: Uuid) -> io::Result<Self> {
        let root = base_dir.join(request_id.to_string());
        fs::create_dir_all(&root).await?;
        Ok(Self {
            root,
            released: false,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path for one repository. Not created; the fetcher clones into it.
    pub fn task_dir(&self, id: Uuid) -> PathBuf {
        self.root.join(id.to_string())
    }

    /// Removes the batch directory and everything below it.
    pub async fn release(mut self) -> io::Result<()> {
        self.released = true;
        match fs::remove_dir_all(&self.root).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl Drop for BatchWorkspace {
    fn drop(&mut self) {
        if !self.released {
            let _ = std::fs::remove_dir_all(&self.root);
        }
    }
}
