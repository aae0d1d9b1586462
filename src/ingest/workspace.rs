//! Scoped per-run workspace
//!
//! Each ingestion run clones into its own directory named
//! `<owner>-<repo>-<token>` under the configured base. The directory is
//! removed exactly once: either explicitly via [`ScopedWorkspace::release`]
//! or when the guard is dropped on an error path.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::types::{RepoRef, Result, RunToken};

/// Disposable directory owned by one ingestion run
#[derive(Debug)]
pub struct ScopedWorkspace {
    path: PathBuf,
    token: RunToken,
    released: bool,
}

impl ScopedWorkspace {
    /// Create a uniquely named directory for `repo` under `base`
    pub async fn acquire(base: &Path, repo: &RepoRef) -> Result<Self> {
        let token = RunToken::generate();
        let path = base.join(format!("{}-{}-{}", repo.owner, repo.name, token));

        tokio::fs::create_dir_all(&path).await?;
        debug!("Created workspace {}", path.display());

        Ok(Self {
            path,
            token,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn token(&self) -> &RunToken {
        &self.token
    }

    /// Delete the workspace now instead of at drop
    pub fn release(mut self) {
        self.cleanup();
    }

    fn remove(&self) -> io::Result<()> {
        match std::fs::remove_dir_all(&self.path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    /// Best-effort: a failed delete is logged and otherwise discarded so it
    /// never replaces the run's own result or error.
    fn cleanup(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        match self.remove() {
            Ok(()) => info!("Cleaned up workspace {}", self.path.display()),
            Err(e) => warn!(
                "Failed to remove workspace {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

impl Drop for ScopedWorkspace {
    fn drop(&mut self) {
        self.cleanup();
    }
}
