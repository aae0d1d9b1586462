//! Repository Fetcher
//!
//! Obtains a shallow snapshot of the default branch by running the
//! version-control tool as a subprocess. Standard error is captured and
//! carried on failure; no stage output is interpreted beyond the exit code.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::config::FetchConfig;
use crate::types::{FetchError, RepoRef};

pub type FetchResult = std::result::Result<(), FetchError>;

/// Populates a directory with a repository snapshot
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    async fn fetch(&self, repo: &RepoRef, into: &Path) -> FetchResult;
}

/// Shallow single-branch clone via `git`
#[derive(Debug, Clone)]
pub struct GitFetcher {
    program: String,
    host: String,
}

impl GitFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            program: config.git_program.clone(),
            host: config.host.clone(),
        }
    }

    pub fn clone_args(&self, repo: &RepoRef, into: &Path) -> Vec<OsString> {
        vec![
            "clone".into(),
            "--depth".into(),
            "1".into(),
            "--single-branch".into(),
            repo.clone_url(&self.host).into(),
            into.as_os_str().to_owned(),
        ]
    }
}

impl Default for GitFetcher {
    fn default() -> Self {
        Self::new(&FetchConfig::default())
    }
}

#[async_trait]
impl RepositoryFetcher for GitFetcher {
    async fn fetch(&self, repo: &RepoRef, into: &Path) -> FetchResult {
        debug!("{} clone {} -> {}", self.program, repo, into.display());

        let output = Command::new(&self.program)
            .args(self.clone_args(repo, into))
            // Missing or private repositories must fail instead of prompting
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| FetchError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        Err(FetchError::NonZeroExit {
            status: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> RepoRef {
        RepoRef::new("rust-lang", "cargo").unwrap()
    }

    fn fetcher(program: &str) -> GitFetcher {
        GitFetcher::new(&FetchConfig {
            git_program: program.to_string(),
            ..FetchConfig::default()
        })
    }

    #[test]
    fn test_clone_args() {
        let args = GitFetcher::default().clone_args(&repo(), Path::new("/tmp/ws"));
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            args,
            vec![
                "clone",
                "--depth",
                "1",
                "--single-branch",
                "https://github.com/rust-lang/cargo.git",
                "/tmp/ws",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let dir = TempDir::new().unwrap();
        let err = fetcher("openwiki-no-such-binary")
            .fetch(&repo(), dir.path())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_non_zero_exit_carries_stderr() {
        use std::os::unix::fs::PermissionsExt;

        let bin = TempDir::new().unwrap();
        let script = bin.path().join("fake-git");
        std::fs::write(
            &script,
            "#!/bin/sh\necho 'fatal: repository not found' >&2\nexit 128\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let dir = TempDir::new().unwrap();
        let err = fetcher(script.to_str().unwrap())
            .fetch(&repo(), dir.path())
            .await
            .unwrap_err();

        match err {
            FetchError::NonZeroExit { status, stderr } => {
                assert_eq!(status, Some(128));
                assert_eq!(stderr, "fatal: repository not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let dir = TempDir::new().unwrap();
        fetcher("true").fetch(&repo(), dir.path()).await.unwrap();
    }
}
