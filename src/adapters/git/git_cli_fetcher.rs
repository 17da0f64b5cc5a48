//! Git CLI Fetcher
//!
//! Clones repositories by running `git clone` as a child process.
//!
//! # Requirements
//!
//! A `git` executable must be on PATH (or configured via `GIT__PROGRAM`).
//! Interactive credential prompts are disabled, so a private repository fails
//! fast instead of hanging.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::config::GitConfig;
use crate::ports::{FetchError, RepositoryFetcher};

static GITHUB_LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://github\.com/[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?/[A-Za-z0-9._-]+?(?:\.git)?/?$")
        .expect("Invalid GitHub location regex")
});

/// stderr fragments git prints when a repository is missing or needs credentials.
const NOT_ACCESSIBLE_MARKERS: &[&str] = &[
    "repository not found",
    "authentication failed",
    "could not read username",
    "terminal prompts disabled",
    "does not appear to be a git repository",
];

/// Repository fetcher backed by the git command-line client.
#[derive(Debug, Clone)]
pub struct GitCliFetcher {
    program: String,
    clone_timeout: Duration,
    clone_depth: u32,
}

impl GitCliFetcher {
    /// Create a fetcher using `git` from PATH with default limits.
    pub fn new() -> Self {
        Self::from_config(&GitConfig::default())
    }

    pub fn from_config(config: &GitConfig) -> Self {
        Self {
            program: config.program.clone(),
            clone_timeout: config.clone_timeout(),
            clone_depth: config.clone_depth,
        }
    }

    /// Set the executable to run.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Set the timeout for a single clone.
    pub fn with_clone_timeout(mut self, timeout_secs: u64) -> Self {
        self.clone_timeout = Duration::from_secs(timeout_secs);
        self
    }

    /// Maps a failed clone's stderr onto a fetch error.
    fn classify_failure(stderr: &str) -> FetchError {
        let lowered = stderr.to_lowercase();
        let message = stderr.trim().to_string();
        if NOT_ACCESSIBLE_MARKERS.iter().any(|m| lowered.contains(m)) {
            FetchError::InvalidOrPrivate(message)
        } else {
            FetchError::Network(message)
        }
    }
}

impl Default for GitCliFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepositoryFetcher for GitCliFetcher {
    fn validate(&self, location: &str) -> bool {
        GITHUB_LOCATION.is_match(location)
    }

    async fn fetch_into(&self, location: &str, dest: &Path) -> Result<(), FetchError> {
        if !self.validate(location) {
            return Err(FetchError::InvalidOrPrivate(format!(
                "not a GitHub repository URL: {}",
                location
            )));
        }

        let child = Command::new(&self.program)
            .arg("clone")
            .arg("--depth")
            .arg(self.clone_depth.to_string())
            .arg("--quiet")
            .arg(location)
            .arg(dest)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| FetchError::Network(format!("failed to start {}: {}", self.program, e)))?;

        let output = tokio::time::timeout(self.clone_timeout, child.wait_with_output())
            .await
            .map_err(|_| FetchError::Timeout(self.clone_timeout.as_secs()))?
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::debug!(location, status = ?output.status.code(), "git clone failed");
            return Err(Self::classify_failure(&stderr));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn accepts_github_urls() {
        let fetcher = GitCliFetcher::new();
        assert!(fetcher.validate("https://github.com/rust-lang/rust"));
        assert!(fetcher.validate("https://github.com/rust-lang/rust.git"));
        assert!(fetcher.validate("https://github.com/rust-lang/rust/"));
        assert!(fetcher.validate("https://github.com/serde-rs/serde_json"));
    }

    #[test]
    fn rejects_other_locations() {
        let fetcher = GitCliFetcher::new();
        assert!(!fetcher.validate(""));
        assert!(!fetcher.validate("not a url"));
        assert!(!fetcher.validate("http://github.com/rust-lang/rust"));
        assert!(!fetcher.validate("https://gitlab.com/group/project"));
        assert!(!fetcher.validate("https://github.com/rust-lang"));
        assert!(!fetcher.validate("https://github.com/rust-lang/rust/tree/master"));
        assert!(!fetcher.validate("https://github.com/-bad/repo"));
    }

    #[test]
    fn classifies_missing_repository_as_private() {
        let err = GitCliFetcher::classify_failure(
            "remote: Repository not found.\nfatal: repository 'x' not found",
        );
        assert!(matches!(err, FetchError::InvalidOrPrivate(_)));

        let err = GitCliFetcher::classify_failure(
            "fatal: could not read Username for 'https://github.com': terminal prompts disabled",
        );
        assert!(matches!(err, FetchError::InvalidOrPrivate(_)));
    }

    #[test]
    fn classifies_other_failures_as_network() {
        let err = GitCliFetcher::classify_failure(
            "fatal: unable to access 'https://github.com/a/b/': Could not resolve host: github.com",
        );
        assert_eq!(
            err,
            FetchError::Network(
                "fatal: unable to access 'https://github.com/a/b/': Could not resolve host: github.com"
                    .to_string()
            )
        );
    }

    #[test]
    fn builder_sets_fields() {
        let fetcher = GitCliFetcher::new()
            .with_program("/usr/local/bin/git")
            .with_clone_timeout(5);
        assert_eq!(fetcher.program, "/usr/local/bin/git");
        assert_eq!(fetcher.clone_timeout, Duration::from_secs(5));
        assert_eq!(fetcher.clone_depth, 1);
    }

    #[tokio::test]
    async fn clone_rejects_invalid_location_without_spawning() {
        let dir = TempDir::new().unwrap();
        let fetcher = GitCliFetcher::new().with_program("definitely-not-a-real-git-binary");
        let result = fetcher.fetch_into("ftp://example.com/x", &dir.path().join("x")).await;
        assert!(matches!(result, Err(FetchError::InvalidOrPrivate(_))));
    }

    #[test]
    fn from_config_uses_configured_clone_timeout() {
        let config = GitConfig {
            clone_timeout_secs: 45,
            ..GitConfig::default()
        };
        let fetcher = GitCliFetcher::from_config(&config);
        assert_eq!(fetcher.clone_timeout, Duration::from_secs(45));
    }

    #[tokio::test]
    async fn fetch_through_shared_trait_object() {
        let dir = TempDir::new().unwrap();
        let fetcher: Arc<dyn RepositoryFetcher> =
            Arc::new(GitCliFetcher::new().with_program("definitely-not-a-real-git-binary"));
        let result = fetcher
            .fetch_into("https://github.com/acme/widgets", &dir.path().join("w"))
            .await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[tokio::test]
    async fn missing_executable_is_a_network_error() {
        let dir = TempDir::new().unwrap();
        let fetcher = GitCliFetcher::new().with_program("definitely-not-a-real-git-binary");
        let result = fetcher
            .fetch_into("https://github.com/acme/widgets", &dir.path().join("w"))
            .await;
        assert!(matches!(result, Err(FetchError::Network(_))));
    }
}
