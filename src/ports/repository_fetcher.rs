//! RepositoryFetcher port - validating and cloning repository locations.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Per-repository fetch failures. All of them cause a skip, never a batch failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Location is malformed, does not exist, or needs credentials.
    #[error("Repository is invalid or private: {0}")]
    InvalidOrPrivate(String),

    /// Remote could not be reached.
    #[error("Network error while fetching repository: {0}")]
    Network(String),

    /// Fetch did not complete in time.
    #[error("Fetching repository timed out after {0}s")]
    Timeout(u64),
}

/// Source of repository content.
#[async_trait]
pub trait RepositoryFetcher: Send + Sync {
    /// Cheap syntactic check performed before any I/O.
    fn validate(&self, location: &str) -> bool;

    /// Clones `location` into `dest`, which must not exist yet.
    ///
    /// # Errors
    ///
    /// - `InvalidOrPrivate` when the repository does not exist or is private
    /// - `Network` when the remote is unreachable
    /// - `Timeout` when the clone exceeds the adapter's own limit
    async fn fetch_into(&self, location: &str, dest: &Path) -> Result<(), FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_fetcher_is_object_safe() {
        fn _accepts_dyn(_fetcher: &dyn RepositoryFetcher) {}
    }

    #[test]
    fn fetch_error_displays_reason() {
        let err = FetchError::Timeout(30);
        assert_eq!(err.to_string(), "Fetching repository timed out after 30s");
    }
}
