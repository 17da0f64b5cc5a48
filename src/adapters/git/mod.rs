//! Git Adapters
//!
//! Implementations of the RepositoryFetcher port.
//!
//! - **GitCliFetcher** - Shallow clones public GitHub repositories with the git CLI

mod git_cli_fetcher;

pub use git_cli_fetcher::GitCliFetcher;
