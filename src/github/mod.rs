// GitHub API module.
// Provides client and types for interacting with the GitHub REST API.

pub mod client;
pub mod types;

pub use client::{GitHubClient, StarredPage};
pub use types::Repo;
