// GitHub API response types.
// Defines structs for deserializing GitHub REST API responses.

use serde::{Deserialize, Serialize};

/// A starred repository as returned by the GitHub REST API.
///
/// Field names match the API payload verbatim; the same shape is used for
/// the cache store, so a cached snapshot round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: u64,
    pub full_name: String,
    pub description: Option<String>,
    pub html_url: String,
    /// Primary language; absent for repos GitHub could not classify.
    pub language: Option<String>,
}

impl Repo {
    /// Whether this repo's primary language matches one of the requested
    /// languages. The requested set must already be lowercased; repos
    /// without a language never match.
    pub fn matches_language(&self, languages: &[String]) -> bool {
        self.language
            .as_ref()
            .is_some_and(|lang| languages.contains(&lang.to_lowercase()))
    }
}
