// Starred-repository retrieval.
// Cache-first lookup, sequential pagination on a miss, then language filtering.

use tracing::debug;

use crate::cache::RepoStore;
use crate::error::Result;
use crate::github::{GitHubClient, Repo, StarredPage};

/// Source of starred-repository pages. Seam between the retrieval loop
/// and the HTTP client so the loop can be driven by a fake in tests.
#[allow(async_fn_in_trait)]
pub trait StarredSource {
    async fn starred_page(&self, username: &str, page: u32) -> Result<StarredPage>;
}

impl StarredSource for GitHubClient {
    async fn starred_page(&self, username: &str, page: u32) -> Result<StarredPage> {
        GitHubClient::starred_page(self, username, page).await
    }
}

/// Produce the possibly-filtered starred-repository list for a user.
///
/// A cached snapshot is used verbatim and skips the network entirely.
/// Otherwise pages are fetched sequentially from page 1 until one reports
/// no continuation, and the full list is persisted before returning. Any
/// fetch or store error aborts the whole retrieval; there is no partial
/// result and no retry.
pub async fn starred_repos(
    source: &impl StarredSource,
    store: &dyn RepoStore,
    username: &str,
    languages: &[String],
) -> Result<Vec<Repo>> {
    let repos = match store.get(username)? {
        Some(cached) => {
            debug!("cache hit for {username}: {} repos", cached.len());
            cached
        }
        None => {
            let mut repos = Vec::new();
            let mut page = 1;
            loop {
                let StarredPage {
                    repos: page_repos,
                    has_next,
                } = source.starred_page(username, page).await?;
                repos.extend(page_repos);

                if !has_next {
                    break;
                }
                page += 1;
            }

            store.put(username, &repos)?;
            repos
        }
    };

    Ok(filter_languages(repos, languages))
}

/// Keep only repos whose primary language is in the requested set.
/// The set must already be lowercased; an empty set keeps everything.
fn filter_languages(repos: Vec<Repo>, languages: &[String]) -> Vec<Repo> {
    if languages.is_empty() {
        return repos;
    }

    repos
        .into_iter()
        .filter(|repo| repo.matches_language(languages))
        .collect()
}
