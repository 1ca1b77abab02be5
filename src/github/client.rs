// GitHub API HTTP client.
// Fetches starred-repository pages and reads pagination state from the Link header.

use reqwest::{
    Client, Response,
    header::{ACCEPT, HeaderMap, HeaderValue, LINK, USER_AGENT},
};
use tracing::debug;

use crate::error::{Result, StarlistError};

use super::types::Repo;

const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// One page of a user's starred repositories, plus whether another follows.
#[derive(Debug, Clone)]
pub struct StarredPage {
    pub repos: Vec<Repo>,
    pub has_next: bool,
}

/// GitHub API client. Requests are unauthenticated and issued one at a time.
pub struct GitHubClient {
    client: Client,
}

impl GitHubClient {
    /// Create a new GitHub client.
    pub fn new() -> Result<Self> {
        let mut headers = HeaderMap::new();

        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        // GitHub rejects requests without a User-Agent.
        headers.insert(USER_AGENT, HeaderValue::from_static("starlist-cli"));

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(StarlistError::Api)?;

        Ok(Self { client })
    }

    /// Fetch one page of a user's starred repositories.
    ///
    /// Pages are 1-based. Continuation is signaled by a `Link` response
    /// header entry with `rel="next"`. Rate-limit headers are logged at
    /// debug level but not acted on; there is no throttling or retry.
    pub async fn starred_page(&self, username: &str, page: u32) -> Result<StarredPage> {
        let url = format!("{GITHUB_API_BASE}/users/{username}/starred?page={page}");
        debug!("fetching page {page} of {username}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(StarlistError::Api)?;
        let response = check_status(response)?;

        log_rate_limit(&response);

        let has_next = response
            .headers()
            .get(LINK)
            .and_then(|v| v.to_str().ok())
            .is_some_and(has_next_page);

        let repos: Vec<Repo> = response.json().await.map_err(StarlistError::Api)?;
        Ok(StarredPage { repos, has_next })
    }
}

/// Reject non-2xx responses before attempting to decode the body.
fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(StarlistError::Status {
            status: status.as_u16(),
            url: response.url().to_string(),
        })
    }
}

/// Log the remaining request quota and its reset time.
/// Waiting out an exhausted quota is not implemented.
fn log_rate_limit(response: &Response) {
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string()
    };

    let remaining = header("x-ratelimit-remaining");
    let reset = header("x-ratelimit-reset");
    let reset_at = reset
        .parse::<i64>()
        .ok()
        .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string());

    debug!("x-ratelimit-remaining: {remaining}\tx-ratelimit-reset: {reset} ({reset_at})");
}

/// Check a `Link` header value for a `rel="next"` entry.
///
/// The header is a comma-separated list of `<url>; rel="..."` entries;
/// another page exists iff one entry's rel is `next`.
fn has_next_page(link: &str) -> bool {
    link.split(", ").any(|entry| entry.contains(r#"rel="next""#))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_header_with_next() {
        let link = r#"<https://api.github.com/user/1/starred?page=2>; rel="next", <https://api.github.com/user/1/starred?page=5>; rel="last""#;
        assert!(has_next_page(link));
    }

    #[test]
    fn test_link_header_last_page() {
        let link = r#"<https://api.github.com/user/1/starred?page=4>; rel="prev", <https://api.github.com/user/1/starred?page=1>; rel="first""#;
        assert!(!has_next_page(link));
    }

    #[test]
    fn test_link_header_empty() {
        assert!(!has_next_page(""));
    }
}
