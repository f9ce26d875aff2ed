//! GitHub repository API client

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client as HttpClient, StatusCode};
use serde::Deserialize;

use super::{RepositoryApi, user_agent};
use crate::config::{GITHUB_API_URL, REQUEST_TIMEOUT};
use crate::error::{ConfigError, Error, LookupError, Result};

/// Repository fields we read from `GET /repos/{owner}/{repo}`
#[derive(Debug, Deserialize)]
struct RepoResponse {
    #[serde(default)]
    pushed_at: Option<DateTime<Utc>>,
}

/// GitHub API client
pub struct GitHubClient {
    http: HttpClient,
    base_url: String,
}

impl GitHubClient {
    /// Create a client against api.github.com, authenticated when a token is given
    pub fn new(token: Option<&str>) -> Result<Self> {
        Self::with_base_url(GITHUB_API_URL, token)
    }

    /// Create a client against a custom API host (used by tests)
    pub fn with_base_url(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
                ConfigError::Invalid("GITHUB_TOKEN contains invalid characters".to_string())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent())
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl RepositoryApi for GitHubClient {
    async fn pushed_at(
        &self,
        owner: &str,
        repo: &str,
    ) -> std::result::Result<Option<DateTime<Utc>>, LookupError> {
        let url = format!("{}/repos/{}/{}", self.base_url, owner, repo);
        log::debug!("Fetching GitHub repository: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::transport("GitHub", e))?;

        let status = response.status();
        match status {
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                let remaining = response
                    .headers()
                    .get("x-ratelimit-remaining")
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                return Err(LookupError::RateLimited { remaining });
            }
            StatusCode::NOT_FOUND => {
                return Err(LookupError::NotFound(format!(
                    "Repository not found: {}/{}",
                    owner, repo
                )));
            }
            status if !status.is_success() => {
                return Err(LookupError::Transport(format!(
                    "GitHub API returned status {}",
                    status
                )));
            }
            _ => {}
        }

        let body: RepoResponse = response.json().await.map_err(|e| {
            LookupError::Parse(format!(
                "Error parsing GitHub data for {}/{}: {}",
                owner, repo, e
            ))
        })?;

        Ok(body.pushed_at)
    }
}
