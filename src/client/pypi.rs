//! PyPI JSON API client and repository link selection

use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::{Client as HttpClient, StatusCode, Url};
use serde::Deserialize;

use super::{PackageIndex, user_agent};
use crate::config::{LinkRules, PYPI_BASE_URL, REQUEST_TIMEOUT};
use crate::error::{Error, LookupError, Result};
use crate::models::RepositoryUrl;

/// Label given to the `home_page` field when it joins the candidate list
const HOME_PAGE_LABEL: &str = "home_page";

/// PyPI JSON API response structure
#[derive(Debug, Deserialize)]
struct PypiResponse {
    #[serde(default)]
    info: PypiInfo,
}

/// Package metadata links from PyPI
#[derive(Debug, Default, Deserialize)]
pub struct PypiInfo {
    /// Label to URL mapping, in the order PyPI lists them; null URLs are skipped
    #[serde(default)]
    pub project_urls: Option<IndexMap<String, Option<String>>>,

    #[serde(default)]
    pub home_page: Option<String>,
}

/// PyPI registry client
pub struct PypiClient {
    http: HttpClient,
    base_url: String,
    rules: LinkRules,
}

impl PypiClient {
    pub fn new(rules: LinkRules) -> Result<Self> {
        Self::with_base_url(PYPI_BASE_URL, rules)
    }

    /// Create a client against a custom index host (used by tests)
    pub fn with_base_url(base_url: &str, rules: LinkRules) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent())
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            rules,
        })
    }

    async fn get(&self, name: &str) -> std::result::Result<reqwest::Response, LookupError> {
        let url = format!("{}/pypi/{}/json", self.base_url, name);
        log::debug!("Fetching PyPI package: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::transport("PyPI", e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(LookupError::NotFound(
                "Package not found on PyPI".to_string(),
            )),
            status if !status.is_success() => Err(LookupError::Transport(format!(
                "PyPI API error: status {}",
                status
            ))),
            _ => Ok(response),
        }
    }
}

#[async_trait]
impl PackageIndex for PypiClient {
    async fn resolve(&self, name: &str) -> std::result::Result<RepositoryUrl, LookupError> {
        let response = self.get(name).await?;
        let body: PypiResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(format!("Error parsing PyPI data: {}", e)))?;

        let url = select_repository(&body.info, &self.rules)?;
        log::debug!("Resolved {} to {}", name, url);
        Ok(url)
    }

    async fn exists(&self, name: &str) -> std::result::Result<(), LookupError> {
        self.get(name).await.map(|_| ())
    }
}

/// Pick the most authoritative repository link from package metadata.
///
/// Candidates are `project_urls` entries in listed order, then `home_page`.
/// Ignored labels are dropped first; the first priority label wins, else the
/// first remaining candidate.
pub fn select_repository(
    info: &PypiInfo,
    rules: &LinkRules,
) -> std::result::Result<RepositoryUrl, LookupError> {
    let project_urls = info
        .project_urls
        .iter()
        .flatten()
        .filter_map(|(label, url)| Some((label.as_str(), url.as_deref()?)));
    let home_page = info.home_page.as_deref().map(|url| (HOME_PAGE_LABEL, url));

    let candidates: Vec<(&str, &str)> = project_urls
        .chain(home_page)
        .filter(|(_, url)| is_hosted_link(url, rules))
        .filter(|(label, _)| !rules.is_ignored(label))
        .collect();

    let (_, url) = candidates
        .iter()
        .find(|(label, _)| rules.is_priority(label))
        .or_else(|| candidates.first())
        .ok_or(LookupError::NoRepositoryLink)?;

    Ok(RepositoryUrl::new(url))
}

fn is_hosted_link(url: &str, rules: &LinkRules) -> bool {
    Url::parse(url.trim())
        .ok()
        .and_then(|u| u.host_str().map(|h| rules.is_hosted(h)))
        .unwrap_or(false)
}
