//! Search provider trait and its HTTP implementation

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tracing::{debug, warn};

use crate::config::{DEFAULT_BASE_URL, FETCH_TIMEOUT_MS};
use crate::search::error::ClientError;
use crate::search::types::RawSearchResultSet;

/// Path of the search endpoint, relative to the provider's base URL
const SEARCH_PATH: &str = "/api/search";

/// A search for one package name, optionally limited to one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub package: String,
    pub repo: Option<String>,
}

impl SearchRequest {
    /// Build a request, trimming the package name
    ///
    /// An empty repository id means "all repositories".
    pub fn new(package: &str, repo: Option<&str>) -> Result<Self, ClientError> {
        let package = package.trim();
        if package.is_empty() {
            return Err(ClientError::InvalidQuery(
                "package name must not be empty".to_string(),
            ));
        }

        let repo = repo
            .map(str::trim)
            .filter(|repo| !repo.is_empty())
            .map(str::to_string);

        Ok(Self {
            package: package.to_string(),
            repo,
        })
    }

    /// Reject repositories outside `known`; an empty list allows everything
    pub fn check_repository(&self, known: &[String]) -> Result<(), ClientError> {
        match &self.repo {
            Some(repo) if !known.is_empty() && !known.contains(repo) => {
                Err(ClientError::UnknownRepository(repo.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// Trait for fetching raw search results from an external provider
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Runs one search and returns the provider's response as-is
    ///
    /// # Returns
    /// * `Ok(RawSearchResultSet)` - The unvalidated response, hits in provider order
    /// * `Err(ClientError)` - If the request fails or the body cannot be decoded
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResultSet, ClientError>;
}

/// Search provider speaking the `/api/search` HTTP endpoint
pub struct HttpSearchProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSearchProvider {
    /// Creates a new HttpSearchProvider with a custom base URL and timeout
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("repo-query")
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for HttpSearchProvider {
    fn default() -> Self {
        Self::new(
            DEFAULT_BASE_URL,
            Duration::from_millis(FETCH_TIMEOUT_MS),
        )
    }
}

#[async_trait::async_trait]
impl SearchProvider for HttpSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResultSet, ClientError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);

        let mut query = vec![("package", request.package.as_str())];
        if let Some(repo) = &request.repo {
            query.push(("repo", repo.as_str()));
        }

        debug!("Searching {} for {:?}", url, request);
        let response = self.client.get(&url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Search provider returned status {}: {}", status, url);
            return Err(ClientError::UnexpectedStatus(status.as_u16()));
        }

        response.json::<RawSearchResultSet>().await.map_err(|e| {
            warn!("Failed to parse search response: {}", e);
            ClientError::InvalidResponse(e.to_string())
        })
    }
}
