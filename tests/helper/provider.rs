//! Provider test utilities

use std::collections::HashMap;

use async_trait::async_trait;

use repo_query::search::error::ClientError;
use repo_query::search::provider::{SearchProvider, SearchRequest};
use repo_query::search::types::RawSearchResultSet;

/// Provider answering from canned JSON responses keyed by package name
pub struct StaticProvider {
    responses: HashMap<String, serde_json::Value>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    pub fn with_response(mut self, package: &str, response: serde_json::Value) -> Self {
        self.responses.insert(package.to_string(), response);
        self
    }
}

#[async_trait]
impl SearchProvider for StaticProvider {
    async fn search(&self, request: &SearchRequest) -> Result<RawSearchResultSet, ClientError> {
        match self.responses.get(&request.package) {
            Some(response) => Ok(raw_result_set(response.clone())),
            None => Ok(raw_result_set(serde_json::json!({
                "query": request.package,
                "hits": []
            }))),
        }
    }
}

/// Deserialize a raw result set from JSON
pub fn raw_result_set(value: serde_json::Value) -> RawSearchResultSet {
    serde_json::from_value(value).unwrap()
}
