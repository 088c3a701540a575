//! Search request lifecycle
//!
//! Issues the query, awaits the provider, then hands the response to the
//! normalizer and ranker. Only the most recently issued request counts: a
//! response that arrives after a newer request was started is discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::search::error::ClientError;
use crate::search::normalizer::normalize;
use crate::search::provider::{SearchProvider, SearchRequest};
use crate::search::ranker::HitView;
use crate::search::types::RawSearchResultSet;
use crate::version::ordering::SortMode;

/// Ranked hits of a successful search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub hits: Vec<HitView>,
    /// Malformed records skipped while normalizing
    pub dropped: usize,
}

/// What a search produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Nothing matched; a normal outcome, not an error
    Empty {
        query: String,
        /// Malformed records skipped while normalizing
        dropped: usize,
    },
    Found(SearchReport),
    /// A newer request was issued while this one was in flight
    Superseded { query: String },
}

impl SearchOutcome {
    pub fn query(&self) -> &str {
        match self {
            SearchOutcome::Empty { query, .. } | SearchOutcome::Superseded { query } => query,
            SearchOutcome::Found(report) => &report.query,
        }
    }
}

/// Normalize and rank a raw response without any I/O
pub fn process(raw: RawSearchResultSet, mode: SortMode) -> SearchOutcome {
    let normalized = normalize(raw);
    let result_set = normalized.result_set;

    if result_set.is_empty() {
        if normalized.dropped > 0 {
            warn!(
                "Every hit for '{}' was malformed ({} records dropped)",
                result_set.query, normalized.dropped
            );
        }
        return SearchOutcome::Empty {
            query: result_set.query,
            dropped: normalized.dropped,
        };
    }

    let hits = result_set
        .hits
        .into_iter()
        .map(|hit| HitView::from_hit(hit, mode))
        .collect();

    SearchOutcome::Found(SearchReport {
        query: result_set.query,
        hits,
        dropped: normalized.dropped,
    })
}

pub struct SearchController {
    provider: Arc<dyn SearchProvider>,
    sort_mode: SortMode,
    repositories: Vec<String>,
    latest_ticket: AtomicU64,
}

impl SearchController {
    pub fn new(provider: Arc<dyn SearchProvider>, sort_mode: SortMode) -> Self {
        Self {
            provider,
            sort_mode,
            repositories: Vec::new(),
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Restrict `--repo` to the given repository ids
    pub fn with_repositories(mut self, repositories: Vec<String>) -> Self {
        self.repositories = repositories;
        self
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Run a search; the newest request wins
    pub async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, ClientError> {
        request.check_repository(&self.repositories)?;

        let ticket = self.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Issuing search #{} for '{}'", ticket, request.package);

        let result = self.provider.search(&request).await;

        // A stale request is superseded whether it succeeded or failed
        if self.latest_ticket.load(Ordering::SeqCst) != ticket {
            info!(
                "Discarding stale results of search #{} for '{}'",
                ticket, request.package
            );
            return Ok(SearchOutcome::Superseded {
                query: request.package,
            });
        }

        let outcome = process(result?, self.sort_mode);
        match &outcome {
            SearchOutcome::Found(report) => info!(
                "Search #{} for '{}' returned {} hits ({} malformed records dropped)",
                ticket,
                report.query,
                report.hits.len(),
                report.dropped
            ),
            SearchOutcome::Empty { query, dropped } => info!(
                "Search #{} for '{}' returned no hits ({} malformed records dropped)",
                ticket, query, dropped
            ),
            SearchOutcome::Superseded { .. } => {}
        }
        Ok(outcome)
    }
}
