//! Search result types
//!
//! `Raw*` types mirror the provider's JSON with every field optional.
//! Hits and version variants stay as undecoded JSON until the normalizer
//! decodes them one by one, so a wrongly typed field only costs its record.
//! The normalizer turns them into the fully populated records below, so the
//! ranker never has to check for missing fields.

use serde::{Deserialize, Serialize};

use crate::version::types::Version;

// =============================================================================
// Wire types (as returned by the search provider)
// =============================================================================

/// Top-level response from the search provider
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawSearchResultSet {
    pub query: String,
    /// Older providers return the hit list under `results`; each entry
    /// decodes into a [`RawSearchHit`]
    #[serde(alias = "results")]
    pub hits: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawSearchHit {
    pub package: Option<RawPackageRecord>,
    pub repo: Option<String>,
    /// Each entry decodes into a [`RawVersionVariant`]
    pub all_versions: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawVersionVariant {
    pub package: Option<RawPackageRecord>,
    pub repo: Option<String>,
    pub version_tags: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawPackageRecord {
    pub name: Option<String>,
    pub version: Option<RawVersion>,
    pub arch: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawVersion {
    pub epoch: Option<RawEpoch>,
    pub ver: Option<String>,
    pub rel: Option<String>,
}

/// Epoch as found on the wire
///
/// Repository metadata keeps version attributes as strings, so `"1"` is as
/// common as `1`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawEpoch {
    Number(u64),
    Text(String),
}

// =============================================================================
// Normalized types
// =============================================================================

/// A package as published in one repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    /// Grouping identity; architecture is not part of it
    pub name: String,
    pub version: Version,
    pub arch: String,
    pub summary: String,
}

/// One known version of a package, possibly from another repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionVariant {
    pub package: PackageRecord,
    pub repo: String,
    /// Tags with null and empty entries removed
    pub version_tags: Vec<String>,
}

/// A single match returned by the search provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub package: PackageRecord,
    pub repo: String,
    /// Every known version of the package, unsorted and possibly repo-mixed
    pub all_versions: Vec<VersionVariant>,
}

/// Normalized search response; hit order is the provider's order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultSet {
    pub query: String,
    pub hits: Vec<SearchHit>,
}

impl SearchResultSet {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// A variant placed in the ranked version list of a hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedVersionEntry {
    pub package: PackageRecord,
    pub repo: String,
    pub tags: Vec<String>,
    /// Same name and upstream version as the hit's package
    pub is_active: bool,
}
