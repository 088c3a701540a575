//! Validation of raw search responses
//!
//! Every hit and version variant is decoded and checked on its own. A
//! malformed record is dropped and logged; the rest of the response is still
//! processed.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::search::error::NormalizeError;
use crate::search::types::{
    PackageRecord, RawEpoch, RawPackageRecord, RawSearchHit, RawSearchResultSet, RawVersion,
    RawVersionVariant, SearchHit, SearchResultSet, VersionVariant,
};
use crate::version::types::Version;

/// Result of normalizing a whole response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub result_set: SearchResultSet,
    /// Number of hits and version variants that were dropped as malformed
    pub dropped: usize,
}

/// Normalize a raw response, dropping malformed records
pub fn normalize(raw: RawSearchResultSet) -> Normalized {
    let mut dropped = 0;
    let total = raw.hits.len();

    let hits: Vec<SearchHit> = raw
        .hits
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            decode::<RawSearchHit>(value, "hit")
                .and_then(|raw_hit| normalize_hit_counting(raw_hit, &mut dropped))
                .inspect_err(|e| warn!("Dropping search hit #{}: {}", index, e))
                .map_err(|_| dropped += 1)
                .ok()
        })
        .collect();

    debug!(
        "Normalized {} of {} hits for query '{}'",
        hits.len(),
        total,
        raw.query
    );

    Normalized {
        result_set: SearchResultSet {
            query: raw.query,
            hits,
        },
        dropped,
    }
}

/// Normalize a single hit
///
/// Fails if the hit's own package is malformed. Malformed entries of
/// `all_versions` are dropped without failing the hit.
pub fn normalize_hit(raw: RawSearchHit) -> Result<SearchHit, NormalizeError> {
    let mut dropped = 0;
    normalize_hit_counting(raw, &mut dropped)
}

fn normalize_hit_counting(
    raw: RawSearchHit,
    dropped: &mut usize,
) -> Result<SearchHit, NormalizeError> {
    let package = normalize_record(raw.package)?;

    let all_versions = raw
        .all_versions
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| {
            decode::<RawVersionVariant>(value, "all_versions")
                .and_then(normalize_variant)
                .inspect_err(|e| warn!("Dropping version variant of {}: {}", package.name, e))
                .map_err(|_| *dropped += 1)
                .ok()
        })
        .collect();

    Ok(SearchHit {
        package,
        repo: raw.repo.unwrap_or_default(),
        all_versions,
    })
}

/// Decode one record of the response; a wrongly typed field makes it malformed
fn decode<T: DeserializeOwned>(
    value: serde_json::Value,
    field: &'static str,
) -> Result<T, NormalizeError> {
    serde_json::from_value(value).map_err(|e| NormalizeError::malformed(field, e.to_string()))
}

/// Normalize a single entry of `all_versions`
pub fn normalize_variant(raw: RawVersionVariant) -> Result<VersionVariant, NormalizeError> {
    Ok(VersionVariant {
        package: normalize_record(raw.package)?,
        repo: raw.repo.unwrap_or_default(),
        version_tags: normalize_tags(raw.version_tags),
    })
}

/// Drop null and empty tags, keeping the order of the rest
pub fn normalize_tags(raw: Option<Vec<Option<String>>>) -> Vec<String> {
    raw.unwrap_or_default()
        .into_iter()
        .flatten()
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn normalize_record(raw: Option<RawPackageRecord>) -> Result<PackageRecord, NormalizeError> {
    let raw = raw.ok_or_else(|| NormalizeError::malformed("package", "is missing"))?;

    let name = raw
        .name
        .filter(|name| !name.is_empty())
        .ok_or_else(|| NormalizeError::malformed("package.name", "must be a non-empty string"))?;

    let version = normalize_version(raw.version)?;

    Ok(PackageRecord {
        name,
        version,
        arch: raw.arch.unwrap_or_default(),
        summary: raw.summary.unwrap_or_default(),
    })
}

fn normalize_version(raw: Option<RawVersion>) -> Result<Version, NormalizeError> {
    let raw = raw.ok_or_else(|| NormalizeError::malformed("package.version", "is missing"))?;

    let ver = raw.ver.filter(|ver| !ver.is_empty()).ok_or_else(|| {
        NormalizeError::malformed("package.version.ver", "must be a non-empty string")
    })?;

    let epoch = match raw.epoch {
        None => None,
        Some(RawEpoch::Number(epoch)) => Some(epoch),
        Some(RawEpoch::Text(text)) if text.trim().is_empty() => None,
        Some(RawEpoch::Text(text)) => Some(text.trim().parse::<u64>().map_err(|_| {
            NormalizeError::malformed(
                "package.version.epoch",
                format!("'{}' is not a non-negative integer", text),
            )
        })?),
    };

    Ok(Version {
        epoch,
        ver,
        rel: raw.rel.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn raw_set(value: serde_json::Value) -> RawSearchResultSet {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn normalize_coerces_missing_optional_fields() {
        let normalized = normalize(raw_set(json!({
            "query": "bash",
            "hits": [{
                "repo": "baseos",
                "package": { "name": "bash", "version": { "ver": "5.1.8" } }
            }]
        })));

        assert_eq!(normalized.dropped, 0);
        let hit = &normalized.result_set.hits[0];
        assert_eq!(hit.package.version, Version::new(None, "5.1.8", ""));
        assert_eq!(hit.package.arch, "");
        assert_eq!(hit.package.summary, "");
        assert!(hit.all_versions.is_empty());
    }

    #[test]
    fn normalize_drops_hit_with_empty_ver_and_keeps_the_rest() {
        let normalized = normalize(raw_set(json!({
            "query": "foo",
            "hits": [
                { "repo": "a", "package": { "name": "foo", "version": { "ver": "", "rel": "1" } } },
                { "repo": "b", "package": { "name": "foo", "version": { "ver": "1.0", "rel": "1" } } }
            ]
        })));

        assert_eq!(normalized.dropped, 1);
        assert_eq!(normalized.result_set.hits.len(), 1);
        assert_eq!(normalized.result_set.hits[0].repo, "b");
    }

    #[test]
    fn normalize_drops_malformed_variant_but_keeps_hit() {
        let normalized = normalize(raw_set(json!({
            "query": "foo",
            "hits": [{
                "repo": "core",
                "package": { "name": "foo", "version": { "ver": "2.0", "rel": "1" } },
                "all_versions": [
                    { "repo": "core", "package": { "name": "foo", "version": { "ver": "2.0", "rel": "1" } } },
                    { "repo": "extra", "package": { "name": "foo", "version": { "rel": "3" } } }
                ]
            }]
        })));

        assert_eq!(normalized.dropped, 1);
        let hit = &normalized.result_set.hits[0];
        assert_eq!(hit.all_versions.len(), 1);
        assert_eq!(hit.all_versions[0].repo, "core");
    }

    #[test]
    fn normalize_drops_wrongly_typed_hits_and_keeps_the_rest() {
        let normalized = normalize(raw_set(json!({
            "query": "foo",
            "hits": [
                { "repo": "a", "package": { "name": "foo", "version": { "ver": "1.0", "rel": "1" } } },
                { "repo": "b", "package": { "name": "foo", "version": { "epoch": -1, "ver": "1.0" } } },
                { "repo": "c", "package": { "name": "foo", "version": { "ver": 2, "rel": "1" } } },
                { "repo": "d", "package": "foo" },
                42
            ]
        })));

        assert_eq!(normalized.dropped, 4);
        assert_eq!(normalized.result_set.hits.len(), 1);
        assert_eq!(normalized.result_set.hits[0].repo, "a");
    }

    #[test]
    fn normalize_drops_variant_with_non_string_tag_but_keeps_hit() {
        let normalized = normalize(raw_set(json!({
            "query": "foo",
            "hits": [{
                "repo": "core",
                "package": { "name": "foo", "version": { "ver": "2.0", "rel": "1" } },
                "all_versions": [
                    { "repo": "core", "package": { "name": "foo", "version": { "ver": "2.0", "rel": "1" } }, "version_tags": ["stable"] },
                    { "repo": "extra", "package": { "name": "foo", "version": { "ver": "1.0", "rel": "1" } }, "version_tags": [7] }
                ]
            }]
        })));

        assert_eq!(normalized.dropped, 1);
        let hit = &normalized.result_set.hits[0];
        assert_eq!(hit.all_versions.len(), 1);
        assert_eq!(hit.all_versions[0].version_tags, vec!["stable"]);
    }

    #[test]
    fn normalize_preserves_hit_order_and_query() {
        let normalized = normalize(raw_set(json!({
            "query": "foo",
            "hits": [
                { "repo": "z", "package": { "name": "foo", "version": { "ver": "1" } } },
                { "repo": "a", "package": { "name": "foo", "version": { "ver": "2" } } }
            ]
        })));

        let repos: Vec<&str> = normalized
            .result_set
            .hits
            .iter()
            .map(|hit| hit.repo.as_str())
            .collect();
        assert_eq!(repos, vec!["z", "a"]);
        assert_eq!(normalized.result_set.query, "foo");
    }

    #[test]
    fn normalize_empty_hits_is_not_an_error() {
        let normalized = normalize(raw_set(json!({ "query": "xyz", "hits": [] })));

        assert!(normalized.result_set.is_empty());
        assert_eq!(normalized.dropped, 0);
    }

    #[rstest]
    #[case(None, vec![])]
    #[case(Some(vec![Some("stable"), None, Some(""), Some("lts")]), vec!["stable", "lts"])]
    #[case(Some(vec![None, None]), vec![])]
    fn normalize_tags_filters_null_and_empty(
        #[case] raw: Option<Vec<Option<&str>>>,
        #[case] expected: Vec<&str>,
    ) {
        let raw = raw.map(|tags| {
            tags.into_iter()
                .map(|tag| tag.map(|t| t.to_string()))
                .collect()
        });
        assert_eq!(normalize_tags(raw), expected);
    }

    #[rstest]
    #[case(json!(1), Some(1))]
    #[case(json!("2"), Some(2))]
    #[case(json!("0"), Some(0))]
    #[case(json!(""), None)]
    #[case(json!(null), None)]
    fn normalize_hit_reads_epoch(#[case] epoch: serde_json::Value, #[case] expected: Option<u64>) {
        let raw: RawSearchHit = serde_json::from_value(json!({
            "repo": "baseos",
            "package": { "name": "bash", "version": { "epoch": epoch, "ver": "5.1", "rel": "1" } }
        }))
        .unwrap();

        let hit = normalize_hit(raw).unwrap();
        assert_eq!(hit.package.version.epoch, expected);
    }

    #[rstest]
    #[case(json!({ "repo": "r" }), "package")]
    #[case(json!({ "package": { "version": { "ver": "1" } } }), "package.name")]
    #[case(json!({ "package": { "name": "", "version": { "ver": "1" } } }), "package.name")]
    #[case(json!({ "package": { "name": "foo" } }), "package.version")]
    #[case(json!({ "package": { "name": "foo", "version": { "rel": "1" } } }), "package.version.ver")]
    #[case(json!({ "package": { "name": "foo", "version": { "ver": "1", "epoch": "x" } } }), "package.version.epoch")]
    fn normalize_hit_rejects_malformed_records(
        #[case] raw: serde_json::Value,
        #[case] expected_field: &str,
    ) {
        let raw: RawSearchHit = serde_json::from_value(raw).unwrap();

        match normalize_hit(raw) {
            Err(NormalizeError::MalformedRecord { field, .. }) => {
                assert_eq!(field, expected_field)
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }
}
