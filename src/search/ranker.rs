//! Version ranking and grouping of normalized search hits

use indexmap::IndexMap;
use serde::Serialize;

use crate::search::types::{PackageRecord, RankedVersionEntry, SearchHit, VersionVariant};
use crate::version::ordering::SortMode;

/// Rank all known variants of a package, highest version first
///
/// - The sort is stable: variants with equal keys keep their input order.
/// - A variant is active when its name and upstream `ver` equal the primary
///   package's. Release and epoch are not compared, so several variants can
///   be active at once, or none when the primary is not among the variants.
/// - The output has exactly one entry per input variant.
pub fn rank_versions(
    primary: &PackageRecord,
    variants: &[VersionVariant],
    mode: SortMode,
) -> Vec<RankedVersionEntry> {
    let ordering = mode.ordering();

    let mut sorted: Vec<&VersionVariant> = variants.iter().collect();
    sorted.sort_by(|a, b| ordering.compare(&b.package.version, &a.package.version));

    sorted
        .into_iter()
        .map(|variant| RankedVersionEntry {
            package: variant.package.clone(),
            repo: variant.repo.clone(),
            tags: variant.version_tags.clone(),
            is_active: is_active(primary, &variant.package),
        })
        .collect()
}

fn is_active(primary: &PackageRecord, candidate: &PackageRecord) -> bool {
    candidate.name == primary.name && candidate.version.ver == primary.version.ver
}

/// Group hits by package name
///
/// Groups appear in order of first occurrence; hits inside a group keep
/// their original order.
pub fn group_by_name(hits: &[SearchHit]) -> IndexMap<String, Vec<SearchHit>> {
    let mut groups: IndexMap<String, Vec<SearchHit>> = IndexMap::new();
    for hit in hits {
        groups
            .entry(hit.package.name.clone())
            .or_default()
            .push(hit.clone());
    }
    groups
}

/// Output contract for a single hit
///
/// `versions` is only present when the hit knows more than one version;
/// a single-version hit is displayed from `hit` alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitView {
    pub hit: SearchHit,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub versions: Option<Vec<RankedVersionEntry>>,
}

impl HitView {
    pub fn from_hit(hit: SearchHit, mode: SortMode) -> Self {
        let versions = (hit.all_versions.len() > 1)
            .then(|| rank_versions(&hit.package, &hit.all_versions, mode));
        Self { hit, versions }
    }

    /// Number of ranked entries flagged active
    pub fn active_count(&self) -> usize {
        self.versions
            .as_ref()
            .map(|versions| versions.iter().filter(|entry| entry.is_active).count())
            .unwrap_or(0)
    }
}
