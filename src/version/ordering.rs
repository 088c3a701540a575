//! Version ordering abstraction for ranking package variants

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::version::orderings::{LegacyOrdering, RpmOrdering};
use crate::version::types::Version;

/// Trait for comparing two package versions
///
/// Implementations return the ascending order of `a` relative to `b`; the
/// ranker reverses it to list the highest version first.
pub trait VersionOrdering: Send + Sync {
    /// Returns the sort mode this ordering implements
    fn sort_mode(&self) -> SortMode;

    /// Compare two versions in ascending order
    fn compare(&self, a: &Version, b: &Version) -> Ordering;
}

/// Selects how variants of a package are ranked
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Plain lexicographic comparison of the composite `epoch:ver-rel` string
    #[default]
    Legacy,
    /// RPM version comparison (epoch, then rpmvercmp on ver and rel)
    Rpm,
}

static LEGACY: LegacyOrdering = LegacyOrdering;
static RPM: RpmOrdering = RpmOrdering;

impl SortMode {
    /// Returns the string representation of the sort mode
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Legacy => "legacy",
            SortMode::Rpm => "rpm",
        }
    }

    /// Returns the ordering implementation for this mode
    pub fn ordering(&self) -> &'static dyn VersionOrdering {
        match self {
            SortMode::Legacy => &LEGACY,
            SortMode::Rpm => &RPM,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "legacy" => Ok(SortMode::Legacy),
            "rpm" => Ok(SortMode::Rpm),
            _ => Err(()),
        }
    }
}
