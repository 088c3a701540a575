//! Lexicographic version ordering
//!
//! Compares the rendered composite key (`epoch:ver-rel`) as a plain string.
//! No numeric segment handling: `"9-1"` sorts above `"10-1"`.

use std::cmp::Ordering;

use crate::version::ordering::{SortMode, VersionOrdering};
use crate::version::types::Version;

pub struct LegacyOrdering;

impl VersionOrdering for LegacyOrdering {
    fn sort_mode(&self) -> SortMode {
        SortMode::Legacy
    }

    fn compare(&self, a: &Version, b: &Version) -> Ordering {
        a.composite_key().cmp(&b.composite_key())
    }
}
