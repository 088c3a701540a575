//! Version representation and ordering for repository packages
//!
//! # Modules
//!
//! - [`types`]: `Version` with its composite `epoch:ver-rel` key
//! - [`ordering`]: `VersionOrdering` trait and the `SortMode` selector
//! - [`orderings`]: Concrete orderings (legacy lexicographic, rpmvercmp)

pub mod ordering;
pub mod orderings;
pub mod types;
