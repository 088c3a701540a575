//! Package search aggregation and version ranking
//!
//! - [`search`]: provider access, normalization, ranking and rendering of results
//! - [`version`]: package versions and the orderings used to rank them
//! - [`config`]: configuration file, paths and defaults

pub mod config;
pub mod search;
pub mod version;
