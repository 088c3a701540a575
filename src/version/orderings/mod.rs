//! Version ordering implementations

mod legacy;
mod rpm;

pub use legacy::LegacyOrdering;
pub use rpm::{RpmOrdering, rpmvercmp};
