//! Common version types

use std::fmt;

use serde::Serialize;

/// Repository package version: `[epoch:]ver-rel`
///
/// An absent epoch compares like `0` but is rendered differently from an
/// explicit `0`, so it is kept as `None` instead of being defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub epoch: Option<u64>,
    pub ver: String,
    pub rel: String,
}

impl Version {
    pub fn new(epoch: Option<u64>, ver: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            epoch,
            ver: ver.into(),
            rel: rel.into(),
        }
    }

    /// Epoch used for comparison (absent epoch counts as 0)
    pub fn effective_epoch(&self) -> u64 {
        self.epoch.unwrap_or(0)
    }

    /// Composite sort key `"{epoch:}{ver}-{rel}"`
    ///
    /// The epoch segment is only present when the epoch is set, including an
    /// explicit `0`.
    pub fn composite_key(&self) -> String {
        match self.epoch {
            Some(epoch) => format!("{}:{}-{}", epoch, self.ver, self.rel),
            None => format!("{}-{}", self.ver, self.rel),
        }
    }

    /// Short `ver-rel` label without the epoch
    pub fn label(&self) -> String {
        format!("{}-{}", self.ver, self.rel)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.composite_key())
    }
}
