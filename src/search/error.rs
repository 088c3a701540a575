use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Malformed record: {field} {reason}")]
    MalformedRecord {
        field: &'static str,
        reason: String,
    },
}

impl NormalizeError {
    pub(crate) fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        NormalizeError::MalformedRecord {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Unknown repository: {0}")]
    UnknownRepository(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    UnexpectedStatus(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
