//! Error type shared by every module of the crate.
//!
//! Validation always runs before any element is moved, so an `Err` means the caller's
//! data is exactly as it was handed in.

/// Errors surfaced by sorting, top-K extraction, benchmarking and ingestion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The projected keys cannot be totally ordered (missing field or mixed value kinds).
    #[error("field {field:?} cannot be used as a sort key: {reason}")]
    IncomparableKey { field: String, reason: String },

    /// The requested top-K count is negative or not an integer.
    #[error("invalid top-k count {0:?}")]
    InvalidCount(String),

    /// Summing `field` exceeded the range of `i64`.
    #[error("total of field {field:?} for {group} overflows i64")]
    Overflow { field: String, group: String },

    /// A wide table needs two category columns plus at least one region column.
    #[error("expected at least 3 columns in wide table, found {found}")]
    MissingColumns { found: usize },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn incomparable(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::IncomparableKey {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
