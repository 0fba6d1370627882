use arrow::error::ArrowError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The source table could not be read. Fatal: nothing can be served without it.
    #[error("data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    #[error("invalid filter value {value:?} for column {column}: expected {expected}")]
    InvalidFilterValue {
        column: String,
        value: String,
        expected: &'static str,
    },

    #[error("invalid market share metric {0:?}: expected \"sales\" or \"volume\"")]
    InvalidMetric(String),

    #[error(transparent)]
    Arrow(#[from] ArrowError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Error::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// True for failures caused by the query itself rather than the data or the engine.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidFilterValue { .. } | Error::InvalidMetric(_)
        )
    }
}
