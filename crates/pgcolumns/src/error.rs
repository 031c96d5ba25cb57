//! Error types for pgcolumns

use thiserror::Error;

/// Result type alias for pgcolumns operations
pub type ColumnResult<T> = Result<T, ColumnError>;

/// Error types for column metadata construction.
///
/// Every error is raised while building a [`Column`](crate::Column) or a
/// [`ColumnSet`](crate::ColumnSet). Reading the views of an already built set
/// and calling `prepare` never fail.
#[derive(Debug, Error)]
pub enum ColumnError {
    /// Bad `columns` shape, non-object options, bad column descriptor or table name.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ColumnError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for ColumnError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}
