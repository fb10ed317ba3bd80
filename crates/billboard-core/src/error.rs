//! Error types shared by the listing stack.

use thiserror::Error;

/// Everything a listing call can fail with.
///
/// Store failures surface as [`BillboardError::Database`] and are never
/// retried or suppressed by the data-access layer. Mapping failures keep
/// their own typed [`MappingError`] so callers can tell the two apart.
#[derive(Error, Debug)]
pub enum BillboardError {
    #[error("{resource_type} {id} does not exist")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Rejected filter or paging input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller lacks the role a listing requires.
    #[error("{0}")]
    Forbidden(String),

    /// The store failed or was unreachable.
    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A fetched row could not be turned into the requested shape.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A post-processing step failed.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BillboardError {
    /// HTTP status a handler should answer with.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Forbidden(_) => 403,
            Self::NotFound { .. } => 404,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Mapping(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Stable tag used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Mapping(_) => "MAPPING_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    #[must_use]
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// True when the store itself failed, as opposed to the caller's input
    /// or row mapping.
    #[must_use]
    pub const fn is_store_failure(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for BillboardError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => Self::not_found("row", "?"),
            sqlx::Error::ColumnNotFound(column) => {
                Self::Mapping(MappingError::new(format!("column '{column}' not found")))
            }
            sqlx::Error::ColumnDecode { index, source } => Self::Mapping(MappingError::new(
                format!("column {index} could not be decoded: {source}"),
            )),
            _ => Self::Database(err.to_string()),
        }
    }
}

/// Failure to turn one fetched row (or entity) into its target shape.
///
/// `index` is the zero-based position of the offending row within the page.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to map row {index}: {message}")]
pub struct MappingError {
    /// Position of the row within the page.
    pub index: usize,
    /// What went wrong.
    pub message: String,
}

impl MappingError {
    /// Creates a mapping error for the first row; use [`MappingError::at`]
    /// once the position is known.
    #[must_use]
    pub fn new<T: Into<String>>(message: T) -> Self {
        Self {
            index: 0,
            message: message.into(),
        }
    }

    /// Returns the same error attributed to the row at `index`.
    #[must_use]
    pub fn at(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}
