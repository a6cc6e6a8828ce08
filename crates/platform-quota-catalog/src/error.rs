//! Error types for catalog loading and assignments

use std::path::PathBuf;

use platform_quota::{QuotaType, ValidationError};
use thiserror::Error;

/// Catalog error types.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog file {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog document is not valid JSON
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog document is JSON but not a list of records
    #[error("Invalid catalog document: {0}")]
    InvalidDocument(String),

    /// A record in the catalog failed validation
    #[error("Invalid quota record at index {index}: {error}")]
    InvalidRecord {
        /// Position of the record in the document
        index: usize,
        /// Every violation found in the record
        error: ValidationError,
    },

    /// The same plan tag appears twice in one document
    #[error("Duplicate quota record for {0}")]
    DuplicateFeature(QuotaType),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Check if this error comes from operator-supplied data rather than the
    /// environment.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            CatalogError::InvalidDocument(_)
                | CatalogError::InvalidRecord { .. }
                | CatalogError::DuplicateFeature(_)
                | CatalogError::Json(_)
        )
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Io { .. } => "CATALOG_IO_ERROR",
            CatalogError::Json(_) => "CATALOG_INVALID_JSON",
            CatalogError::InvalidDocument(_) => "CATALOG_INVALID_DOCUMENT",
            CatalogError::InvalidRecord { .. } => "CATALOG_INVALID_RECORD",
            CatalogError::DuplicateFeature(_) => "CATALOG_DUPLICATE_FEATURE",
            CatalogError::Config(_) => "CONFIG_ERROR",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Assignment errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    /// Workspace plan assigned to a user
    #[error("{0} can only be assigned to a workspace")]
    WorkspacePlanForUser(QuotaType),

    /// User plan assigned to a workspace
    #[error("{0} can only be assigned to a user")]
    UserPlanForWorkspace(QuotaType),

    /// Expiry is not after activation
    #[error("Assignment expires before it is activated")]
    ExpiresBeforeActivation,
}
