//! Error types for quota validation and enforcement
//!
//! Validation errors are structured and field-addressed: every violation found
//! in a raw record is reported together, each at the dotted path of the field
//! that caused it.

use std::fmt;

use thiserror::Error;

/// What is wrong with a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// Required field is absent
    Missing,

    /// Field has the wrong JSON type
    InvalidType {
        /// Expected type name
        expected: &'static str,
        /// Type name found in the input
        found: &'static str,
    },

    /// Number is zero or negative
    NotPositive,

    /// Number has a fractional part
    NotInteger,

    /// Number is too large to hold as an unsigned 64-bit integer
    TooLarge,

    /// Discriminator is outside the closed set of plan tags
    UnknownVariant {
        /// Value found in the input
        value: String,
        /// Accepted values
        expected: Vec<&'static str>,
    },
}

impl IssueKind {
    /// Get error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            IssueKind::Missing => "MISSING_FIELD",
            IssueKind::InvalidType { .. } => "INVALID_TYPE",
            IssueKind::NotPositive => "NOT_POSITIVE",
            IssueKind::NotInteger => "NOT_INTEGER",
            IssueKind::TooLarge => "TOO_LARGE",
            IssueKind::UnknownVariant { .. } => "UNKNOWN_VARIANT",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Missing => f.write_str("required field is missing"),
            IssueKind::InvalidType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            IssueKind::NotPositive => f.write_str("must be a positive number"),
            IssueKind::NotInteger => f.write_str("must be an integer"),
            IssueKind::TooLarge => f.write_str("exceeds the 64-bit integer range"),
            IssueKind::UnknownVariant { value, expected } => write!(
                f,
                "unknown variant '{}', expected one of: {}",
                value,
                expected.join(", ")
            ),
        }
    }
}

/// A single violation at a field path such as `configs.blobLimit`.
///
/// The root of the input has an empty path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Dotted path of the offending field
    pub path: String,

    /// What is wrong with it
    pub kind: IssueKind,
}

impl FieldIssue {
    pub fn new(path: impl Into<String>, kind: IssueKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "(root): {}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

/// A raw quota record failed validation.
///
/// Always carries at least one issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<FieldIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self { issues }
    }

    /// All violations, in the order they were found.
    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Paths of all violations.
    pub fn paths(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.path.as_str()).collect()
    }

    /// Check whether any violation is addressed at `path`.
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|i| i.path == path)
    }

    /// Check whether the record was rejected for an unknown plan tag.
    pub fn is_unknown_variant(&self) -> bool {
        self.issues
            .iter()
            .any(|i| matches!(i.kind, IssueKind::UnknownVariant { .. }))
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        if self.is_unknown_variant() {
            "UNKNOWN_QUOTA_TYPE"
        } else {
            "INVALID_QUOTA_CONFIG"
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid quota record ({} issue", self.issues.len())?;
        if self.issues.len() != 1 {
            f.write_str("s")?;
        }
        f.write_str(")")?;
        for (i, issue) in self.issues.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            write!(f, "{}", issue)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Errors from parsing and validating quota records.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// Input was not valid JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input was JSON but not a valid quota record
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type for quota operations.
pub type QuotaResult<T> = Result<T, QuotaError>;

/// A usage check failed against a plan limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuotaExceeded {
    /// A single blob is larger than the plan allows
    #[error("Blob of {size} bytes exceeds the limit of {limit} bytes")]
    BlobTooLarge {
        /// Blob limit in bytes
        limit: u64,
        /// Requested blob size in bytes
        size: u64,
    },

    /// Storing more would exceed total storage
    #[error("Storage quota exceeded: {used} of {limit} bytes used, {requested} more requested")]
    StorageExceeded {
        /// Storage quota in bytes
        limit: u64,
        /// Bytes already used
        used: u64,
        /// Additional bytes requested
        requested: u64,
    },

    /// Adding members would exceed the member limit
    #[error("Member limit reached: {current} of {limit} members, {requested} more requested")]
    MemberLimitReached {
        /// Member limit
        limit: u64,
        /// Current member count
        current: u64,
        /// Additional members requested
        requested: u64,
    },
}

impl QuotaExceeded {
    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            QuotaExceeded::BlobTooLarge { .. } | QuotaExceeded::StorageExceeded { .. } => 413,
            QuotaExceeded::MemberLimitReached { .. } => 403,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            QuotaExceeded::BlobTooLarge { .. } => "BLOB_QUOTA_EXCEEDED",
            QuotaExceeded::StorageExceeded { .. } => "STORAGE_QUOTA_EXCEEDED",
            QuotaExceeded::MemberLimitReached { .. } => "MEMBER_QUOTA_EXCEEDED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display_lists_every_issue() {
        let err = ValidationError::new(vec![
            FieldIssue::new("configs.blobLimit", IssueKind::NotPositive),
            FieldIssue::new("configs.memberLimit", IssueKind::NotInteger),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid quota record (2 issues): configs.blobLimit: must be a positive number; \
             configs.memberLimit: must be an integer"
        );
        assert_eq!(err.paths(), vec!["configs.blobLimit", "configs.memberLimit"]);
        assert_eq!(err.error_code(), "INVALID_QUOTA_CONFIG");
    }

    #[test]
    fn test_root_issue_display() {
        let issue = FieldIssue::new(
            "",
            IssueKind::InvalidType {
                expected: "object",
                found: "array",
            },
        );
        assert_eq!(issue.to_string(), "(root): expected object, found array");
    }

    #[test]
    fn test_unknown_variant() {
        let err = ValidationError::new(vec![FieldIssue::new(
            "feature",
            IssueKind::UnknownVariant {
                value: "gold".to_string(),
                expected: vec!["free_plan_v1", "pro_plan_v1"],
            },
        )]);
        assert!(err.is_unknown_variant());
        assert_eq!(err.error_code(), "UNKNOWN_QUOTA_TYPE");
        assert!(err
            .to_string()
            .contains("unknown variant 'gold', expected one of: free_plan_v1, pro_plan_v1"));
    }

    #[test]
    fn test_quota_exceeded_codes() {
        let blob = QuotaExceeded::BlobTooLarge { limit: 10, size: 11 };
        assert_eq!(blob.status_code(), 413);
        assert_eq!(blob.error_code(), "BLOB_QUOTA_EXCEEDED");

        let members = QuotaExceeded::MemberLimitReached {
            limit: 3,
            current: 3,
            requested: 1,
        };
        assert_eq!(members.status_code(), 403);
        assert_eq!(
            members.to_string(),
            "Member limit reached: 3 of 3 members, 1 more requested"
        );
    }
}
