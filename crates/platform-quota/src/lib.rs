//! # Platform Quota
//!
//! This crate defines the quota contract for billing plans: the shape of a
//! quota record per plan, validation of untyped configuration against that
//! shape, and formatting of quota values for display.
//!
//! ## Overview
//!
//! The platform-quota crate handles:
//! - **Plans**: Closed set of versioned plan tags (`QuotaType`)
//! - **Configs**: Basic and user limit shapes
//! - **Records**: Tag-keyed union pairing a plan with its config shape
//! - **Validation**: Exhaustive, field-addressed checking of raw records
//! - **Formatting**: Byte sizes and retention periods as display strings
//! - **Projections**: Human-readable and API-facing views with usage checks
//!
//! ## Architecture
//!
//! ```text
//! raw JSON ─→ validate ─→ QuotaRecord ─┬─→ HumanReadableQuota
//!                │                     └─→ QuotaQueryType (+ QuotaUsage)
//!                └─→ ValidationError         └─→ QuotaBusinessType
//! ```
//!
//! `team_plan_v1` records carry the basic config shape; every other plan
//! carries the user shape, which adds `copilotActionLimit`.
//!
//! ## Usage
//!
//! ```rust
//! use platform_quota::{validate, HumanReadableQuota, QuotaType};
//! use serde_json::json;
//!
//! let record = validate(&json!({
//!     "feature": "pro_plan_v1",
//!     "configs": {
//!         "name": "Pro",
//!         "blobLimit": 104857600,
//!         "storageQuota": 107374182400u64,
//!         "historyPeriod": 2592000000u64,
//!         "memberLimit": 10
//!     }
//! }))
//! .unwrap();
//!
//! assert_eq!(record.feature(), QuotaType::ProPlanV1);
//!
//! let readable = HumanReadableQuota::from_record(&record);
//! assert_eq!(readable.blob_limit, "100 MB");
//! assert_eq!(readable.history_period, "30 days");
//! ```
//!
//! Validation never stops at the first problem:
//!
//! ```rust
//! use platform_quota::validate;
//! use serde_json::json;
//!
//! let err = validate(&json!({
//!     "feature": "free_plan_v1",
//!     "configs": { "name": "Free", "blobLimit": 0, "storageQuota": 1.5 }
//! }))
//! .unwrap_err();
//!
//! assert!(err.has_issue_at("configs.blobLimit"));
//! assert!(err.has_issue_at("configs.storageQuota"));
//! assert!(err.has_issue_at("configs.historyPeriod"));
//! ```

pub mod config;
pub mod defaults;
pub mod error;
pub mod format;
pub mod plan;
pub mod query;
pub mod readable;
pub mod record;
pub mod validate;

// Re-export main types for convenience
pub use config::{BasicQuotaConfig, UserQuotaConfig};
pub use error::{FieldIssue, IssueKind, QuotaError, QuotaExceeded, QuotaResult, ValidationError};
pub use format::{format_date, format_size, format_size_with};
pub use plan::{QuotaType, UnknownQuotaType};
pub use query::{QuotaBusinessType, QuotaQueryType, QuotaUsage};
pub use readable::HumanReadableQuota;
pub use record::QuotaRecord;
pub use validate::validate;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_concurrent_validation() {
        let mut handles = Vec::new();
        for (i, tag) in QuotaType::ALL.into_iter().cycle().take(20).enumerate() {
            handles.push(tokio::spawn(async move {
                let mut value = defaults::builtin(tag).to_value().unwrap();
                value["configs"]["memberLimit"] = json!(i + 1);
                validate(&value)
            }));
        }

        for (i, handle) in handles.into_iter().enumerate() {
            let record = handle.await.unwrap().unwrap();
            assert_eq!(record.configs().member_limit, i as u64 + 1);
        }
    }

    #[test]
    fn test_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<QuotaRecord>();
        assert_send_sync::<ValidationError>();
        assert_send_sync::<QuotaQueryType>();
    }
}
