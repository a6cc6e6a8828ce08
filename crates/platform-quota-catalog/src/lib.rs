//! # Platform Quota Catalog
//!
//! This crate is the load-time boundary for plan quotas. It reads plan
//! overrides from configuration, validates them with `platform-quota`, and
//! decides what happens to records that fail validation.
//!
//! ## Overview
//!
//! The platform-quota-catalog crate handles:
//! - **Configuration**: Environment-driven catalog settings
//! - **Catalog**: One validated record per plan, built-ins plus overrides
//! - **Policies**: Reject the whole load or fall back to built-ins on bad records
//! - **Assignments**: Plans granted to users and workspaces over time
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use platform_quota::QuotaUsage;
//! use platform_quota_catalog::{CatalogConfig, QuotaCatalog, QuotaOwner};
//! use uuid::Uuid;
//!
//! let config = CatalogConfig::from_env();
//! let catalog = QuotaCatalog::from_config(&config).unwrap();
//!
//! let owner = QuotaOwner::User(Uuid::now_v7());
//! let record = catalog.effective_quota(&[], owner, Utc::now()).unwrap();
//! let quota = catalog.query(record.feature(), QuotaUsage::new(1, 0)).unwrap();
//! println!("{} storage", quota.human_readable.storage_quota);
//! ```
//!
//! ## Override Documents
//!
//! Overrides are JSON, either a bare list or wrapped in `quotas`:
//!
//! ```json
//! { "quotas": [
//!     { "feature": "pro_plan_v1",
//!       "configs": { "name": "Pro", "blobLimit": 104857600,
//!                    "storageQuota": 107374182400, "historyPeriod": 2592000000,
//!                    "memberLimit": 10, "copilotActionLimit": 10 } }
//! ] }
//! ```

pub mod assignment;
pub mod catalog;
pub mod config;
pub mod error;

// Re-export main types
pub use assignment::{QuotaAssignment, QuotaOwner};
pub use catalog::{LoadReport, QuotaCatalog, RejectedRecord};
pub use config::{CatalogConfig, InvalidRecordPolicy};
pub use error::{AssignmentError, CatalogError, CatalogResult, ConfigError};
