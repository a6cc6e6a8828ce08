//! Externally-facing quota projections
//!
//! The query types merge a validated record with values observed at runtime
//! (current member count and storage used). This module does not measure
//! usage itself; callers supply a `QuotaUsage`.

use serde::{Deserialize, Serialize};

use crate::error::QuotaExceeded;
use crate::readable::HumanReadableQuota;
use crate::record::QuotaRecord;

/// Runtime usage supplied by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaUsage {
    /// Current number of members
    pub member_count: u64,

    /// Bytes currently stored
    pub used_size: u64,
}

impl QuotaUsage {
    pub fn new(member_count: u64, used_size: u64) -> Self {
        Self {
            member_count,
            used_size,
        }
    }
}

/// Quota as exposed to API consumers.
///
/// # Examples
///
/// ```
/// use platform_quota::{defaults, QuotaQueryType, QuotaType, QuotaUsage};
///
/// let record = defaults::builtin(QuotaType::FreePlanV1);
/// let quota = QuotaQueryType::new(&record, QuotaUsage::new(1, 1024));
///
/// assert_eq!(quota.human_readable.storage_quota, "10 GB");
/// assert!(quota.check_member_seats(2).is_ok());
/// assert!(quota.check_member_seats(3).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaQueryType {
    pub name: String,
    pub blob_limit: u64,
    pub history_period: u64,
    pub member_limit: u64,
    pub member_count: u64,
    pub storage_quota: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot_action_limit: Option<u64>,
    pub human_readable: HumanReadableQuota,
    pub used_size: u64,
}

impl QuotaQueryType {
    /// Build from a record and usage, rendering sizes with two decimals.
    pub fn new(record: &QuotaRecord, usage: QuotaUsage) -> Self {
        Self::with_readable(record, usage, HumanReadableQuota::from_record(record))
    }

    /// Build from a record and usage with an already rendered projection.
    pub fn with_readable(
        record: &QuotaRecord,
        usage: QuotaUsage,
        human_readable: HumanReadableQuota,
    ) -> Self {
        let configs = record.configs();
        Self {
            name: configs.name.clone(),
            blob_limit: configs.blob_limit,
            history_period: configs.history_period,
            member_limit: configs.member_limit,
            member_count: usage.member_count,
            storage_quota: configs.storage_quota,
            copilot_action_limit: record.copilot_action_limit(),
            human_readable,
            used_size: usage.used_size,
        }
    }

    /// Bytes left before the storage quota is reached.
    pub fn storage_remaining(&self) -> u64 {
        self.storage_quota.saturating_sub(self.used_size)
    }

    /// Member slots left before the member limit is reached.
    pub fn seats_remaining(&self) -> u64 {
        self.member_limit.saturating_sub(self.member_count)
    }

    /// Check that a single blob fits the blob limit.
    pub fn check_blob_size(&self, size: u64) -> Result<(), QuotaExceeded> {
        check_blob(self.blob_limit, size)
    }

    /// Check that `additional` bytes fit in the remaining storage.
    pub fn check_storage(&self, additional: u64) -> Result<(), QuotaExceeded> {
        if self.used_size.saturating_add(additional) > self.storage_quota {
            return Err(QuotaExceeded::StorageExceeded {
                limit: self.storage_quota,
                used: self.used_size,
                requested: additional,
            });
        }
        Ok(())
    }

    /// Check that `additional` members fit under the member limit.
    pub fn check_member_seats(&self, additional: u64) -> Result<(), QuotaExceeded> {
        if self.member_count.saturating_add(additional) > self.member_limit {
            return Err(QuotaExceeded::MemberLimitReached {
                limit: self.member_limit,
                current: self.member_count,
                requested: additional,
            });
        }
        Ok(())
    }
}

/// Quota for business accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaBusinessType {
    #[serde(flatten)]
    pub quota: QuotaQueryType,

    /// Blob limit applied to business uploads, in bytes
    pub business_blob_limit: u64,

    /// Storage and blob checks are skipped
    pub unlimited: bool,
}

impl QuotaBusinessType {
    /// Build from a record and usage, rendering sizes with two decimals.
    ///
    /// `business_blob_limit` falls back to the regular blob limit when the
    /// plan leaves it unset.
    pub fn new(record: &QuotaRecord, usage: QuotaUsage, unlimited: bool) -> Self {
        Self::with_readable(
            record,
            usage,
            HumanReadableQuota::from_record(record),
            unlimited,
        )
    }

    /// Build from a record and usage with an already rendered projection.
    pub fn with_readable(
        record: &QuotaRecord,
        usage: QuotaUsage,
        human_readable: HumanReadableQuota,
        unlimited: bool,
    ) -> Self {
        let quota = QuotaQueryType::with_readable(record, usage, human_readable);
        Self {
            business_blob_limit: record
                .configs()
                .business_blob_limit
                .unwrap_or(quota.blob_limit),
            quota,
            unlimited,
        }
    }

    /// Check that a single blob fits the business blob limit.
    pub fn check_blob_size(&self, size: u64) -> Result<(), QuotaExceeded> {
        if self.unlimited {
            return Ok(());
        }
        check_blob(self.business_blob_limit, size)
    }

    /// Check that `additional` bytes fit in the remaining storage.
    pub fn check_storage(&self, additional: u64) -> Result<(), QuotaExceeded> {
        if self.unlimited {
            return Ok(());
        }
        self.quota.check_storage(additional)
    }

    /// Check that `additional` members fit under the member limit.
    ///
    /// Seats are enforced even for unlimited accounts.
    pub fn check_member_seats(&self, additional: u64) -> Result<(), QuotaExceeded> {
        self.quota.check_member_seats(additional)
    }
}

fn check_blob(limit: u64, size: u64) -> Result<(), QuotaExceeded> {
    if size > limit {
        return Err(QuotaExceeded::BlobTooLarge { limit, size });
    }
    Ok(())
}
