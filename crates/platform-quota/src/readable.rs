//! Human-readable projection of quota records

use serde::{Deserialize, Serialize};

use crate::format::{format_period, format_size_with};
use crate::record::QuotaRecord;

/// Display-only copy of a quota record with every number rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanReadableQuota {
    pub name: String,
    pub blob_limit: String,
    pub storage_quota: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_quota: Option<String>,
    pub history_period: String,
    pub member_limit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_blob_limit: Option<String>,
    /// `"<N> times"`, or `"Unlimited"` for user plans without a limit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot_action_limit: Option<String>,
}

impl HumanReadableQuota {
    /// Render a record with sizes rounded to two decimals.
    pub fn from_record(record: &QuotaRecord) -> Self {
        Self::with_decimals(record, 2)
    }

    /// Render a record with sizes rounded to `decimals` digits.
    pub fn with_decimals(record: &QuotaRecord, decimals: i32) -> Self {
        let configs = record.configs();
        let size = |bytes: u64| format_size_with(bytes, decimals);

        Self {
            name: configs.name.clone(),
            blob_limit: size(configs.blob_limit),
            storage_quota: size(configs.storage_quota),
            seat_quota: configs.seat_quota.map(size),
            history_period: format_period(configs.history_period),
            member_limit: configs.member_limit.to_string(),
            business_blob_limit: configs.business_blob_limit.map(size),
            copilot_action_limit: record.user_configs().map(|user| {
                match user.copilot_action_limit {
                    Some(limit) => format!("{} times", limit),
                    None => "Unlimited".to_string(),
                }
            }),
        }
    }
}

impl From<&QuotaRecord> for HumanReadableQuota {
    fn from(record: &QuotaRecord) -> Self {
        Self::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BasicQuotaConfig, UserQuotaConfig};

    fn basic() -> BasicQuotaConfig {
        BasicQuotaConfig {
            name: "Pro".to_string(),
            blob_limit: 100 * 1024 * 1024,
            storage_quota: 100 * 1024 * 1024 * 1024,
            seat_quota: None,
            history_period: 30 * 86_400_000,
            member_limit: 10,
            business_blob_limit: Some(1536),
        }
    }

    #[test]
    fn test_user_record() {
        let record = QuotaRecord::ProPlanV1(UserQuotaConfig::new(basic(), Some(10)));
        let readable = HumanReadableQuota::from_record(&record);

        assert_eq!(readable.name, "Pro");
        assert_eq!(readable.blob_limit, "100 MB");
        assert_eq!(readable.storage_quota, "100 GB");
        assert_eq!(readable.seat_quota, None);
        assert_eq!(readable.history_period, "30 days");
        assert_eq!(readable.member_limit, "10");
        assert_eq!(readable.business_blob_limit.as_deref(), Some("1.5 KB"));
        assert_eq!(readable.copilot_action_limit.as_deref(), Some("10 times"));
    }

    #[test]
    fn test_unlimited_copilot() {
        let record = QuotaRecord::FreePlanV1(UserQuotaConfig::new(basic(), None));
        let readable = HumanReadableQuota::from(&record);
        assert_eq!(readable.copilot_action_limit.as_deref(), Some("Unlimited"));
    }

    #[test]
    fn test_workspace_record_has_no_copilot_field() {
        let mut configs = basic();
        configs.seat_quota = Some(20 * 1024 * 1024 * 1024);
        let record = QuotaRecord::TeamPlanV1(configs);
        let readable = HumanReadableQuota::from_record(&record);

        assert_eq!(readable.seat_quota.as_deref(), Some("20 GB"));
        assert_eq!(readable.copilot_action_limit, None);

        let value = serde_json::to_value(&readable).unwrap();
        assert!(value.get("copilotActionLimit").is_none());
    }

    #[test]
    fn test_decimals() {
        let mut configs = basic();
        configs.blob_limit = 1364;
        let record = QuotaRecord::TeamPlanV1(configs);
        assert_eq!(HumanReadableQuota::with_decimals(&record, 0).blob_limit, "1 KB");
        assert_eq!(HumanReadableQuota::with_decimals(&record, 1).blob_limit, "1.3 KB");
    }
}
