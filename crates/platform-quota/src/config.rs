//! Quota config shapes
//!
//! Two shapes exist: the basic shape shared by every plan, and the user shape
//! which adds the copilot action limit. All sizes are bytes and all periods
//! are milliseconds.

use serde::{Deserialize, Serialize};

/// Limits shared by every plan.
///
/// Optional fields distinguish "not set" (`None`) from any concrete value and
/// are omitted from the serialized form when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicQuotaConfig {
    /// Plan name shown to users
    pub name: String,

    /// Maximum size of a single blob, in bytes
    pub blob_limit: u64,

    /// Total storage, in bytes
    pub storage_quota: u64,

    /// Storage granted per seat, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_quota: Option<u64>,

    /// How long document history is kept, in milliseconds
    pub history_period: u64,

    /// Maximum number of members
    pub member_limit: u64,

    /// Blob size limit for business accounts, in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_blob_limit: Option<u64>,
}

/// Limits for user plans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuotaConfig {
    #[serde(flatten)]
    pub basic: BasicQuotaConfig,

    /// Copilot actions allowed (None = unlimited)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copilot_action_limit: Option<u64>,
}

impl UserQuotaConfig {
    /// Wrap a basic config with a copilot limit.
    pub fn new(basic: BasicQuotaConfig, copilot_action_limit: Option<u64>) -> Self {
        Self {
            basic,
            copilot_action_limit,
        }
    }
}

impl std::ops::Deref for UserQuotaConfig {
    type Target = BasicQuotaConfig;

    fn deref(&self) -> &Self::Target {
        &self.basic
    }
}

/// Wire names of the fields in the basic shape.
pub(crate) mod field {
    pub const NAME: &str = "name";
    pub const BLOB_LIMIT: &str = "blobLimit";
    pub const STORAGE_QUOTA: &str = "storageQuota";
    pub const SEAT_QUOTA: &str = "seatQuota";
    pub const HISTORY_PERIOD: &str = "historyPeriod";
    pub const MEMBER_LIMIT: &str = "memberLimit";
    pub const BUSINESS_BLOB_LIMIT: &str = "businessBlobLimit";
    pub const COPILOT_ACTION_LIMIT: &str = "copilotActionLimit";
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn basic() -> BasicQuotaConfig {
        BasicQuotaConfig {
            name: "Pro".to_string(),
            blob_limit: 100,
            storage_quota: 1000,
            seat_quota: None,
            history_period: 86_400_000,
            member_limit: 10,
            business_blob_limit: None,
        }
    }

    #[test]
    fn test_unset_optionals_are_omitted() {
        let value = serde_json::to_value(basic()).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Pro",
                "blobLimit": 100,
                "storageQuota": 1000,
                "historyPeriod": 86_400_000,
                "memberLimit": 10,
            })
        );
    }

    #[test]
    fn test_user_config_flattens_basic() {
        let config = UserQuotaConfig::new(basic(), Some(10));
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["copilotActionLimit"], json!(10));
        assert_eq!(value["blobLimit"], json!(100));
        assert_eq!(config.member_limit, 10);
    }
}
