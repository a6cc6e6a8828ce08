//! Validated quota records
//!
//! A `QuotaRecord` pairs a plan tag with the config shape that tag requires.
//! Records only come into existence through validation (or the built-in
//! defaults), and are never mutated afterwards.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::{BasicQuotaConfig, UserQuotaConfig};
use crate::error::{QuotaResult, ValidationError};
use crate::plan::QuotaType;
use crate::validate::validate;

/// A quota record keyed by its plan tag.
///
/// Serializes as `{ "feature": "<tag>", "configs": { ... } }`.
/// Deserializing runs the full validator, so a deserialized record always
/// satisfies the numeric constraints.
///
/// # Examples
///
/// ```
/// use platform_quota::{QuotaRecord, QuotaType};
///
/// let record = QuotaRecord::from_json_str(r#"{
///     "feature": "free_plan_v1",
///     "configs": {
///         "name": "Free",
///         "blobLimit": 10485760,
///         "storageQuota": 10737418240,
///         "historyPeriod": 604800000,
///         "memberLimit": 3,
///         "copilotActionLimit": 10
///     }
/// }"#).unwrap();
///
/// assert_eq!(record.feature(), QuotaType::FreePlanV1);
/// assert_eq!(record.copilot_action_limit(), Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "feature", content = "configs", rename_all = "snake_case")]
pub enum QuotaRecord {
    FreePlanV1(UserQuotaConfig),
    ProPlanV1(UserQuotaConfig),
    TeamPlanV1(BasicQuotaConfig),
    LifetimeProPlanV1(UserQuotaConfig),
    RestrictedPlanV1(UserQuotaConfig),
}

impl QuotaRecord {
    /// Validate an untyped value as a quota record.
    pub fn validate(input: &Value) -> Result<Self, ValidationError> {
        validate(input)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(s: &str) -> QuotaResult<Self> {
        let value: Value = serde_json::from_str(s)?;
        Ok(validate(&value)?)
    }

    /// Convert back to the untyped wire form.
    pub fn to_value(&self) -> QuotaResult<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Get the plan tag.
    pub fn feature(&self) -> QuotaType {
        match self {
            QuotaRecord::FreePlanV1(_) => QuotaType::FreePlanV1,
            QuotaRecord::ProPlanV1(_) => QuotaType::ProPlanV1,
            QuotaRecord::TeamPlanV1(_) => QuotaType::TeamPlanV1,
            QuotaRecord::LifetimeProPlanV1(_) => QuotaType::LifetimeProPlanV1,
            QuotaRecord::RestrictedPlanV1(_) => QuotaType::RestrictedPlanV1,
        }
    }

    /// Get the limits shared by every plan.
    pub fn configs(&self) -> &BasicQuotaConfig {
        match self {
            QuotaRecord::TeamPlanV1(basic) => basic,
            QuotaRecord::FreePlanV1(user)
            | QuotaRecord::ProPlanV1(user)
            | QuotaRecord::LifetimeProPlanV1(user)
            | QuotaRecord::RestrictedPlanV1(user) => &user.basic,
        }
    }

    /// Get the user config, or `None` for workspace plans.
    pub fn user_configs(&self) -> Option<&UserQuotaConfig> {
        match self {
            QuotaRecord::TeamPlanV1(_) => None,
            QuotaRecord::FreePlanV1(user)
            | QuotaRecord::ProPlanV1(user)
            | QuotaRecord::LifetimeProPlanV1(user)
            | QuotaRecord::RestrictedPlanV1(user) => Some(user),
        }
    }

    /// Get the plan name.
    pub fn name(&self) -> &str {
        &self.configs().name
    }

    /// Get the copilot action limit (None = unset or not applicable).
    pub fn copilot_action_limit(&self) -> Option<u64> {
        self.user_configs().and_then(|u| u.copilot_action_limit)
    }
}

impl<'de> Deserialize<'de> for QuotaRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        validate(&value).map_err(serde::de::Error::custom)
    }
}
