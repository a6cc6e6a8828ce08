//! Built-in plan quotas
//!
//! The values each plan ships with before any deployment override.

use crate::config::{BasicQuotaConfig, UserQuotaConfig};
use crate::format::{ONE_DAY_MS, ONE_KB};
use crate::plan::QuotaType;
use crate::record::QuotaRecord;

const ONE_MB: u64 = ONE_KB * 1024;
const ONE_GB: u64 = ONE_MB * 1024;
const ONE_TB: u64 = ONE_GB * 1024;
const ONE_DAY: u64 = ONE_DAY_MS as u64;

/// Get the built-in record for a plan.
///
/// # Examples
///
/// ```
/// use platform_quota::{defaults, QuotaType};
///
/// let team = defaults::builtin(QuotaType::TeamPlanV1);
/// assert_eq!(team.configs().member_limit, 1);
/// assert!(team.configs().seat_quota.is_some());
/// ```
pub fn builtin(feature: QuotaType) -> QuotaRecord {
    match feature {
        QuotaType::FreePlanV1 => QuotaRecord::FreePlanV1(user(
            feature,
            10 * ONE_MB,
            10 * ONE_GB,
            7 * ONE_DAY,
            3,
            Some(10),
        )),
        QuotaType::ProPlanV1 => QuotaRecord::ProPlanV1(user(
            feature,
            100 * ONE_MB,
            100 * ONE_GB,
            30 * ONE_DAY,
            10,
            Some(10),
        )),
        QuotaType::TeamPlanV1 => QuotaRecord::TeamPlanV1(BasicQuotaConfig {
            name: feature.display_name().to_string(),
            blob_limit: 500 * ONE_MB,
            storage_quota: 100 * ONE_GB,
            seat_quota: Some(20 * ONE_GB),
            history_period: 30 * ONE_DAY,
            member_limit: 1,
            business_blob_limit: None,
        }),
        QuotaType::LifetimeProPlanV1 => QuotaRecord::LifetimeProPlanV1(user(
            feature,
            100 * ONE_MB,
            ONE_TB,
            30 * ONE_DAY,
            10,
            Some(10),
        )),
        QuotaType::RestrictedPlanV1 => QuotaRecord::RestrictedPlanV1(user(
            feature,
            10 * ONE_MB,
            10 * ONE_MB,
            30 * ONE_DAY,
            10,
            Some(10),
        )),
    }
}

/// Built-in records for every plan, in tag order.
pub fn all() -> Vec<QuotaRecord> {
    QuotaType::ALL.into_iter().map(builtin).collect()
}

fn user(
    feature: QuotaType,
    blob_limit: u64,
    storage_quota: u64,
    history_period: u64,
    member_limit: u64,
    copilot_action_limit: Option<u64>,
) -> UserQuotaConfig {
    UserQuotaConfig::new(
        BasicQuotaConfig {
            name: feature.display_name().to_string(),
            blob_limit,
            storage_quota,
            seat_quota: None,
            history_period,
            member_limit,
            business_blob_limit: None,
        },
        copilot_action_limit,
    )
}
