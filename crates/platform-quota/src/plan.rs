//! Plan tags for quota records
//!
//! Every quota record is keyed by a plan tag. The tag names a schema version,
//! not a set of values: `blobLimit` going from 10 MB to 100 MB keeps the tag,
//! while removing or renaming a field mints a new `V2` tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Plan tag identifying which quota shape applies.
///
/// # Plan Families
///
/// User plans (carry the user config shape, including the copilot limit):
/// - **FreePlanV1**: Default plan for every user
/// - **ProPlanV1**: Paid subscription
/// - **LifetimeProPlanV1**: One-time purchase of Pro
/// - **RestrictedPlanV1**: Smaller quota, only used by tests
///
/// Workspace plans (carry the basic config shape):
/// - **TeamPlanV1**: Team workspace billed per seat
///
/// # Examples
///
/// ```
/// use platform_quota::QuotaType;
///
/// let tag = QuotaType::parse("team_plan_v1").unwrap();
/// assert!(tag.is_workspace_plan());
/// assert_eq!(tag.as_str(), "team_plan_v1");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuotaType {
    /// Free user plan
    FreePlanV1,

    /// Pro user plan
    ProPlanV1,

    /// Team workspace plan
    TeamPlanV1,

    /// Lifetime Pro user plan
    LifetimeProPlanV1,

    /// Restricted user plan (tests only)
    RestrictedPlanV1,
}

impl QuotaType {
    /// Every plan tag, in declaration order.
    pub const ALL: [QuotaType; 5] = [
        QuotaType::FreePlanV1,
        QuotaType::ProPlanV1,
        QuotaType::TeamPlanV1,
        QuotaType::LifetimeProPlanV1,
        QuotaType::RestrictedPlanV1,
    ];

    /// Parse a plan tag from its wire name.
    ///
    /// Unlike display names, wire names are matched exactly: a tag is part of
    /// a persisted record and `"Free_Plan_V1"` is not the same record.
    ///
    /// # Returns
    ///
    /// `Some(QuotaType)` if valid, `None` otherwise
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free_plan_v1" => Some(QuotaType::FreePlanV1),
            "pro_plan_v1" => Some(QuotaType::ProPlanV1),
            "team_plan_v1" => Some(QuotaType::TeamPlanV1),
            "lifetime_pro_plan_v1" => Some(QuotaType::LifetimeProPlanV1),
            "restricted_plan_v1" => Some(QuotaType::RestrictedPlanV1),
            _ => None,
        }
    }

    /// Get the wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuotaType::FreePlanV1 => "free_plan_v1",
            QuotaType::ProPlanV1 => "pro_plan_v1",
            QuotaType::TeamPlanV1 => "team_plan_v1",
            QuotaType::LifetimeProPlanV1 => "lifetime_pro_plan_v1",
            QuotaType::RestrictedPlanV1 => "restricted_plan_v1",
        }
    }

    /// Get a human-readable display name for the plan.
    pub fn display_name(&self) -> &'static str {
        match self {
            QuotaType::FreePlanV1 => "Free",
            QuotaType::ProPlanV1 => "Pro",
            QuotaType::TeamPlanV1 => "Team Workspace",
            QuotaType::LifetimeProPlanV1 => "Lifetime Pro",
            QuotaType::RestrictedPlanV1 => "Restricted",
        }
    }

    /// Check if this plan is attached to a workspace rather than a user.
    ///
    /// Workspace plans validate against the basic config shape.
    pub fn is_workspace_plan(&self) -> bool {
        matches!(self, QuotaType::TeamPlanV1)
    }

    /// Wire names of every tag, used in unknown-variant reports.
    pub fn wire_names() -> Vec<&'static str> {
        Self::ALL.iter().map(QuotaType::as_str).collect()
    }
}

impl fmt::Display for QuotaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known plan tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown plan tag: {0}")]
pub struct UnknownQuotaType(pub String);

impl FromStr for QuotaType {
    type Err = UnknownQuotaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownQuotaType(s.to_string()))
    }
}
