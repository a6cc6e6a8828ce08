//! Quota assignments
//!
//! An assignment binds a plan tag to the user or workspace that holds it,
//! optionally for a limited time. User plans go to users and workspace plans
//! go to workspaces; the constructors refuse anything else.

use chrono::{DateTime, Utc};
use platform_quota::QuotaType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AssignmentError;

/// Holder of a quota.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum QuotaOwner {
    /// A single user
    User(Uuid),

    /// A workspace
    Workspace(Uuid),
}

impl QuotaOwner {
    /// Get the owner ID.
    pub fn id(&self) -> Uuid {
        match self {
            QuotaOwner::User(id) | QuotaOwner::Workspace(id) => *id,
        }
    }

    pub fn is_workspace(&self) -> bool {
        matches!(self, QuotaOwner::Workspace(_))
    }
}

/// A plan granted to an owner.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use platform_quota::QuotaType;
/// use platform_quota_catalog::{QuotaAssignment, QuotaOwner};
/// use uuid::Uuid;
///
/// let owner = QuotaOwner::User(Uuid::now_v7());
/// let assignment = QuotaAssignment::new(owner, QuotaType::ProPlanV1)
///     .unwrap()
///     .with_expiry(Utc::now() + Duration::days(30))
///     .unwrap();
///
/// assert!(assignment.is_active(Utc::now()));
/// assert!(QuotaAssignment::new(owner, QuotaType::TeamPlanV1).is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotaAssignment {
    /// Unique assignment ID
    pub id: Uuid,

    /// Who holds the quota
    pub owner: QuotaOwner,

    /// Plan granted
    pub feature: QuotaType,

    /// When the plan took effect
    pub activated_at: DateTime<Utc>,

    /// When the plan lapses (None = never)
    pub expires_at: Option<DateTime<Utc>>,
}

impl QuotaAssignment {
    /// Creates a new assignment, active from now.
    ///
    /// # Errors
    ///
    /// Fails when a workspace plan is given to a user or a user plan to a
    /// workspace.
    pub fn new(owner: QuotaOwner, feature: QuotaType) -> Result<Self, AssignmentError> {
        Self::activated_at(owner, feature, Utc::now())
    }

    /// Creates a new assignment active from `activated_at`.
    pub fn activated_at(
        owner: QuotaOwner,
        feature: QuotaType,
        activated_at: DateTime<Utc>,
    ) -> Result<Self, AssignmentError> {
        match (owner, feature.is_workspace_plan()) {
            (QuotaOwner::User(_), true) => {
                return Err(AssignmentError::WorkspacePlanForUser(feature))
            }
            (QuotaOwner::Workspace(_), false) => {
                return Err(AssignmentError::UserPlanForWorkspace(feature))
            }
            _ => {}
        }

        Ok(Self {
            id: Uuid::now_v7(),
            owner,
            feature,
            activated_at,
            expires_at: None,
        })
    }

    /// Set when the assignment lapses.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Result<Self, AssignmentError> {
        if expires_at <= self.activated_at {
            return Err(AssignmentError::ExpiresBeforeActivation);
        }
        self.expires_at = Some(expires_at);
        Ok(self)
    }

    /// Check whether the assignment is in effect at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.activated_at <= now && self.expires_at.map_or(true, |expiry| now < expiry)
    }
}
