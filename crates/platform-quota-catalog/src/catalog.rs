//! Quota catalog
//!
//! The catalog holds one validated record per plan. It starts from the
//! built-in quotas and applies overrides from a JSON document, which is
//! either a list of raw records or an object with a `quotas` list.
//!
//! Every override is validated independently and all failures are reported.
//! A load either applies fully or not at all, except under
//! [`InvalidRecordPolicy::FallBack`] where invalid entries are skipped.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use platform_quota::{
    defaults, HumanReadableQuota, QuotaBusinessType, QuotaQueryType, QuotaRecord, QuotaType,
    QuotaUsage, ValidationError,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::assignment::{QuotaAssignment, QuotaOwner};
use crate::config::{CatalogConfig, InvalidRecordPolicy};
use crate::error::{CatalogError, CatalogResult};

/// An override entry that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    /// Position in the override document
    pub index: usize,

    /// Every violation in the entry
    pub error: ValidationError,
}

/// Outcome of applying an override document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Plans whose records were replaced
    pub applied: Vec<QuotaType>,

    /// Entries skipped under the fallback policy
    pub rejected: Vec<RejectedRecord>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Validated quota records, one per plan.
///
/// # Examples
///
/// ```
/// use platform_quota::{QuotaType, QuotaUsage};
/// use platform_quota_catalog::{InvalidRecordPolicy, QuotaCatalog};
/// use serde_json::json;
///
/// let mut catalog = QuotaCatalog::builtin();
/// let report = catalog
///     .load_overrides(
///         &json!([{
///             "feature": "pro_plan_v1",
///             "configs": {
///                 "name": "Pro",
///                 "blobLimit": 104857600,
///                 "storageQuota": 214748364800u64,
///                 "historyPeriod": 2592000000u64,
///                 "memberLimit": 10
///             }
///         }]),
///         InvalidRecordPolicy::Reject,
///     )
///     .unwrap();
///
/// assert_eq!(report.applied, vec![QuotaType::ProPlanV1]);
/// let quota = catalog.query(QuotaType::ProPlanV1, QuotaUsage::default()).unwrap();
/// assert_eq!(quota.human_readable.storage_quota, "200 GB");
/// ```
#[derive(Debug, Clone)]
pub struct QuotaCatalog {
    records: BTreeMap<QuotaType, QuotaRecord>,
    size_decimals: i32,
}

impl Default for QuotaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl QuotaCatalog {
    /// Catalog of built-in records for every plan.
    pub fn builtin() -> Self {
        Self {
            records: defaults::all()
                .into_iter()
                .map(|record| (record.feature(), record))
                .collect(),
            size_decimals: 2,
        }
    }

    /// Set the fractional digits used when rendering sizes.
    pub fn with_size_decimals(mut self, decimals: i32) -> Self {
        self.size_decimals = decimals;
        self
    }

    /// Build the catalog described by `config`.
    ///
    /// Starts from the built-ins and applies the override file if one is
    /// configured.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let mut catalog = Self::builtin().with_size_decimals(config.size_decimals);
        if let Some(path) = &config.catalog_path {
            catalog.load_file(path, config.invalid_record_policy)?;
        }
        Ok(catalog)
    }

    /// Read and apply an override file.
    pub fn load_file(
        &mut self,
        path: impl AsRef<Path>,
        policy: InvalidRecordPolicy,
    ) -> CatalogResult<LoadReport> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let document: Value = serde_json::from_str(&content)?;

        let report = self.load_overrides(&document, policy)?;
        info!(
            path = %path.display(),
            applied = report.applied.len(),
            rejected = report.rejected.len(),
            "Loaded quota catalog overrides"
        );
        Ok(report)
    }

    /// Validate and apply an override document.
    ///
    /// # Errors
    ///
    /// - `InvalidDocument` if the document is not a list of records
    /// - `InvalidRecord` for the first invalid entry under `Reject`
    /// - `DuplicateFeature` if two valid entries name the same plan
    ///
    /// Nothing is applied when an error is returned.
    pub fn load_overrides(
        &mut self,
        document: &Value,
        policy: InvalidRecordPolicy,
    ) -> CatalogResult<LoadReport> {
        let entries = override_entries(document)?;

        let mut valid: BTreeMap<QuotaType, QuotaRecord> = BTreeMap::new();
        let mut rejected = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            match QuotaRecord::validate(entry) {
                Ok(record) => {
                    let feature = record.feature();
                    if valid.insert(feature, record).is_some() {
                        return Err(CatalogError::DuplicateFeature(feature));
                    }
                }
                Err(error) => rejected.push(RejectedRecord { index, error }),
            }
        }

        if policy == InvalidRecordPolicy::Reject && !rejected.is_empty() {
            let first = rejected.swap_remove(0);
            return Err(CatalogError::InvalidRecord {
                index: first.index,
                error: first.error,
            });
        }

        for rejection in &rejected {
            warn!(
                index = rejection.index,
                error = %rejection.error,
                "Invalid quota record, keeping existing plan quota"
            );
        }

        let applied: Vec<QuotaType> = valid.keys().copied().collect();
        for (feature, record) in valid {
            debug!(feature = %feature, name = record.name(), "Applied quota override");
            self.records.insert(feature, record);
        }

        Ok(LoadReport { applied, rejected })
    }

    /// Get the record for a plan.
    pub fn get(&self, feature: QuotaType) -> Option<&QuotaRecord> {
        self.records.get(&feature)
    }

    /// Iterate over records in plan order.
    pub fn iter(&self) -> impl Iterator<Item = &QuotaRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Build the API projection of a plan for the given usage.
    pub fn query(&self, feature: QuotaType, usage: QuotaUsage) -> Option<QuotaQueryType> {
        let record = self.get(feature)?;
        let readable = HumanReadableQuota::with_decimals(record, self.size_decimals);
        Some(QuotaQueryType::with_readable(record, usage, readable))
    }

    /// Build the business-account projection of a plan for the given usage.
    pub fn query_business(
        &self,
        feature: QuotaType,
        usage: QuotaUsage,
        unlimited: bool,
    ) -> Option<QuotaBusinessType> {
        let record = self.get(feature)?;
        let readable = HumanReadableQuota::with_decimals(record, self.size_decimals);
        Some(QuotaBusinessType::with_readable(
            record, usage, readable, unlimited,
        ))
    }

    /// Resolve the record in effect for `owner` at `now`.
    ///
    /// The most recently activated active assignment wins. Users without one
    /// get the free plan; workspaces without one get `None`, and callers fall
    /// back to the workspace owner's quota.
    pub fn effective_quota(
        &self,
        assignments: &[QuotaAssignment],
        owner: QuotaOwner,
        now: DateTime<Utc>,
    ) -> Option<&QuotaRecord> {
        let active = assignments
            .iter()
            .filter(|a| a.owner == owner && a.is_active(now))
            .max_by_key(|a| a.activated_at);

        match active {
            Some(assignment) => {
                debug!(
                    owner = %owner.id(),
                    feature = %assignment.feature,
                    "Resolved quota assignment"
                );
                self.get(assignment.feature)
            }
            None if owner.is_workspace() => None,
            None => self.get(QuotaType::FreePlanV1),
        }
    }
}

fn override_entries(document: &Value) -> CatalogResult<&[Value]> {
    let list = match document {
        Value::Object(map) => map.get("quotas").ok_or_else(|| {
            CatalogError::InvalidDocument("expected a 'quotas' list".to_string())
        })?,
        other => other,
    };

    match list {
        Value::Array(entries) => Ok(entries.as_slice()),
        _ => Err(CatalogError::InvalidDocument(
            "expected a list of quota records".to_string(),
        )),
    }
}
