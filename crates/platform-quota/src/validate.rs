//! Validation of raw quota records
//!
//! The validator walks untyped JSON and collects every violation instead of
//! stopping at the first one. The `feature` tag is checked first and selects
//! the config shape; a record with a bad tag is rejected before its `configs`
//! are looked at.

use serde_json::{Map, Value};

use crate::config::{field, BasicQuotaConfig, UserQuotaConfig};
use crate::error::{FieldIssue, IssueKind, ValidationError};
use crate::plan::QuotaType;
use crate::record::QuotaRecord;

const FEATURE: &str = "feature";
const CONFIGS: &str = "configs";

// 2^64, the first float past the u64 range.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Validate an untyped value as a quota record.
///
/// # Errors
///
/// Returns a `ValidationError` listing every field that violates its
/// constraint. Unknown keys are ignored.
///
/// # Examples
///
/// ```
/// use platform_quota::{validate, QuotaType};
/// use serde_json::json;
///
/// let record = validate(&json!({
///     "feature": "team_plan_v1",
///     "configs": {
///         "name": "Team Workspace",
///         "blobLimit": 524288000,
///         "storageQuota": 107374182400u64,
///         "seatQuota": 21474836480u64,
///         "historyPeriod": 2592000000u64,
///         "memberLimit": 1
///     }
/// }))
/// .unwrap();
/// assert_eq!(record.feature(), QuotaType::TeamPlanV1);
///
/// let err = validate(&json!({ "feature": "gold_plan_v1", "configs": {} })).unwrap_err();
/// assert!(err.is_unknown_variant());
/// ```
pub fn validate(input: &Value) -> Result<QuotaRecord, ValidationError> {
    let mut v = Validator::default();
    let record = v.record(input);
    match record {
        Some(record) if v.issues.is_empty() => Ok(record),
        _ => Err(ValidationError::new(v.issues)),
    }
}

#[derive(Default)]
struct Validator {
    issues: Vec<FieldIssue>,
}

impl Validator {
    fn report(&mut self, path: impl Into<String>, kind: IssueKind) {
        self.issues.push(FieldIssue::new(path, kind));
    }

    fn record(&mut self, input: &Value) -> Option<QuotaRecord> {
        let root = self.object("", input)?;

        let feature = self.feature(root)?;

        let configs = match root.get(CONFIGS) {
            Some(value) => self.object(CONFIGS, value)?,
            None => {
                self.report(CONFIGS, IssueKind::Missing);
                return None;
            }
        };

        let record = match feature {
            QuotaType::TeamPlanV1 => QuotaRecord::TeamPlanV1(self.basic(configs)?),
            QuotaType::FreePlanV1 => QuotaRecord::FreePlanV1(self.user(configs)?),
            QuotaType::ProPlanV1 => QuotaRecord::ProPlanV1(self.user(configs)?),
            QuotaType::LifetimeProPlanV1 => QuotaRecord::LifetimeProPlanV1(self.user(configs)?),
            QuotaType::RestrictedPlanV1 => QuotaRecord::RestrictedPlanV1(self.user(configs)?),
        };
        Some(record)
    }

    fn feature(&mut self, root: &Map<String, Value>) -> Option<QuotaType> {
        match root.get(FEATURE) {
            None => {
                self.report(FEATURE, IssueKind::Missing);
                None
            }
            Some(Value::String(tag)) => match QuotaType::parse(tag) {
                Some(feature) => Some(feature),
                None => {
                    self.report(
                        FEATURE,
                        IssueKind::UnknownVariant {
                            value: tag.clone(),
                            expected: QuotaType::wire_names(),
                        },
                    );
                    None
                }
            },
            Some(other) => {
                self.report(
                    FEATURE,
                    IssueKind::InvalidType {
                        expected: "string",
                        found: type_name(other),
                    },
                );
                None
            }
        }
    }

    fn basic(&mut self, configs: &Map<String, Value>) -> Option<BasicQuotaConfig> {
        let name = self.string(configs, field::NAME);
        let blob_limit = self.required_int(configs, field::BLOB_LIMIT);
        let storage_quota = self.required_int(configs, field::STORAGE_QUOTA);
        let seat_quota = self.optional_int(configs, field::SEAT_QUOTA);
        let history_period = self.required_int(configs, field::HISTORY_PERIOD);
        let member_limit = self.required_int(configs, field::MEMBER_LIMIT);
        let business_blob_limit = self.optional_int(configs, field::BUSINESS_BLOB_LIMIT);

        Some(BasicQuotaConfig {
            name: name?,
            blob_limit: blob_limit?,
            storage_quota: storage_quota?,
            seat_quota: seat_quota?,
            history_period: history_period?,
            member_limit: member_limit?,
            business_blob_limit: business_blob_limit?,
        })
    }

    fn user(&mut self, configs: &Map<String, Value>) -> Option<UserQuotaConfig> {
        let basic = self.basic(configs);
        let copilot_action_limit = self.optional_int(configs, field::COPILOT_ACTION_LIMIT);

        Some(UserQuotaConfig::new(basic?, copilot_action_limit?))
    }

    fn object<'a>(&mut self, path: &str, value: &'a Value) -> Option<&'a Map<String, Value>> {
        match value {
            Value::Object(map) => Some(map),
            other => {
                self.report(
                    path,
                    IssueKind::InvalidType {
                        expected: "object",
                        found: type_name(other),
                    },
                );
                None
            }
        }
    }

    fn string(&mut self, configs: &Map<String, Value>, key: &str) -> Option<String> {
        match configs.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                self.report(
                    config_path(key),
                    IssueKind::InvalidType {
                        expected: "string",
                        found: type_name(other),
                    },
                );
                None
            }
            None => {
                self.report(config_path(key), IssueKind::Missing);
                None
            }
        }
    }

    fn required_int(&mut self, configs: &Map<String, Value>, key: &str) -> Option<u64> {
        match configs.get(key) {
            Some(value) => self.positive_int(key, value),
            None => {
                self.report(config_path(key), IssueKind::Missing);
                None
            }
        }
    }

    /// Absent and `null` both mean unset. The outer `None` means invalid.
    fn optional_int(&mut self, configs: &Map<String, Value>, key: &str) -> Option<Option<u64>> {
        match configs.get(key) {
            None | Some(Value::Null) => Some(None),
            Some(value) => self.positive_int(key, value).map(Some),
        }
    }

    fn positive_int(&mut self, key: &str, value: &Value) -> Option<u64> {
        let path = config_path(key);
        let Value::Number(n) = value else {
            self.report(
                path,
                IssueKind::InvalidType {
                    expected: "number",
                    found: type_name(value),
                },
            );
            return None;
        };

        if let Some(u) = n.as_u64() {
            return self.bounded(path, u);
        }
        if n.is_i64() {
            self.report(path, IssueKind::NotPositive);
            return None;
        }

        let f = n.as_f64().unwrap_or(f64::NAN);
        let positive = f > 0.0;
        let integer = f.is_finite() && f.fract() == 0.0;
        if !positive {
            self.report(path.clone(), IssueKind::NotPositive);
        }
        if !integer {
            self.report(path.clone(), IssueKind::NotInteger);
        }
        if !(positive && integer) {
            return None;
        }
        if f >= U64_LIMIT {
            self.report(path, IssueKind::TooLarge);
            return None;
        }
        Some(f as u64)
    }

    fn bounded(&mut self, path: String, n: u64) -> Option<u64> {
        if n == 0 {
            self.report(path, IssueKind::NotPositive);
            None
        } else {
            Some(n)
        }
    }
}

fn config_path(key: &str) -> String {
    format!("{}.{}", CONFIGS, key)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user_configs() -> Value {
        json!({
            "name": "Pro",
            "blobLimit": 104_857_600,
            "storageQuota": 107_374_182_400_u64,
            "historyPeriod": 2_592_000_000_u64,
            "memberLimit": 10,
            "copilotActionLimit": 10
        })
    }

    fn record(feature: &str, configs: Value) -> Value {
        json!({ "feature": feature, "configs": configs })
    }

    fn kinds_at(err: &ValidationError, path: &str) -> Vec<IssueKind> {
        err.issues()
            .iter()
            .filter(|i| i.path == path)
            .map(|i| i.kind.clone())
            .collect()
    }

    #[test]
    fn test_valid_user_record() {
        let record = validate(&record("pro_plan_v1", user_configs())).unwrap();
        assert_eq!(record.feature(), QuotaType::ProPlanV1);
        let user = record.user_configs().unwrap();
        assert_eq!(user.copilot_action_limit, Some(10));
        assert_eq!(user.blob_limit, 104_857_600);
        assert_eq!(user.seat_quota, None);
    }

    #[test]
    fn test_every_user_tag_uses_user_shape() {
        for tag in ["free_plan_v1", "pro_plan_v1", "lifetime_pro_plan_v1", "restricted_plan_v1"] {
            let record = validate(&record(tag, user_configs())).unwrap();
            assert_eq!(record.feature().as_str(), tag);
            assert!(record.user_configs().is_some());
        }
    }

    #[test]
    fn test_team_plan_uses_basic_shape() {
        let record = validate(&record("team_plan_v1", user_configs())).unwrap();
        assert_eq!(record.feature(), QuotaType::TeamPlanV1);
        // copilot limit is not part of the basic shape and is stripped
        assert!(record.user_configs().is_none());
        assert_eq!(record.copilot_action_limit(), None);
    }

    #[test]
    fn test_team_plan_ignores_invalid_copilot_limit() {
        let mut configs = user_configs();
        configs["copilotActionLimit"] = json!(-5);
        assert!(validate(&record("team_plan_v1", configs.clone())).is_ok());

        let err = validate(&record("free_plan_v1", configs)).unwrap_err();
        assert_eq!(err.paths(), vec!["configs.copilotActionLimit"]);
    }

    #[test]
    fn test_unknown_feature_skips_configs() {
        let err = validate(&record("enterprise_plan_v1", json!("not an object"))).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert!(err.is_unknown_variant());
        assert!(err.has_issue_at("feature"));
        assert!(!err.has_issue_at("configs"));
    }

    #[test]
    fn test_missing_and_mistyped_feature() {
        let err = validate(&json!({ "configs": user_configs() })).unwrap_err();
        assert_eq!(kinds_at(&err, "feature"), vec![IssueKind::Missing]);
        assert_eq!(err.issues().len(), 1);

        let err = validate(&json!({ "feature": 1, "configs": user_configs() })).unwrap_err();
        assert_eq!(
            kinds_at(&err, "feature"),
            vec![IssueKind::InvalidType {
                expected: "string",
                found: "number"
            }]
        );
    }

    #[test]
    fn test_missing_configs() {
        let err = validate(&json!({ "feature": "free_plan_v1" })).unwrap_err();
        assert_eq!(kinds_at(&err, "configs"), vec![IssueKind::Missing]);
    }

    #[test]
    fn test_non_object_root() {
        let err = validate(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(
            kinds_at(&err, ""),
            vec![IssueKind::InvalidType {
                expected: "object",
                found: "array"
            }]
        );
    }

    #[test]
    fn test_reports_every_violation() {
        let configs = json!({
            "name": 42,
            "blobLimit": 0,
            "storageQuota": -1,
            "historyPeriod": 1.5,
            "seatQuota": "big",
            "copilotActionLimit": 0
        });
        let err = validate(&record("free_plan_v1", configs)).unwrap_err();

        assert_eq!(
            kinds_at(&err, "configs.name"),
            vec![IssueKind::InvalidType {
                expected: "string",
                found: "number"
            }]
        );
        assert_eq!(kinds_at(&err, "configs.blobLimit"), vec![IssueKind::NotPositive]);
        assert_eq!(kinds_at(&err, "configs.storageQuota"), vec![IssueKind::NotPositive]);
        assert_eq!(kinds_at(&err, "configs.historyPeriod"), vec![IssueKind::NotInteger]);
        assert_eq!(kinds_at(&err, "configs.memberLimit"), vec![IssueKind::Missing]);
        assert_eq!(
            kinds_at(&err, "configs.seatQuota"),
            vec![IssueKind::InvalidType {
                expected: "number",
                found: "string"
            }]
        );
        assert_eq!(
            kinds_at(&err, "configs.copilotActionLimit"),
            vec![IssueKind::NotPositive]
        );
        assert_eq!(err.issues().len(), 7);
    }

    #[test]
    fn test_negative_fraction_reports_both_issues() {
        let mut configs = user_configs();
        configs["memberLimit"] = json!(-1.5);
        let err = validate(&record("pro_plan_v1", configs)).unwrap_err();
        assert_eq!(
            kinds_at(&err, "configs.memberLimit"),
            vec![IssueKind::NotPositive, IssueKind::NotInteger]
        );
    }

    #[test]
    fn test_integral_float_is_accepted() {
        let mut configs = user_configs();
        configs["memberLimit"] = json!(10.0);
        let record = validate(&record("pro_plan_v1", configs)).unwrap();
        assert_eq!(record.configs().member_limit, 10);
    }

    #[test]
    fn test_null_optionals_are_unset() {
        let mut configs = user_configs();
        configs["seatQuota"] = Value::Null;
        configs["businessBlobLimit"] = Value::Null;
        configs["copilotActionLimit"] = Value::Null;
        let record = validate(&record("pro_plan_v1", configs)).unwrap();
        assert_eq!(record.configs().seat_quota, None);
        assert_eq!(record.configs().business_blob_limit, None);
        assert_eq!(record.copilot_action_limit(), None);
    }

    #[test]
    fn test_null_required_field_is_a_type_error() {
        let mut configs = user_configs();
        configs["blobLimit"] = Value::Null;
        let err = validate(&record("pro_plan_v1", configs)).unwrap_err();
        assert_eq!(
            kinds_at(&err, "configs.blobLimit"),
            vec![IssueKind::InvalidType {
                expected: "number",
                found: "null"
            }]
        );
    }

    #[test]
    fn test_large_integers_are_accepted() {
        let mut configs = user_configs();
        configs["storageQuota"] = json!(9_007_199_254_740_992_u64);
        configs["blobLimit"] = json!(u64::MAX);
        configs["historyPeriod"] = json!(1e18);
        let rec = validate(&record("pro_plan_v1", configs)).unwrap();
        assert_eq!(rec.configs().storage_quota, 9_007_199_254_740_992);
        assert_eq!(rec.configs().blob_limit, u64::MAX);
        assert_eq!(rec.configs().history_period, 1_000_000_000_000_000_000);
    }

    #[test]
    fn test_too_large() {
        let mut configs = user_configs();
        configs["storageQuota"] = json!(1e300);
        configs["blobLimit"] = json!(18_446_744_073_709_551_616.0);
        let err = validate(&record("pro_plan_v1", configs)).unwrap_err();
        assert_eq!(kinds_at(&err, "configs.storageQuota"), vec![IssueKind::TooLarge]);
        assert_eq!(kinds_at(&err, "configs.blobLimit"), vec![IssueKind::TooLarge]);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let mut input = record("pro_plan_v1", user_configs());
        input["type"] = json!(1);
        input["configs"]["legacyField"] = json!("x");
        assert!(validate(&input).is_ok());
    }
}
