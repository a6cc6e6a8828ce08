//! Catalog configuration.
//!
//! Configuration is loaded from environment variables with defaults that
//! use the built-in plan quotas and reject invalid override records.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest number of fractional digits accepted for size display.
pub const MAX_SIZE_DECIMALS: i32 = platform_quota::format::MAX_DECIMALS;

/// What to do with an override record that fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidRecordPolicy {
    /// Fail the whole load
    #[default]
    Reject,

    /// Keep the built-in record for that plan and log a warning
    #[serde(rename = "fallback")]
    FallBack,
}

impl InvalidRecordPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvalidRecordPolicy::Reject => "reject",
            InvalidRecordPolicy::FallBack => "fallback",
        }
    }
}

impl FromStr for InvalidRecordPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "reject" => Ok(InvalidRecordPolicy::Reject),
            "fallback" => Ok(InvalidRecordPolicy::FallBack),
            _ => Err(ConfigError::InvalidValue {
                key: "QUOTA_INVALID_RECORD_POLICY".to_string(),
                message: format!("expected 'reject' or 'fallback', got '{}'", s),
            }),
        }
    }
}

/// Configuration for loading the quota catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file with plan overrides (None = built-ins only).
    pub catalog_path: Option<PathBuf>,

    /// Handling of override records that fail validation.
    pub invalid_record_policy: InvalidRecordPolicy,

    /// Fractional digits used when rendering sizes.
    pub size_decimals: i32,
}

impl Default for CatalogConfig {
    /// Returns built-ins only, rejecting invalid records, two decimals.
    fn default() -> Self {
        Self {
            catalog_path: None,
            invalid_record_policy: InvalidRecordPolicy::Reject,
            size_decimals: 2,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QUOTA_CATALOG_PATH`: JSON file of plan overrides
    /// - `QUOTA_INVALID_RECORD_POLICY`: `reject` or `fallback` (default: reject)
    /// - `QUOTA_SIZE_DECIMALS`: Decimals for size display (default: 2)
    ///
    /// Unparseable values fall back to the default. Call [`validate`](Self::validate)
    /// to reject out-of-range values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        Self {
            catalog_path: lookup("QUOTA_CATALOG_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            invalid_record_policy: lookup("QUOTA_INVALID_RECORD_POLICY")
                .and_then(|s| s.parse().ok())
                .unwrap_or(default.invalid_record_policy),
            size_decimals: lookup("QUOTA_SIZE_DECIMALS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default.size_decimals),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size_decimals > MAX_SIZE_DECIMALS {
            return Err(ConfigError::InvalidValue {
                key: "QUOTA_SIZE_DECIMALS".to_string(),
                message: format!("must be at most {}", MAX_SIZE_DECIMALS),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.invalid_record_policy, InvalidRecordPolicy::Reject);
        assert_eq!(config.size_decimals, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("QUOTA_CATALOG_PATH", "/etc/quota/plans.json"),
            ("QUOTA_INVALID_RECORD_POLICY", "fallback"),
            ("QUOTA_SIZE_DECIMALS", "1"),
        ]));
        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/quota/plans.json")));
        assert_eq!(config.invalid_record_policy, InvalidRecordPolicy::FallBack);
        assert_eq!(config.size_decimals, 1);
    }

    #[test]
    fn test_unparseable_values_use_defaults() {
        let config = CatalogConfig::from_lookup(lookup(&[
            ("QUOTA_CATALOG_PATH", "  "),
            ("QUOTA_INVALID_RECORD_POLICY", "ignore"),
            ("QUOTA_SIZE_DECIMALS", "two"),
        ]));
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "Fall-Back".parse::<InvalidRecordPolicy>(),
            Ok(InvalidRecordPolicy::FallBack)
        );
        assert_eq!(
            "REJECT".parse::<InvalidRecordPolicy>(),
            Ok(InvalidRecordPolicy::Reject)
        );
        assert!("skip".parse::<InvalidRecordPolicy>().is_err());
        assert_eq!(InvalidRecordPolicy::FallBack.as_str(), "fallback");
    }

    #[test]
    fn test_validate_decimals() {
        let config = CatalogConfig {
            size_decimals: MAX_SIZE_DECIMALS + 1,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_err());

        let config = CatalogConfig {
            size_decimals: MAX_SIZE_DECIMALS,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_ok());

        // negative decimals are clamped at format time
        let config = CatalogConfig {
            size_decimals: -1,
            ..CatalogConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
