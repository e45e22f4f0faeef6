//! Audit Configuration

use hfs_a11y::RuleId;
use hfs_devtools::DeviceProfile;
use serde::{Deserialize, Serialize};

use crate::AuditError;

/// What to audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditConfig {
    /// Rules to run, in any order
    pub rule_set: Vec<RuleId>,

    /// Devices to re-run the rules under
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viewport_sizes: Option<Vec<DeviceProfile>>,

    /// Frame sampling window (ms); no sampling when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_window_ms: Option<u64>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            rule_set: RuleId::ALL.to_vec(),
            viewport_sizes: None,
            sampling_window_ms: None,
        }
    }
}

impl AuditConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, AuditError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Every rule on every catalog device
    pub fn full() -> Self {
        Self {
            viewport_sizes: Some(DeviceProfile::catalog()),
            sampling_window_ms: Some(1000),
            ..Self::default()
        }
    }

    pub fn with_rules(mut self, rules: &[RuleId]) -> Self {
        self.rule_set = rules.to_vec();
        self
    }

    pub fn with_viewports(mut self, devices: Vec<DeviceProfile>) -> Self {
        self.viewport_sizes = Some(devices);
        self
    }

    pub fn with_sampling(mut self, window_ms: u64) -> Self {
        self.sampling_window_ms = Some(window_ms);
        self
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if self.rule_set.is_empty() {
            return Err(AuditError::InvalidConfig("ruleSet is empty".into()));
        }
        if self.sampling_window_ms == Some(0) {
            return Err(AuditError::InvalidConfig("samplingWindowMs must be positive".into()));
        }
        for device in self.viewport_sizes.iter().flatten() {
            if device.width == 0 || device.height == 0 {
                return Err(AuditError::InvalidConfig(format!(
                    "device {:?} has an empty viewport",
                    device.name
                )));
            }
        }
        Ok(())
    }

    /// Rules in report order, duplicates removed
    pub fn rules(&self) -> Vec<RuleId> {
        let mut rules = self.rule_set.clone();
        rules.sort();
        rules.dedup();
        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_runs_every_rule() {
        let config = AuditConfig::default();
        assert_eq!(config.rules(), RuleId::ALL.to_vec());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_camel_case() {
        let config = AuditConfig::from_json(
            r#"{
                "ruleSet": ["heading-order", "color-contrast", "heading-order"],
                "viewportSizes": [{"name": "iPhone SE", "width": 375, "height": 667, "pixelRatio": 2}],
                "samplingWindowMs": 500
            }"#,
        )
        .unwrap();

        assert_eq!(config.rules(), vec![RuleId::ColorContrast, RuleId::HeadingOrder]);
        assert_eq!(config.viewport_sizes.as_ref().map(Vec::len), Some(1));
        assert_eq!(config.sampling_window_ms, Some(500));
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let config = AuditConfig::from_json(r#"{"samplingWindowMs": 250}"#).unwrap();
        assert_eq!(config.rule_set.len(), RuleId::ALL.len());
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(
            AuditConfig::from_json(r#"{"ruleSet": []}"#),
            Err(AuditError::InvalidConfig(_))
        ));
        assert!(matches!(
            AuditConfig::from_json(r#"{"samplingWindowMs": 0}"#),
            Err(AuditError::InvalidConfig(_))
        ));
        assert!(matches!(
            AuditConfig::from_json(r#"{"ruleSet": ["focus-trap"]}"#),
            Err(AuditError::ConfigFormat(_))
        ));
    }
}
