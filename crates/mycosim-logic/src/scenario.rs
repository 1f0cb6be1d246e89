//! Named scenarios — a snapshot plus a treatment, loadable from JSON.
//!
//! Missing snapshot fields fall back to the initial slider values, and a
//! missing treatment falls back to [`DEFAULT_REMEDIATION`].

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::{ParameterSnapshot, Remediation, DEFAULT_REMEDIATION};
use crate::scoring::{compute_health, HealthAssessment, OutcomeTier};

const BUILTIN_JSON: &str = include_str!("../../../data/scenarios.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub snapshot: ParameterSnapshot,
    #[serde(default = "default_remediation")]
    pub remediation: Remediation,
    /// Tier the scenario is expected to land in, for validation runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_tier: Option<OutcomeTier>,
}

fn default_remediation() -> Remediation {
    DEFAULT_REMEDIATION
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn assess(&self) -> HealthAssessment {
        compute_health(&self.snapshot, self.remediation)
    }

    /// `None` when the scenario carries no expectation.
    pub fn meets_expectation(&self) -> Option<bool> {
        self.expected_tier
            .map(|expected| self.assess().tier == expected)
    }
}

/// Parse a JSON array of scenarios.
pub fn scenarios_from_json(text: &str) -> Result<Vec<Scenario>> {
    Ok(serde_json::from_str(text)?)
}

/// Scenarios bundled with the crate.
pub fn builtin_scenarios() -> Result<Vec<Scenario>> {
    scenarios_from_json(BUILTIN_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::params::Fragmentation;

    #[test]
    fn test_builtin_scenarios_parse() {
        let scenarios = builtin_scenarios().unwrap();
        assert!(scenarios.len() >= 3);
        assert!(scenarios.iter().all(|s| !s.name.is_empty()));
    }

    #[test]
    fn test_builtin_scenarios_meet_expectations() {
        for s in builtin_scenarios().unwrap() {
            assert_eq!(s.meets_expectation(), Some(true), "scenario {}", s.name);
        }
    }

    #[test]
    fn test_minimal_scenario_uses_defaults() {
        let s = Scenario::from_json(r#"{"name": "empty"}"#).unwrap();
        assert_eq!(s.snapshot, ParameterSnapshot::default());
        assert_eq!(s.remediation, Remediation::Biochar);
        assert_eq!(s.expected_tier, None);
        assert_eq!(s.meets_expectation(), None);
    }

    #[test]
    fn test_unknown_remediation_in_scenario_is_none() {
        let s = Scenario::from_json(
            r#"{"name": "x", "snapshot": {"fragmentation": "High"}, "remediation": "Fertilizer"}"#,
        )
        .unwrap();
        assert_eq!(s.remediation, Remediation::None);
        assert_eq!(s.snapshot.fragmentation, Fragmentation::High);
    }

    #[test]
    fn test_non_numeric_field_is_rejected() {
        let err = Scenario::from_json(r#"{"name": "x", "snapshot": {"moisture": "wet"}}"#)
            .unwrap_err();
        assert!(matches!(err, SimError::Scenario(_)));
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(Scenario::from_json(r#"{"remediation": "Compost"}"#).is_err());
    }
}
