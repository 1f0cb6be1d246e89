//! Simulation inputs — the parameter snapshot, fragmentation, remediation.
//!
//! A [`ParameterSnapshot`] is a plain, immutable value handed to the scoring
//! functions. Front ends own whatever mutable widget state they need and build
//! a fresh snapshot for every run.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{Result, SimError};

/// Soil disturbance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Fragmentation {
    #[default]
    Low,
    High,
}

impl Fragmentation {
    /// Parse a fragmentation level. Only "high" (any case) counts as High;
    /// every other value is treated as Low.
    pub fn from_name(name: &str) -> Self {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case("high") {
            Self::High
        } else {
            if !trimmed.eq_ignore_ascii_case("low") {
                log::debug!("unknown fragmentation level {:?}, using Low", name);
            }
            Self::Low
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::High => "High",
        }
    }
}

impl From<String> for Fragmentation {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for Fragmentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Soil treatment applied on top of the environmental conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum Remediation {
    Biochar,
    Inoculation,
    Compost,
    HumicSubstances,
    None,
}

/// Remediation pre-selected when a front end starts.
pub const DEFAULT_REMEDIATION: Remediation = Remediation::Biochar;

impl Remediation {
    /// Every real treatment, in menu order. `None` is not included.
    pub const ALL: [Remediation; 4] = [
        Remediation::Biochar,
        Remediation::Inoculation,
        Remediation::Compost,
        Remediation::HumicSubstances,
    ];

    /// Parse a treatment name. Case, surrounding whitespace, and the
    /// separator in "Humic Substances" are ignored. Anything unrecognised
    /// maps to `None`.
    pub fn from_name(name: &str) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| match c {
                '-' | '_' => ' ',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "biochar" => Self::Biochar,
            "inoculation" => Self::Inoculation,
            "compost" => Self::Compost,
            "humic substances" => Self::HumicSubstances,
            "none" | "" => Self::None,
            _ => {
                log::debug!("unknown remediation {:?}, applying no treatment", name);
                Self::None
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Biochar => "Biochar",
            Self::Inoculation => "Inoculation",
            Self::Compost => "Compost",
            Self::HumicSubstances => "Humic Substances",
            Self::None => "None",
        }
    }
}

impl From<String> for Remediation {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl Serialize for Remediation {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for Remediation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Environmental conditions for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParameterSnapshot {
    /// Soil temperature in °C.
    pub temperature: f64,
    /// Atmospheric CO₂ in ppm.
    pub co2: f64,
    /// Soil moisture in percent.
    pub moisture: f64,
    /// Nitrogen in mg/kg.
    pub nitrogen: f64,
    /// Phosphorus in mg/kg.
    pub phosphorus: f64,
    /// Potassium in mg/kg.
    pub potassium: f64,
    pub fragmentation: Fragmentation,
}

impl Default for ParameterSnapshot {
    fn default() -> Self {
        Self {
            temperature: 25.0,
            co2: 400.0,
            moisture: 40.0,
            nitrogen: 10.0,
            phosphorus: 5.0,
            potassium: 5.0,
            fragmentation: Fragmentation::Low,
        }
    }
}

impl ParameterSnapshot {
    /// Clamp every numeric field into `bounds`. This is the only range
    /// validation the simulator performs.
    pub fn clamped(&self, bounds: &InputBounds) -> Self {
        Self {
            temperature: bounds.temperature.clamp(self.temperature),
            co2: bounds.co2.clamp(self.co2),
            moisture: bounds.moisture.clamp(self.moisture),
            nitrogen: bounds.nitrogen.clamp(self.nitrogen),
            phosphorus: bounds.phosphorus.clamp(self.phosphorus),
            potassium: bounds.potassium.clamp(self.potassium),
            fragmentation: self.fragmentation,
        }
    }
}

/// Inclusive numeric range for a single input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the range. Never panics, even for inverted
    /// bounds or NaN input (NaN lands on `min`).
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Input ranges offered to the user, one per numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBounds {
    pub temperature: Bound,
    pub co2: Bound,
    pub moisture: Bound,
    pub nitrogen: Bound,
    pub phosphorus: Bound,
    pub potassium: Bound,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            temperature: Bound::new(0.0, 50.0),
            co2: Bound::new(200.0, 800.0),
            moisture: Bound::new(0.0, 100.0),
            nitrogen: Bound::new(0.0, 50.0),
            phosphorus: Bound::new(0.0, 50.0),
            potassium: Bound::new(0.0, 50.0),
        }
    }
}

/// Unparsed parameter values as typed into a form or passed on a command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInputs {
    pub temperature: Option<String>,
    pub co2: Option<String>,
    pub moisture: Option<String>,
    pub nitrogen: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
    pub fragmentation: Option<String>,
}

impl RawInputs {
    /// Parse a complete snapshot. Every numeric field must be present and
    /// finite; a missing fragmentation level means Low.
    pub fn parse(&self) -> Result<ParameterSnapshot> {
        Ok(ParameterSnapshot {
            temperature: require_number("temperature", self.temperature.as_deref())?,
            co2: require_number("co2", self.co2.as_deref())?,
            moisture: require_number("moisture", self.moisture.as_deref())?,
            nitrogen: require_number("nitrogen", self.nitrogen.as_deref())?,
            phosphorus: require_number("phosphorus", self.phosphorus.as_deref())?,
            potassium: require_number("potassium", self.potassium.as_deref())?,
            fragmentation: self
                .fragmentation
                .as_deref()
                .map(Fragmentation::from_name)
                .unwrap_or_default(),
        })
    }

    /// Overlay the fields that are present onto `base`. Present fields must
    /// still parse; absent ones keep the value from `base`.
    pub fn apply_to(&self, base: &ParameterSnapshot) -> Result<ParameterSnapshot> {
        let pick = |field: &'static str, raw: Option<&str>, current: f64| match raw {
            Some(text) => parse_number(field, text),
            None => Ok(current),
        };
        Ok(ParameterSnapshot {
            temperature: pick("temperature", self.temperature.as_deref(), base.temperature)?,
            co2: pick("co2", self.co2.as_deref(), base.co2)?,
            moisture: pick("moisture", self.moisture.as_deref(), base.moisture)?,
            nitrogen: pick("nitrogen", self.nitrogen.as_deref(), base.nitrogen)?,
            phosphorus: pick("phosphorus", self.phosphorus.as_deref(), base.phosphorus)?,
            potassium: pick("potassium", self.potassium.as_deref(), base.potassium)?,
            fragmentation: self
                .fragmentation
                .as_deref()
                .map(Fragmentation::from_name)
                .unwrap_or(base.fragmentation),
        })
    }
}

fn require_number(field: &'static str, raw: Option<&str>) -> Result<f64> {
    match raw {
        Some(text) => parse_number(field, text),
        None => Err(SimError::invalid_input(field, "missing value")),
    }
}

fn parse_number(field: &'static str, text: &str) -> Result<f64> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| SimError::invalid_input(field, format!("`{}` is not a number", text)))?;
    if !value.is_finite() {
        return Err(SimError::invalid_input(
            field,
            format!("`{}` is not a finite number", text),
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_raw() -> RawInputs {
        RawInputs {
            temperature: Some("25".into()),
            co2: Some("400".into()),
            moisture: Some("40".into()),
            nitrogen: Some("10".into()),
            phosphorus: Some("5".into()),
            potassium: Some("5".into()),
            fragmentation: Some("High".into()),
        }
    }

    #[test]
    fn test_default_snapshot_matches_initial_sliders() {
        let s = ParameterSnapshot::default();
        assert_eq!(s.temperature, 25.0);
        assert_eq!(s.co2, 400.0);
        assert_eq!(s.moisture, 40.0);
        assert_eq!(s.nitrogen, 10.0);
        assert_eq!(s.phosphorus, 5.0);
        assert_eq!(s.potassium, 5.0);
        assert_eq!(s.fragmentation, Fragmentation::Low);
    }

    #[test]
    fn test_fragmentation_parsing() {
        assert_eq!(Fragmentation::from_name("High"), Fragmentation::High);
        assert_eq!(Fragmentation::from_name(" high "), Fragmentation::High);
        assert_eq!(Fragmentation::from_name("Low"), Fragmentation::Low);
        assert_eq!(Fragmentation::from_name("medium"), Fragmentation::Low);
        assert_eq!(Fragmentation::from_name(""), Fragmentation::Low);
    }

    #[test]
    fn test_remediation_parsing() {
        assert_eq!(Remediation::from_name("Biochar"), Remediation::Biochar);
        assert_eq!(Remediation::from_name("INOCULATION"), Remediation::Inoculation);
        assert_eq!(Remediation::from_name("compost"), Remediation::Compost);
        assert_eq!(
            Remediation::from_name("Humic Substances"),
            Remediation::HumicSubstances
        );
        assert_eq!(
            Remediation::from_name("humic-substances"),
            Remediation::HumicSubstances
        );
        assert_eq!(
            Remediation::from_name("humic_substances"),
            Remediation::HumicSubstances
        );
        assert_eq!(Remediation::from_name("None"), Remediation::None);
        assert_eq!(Remediation::from_name(""), Remediation::None);
        assert_eq!(Remediation::from_name("mulch"), Remediation::None);
    }

    #[test]
    fn test_remediation_names_round_trip() {
        for r in Remediation::ALL {
            assert_eq!(Remediation::from_name(r.name()), r);
        }
        assert_eq!(Remediation::from_name(Remediation::None.name()), Remediation::None);
    }

    #[test]
    fn test_remediation_serde_uses_display_names() {
        let json = serde_json::to_string(&Remediation::HumicSubstances).unwrap();
        assert_eq!(json, "\"Humic Substances\"");
        let parsed: Remediation = serde_json::from_str("\"seaweed\"").unwrap();
        assert_eq!(parsed, Remediation::None);
    }

    #[test]
    fn test_snapshot_deserialize_fills_defaults() {
        let s: ParameterSnapshot =
            serde_json::from_str(r#"{"temperature": 15, "fragmentation": "high"}"#).unwrap();
        assert_eq!(s.temperature, 15.0);
        assert_eq!(s.fragmentation, Fragmentation::High);
        assert_eq!(s.co2, 400.0);
        assert_eq!(s.nitrogen, 10.0);
    }

    #[test]
    fn test_clamped_to_default_bounds() {
        let wild = ParameterSnapshot {
            temperature: -40.0,
            co2: 5000.0,
            moisture: 150.0,
            nitrogen: 75.0,
            phosphorus: -1.0,
            potassium: 20.0,
            fragmentation: Fragmentation::High,
        };
        let s = wild.clamped(&InputBounds::default());
        assert_eq!(s.temperature, 0.0);
        assert_eq!(s.co2, 800.0);
        assert_eq!(s.moisture, 100.0);
        assert_eq!(s.nitrogen, 50.0);
        assert_eq!(s.phosphorus, 0.0);
        assert_eq!(s.potassium, 20.0);
        assert_eq!(s.fragmentation, Fragmentation::High);
    }

    #[test]
    fn test_bound_clamp_never_panics() {
        let inverted = Bound::new(10.0, 0.0);
        assert_eq!(inverted.clamp(5.0), 0.0);
        let b = Bound::new(0.0, 50.0);
        assert_eq!(b.clamp(f64::NAN), 0.0);
        assert_eq!(b.clamp(f64::INFINITY), 50.0);
        assert!(b.contains(0.0));
        assert!(b.contains(50.0));
        assert!(!b.contains(50.1));
    }

    #[test]
    fn test_raw_inputs_parse_complete() {
        let s = full_raw().parse().unwrap();
        assert_eq!(s.temperature, 25.0);
        assert_eq!(s.fragmentation, Fragmentation::High);
    }

    #[test]
    fn test_raw_inputs_missing_field_rejected() {
        let raw = RawInputs {
            moisture: None,
            ..full_raw()
        };
        let err = raw.parse().unwrap_err();
        assert!(matches!(
            err,
            SimError::InvalidInput {
                field: "moisture",
                ..
            }
        ));
    }

    #[test]
    fn test_raw_inputs_non_numeric_rejected() {
        let raw = RawInputs {
            nitrogen: Some("lots".into()),
            ..full_raw()
        };
        let err = raw.parse().unwrap_err();
        assert_eq!(err.to_string(), "invalid input for nitrogen: `lots` is not a number");
    }

    #[test]
    fn test_raw_inputs_non_finite_rejected() {
        let raw = RawInputs {
            co2: Some("NaN".into()),
            ..full_raw()
        };
        assert!(raw.parse().is_err());
        let raw = RawInputs {
            co2: Some("inf".into()),
            ..full_raw()
        };
        assert!(raw.parse().is_err());
    }

    #[test]
    fn test_raw_inputs_missing_fragmentation_is_low() {
        let raw = RawInputs {
            fragmentation: None,
            ..full_raw()
        };
        assert_eq!(raw.parse().unwrap().fragmentation, Fragmentation::Low);
    }

    #[test]
    fn test_apply_to_overrides_present_fields_only() {
        let raw = RawInputs {
            temperature: Some(" 12.5 ".into()),
            fragmentation: Some("High".into()),
            ..Default::default()
        };
        let s = raw.apply_to(&ParameterSnapshot::default()).unwrap();
        assert_eq!(s.temperature, 12.5);
        assert_eq!(s.fragmentation, Fragmentation::High);
        assert_eq!(s.moisture, 40.0);
    }

    #[test]
    fn test_apply_to_rejects_bad_present_field() {
        let raw = RawInputs {
            potassium: Some("".into()),
            ..Default::default()
        };
        assert!(raw.apply_to(&ParameterSnapshot::default()).is_err());
    }
}
