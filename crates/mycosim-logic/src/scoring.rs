//! Pure health scoring — environmental factors, remediation, outcome tiers.
//!
//! The score starts from a temperature-dependent base and is multiplied by a
//! fixed factor per condition, in this order: moisture, nutrients,
//! fragmentation, remediation. The product is clamped to [0, 1] and bucketed
//! into an [`OutcomeTier`].

use serde::{Deserialize, Serialize};

use crate::params::{Fragmentation, ParameterSnapshot, Remediation};

/// Constants for the scoring formula.
pub mod score_constants {
    /// Temperature band (°C, inclusive) that selects the lower base.
    pub const TEMP_BAND_MIN: f64 = 10.0;
    pub const TEMP_BAND_MAX: f64 = 20.0;
    /// Base value inside the temperature band.
    pub const TEMP_IN_BAND_BASE: f64 = 0.7;
    /// Base value outside the temperature band.
    pub const TEMP_OUT_OF_BAND_BASE: f64 = 0.85;

    /// Moisture band (%, inclusive).
    pub const MOISTURE_BAND_MIN: f64 = 20.0;
    pub const MOISTURE_BAND_MAX: f64 = 40.0;
    pub const MOISTURE_IN_BAND_FACTOR: f64 = 0.9;
    pub const MOISTURE_OUT_OF_BAND_FACTOR: f64 = 1.1;

    /// Minimum nutrient levels (mg/kg) for a sufficient soil.
    pub const NITROGEN_MIN: f64 = 10.0;
    pub const PHOSPHORUS_MIN: f64 = 5.0;
    pub const POTASSIUM_MIN: f64 = 5.0;
    /// Multiplier when any nutrient is below its minimum.
    pub const NUTRIENT_DEFICIT_FACTOR: f64 = 0.7;

    pub const HIGH_FRAGMENTATION_FACTOR: f64 = 0.85;

    pub const BIOCHAR_FACTOR: f64 = 1.1;
    pub const INOCULATION_FACTOR: f64 = 1.2;
    pub const COMPOST_FACTOR: f64 = 1.05;
    pub const HUMIC_SUBSTANCES_FACTOR: f64 = 1.1;

    /// Highest score still classed as Poor.
    pub const POOR_MAX: f64 = 0.60;
    /// Highest score still classed as Moderate.
    pub const MODERATE_MAX: f64 = 0.79;
}

/// Qualitative bucket for a health score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeTier {
    /// Score <= 0.60.
    Poor,
    /// Score in (0.60, 0.79].
    Moderate,
    /// Score > 0.79.
    Good,
}

impl OutcomeTier {
    pub fn from_score(score: f64) -> Self {
        use score_constants::*;

        if score <= POOR_MAX {
            Self::Poor
        } else if score <= MODERATE_MAX {
            Self::Moderate
        } else {
            Self::Good
        }
    }

    /// User-facing explanation of the tier.
    pub fn message(self) -> &'static str {
        match self {
            Self::Poor => "Poor soil health: Immediate intervention needed.",
            Self::Moderate => "Moderate soil health: Some issues present.",
            Self::Good => "Good soil health: Mycorrhizal networks are thriving!",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
        }
    }
}

/// Final result of one scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// Health score in [0.0, 1.0].
    pub score: f64,
    pub tier: OutcomeTier,
}

/// Every intermediate factor of a scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub temperature: f64,
    pub moisture: f64,
    pub nutrients: f64,
    pub fragmentation: f64,
    pub remediation: f64,
    /// Product of all factors before clamping.
    pub raw: f64,
    /// `raw` clamped to [0.0, 1.0].
    pub score: f64,
}

impl ScoreBreakdown {
    pub fn assessment(&self) -> HealthAssessment {
        HealthAssessment {
            score: self.score,
            tier: OutcomeTier::from_score(self.score),
        }
    }
}

/// Base value chosen by soil temperature.
pub fn temperature_base(temperature: f64) -> f64 {
    use score_constants::*;

    if (TEMP_BAND_MIN..=TEMP_BAND_MAX).contains(&temperature) {
        TEMP_IN_BAND_BASE
    } else {
        TEMP_OUT_OF_BAND_BASE
    }
}

pub fn moisture_factor(moisture: f64) -> f64 {
    use score_constants::*;

    if (MOISTURE_BAND_MIN..=MOISTURE_BAND_MAX).contains(&moisture) {
        MOISTURE_IN_BAND_FACTOR
    } else {
        MOISTURE_OUT_OF_BAND_FACTOR
    }
}

/// 1.0 when all three nutrients meet their minimums, otherwise the deficit
/// penalty.
pub fn nutrient_factor(nitrogen: f64, phosphorus: f64, potassium: f64) -> f64 {
    use score_constants::*;

    if nitrogen >= NITROGEN_MIN && phosphorus >= PHOSPHORUS_MIN && potassium >= POTASSIUM_MIN {
        1.0
    } else {
        NUTRIENT_DEFICIT_FACTOR
    }
}

pub fn fragmentation_factor(fragmentation: Fragmentation) -> f64 {
    match fragmentation {
        Fragmentation::High => score_constants::HIGH_FRAGMENTATION_FACTOR,
        Fragmentation::Low => 1.0,
    }
}

/// Multiplicative benefit of a treatment.
pub fn remediation_factor(remediation: Remediation) -> f64 {
    use score_constants::*;

    match remediation {
        Remediation::Biochar => BIOCHAR_FACTOR,
        Remediation::Inoculation => INOCULATION_FACTOR,
        Remediation::Compost => COMPOST_FACTOR,
        Remediation::HumicSubstances => HUMIC_SUBSTANCES_FACTOR,
        Remediation::None => 1.0,
    }
}

/// Compute every factor for a snapshot and treatment.
///
/// Factors are multiplied strictly in formula order so results are
/// reproducible bit for bit.
pub fn score_breakdown(snapshot: &ParameterSnapshot, remediation: Remediation) -> ScoreBreakdown {
    let temperature = temperature_base(snapshot.temperature);
    let moisture = moisture_factor(snapshot.moisture);
    let nutrients = nutrient_factor(snapshot.nitrogen, snapshot.phosphorus, snapshot.potassium);
    let fragmentation = fragmentation_factor(snapshot.fragmentation);
    let remediation = remediation_factor(remediation);

    let mut raw = temperature;
    raw *= moisture;
    raw *= nutrients;
    raw *= fragmentation;
    raw *= remediation;

    ScoreBreakdown {
        temperature,
        moisture,
        nutrients,
        fragmentation,
        remediation,
        raw,
        score: raw.clamp(0.0, 1.0),
    }
}

/// Score a snapshot under a treatment and classify the result.
pub fn compute_health(snapshot: &ParameterSnapshot, remediation: Remediation) -> HealthAssessment {
    let breakdown = score_breakdown(snapshot, remediation);
    let assessment = breakdown.assessment();
    log::debug!(
        "health {:.4} ({}) raw={:.4} remediation={}",
        assessment.score,
        assessment.tier.label(),
        breakdown.raw,
        remediation
    );
    assessment
}
