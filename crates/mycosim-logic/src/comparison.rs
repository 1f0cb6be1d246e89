//! Baseline vs. treated comparison and remediation ranking.

use serde::Serialize;

use crate::params::{ParameterSnapshot, Remediation};
use crate::scoring::{compute_health, HealthAssessment};

/// Health with and without a treatment, for the same conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RemediationComparison {
    pub remediation: Remediation,
    /// Assessment with no treatment applied.
    pub baseline: HealthAssessment,
    pub treated: HealthAssessment,
    /// `treated.score - baseline.score`. Can be zero when both clamp at 1.0.
    pub delta: f64,
}

impl RemediationComparison {
    pub fn tier_changed(&self) -> bool {
        self.baseline.tier != self.treated.tier
    }
}

pub fn compare(snapshot: &ParameterSnapshot, remediation: Remediation) -> RemediationComparison {
    let baseline = compute_health(snapshot, Remediation::None);
    let treated = compute_health(snapshot, remediation);
    RemediationComparison {
        remediation,
        baseline,
        treated,
        delta: treated.score - baseline.score,
    }
}

/// Score every treatment and order best first. Ties keep menu order.
pub fn rank_strategies(snapshot: &ParameterSnapshot) -> Vec<(Remediation, HealthAssessment)> {
    let mut ranked: Vec<_> = Remediation::ALL
        .iter()
        .map(|&r| (r, compute_health(snapshot, r)))
        .collect();
    ranked.sort_by(|a, b| b.1.score.total_cmp(&a.1.score));
    ranked
}
