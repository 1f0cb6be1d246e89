//! Quick randomized estimate, kept alongside the canonical scorer.
//!
//! Draws a starting health uniformly from [0.5, 1.0), applies two stress
//! multipliers and a flat bonus for any treatment. This does not agree with
//! [`compute_health`](crate::scoring::compute_health) and is never used by it;
//! it exists for the "quick look" front end only. Pass a seeded RNG for
//! reproducible output.

use rand::Rng;

use crate::params::{Fragmentation, ParameterSnapshot, Remediation};

pub const INITIAL_MIN: f64 = 0.5;
pub const INITIAL_MAX: f64 = 1.0;
/// Moisture (%) below which the soil counts as dry.
pub const DRY_MOISTURE: f64 = 30.0;
pub const DRY_FACTOR: f64 = 0.9;
pub const HIGH_FRAGMENTATION_FACTOR: f64 = 0.85;
/// Flat bonus for any treatment other than `None`.
pub const TREATMENT_BONUS: f64 = 1.1;

pub fn quick_estimate<R: Rng + ?Sized>(
    rng: &mut R,
    snapshot: &ParameterSnapshot,
    remediation: Remediation,
) -> f64 {
    let mut health = rng.gen_range(INITIAL_MIN..INITIAL_MAX);

    if snapshot.moisture < DRY_MOISTURE {
        health *= DRY_FACTOR;
    }
    if snapshot.fragmentation == Fragmentation::High {
        health *= HIGH_FRAGMENTATION_FACTOR;
    }
    if remediation != Remediation::None {
        health *= TREATMENT_BONUS;
    }

    health.clamp(0.0, 1.0)
}
