//! Pure simulation logic for the mycorrhizal health simulator.
//!
//! This crate contains all scoring logic independent of any window toolkit,
//! web framework, or plotting library. Functions take plain data and return
//! results, so they are unit-testable and can back a desktop window, a
//! browser dashboard, or the headless harness alike.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`comparison`] | Baseline vs. treated health and remediation ranking |
//! | [`display`] | Normalised chart values for inputs and score |
//! | [`error`] | `SimError` for rejected input and bad scenario files |
//! | [`estimate`] | Randomized quick estimate (non-canonical formula) |
//! | [`params`] | Parameter snapshot, fragmentation, remediation, input bounds |
//! | [`scenario`] | Named JSON scenarios and the bundled set |
//! | [`scoring`] | Multiplicative health formula and outcome tiers |

pub mod comparison;
pub mod display;
pub mod error;
pub mod estimate;
pub mod params;
pub mod scenario;
pub mod scoring;

pub use error::{Result, SimError};
pub use params::{Fragmentation, ParameterSnapshot, Remediation};
pub use scoring::{compute_health, HealthAssessment, OutcomeTier};
