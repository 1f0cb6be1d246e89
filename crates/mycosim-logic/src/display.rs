//! Chart-ready normalisation of inputs and score.
//!
//! Each raw input is divided by a fixed per-field scale so all bars share a
//! roughly [0, 1] axis. The health score is appended unscaled.

use serde::Serialize;

use crate::params::ParameterSnapshot;

pub const TEMPERATURE_SCALE: f64 = 50.0;
pub const CO2_SCALE: f64 = 800.0;
pub const MOISTURE_SCALE: f64 = 100.0;
pub const NUTRIENT_SCALE: f64 = 50.0;

/// One bar of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayPoint {
    pub label: &'static str,
    pub value: f64,
}

pub type DisplaySeries = Vec<DisplayPoint>;

/// Build the seven chart values: Temp, CO₂, Moisture, N, P, K, Health.
pub fn build_display_series(snapshot: &ParameterSnapshot, health_score: f64) -> DisplaySeries {
    vec![
        DisplayPoint {
            label: "Temp",
            value: snapshot.temperature / TEMPERATURE_SCALE,
        },
        DisplayPoint {
            label: "CO₂",
            value: snapshot.co2 / CO2_SCALE,
        },
        DisplayPoint {
            label: "Moisture",
            value: snapshot.moisture / MOISTURE_SCALE,
        },
        DisplayPoint {
            label: "N",
            value: snapshot.nitrogen / NUTRIENT_SCALE,
        },
        DisplayPoint {
            label: "P",
            value: snapshot.phosphorus / NUTRIENT_SCALE,
        },
        DisplayPoint {
            label: "K",
            value: snapshot.potassium / NUTRIENT_SCALE,
        },
        DisplayPoint {
            label: "Health",
            value: health_score,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_series() {
        let series = build_display_series(&ParameterSnapshot::default(), 0.8415);
        let labels: Vec<_> = series.iter().map(|p| p.label).collect();
        assert_eq!(labels, ["Temp", "CO₂", "Moisture", "N", "P", "K", "Health"]);

        let values: Vec<_> = series.iter().map(|p| p.value).collect();
        assert_eq!(values, [0.5, 0.5, 0.4, 0.2, 0.1, 0.1, 0.8415]);
    }

    #[test]
    fn test_health_is_not_rescaled() {
        let series = build_display_series(&ParameterSnapshot::default(), 0.25);
        assert_eq!(series.last().map(|p| p.value), Some(0.25));
    }

    #[test]
    fn test_out_of_range_inputs_pass_through() {
        let s = ParameterSnapshot {
            co2: 1600.0,
            ..Default::default()
        };
        let series = build_display_series(&s, 1.0);
        assert_eq!(series[1].value, 2.0);
    }
}
