//! Headless validation harness.
//!
//! Sweeps the scoring logic over the slider ranges and a few deliberately
//! out-of-range inputs, checking the invariants the front ends rely on.

use mycosim_logic::comparison::{compare, rank_strategies};
use mycosim_logic::display::build_display_series;
use mycosim_logic::estimate::{self, quick_estimate};
use mycosim_logic::params::{Bound, InputBounds, RawInputs};
use mycosim_logic::scenario::builtin_scenarios;
use mycosim_logic::scoring::{self, score_breakdown};
use mycosim_logic::{compute_health, Fragmentation, OutcomeTier, ParameterSnapshot, Remediation};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chart;

pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub detail: String,
}

const ALL_CHOICES: [Remediation; 5] = [
    Remediation::Biochar,
    Remediation::Inoculation,
    Remediation::Compost,
    Remediation::HumicSubstances,
    Remediation::None,
];

/// Run every section and print the summary. Returns the number of failures.
pub fn run(verbose: bool) -> usize {
    println!("=== Mycorrhizal Health Harness ===\n");

    let mut results = Vec::new();

    // 1. Worked examples
    results.extend(validate_reference_examples(verbose));

    // 2. Band edges
    results.extend(validate_band_edges());

    // 3. Clamp and determinism sweep
    results.extend(validate_sweep(verbose));

    // 4. Chart values
    results.extend(validate_display_series(verbose));

    // 5. Input parsing
    results.extend(validate_input_parsing());

    // 6. Bundled scenarios
    results.extend(validate_scenarios(verbose));

    // 7. Quick estimate
    results.extend(validate_quick_estimate(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    failed
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── 1. Worked examples ──────────────────────────────────────────────────

fn validate_reference_examples(verbose: bool) -> Vec<TestResult> {
    println!("--- Worked Examples ---");
    let mut results = Vec::new();

    let base = ParameterSnapshot::default();

    let good = compute_health(&base, Remediation::Biochar);
    results.push(TestResult {
        name: "example_biochar_good".into(),
        passed: close(good.score, 0.8415) && good.tier == OutcomeTier::Good,
        detail: format!("score={:.4} tier={}", good.score, good.tier.label()),
    });

    let fragmented = ParameterSnapshot {
        fragmentation: Fragmentation::High,
        ..base
    };
    let moderate = compute_health(&fragmented, Remediation::None);
    results.push(TestResult {
        name: "example_fragmented_moderate".into(),
        passed: close(moderate.score, 0.65025) && moderate.tier == OutcomeTier::Moderate,
        detail: format!("score={:.5} tier={}", moderate.score, moderate.tier.label()),
    });

    let starved = ParameterSnapshot {
        nitrogen: 5.0,
        ..base
    };
    let poor = compute_health(&starved, Remediation::None);
    results.push(TestResult {
        name: "example_nitrogen_deficit_poor".into(),
        passed: poor.score < 0.6 && poor.tier == OutcomeTier::Poor,
        detail: format!("score={:.4} tier={}", poor.score, poor.tier.label()),
    });

    if verbose {
        println!("  Factor breakdown (temp × moisture × nutrients × fragmentation × remediation):");
        let cases = [
            (&base, Remediation::Biochar),
            (&fragmented, Remediation::None),
            (&starved, Remediation::None),
        ];
        for (snapshot, r) in cases {
            let b = score_breakdown(snapshot, r);
            println!(
                "    {:<12} {:.2} × {:.2} × {:.2} × {:.2} × {:.2} = {:.5}",
                r.name(),
                b.temperature,
                b.moisture,
                b.nutrients,
                b.fragmentation,
                b.remediation,
                b.raw
            );
        }
    }

    let unknown = compute_health(&base, Remediation::from_name("Mycelium Tea"));
    let none = compute_health(&base, Remediation::None);
    results.push(TestResult {
        name: "example_unknown_remediation".into(),
        passed: unknown == none,
        detail: "unrecognised treatment scores like None".into(),
    });

    results
}

// ── 2. Band edges ───────────────────────────────────────────────────────

fn validate_band_edges() -> Vec<TestResult> {
    println!("--- Band Edges ---");
    let mut results = Vec::new();

    let edges = [(10.0, 0.7), (20.0, 0.7), (9.999, 0.85), (20.001, 0.85)];
    let bad: Vec<_> = edges
        .iter()
        .filter(|(t, want)| scoring::temperature_base(*t) != *want)
        .collect();
    results.push(TestResult {
        name: "edges_temperature".into(),
        passed: bad.is_empty(),
        detail: if bad.is_empty() {
            "10 and 20 inclusive, 9.999 and 20.001 outside".into()
        } else {
            format!("wrong base at {:?}", bad)
        },
    });

    let moisture_ok = scoring::moisture_factor(20.0) == 0.9
        && scoring::moisture_factor(40.0) == 0.9
        && scoring::moisture_factor(19.999) == 1.1
        && scoring::moisture_factor(40.001) == 1.1;
    results.push(TestResult {
        name: "edges_moisture".into(),
        passed: moisture_ok,
        detail: "20 and 40 inclusive".into(),
    });

    let tiers_ok = OutcomeTier::from_score(0.60) == OutcomeTier::Poor
        && OutcomeTier::from_score(0.79) == OutcomeTier::Moderate
        && OutcomeTier::from_score(0.7900001) == OutcomeTier::Good;
    results.push(TestResult {
        name: "edges_tiers".into(),
        passed: tiers_ok,
        detail: "0.60 Poor, 0.79 Moderate, above Good".into(),
    });

    results
}

// ── 3. Sweep ────────────────────────────────────────────────────────────

/// Evenly spaced values across a bound, extended past both ends.
fn sweep_values(bound: Bound, steps: usize) -> Vec<f64> {
    let span = bound.max - bound.min;
    let mut values: Vec<f64> = (0..=steps)
        .map(|i| bound.min + span * i as f64 / steps as f64)
        .collect();
    values.push(bound.min - span);
    values.push(bound.max + span);
    values
}

fn validate_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Clamp & Determinism Sweep ---");
    let mut results = Vec::new();

    let bounds = InputBounds::default();
    let temps = sweep_values(bounds.temperature, 10);
    let moistures = sweep_values(bounds.moisture, 10);
    let nutrients = sweep_values(bounds.nitrogen, 5);

    let mut evaluated = 0usize;
    let mut out_of_range = 0usize;
    let mut nondeterministic = 0usize;
    let mut tier_counts = [0usize; 3];

    for &temperature in &temps {
        for &moisture in &moistures {
            for &nitrogen in &nutrients {
                for fragmentation in [Fragmentation::Low, Fragmentation::High] {
                    let snapshot = ParameterSnapshot {
                        temperature,
                        moisture,
                        nitrogen,
                        fragmentation,
                        ..Default::default()
                    };
                    for r in ALL_CHOICES {
                        let a = compute_health(&snapshot, r);
                        let b = compute_health(&snapshot, r);
                        evaluated += 1;
                        if !(0.0..=1.0).contains(&a.score) {
                            out_of_range += 1;
                        }
                        if a.score.to_bits() != b.score.to_bits() || a.tier != b.tier {
                            nondeterministic += 1;
                        }
                        tier_counts[a.tier as usize] += 1;
                    }
                }
            }
        }
    }

    results.push(TestResult {
        name: "sweep_score_in_unit_interval".into(),
        passed: out_of_range == 0,
        detail: format!("{} of {} scores outside [0, 1]", out_of_range, evaluated),
    });
    results.push(TestResult {
        name: "sweep_deterministic".into(),
        passed: nondeterministic == 0,
        detail: format!("{} of {} repeat calls differed", nondeterministic, evaluated),
    });
    results.push(TestResult {
        name: "sweep_all_tiers_reachable".into(),
        passed: tier_counts.iter().all(|&c| c > 0),
        detail: format!(
            "poor={} moderate={} good={}",
            tier_counts[0], tier_counts[1], tier_counts[2]
        ),
    });

    // Treatments never lower the score.
    let snapshot = ParameterSnapshot {
        moisture: 70.0,
        fragmentation: Fragmentation::High,
        ..Default::default()
    };
    let regressions: Vec<_> = Remediation::ALL
        .iter()
        .map(|&r| compare(&snapshot, r))
        .filter(|c| c.delta < 0.0)
        .map(|c| c.remediation.name())
        .collect();
    results.push(TestResult {
        name: "sweep_treatments_non_negative".into(),
        passed: regressions.is_empty(),
        detail: if regressions.is_empty() {
            "every treatment >= baseline".into()
        } else {
            format!("lowered score: {}", regressions.join(", "))
        },
    });

    if verbose {
        println!("  Treatment ranking at moisture=70, fragmentation=High:");
        for (r, a) in rank_strategies(&snapshot) {
            println!("    {:<16} {:.4} {}", r.name(), a.score, a.tier.label());
        }
    }

    results
}

// ── 4. Display series ───────────────────────────────────────────────────

fn validate_display_series(verbose: bool) -> Vec<TestResult> {
    println!("--- Display Series ---");
    let mut results = Vec::new();

    let snapshot = ParameterSnapshot::default();
    let breakdown = score_breakdown(&snapshot, Remediation::Biochar);
    let series = build_display_series(&snapshot, breakdown.score);

    results.push(TestResult {
        name: "display_seven_points".into(),
        passed: series.len() == 7 && series[6].label == "Health",
        detail: format!("{} points", series.len()),
    });

    let within_slider_range = series.iter().all(|p| (0.0..=1.0).contains(&p.value));
    results.push(TestResult {
        name: "display_slider_defaults_normalised".into(),
        passed: within_slider_range,
        detail: series
            .iter()
            .map(|p| format!("{}={:.2}", p.label, p.value))
            .collect::<Vec<_>>()
            .join(" "),
    });

    if verbose {
        print!(
            "{}",
            chart::render_bar_chart("  Default snapshot with Biochar:", &series, 30)
        );
    }

    results
}

// ── 5. Input parsing ────────────────────────────────────────────────────

fn validate_input_parsing() -> Vec<TestResult> {
    println!("--- Input Parsing ---");
    let mut results = Vec::new();

    let complete = RawInputs {
        temperature: Some("25".into()),
        co2: Some("400".into()),
        moisture: Some("40".into()),
        nitrogen: Some("10".into()),
        phosphorus: Some("5".into()),
        potassium: Some("5".into()),
        fragmentation: Some("Low".into()),
    };
    results.push(TestResult {
        name: "parse_complete_form".into(),
        passed: complete.parse().ok() == Some(ParameterSnapshot::default()),
        detail: "slider defaults parse to the default snapshot".into(),
    });

    let cases = [
        (
            "parse_rejects_text",
            RawInputs {
                moisture: Some("damp".into()),
                ..complete.clone()
            },
        ),
        (
            "parse_rejects_missing",
            RawInputs {
                co2: None,
                ..complete.clone()
            },
        ),
        (
            "parse_rejects_nan",
            RawInputs {
                potassium: Some("NaN".into()),
                ..complete.clone()
            },
        ),
    ];
    for (name, raw) in cases {
        let outcome = raw.parse();
        results.push(TestResult {
            name: name.into(),
            passed: outcome.is_err(),
            detail: match outcome {
                Err(e) => e.to_string(),
                Ok(_) => "accepted invalid input".into(),
            },
        });
    }

    results
}

// ── 6. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(verbose: bool) -> Vec<TestResult> {
    println!("--- Bundled Scenarios ---");
    let mut results = Vec::new();

    let scenarios = match builtin_scenarios() {
        Ok(s) => s,
        Err(e) => {
            results.push(TestResult {
                name: "scenarios_parse".into(),
                passed: false,
                detail: e.to_string(),
            });
            return results;
        }
    };

    for s in &scenarios {
        let a = s.assess();
        if verbose {
            println!(
                "  {}: {:.0} °C, {:.0}% moisture, N {:.0}, fragmentation {}, {}",
                s.name,
                s.snapshot.temperature,
                s.snapshot.moisture,
                s.snapshot.nitrogen,
                s.snapshot.fragmentation,
                s.remediation
            );
        }
        results.push(TestResult {
            name: format!("scenario_{}", s.name.to_lowercase().replace([' ', ','], "_")),
            passed: s.meets_expectation().unwrap_or(true),
            detail: format!(
                "score={:.4} tier={} expected={}",
                a.score,
                a.tier.label(),
                s.expected_tier.map(|t| t.label()).unwrap_or("-")
            ),
        });
    }

    results
}

// ── 7. Quick estimate ───────────────────────────────────────────────────

fn validate_quick_estimate(verbose: bool) -> Vec<TestResult> {
    println!("--- Quick Estimate ---");
    let mut results = Vec::new();

    let mut rng = StdRng::seed_from_u64(2024);
    let snapshot = ParameterSnapshot::default();
    let draws: Vec<f64> = (0..1000)
        .map(|_| quick_estimate(&mut rng, &snapshot, Remediation::None))
        .collect();
    let min = draws.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = draws.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if verbose {
        let mean = draws.iter().sum::<f64>() / draws.len() as f64;
        println!("  {} untreated draws, mean={:.3}", draws.len(), mean);
    }
    results.push(TestResult {
        name: "estimate_draw_range".into(),
        passed: min >= estimate::INITIAL_MIN && max < estimate::INITIAL_MAX,
        detail: format!("min={:.3} max={:.3}", min, max),
    });

    let a = quick_estimate(&mut StdRng::seed_from_u64(5), &snapshot, Remediation::Compost);
    let b = quick_estimate(&mut StdRng::seed_from_u64(5), &snapshot, Remediation::Compost);
    results.push(TestResult {
        name: "estimate_seeded_reproducible".into(),
        passed: a == b,
        detail: format!("{:.4} == {:.4}", a, b),
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_sections(verbose: bool) -> Vec<TestResult> {
        let mut results = Vec::new();
        results.extend(validate_reference_examples(verbose));
        results.extend(validate_band_edges());
        results.extend(validate_sweep(verbose));
        results.extend(validate_display_series(verbose));
        results.extend(validate_input_parsing());
        results.extend(validate_scenarios(verbose));
        results.extend(validate_quick_estimate(verbose));
        results
    }

    #[test]
    fn test_every_section_passes_quiet_and_verbose() {
        for verbose in [false, true] {
            let results = all_sections(verbose);
            assert!(!results.is_empty());
            let failed: Vec<_> = results
                .iter()
                .filter(|r| !r.passed)
                .map(|r| format!("{}: {}", r.name, r.detail))
                .collect();
            assert!(failed.is_empty(), "verbose={} failed: {:?}", verbose, failed);
        }
    }

    #[test]
    fn test_verbose_does_not_change_results() {
        let quiet: Vec<_> = all_sections(false)
            .into_iter()
            .map(|r| (r.name, r.passed))
            .collect();
        let loud: Vec<_> = all_sections(true)
            .into_iter()
            .map(|r| (r.name, r.passed))
            .collect();
        assert_eq!(quiet, loud);
    }

    #[test]
    fn test_run_reports_no_failures() {
        assert_eq!(run(false), 0);
    }
}
