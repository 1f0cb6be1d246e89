//! Mycorrhizal Health Simulator — headless front end
//!
//! Scores a parameter snapshot and draws the result as a terminal chart,
//! or runs the validation harness. No window, no plotting library.
//!
//! Usage:
//!   cargo run -p mycosim-simtest -- simulate --temperature 15 --remediation Compost
//!   cargo run -p mycosim-simtest -- simulate --scenario my_plot.json --json
//!   cargo run -p mycosim-simtest -- check --verbose

mod chart;
mod check;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mycosim_logic::comparison::{compare, rank_strategies, RemediationComparison};
use mycosim_logic::display::{build_display_series, DisplayPoint, DisplaySeries};
use mycosim_logic::estimate::quick_estimate;
use mycosim_logic::params::{InputBounds, RawInputs, DEFAULT_REMEDIATION};
use mycosim_logic::scenario::{builtin_scenarios, Scenario};
use mycosim_logic::scoring::{score_breakdown, HealthAssessment, OutcomeTier, ScoreBreakdown};
use mycosim_logic::{ParameterSnapshot, Remediation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

const CHART_WIDTH: usize = 40;
const PROGRESS_WIDTH: usize = 30;

#[derive(Parser, Debug)]
#[command(name = "mycosim-simtest")]
#[command(about = "Headless mycorrhizal health simulator", long_about = None)]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one snapshot and chart it
    Simulate {
        #[command(flatten)]
        params: ParameterArgs,

        /// Print a JSON report instead of the chart
        #[arg(long)]
        json: bool,

        /// Also show the untreated baseline and a ranking of every treatment
        #[arg(long)]
        compare: bool,

        /// Score values outside the slider ranges as given
        #[arg(long)]
        no_clamp: bool,
    },
    /// Randomized quick estimate, before and after treatment
    Estimate {
        #[command(flatten)]
        params: ParameterArgs,

        /// RNG seed for a reproducible estimate
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Score every bundled scenario
    Scenarios,
    /// Run the validation harness
    Check,
}

/// Parameter flags. Values stay text so bad input is reported the same way
/// a form would report it.
#[derive(Args, Debug, Default)]
struct ParameterArgs {
    /// JSON scenario file; flags below override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Soil temperature (°C)
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<String>,

    /// CO₂ level (ppm)
    #[arg(long, allow_hyphen_values = true)]
    co2: Option<String>,

    /// Soil moisture (%)
    #[arg(long, allow_hyphen_values = true)]
    moisture: Option<String>,

    /// Nitrogen (mg/kg)
    #[arg(long, allow_hyphen_values = true)]
    nitrogen: Option<String>,

    /// Phosphorus (mg/kg)
    #[arg(long, allow_hyphen_values = true)]
    phosphorus: Option<String>,

    /// Potassium (mg/kg)
    #[arg(long, allow_hyphen_values = true)]
    potassium: Option<String>,

    /// Fragmentation level: Low or High
    #[arg(long)]
    fragmentation: Option<String>,

    /// Biochar, Inoculation, Compost, "Humic Substances" or None
    #[arg(long)]
    remediation: Option<String>,
}

/// Snapshot and treatment after merging defaults, scenario file and flags.
struct ResolvedInput {
    name: Option<String>,
    snapshot: ParameterSnapshot,
    remediation: Remediation,
}

impl ParameterArgs {
    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            temperature: self.temperature.clone(),
            co2: self.co2.clone(),
            moisture: self.moisture.clone(),
            nitrogen: self.nitrogen.clone(),
            phosphorus: self.phosphorus.clone(),
            potassium: self.potassium.clone(),
            fragmentation: self.fragmentation.clone(),
        }
    }

    fn resolve(&self) -> Result<ResolvedInput> {
        let (name, base, remediation) = match &self.scenario {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading scenario {}", path.display()))?;
                let scenario = Scenario::from_json(&text)
                    .with_context(|| format!("loading scenario {}", path.display()))?;
                log::info!("loaded scenario {:?}", scenario.name);
                (Some(scenario.name), scenario.snapshot, scenario.remediation)
            }
            None => (None, ParameterSnapshot::default(), DEFAULT_REMEDIATION),
        };

        let snapshot = self
            .raw_inputs()
            .apply_to(&base)
            .context("Please enter valid numbers")?;
        let remediation = self
            .remediation
            .as_deref()
            .map(Remediation::from_name)
            .unwrap_or(remediation);

        Ok(ResolvedInput {
            name,
            snapshot,
            remediation,
        })
    }
}

#[derive(Serialize)]
struct SimulationReport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario: Option<&'a str>,
    snapshot: &'a ParameterSnapshot,
    remediation: Remediation,
    assessment: HealthAssessment,
    breakdown: ScoreBreakdown,
    series: &'a DisplaySeries,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<RemediationComparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ranking: Option<Vec<(Remediation, HealthAssessment)>>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            params,
            json,
            compare,
            no_clamp,
        } => simulate(&params, json, compare, no_clamp),
        Commands::Estimate { params, seed } => estimate(&params, seed),
        Commands::Scenarios => list_scenarios(),
        Commands::Check => {
            let failed = check::run(cli.verbose);
            if failed > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn simulate(params: &ParameterArgs, json: bool, with_compare: bool, no_clamp: bool) -> Result<()> {
    let input = params.resolve()?;

    let snapshot = if no_clamp {
        input.snapshot
    } else {
        let clamped = input.snapshot.clamped(&InputBounds::default());
        if clamped != input.snapshot {
            log::warn!("inputs clamped to slider ranges");
        }
        clamped
    };

    let breakdown = score_breakdown(&snapshot, input.remediation);
    let assessment = breakdown.assessment();
    let series = build_display_series(&snapshot, assessment.score);

    let comparison = with_compare.then(|| compare(&snapshot, input.remediation));
    let ranking = with_compare.then(|| rank_strategies(&snapshot));

    if json {
        let report = SimulationReport {
            scenario: input.name.as_deref(),
            snapshot: &snapshot,
            remediation: input.remediation,
            assessment,
            breakdown,
            series: &series,
            comparison,
            ranking,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if let Some(name) = &input.name {
        println!("Scenario: {}", name);
    }
    println!(
        "Conditions: {:.1} °C, {:.0} ppm CO₂, {:.0}% moisture, N {:.0} / P {:.0} / K {:.0} mg/kg, fragmentation {}",
        snapshot.temperature,
        snapshot.co2,
        snapshot.moisture,
        snapshot.nitrogen,
        snapshot.phosphorus,
        snapshot.potassium,
        snapshot.fragmentation
    );
    println!("Remediation: {}", input.remediation);
    println!();
    print_assessment(&assessment);
    println!();
    print!(
        "{}",
        chart::render_bar_chart("Soil Health Parameters", &series, CHART_WIDTH)
    );

    if let (Some(c), Some(ranked)) = (comparison, ranking) {
        println!();
        println!(
            "Without treatment: {:.2} ({})",
            c.baseline.score,
            c.baseline.tier.label()
        );
        println!(
            "With {}: {:.2} ({}), {:+.2}",
            c.remediation,
            c.treated.score,
            c.treated.tier.label(),
            c.delta
        );
        println!();
        println!("Treatment ranking:");
        for (i, (r, a)) in ranked.iter().enumerate() {
            println!(
                "  {}. {:<16} {:.2} {}",
                i + 1,
                r.name(),
                a.score,
                a.tier.label()
            );
        }
    }

    Ok(())
}

fn print_assessment(assessment: &HealthAssessment) {
    println!("Baseline Health: {:.2}", assessment.score);
    println!("{}", chart::render_progress(assessment.score, PROGRESS_WIDTH));
    println!("{}", assessment.tier.message());
}

fn estimate(params: &ParameterArgs, seed: Option<u64>) -> Result<()> {
    let input = params.resolve()?;
    let snapshot = input.snapshot.clamped(&InputBounds::default());

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };

    let baseline = quick_estimate(&mut rng, &snapshot, Remediation::None);
    let treated = quick_estimate(&mut rng, &snapshot, input.remediation);
    log::debug!("quick estimate baseline={:.4} treated={:.4}", baseline, treated);

    println!("Baseline Mycorrhizal Health: {:.2}", baseline);
    println!("After Applying {}: {:.2}", input.remediation, treated);
    println!();

    let series = [
        DisplayPoint {
            label: "Baseline",
            value: baseline,
        },
        DisplayPoint {
            label: input.remediation.name(),
            value: treated,
        },
    ];
    print!(
        "{}",
        chart::render_bar_chart("Effect of Remediation Strategies", &series, CHART_WIDTH)
    );
    println!();
    println!("{}", OutcomeTier::from_score(treated).message());

    Ok(())
}

fn list_scenarios() -> Result<()> {
    let scenarios = builtin_scenarios().context("parsing bundled scenarios")?;
    for s in &scenarios {
        let a = s.assess();
        println!(
            "{:<28} {:<16} {:.4} {}",
            s.name,
            s.remediation.name(),
            a.score,
            a.tier.label()
        );
    }
    Ok(())
}
