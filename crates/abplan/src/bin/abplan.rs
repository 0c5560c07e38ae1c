//! Command-line front end for A/B experiment planning.
//!
//! # Usage
//!
//! ```bash
//! # Sample size and duration for a 10% baseline, 20% relative lift
//! abplan duration --baseline 10 --mde 20 --variants 1
//!
//! # Continuous metric (mean 50, sd 10)
//! abplan duration --metric continuous --baseline 50 --std-dev 10 --mde 5
//!
//! # MDE reachable with the current weekly traffic, and a 5-week projection
//! abplan mde --weekly-visitors 1000 --weekly-conversions 200
//! abplan table --weekly-visitors 1000 --weekly-conversions 200 --weeks 5
//!
//! # Power-analysis plot
//! abplan plot --baseline 10 --mde 20 --output power.png
//!
//! # Machine-readable output
//! abplan --json duration --baseline 10 --mde 20
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

use abplan::output::{json, terminal};
use abplan::{
    estimate_duration, estimate_mde, mde_table, render_power_plot_with, Hypothesis,
    MdeParameters, Metric, PlanError, PlotConfig, PlotError, TestParameters, VisualParameters,
};

/// A/B experiment planner: sample size, duration, MDE and power plots
#[derive(Parser, Debug)]
#[command(name = "abplan")]
#[command(about = "Size A/B experiments before running them")]
#[command(version)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Required sample size and test duration
    Duration(DurationArgs),
    /// Minimum detectable effect for the observed weekly traffic
    Mde(MdeArgs),
    /// Week-by-week MDE and visitors per variant
    Table(MdeArgs),
    /// Render the power-analysis plot to a PNG file
    Plot(PlotArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MetricKind {
    Binomial,
    Continuous,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Sidedness {
    OneSided,
    TwoSided,
}

impl From<Sidedness> for Hypothesis {
    fn from(s: Sidedness) -> Self {
        match s {
            Sidedness::OneSided => Hypothesis::OneSided,
            Sidedness::TwoSided => Hypothesis::TwoSided,
        }
    }
}

#[derive(Args, Debug)]
struct DurationArgs {
    /// Significance level α (%)
    #[arg(long, default_value_t = 5.0)]
    alpha: f64,

    /// Type II error rate β (%)
    #[arg(long, default_value_t = 20.0)]
    beta: f64,

    /// Number of variants (Bonferroni divisor)
    #[arg(long, default_value_t = 2)]
    variants: u32,

    /// Metric kind
    #[arg(long, value_enum, default_value_t = MetricKind::Binomial)]
    metric: MetricKind,

    /// Standard deviation, required for continuous metrics
    #[arg(long, required_if_eq("metric", "continuous"))]
    std_dev: Option<f64>,

    /// Minimum detectable effect (% relative to baseline)
    #[arg(long, default_value_t = 20.0)]
    mde: f64,

    /// Visitors per day
    #[arg(long, default_value_t = 1000)]
    daily_visitors: u64,

    /// Control allocation (%)
    #[arg(long, default_value_t = 50.0)]
    control_allocation: f64,

    /// Variant allocation (%)
    #[arg(long, default_value_t = 50.0)]
    variant_allocation: f64,

    /// Baseline: conversion rate (%) for binomial, mean for continuous
    #[arg(long, default_value_t = 10.0)]
    baseline: f64,

    /// Hypothesis sidedness
    #[arg(long, value_enum, default_value_t = Sidedness::OneSided)]
    hypothesis: Sidedness,
}

impl DurationArgs {
    fn to_params(&self) -> Result<TestParameters, CliError> {
        let metric = match (self.metric, self.std_dev) {
            (MetricKind::Binomial, _) => Metric::Binomial,
            (MetricKind::Continuous, Some(std_dev)) => Metric::Continuous { std_dev },
            (MetricKind::Continuous, None) => {
                return Err(CliError::Usage(
                    "--std-dev is required for continuous metrics".into(),
                ))
            }
        };
        Ok(TestParameters {
            significance_level: self.alpha,
            beta: self.beta,
            number_of_variants: self.variants,
            metric,
            min_detectable_effect_percentage: self.mde,
            daily_visitors: self.daily_visitors,
            control_allocation: self.control_allocation,
            variant_allocation: self.variant_allocation,
            baseline_metric: self.baseline,
            hypothesis: self.hypothesis.into(),
        })
    }
}

#[derive(Args, Debug)]
struct MdeArgs {
    /// Significance level α (%)
    #[arg(long, default_value_t = 5.0)]
    alpha: f64,

    /// Type II error rate β (%)
    #[arg(long, default_value_t = 20.0)]
    beta: f64,

    /// Number of variants
    #[arg(long, default_value_t = 2)]
    variants: u32,

    /// Visitors per week
    #[arg(long, default_value_t = 1000)]
    weekly_visitors: u64,

    /// Conversions per week
    #[arg(long, default_value_t = 200)]
    weekly_conversions: u64,

    /// Weeks to project (table only)
    #[arg(long, default_value_t = 5)]
    weeks: u32,
}

impl MdeArgs {
    fn to_params(&self) -> MdeParameters {
        MdeParameters {
            significance_level: self.alpha,
            beta: self.beta,
            number_of_variants: self.variants,
            weekly_visitors: self.weekly_visitors,
            weekly_conversions: self.weekly_conversions,
            number_weeks: self.weeks,
        }
    }
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// Significance level α (%)
    #[arg(long, default_value_t = 5.0)]
    alpha: f64,

    /// Statistical power (%)
    #[arg(long, default_value_t = 80.0)]
    power: f64,

    /// Hypothesis sidedness
    #[arg(long, value_enum, default_value_t = Sidedness::OneSided)]
    hypothesis: Sidedness,

    /// Effect plotted for the alternative (%)
    #[arg(long, default_value_t = 20.0)]
    mde: f64,

    /// Baseline conversion rate (%)
    #[arg(long, default_value_t = 10.0)]
    baseline: f64,

    /// Output PNG path
    #[arg(short, long, default_value = "power_analysis.png")]
    output: PathBuf,

    /// JSON style file (see PlotConfig); missing fields keep defaults
    #[arg(long)]
    style: Option<PathBuf>,
}

impl PlotArgs {
    fn to_params(&self) -> VisualParameters {
        VisualParameters {
            alpha: self.alpha,
            power: self.power,
            hypothesis: self.hypothesis.into(),
            min_detectable_effect_percentage: self.mde,
            baseline_conversion_rate_percentage: self.baseline,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Plot(#[from] PlotError),

    #[error("cannot serialize result: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", terminal::format_error(&e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Duration(args) => {
            let params = args.to_params()?;
            let outcome = estimate_duration(&params)?;
            if cli.json {
                println!("{}", json::to_json_pretty(&outcome)?);
            } else {
                print!("{}", terminal::format_duration(&params, &outcome));
            }
        }
        Command::Mde(args) => {
            let params = args.to_params();
            let mde = estimate_mde(&params)?;
            if cli.json {
                println!("{}", json::to_json_pretty(&serde_json::json!({ "mde": mde }))?);
            } else {
                print!("{}", terminal::format_mde(&params, mde));
            }
        }
        Command::Table(args) => {
            let params = args.to_params();
            let rows = mde_table(&params)?;
            if cli.json {
                println!("{}", json::to_json_pretty(&rows)?);
            } else {
                print!("{}", terminal::format_mde_table(&params, &rows));
            }
        }
        Command::Plot(args) => {
            let config = match &args.style {
                Some(path) => PlotConfig::from_json_file(path)?,
                None => PlotConfig::default(),
            };
            log::info!("rendering {}x{} plot", config.width, config.height);
            let png = render_power_plot_with(&args.to_params(), &config)?;
            png.write_to(&args.output).map_err(|source| CliError::Io {
                path: args.output.clone(),
                source,
            })?;
            if cli.json {
                let summary = serde_json::json!({
                    "output": args.output.display().to_string(),
                    "bytes": png.len(),
                });
                println!("{}", json::to_json_pretty(&summary)?);
            } else {
                println!("{}", terminal::format_plot_written(&args.output, png.len()));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn continuous_requires_std_dev() {
        let parsed = Cli::try_parse_from(["abplan", "duration", "--metric", "continuous"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn duration_args_build_parameters() {
        let cli = Cli::try_parse_from([
            "abplan",
            "duration",
            "--metric",
            "continuous",
            "--std-dev",
            "10",
            "--baseline",
            "50",
            "--hypothesis",
            "two-sided",
        ])
        .unwrap();
        let Command::Duration(args) = cli.command else {
            panic!("expected duration subcommand");
        };
        let params = args.to_params().unwrap();
        assert_eq!(params.metric, Metric::Continuous { std_dev: 10.0 });
        assert_eq!(params.hypothesis, Hypothesis::TwoSided);
        assert_eq!(params.baseline_metric, 50.0);
    }

    #[test]
    fn global_json_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["abplan", "table", "--json"]).unwrap();
        assert!(cli.json);
        let Command::Table(args) = cli.command else {
            panic!("expected table subcommand");
        };
        assert_eq!(args.to_params(), MdeParameters::default());
    }
}
