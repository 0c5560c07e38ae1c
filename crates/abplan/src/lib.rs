//! A/B experiment planning.
//!
//! Sizes experiments before they run:
//!
//! - [`estimate_duration`]: required sample size and test length in days
//! - [`estimate_mde`] / [`mde_table`]: the smallest effect reachable with
//!   the traffic you already have, week by week
//! - [`render_power_plot`]: a PNG showing the null and alternative
//!   distributions with the Type I and Type II error regions shaded
//!
//! The statistics live in `abplan-core` (no_std compatible) and are
//! re-exported here. This crate adds rendering, output formatting and the
//! `abplan` command-line tool.
//!
//! # Example
//!
//! ```
//! use abplan::{estimate_mde, mde_table, MdeParameters};
//!
//! let params = MdeParameters::new(1000, 200).with_variants(2);
//! let mde = estimate_mde(&params).unwrap();
//! assert!(mde > 0.0 && mde < 1.0);
//!
//! let rows = mde_table(&params).unwrap();
//! assert_eq!(rows.len(), 5);
//! ```

pub mod config;
pub mod output;
pub mod plot;

pub use abplan_core::{
    constants, estimate_duration, estimate_mde, mde_table, required_sample_size, statistics,
    DurationOutcome, EstimationResult, Hypothesis, MdeParameters, MdeRow, Metric, PlanError,
    PlanResult, PowerCurves, TestParameters, TypeOneRegion, VisualParameters,
};
pub use config::{PlotConfig, Rgb};
pub use plot::{render_power_plot, render_power_plot_with, PlotArtifact, PlotError, PNG_SIGNATURE};
