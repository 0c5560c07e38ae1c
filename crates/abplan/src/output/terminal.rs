//! Terminal output formatting with colors.
//!
//! This module re-exports the formatting functions from `abplan-core`.
//! With its `std` feature enabled (always the case through `abplan`), the
//! output includes ANSI color codes, subject to `NO_COLOR` and TTY detection.

use colored::Colorize;

use abplan_core::formatting;
use abplan_core::{DurationOutcome, MdeParameters, MdeRow, TestParameters};

/// Format a duration estimate for the terminal.
pub fn format_duration(params: &TestParameters, outcome: &DurationOutcome) -> String {
    formatting::format_duration(params, outcome)
}

/// Format a single MDE for the terminal.
pub fn format_mde(params: &MdeParameters, mde: f64) -> String {
    formatting::format_mde(params, mde)
}

/// Format the week-by-week MDE table for the terminal.
pub fn format_mde_table(params: &MdeParameters, rows: &[MdeRow]) -> String {
    formatting::format_mde_table(params, rows)
}

/// One-line confirmation after writing a plot.
pub fn format_plot_written(path: &std::path::Path, bytes: usize) -> String {
    format!(
        "{} {} ({} bytes)",
        "\u{2713}".green().bold(),
        path.display(),
        bytes
    )
}

/// One-line error report.
pub fn format_error(err: &dyn std::error::Error) -> String {
    format!("{} {}", "error:".red().bold(), err)
}
