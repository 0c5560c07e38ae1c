//! Human-readable rendering of estimates.
//!
//! With the `std` feature the output carries ANSI colors (via `colored`,
//! which honours `NO_COLOR`); without it the output is plain text.

use alloc::format;
use alloc::string::String;

use crate::colors::{bold, bold_cyan, dim, green, yellow};
use crate::result::{DurationOutcome, MdeRow};
use crate::types::{MdeParameters, TestParameters};

/// Separator line used in output.
pub const SEPARATOR: &str = "──────────────────────────────────────────────────────────────";

/// Format a duration estimate with the parameters that produced it.
pub fn format_duration(params: &TestParameters, outcome: &DurationOutcome) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n{}\n\n", bold_cyan("abplan: test duration"), SEPARATOR));

    out.push_str(&format!(
        "  Metric:       {} (baseline {})\n",
        params.metric, params.baseline_metric
    ));
    out.push_str(&format!(
        "  Effect:       {}% relative, {}\n",
        params.min_detectable_effect_percentage, params.hypothesis
    ));
    out.push_str(&format!(
        "  Error rates:  \u{3b1} = {}%, \u{3b2} = {}% ({} variant{})\n",
        params.significance_level,
        params.beta,
        params.number_of_variants,
        if params.number_of_variants == 1 { "" } else { "s" }
    ));
    out.push_str(&format!(
        "  Allocation:   control {}% / variant {}%\n",
        params.control_allocation, params.variant_allocation
    ));
    out.push_str(&format!("  Traffic:      {} visitors/day\n\n", params.daily_visitors));

    match outcome {
        DurationOutcome::Estimated(r) => {
            out.push_str(&format!(
                "  {} {}\n",
                bold("Sample size:"),
                green(&format!("{}", r.sample_size))
            ));
            out.push_str(&format!(
                "  {}    {}\n",
                bold("Duration:"),
                green(&format!("{} days", r.duration_days))
            ));
        }
        DurationOutcome::NoEstimate => {
            out.push_str(&format!(
                "  {}\n",
                yellow("No estimate available: daily traffic is zero.")
            ));
        }
    }
    out
}

/// Format a single MDE value.
pub fn format_mde(params: &MdeParameters, mde: f64) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n{}\n\n",
        bold_cyan("abplan: minimum detectable effect"),
        SEPARATOR
    ));
    out.push_str(&format!(
        "  Traffic:      {} visitors, {} conversions per week\n",
        params.weekly_visitors, params.weekly_conversions
    ));
    out.push_str(&format!(
        "  Error rates:  \u{3b1} = {}%, \u{3b2} = {}% ({} variants)\n\n",
        params.significance_level, params.beta, params.number_of_variants
    ));
    out.push_str(&format!(
        "  {} {}\n",
        bold("MDE:"),
        green(&format!("{:.2}%", mde * 100.0))
    ));
    out
}

/// Format the week-by-week MDE projection as an aligned table.
pub fn format_mde_table(params: &MdeParameters, rows: &[MdeRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n{}\n\n",
        bold_cyan("abplan: MDE by test length"),
        SEPARATOR
    ));
    out.push_str(&format!(
        "  {}\n\n",
        dim(&format!(
            "{} visitors / {} conversions per week, {} variants",
            params.weekly_visitors, params.weekly_conversions, params.number_of_variants
        ))
    ));
    out.push_str(&format!(
        "  {}\n",
        bold(&format!("{:>6}  {:>10}  {:>22}", "Week", "MDE", "Visitors per variant"))
    ));
    for row in rows {
        out.push_str(&format!(
            "  {:>6}  {:>9.2}%  {:>22}\n",
            row.week,
            row.mde_percentage(),
            row.visitors
        ));
    }
    out
}
