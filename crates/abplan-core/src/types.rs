//! Parameter objects passed to the estimators.
//!
//! All statistical parameters are expressed in percent here, matching what a
//! planner types into a form. Estimators convert them to fractions once, on
//! entry.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Sidedness of the alternative hypothesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Hypothesis {
    /// Directional alternative (the variant is better than control).
    #[default]
    #[serde(rename = "One-sided Test")]
    OneSided,

    /// Any difference from control.
    #[serde(rename = "Two-sided Test")]
    TwoSided,
}

impl fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hypothesis::OneSided => write!(f, "One-sided Test"),
            Hypothesis::TwoSided => write!(f, "Two-sided Test"),
        }
    }
}

/// Kind of metric under test.
///
/// A continuous metric always carries its standard deviation; a binomial
/// metric derives its variance from the baseline rate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "metric_type", rename_all = "lowercase")]
pub enum Metric {
    /// Conversion-style metric. The baseline is a rate in percent.
    #[default]
    Binomial,

    /// Mean-style metric (revenue, session length...). The baseline is a raw mean.
    Continuous {
        /// Standard deviation of the metric, in the metric's own units.
        #[serde(rename = "std", alias = "std_dev")]
        std_dev: f64,
    },
}

impl Metric {
    /// Short lowercase label (`binomial` / `continuous`).
    pub fn label(&self) -> &'static str {
        match self {
            Metric::Binomial => "binomial",
            Metric::Continuous { .. } => "continuous",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Binomial => write!(f, "binomial"),
            Metric::Continuous { std_dev } => write!(f, "continuous (sd = {std_dev})"),
        }
    }
}

/// Inputs of the sample-size and duration estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestParameters {
    /// Significance level α, in percent.
    pub significance_level: f64,

    /// Type II error rate β, in percent. Power is `100 - β`.
    pub beta: f64,

    /// Number of variants compared against control (Bonferroni divisor).
    pub number_of_variants: u32,

    /// Metric kind, with the standard deviation for continuous metrics.
    ///
    /// Serialized inline: `"metric_type"` (and `"std"` for continuous
    /// metrics) sit next to the other fields.
    #[serde(flatten)]
    pub metric: Metric,

    /// Smallest relative effect worth detecting, in percent of the baseline.
    pub min_detectable_effect_percentage: f64,

    /// Expected visitors per day entering the experiment.
    pub daily_visitors: u64,

    /// Share of traffic routed to control, in percent.
    pub control_allocation: f64,

    /// Share of traffic routed to the variant, in percent.
    pub variant_allocation: f64,

    /// Baseline value: a rate in percent for binomial metrics, a raw mean
    /// for continuous ones.
    pub baseline_metric: f64,

    /// Sidedness of the test.
    pub hypothesis: Hypothesis,
}

impl Default for TestParameters {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGNIFICANCE_PCT,
            beta: DEFAULT_BETA_PCT,
            number_of_variants: DEFAULT_VARIANTS,
            metric: Metric::Binomial,
            min_detectable_effect_percentage: DEFAULT_MDE_PCT,
            daily_visitors: DEFAULT_DAILY_VISITORS,
            control_allocation: DEFAULT_ALLOCATION_PCT,
            variant_allocation: DEFAULT_ALLOCATION_PCT,
            baseline_metric: DEFAULT_BASELINE_PCT,
            hypothesis: Hypothesis::OneSided,
        }
    }
}

impl TestParameters {
    /// Binomial test with the given baseline rate and MDE (both in percent).
    pub fn binomial(baseline_rate_pct: f64, mde_pct: f64) -> Self {
        Self {
            metric: Metric::Binomial,
            baseline_metric: baseline_rate_pct,
            min_detectable_effect_percentage: mde_pct,
            ..Default::default()
        }
    }

    /// Continuous test with the given baseline mean, standard deviation and MDE (percent).
    pub fn continuous(baseline_mean: f64, std_dev: f64, mde_pct: f64) -> Self {
        Self {
            metric: Metric::Continuous { std_dev },
            baseline_metric: baseline_mean,
            min_detectable_effect_percentage: mde_pct,
            ..Default::default()
        }
    }

    /// Set α and β (percent).
    pub fn with_error_rates(mut self, significance_level: f64, beta: f64) -> Self {
        self.significance_level = significance_level;
        self.beta = beta;
        self
    }

    /// Set the number of variants.
    pub fn with_variants(mut self, number_of_variants: u32) -> Self {
        self.number_of_variants = number_of_variants;
        self
    }

    /// Set the daily traffic.
    pub fn with_daily_visitors(mut self, daily_visitors: u64) -> Self {
        self.daily_visitors = daily_visitors;
        self
    }

    /// Set control and variant traffic shares (percent).
    pub fn with_allocation(mut self, control: f64, variant: f64) -> Self {
        self.control_allocation = control;
        self.variant_allocation = variant;
        self
    }

    /// Set the hypothesis sidedness.
    pub fn with_hypothesis(mut self, hypothesis: Hypothesis) -> Self {
        self.hypothesis = hypothesis;
        self
    }
}

/// Inputs of the MDE estimator and of the week-by-week MDE table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MdeParameters {
    /// Significance level α, in percent.
    pub significance_level: f64,

    /// Type II error rate β, in percent.
    pub beta: f64,

    /// Number of variants, control included.
    pub number_of_variants: u32,

    /// Visitors observed per week.
    pub weekly_visitors: u64,

    /// Conversions observed per week. Must be below `weekly_visitors`.
    pub weekly_conversions: u64,

    /// Weeks projected by [`mde_table`](crate::analysis::mde_table).
    pub number_weeks: u32,
}

impl Default for MdeParameters {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGNIFICANCE_PCT,
            beta: DEFAULT_BETA_PCT,
            number_of_variants: DEFAULT_VARIANTS,
            weekly_visitors: DEFAULT_WEEKLY_VISITORS,
            weekly_conversions: DEFAULT_WEEKLY_CONVERSIONS,
            number_weeks: DEFAULT_WEEKS,
        }
    }
}

impl MdeParameters {
    /// Traffic observed over one week.
    pub fn new(weekly_visitors: u64, weekly_conversions: u64) -> Self {
        Self {
            weekly_visitors,
            weekly_conversions,
            ..Default::default()
        }
    }

    /// Set α and β (percent).
    pub fn with_error_rates(mut self, significance_level: f64, beta: f64) -> Self {
        self.significance_level = significance_level;
        self.beta = beta;
        self
    }

    /// Set the number of variants.
    pub fn with_variants(mut self, number_of_variants: u32) -> Self {
        self.number_of_variants = number_of_variants;
        self
    }

    /// Set the number of projected weeks.
    pub fn with_weeks(mut self, number_weeks: u32) -> Self {
        self.number_weeks = number_weeks;
        self
    }

    /// Same rate and settings, traffic accumulated over `weeks` weeks.
    pub fn scaled(&self, weeks: u32) -> Self {
        Self {
            weekly_visitors: self.weekly_visitors.saturating_mul(u64::from(weeks)),
            weekly_conversions: self.weekly_conversions.saturating_mul(u64::from(weeks)),
            ..self.clone()
        }
    }

    /// Observed conversion rate as a fraction, if any traffic was observed.
    pub fn conversion_rate(&self) -> Option<f64> {
        if self.weekly_visitors == 0 {
            None
        } else {
            Some(self.weekly_conversions as f64 / self.weekly_visitors as f64)
        }
    }
}

/// Inputs of the power-analysis plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualParameters {
    /// Significance level α, in percent.
    pub alpha: f64,

    /// Desired power `100 - β`, in percent.
    pub power: f64,

    /// Sidedness of the test.
    pub hypothesis: Hypothesis,

    /// Effect size plotted for the alternative hypothesis, in percent.
    pub min_detectable_effect_percentage: f64,

    /// Baseline conversion rate, in percent.
    pub baseline_conversion_rate_percentage: f64,
}

impl Default for VisualParameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_SIGNIFICANCE_PCT,
            power: DEFAULT_POWER_PCT,
            hypothesis: Hypothesis::OneSided,
            min_detectable_effect_percentage: DEFAULT_MDE_PCT,
            baseline_conversion_rate_percentage: DEFAULT_BASELINE_PCT,
        }
    }
}

impl VisualParameters {
    /// Plot for the given baseline rate and effect (both in percent).
    pub fn new(baseline_pct: f64, mde_pct: f64) -> Self {
        Self {
            baseline_conversion_rate_percentage: baseline_pct,
            min_detectable_effect_percentage: mde_pct,
            ..Default::default()
        }
    }

    /// Set α and power (percent).
    pub fn with_alpha_power(mut self, alpha: f64, power: f64) -> Self {
        self.alpha = alpha;
        self.power = power;
        self
    }

    /// Set the hypothesis sidedness.
    pub fn with_hypothesis(mut self, hypothesis: Hypothesis) -> Self {
        self.hypothesis = hypothesis;
        self
    }
}
