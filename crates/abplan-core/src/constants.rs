//! Constants used throughout the crate.

/// 1/√(2π), the peak of the standard normal density.
pub const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// =============================================================================
// Parameter defaults (the planner's form defaults)
// =============================================================================

/// Default significance level α, in percent.
pub const DEFAULT_SIGNIFICANCE_PCT: f64 = 5.0;

/// Default β (Type II error rate), in percent. Power is `100 - β`.
pub const DEFAULT_BETA_PCT: f64 = 20.0;

/// Default number of variants, control included.
pub const DEFAULT_VARIANTS: u32 = 2;

/// Default minimum detectable effect, in percent (relative lift).
pub const DEFAULT_MDE_PCT: f64 = 20.0;

/// Default daily visitor volume.
pub const DEFAULT_DAILY_VISITORS: u64 = 1000;

/// Default traffic share of the control group and of each variant, in percent.
pub const DEFAULT_ALLOCATION_PCT: f64 = 50.0;

/// Default baseline conversion rate, in percent.
pub const DEFAULT_BASELINE_PCT: f64 = 10.0;

/// Default weekly visitors for MDE estimation.
pub const DEFAULT_WEEKLY_VISITORS: u64 = 1000;

/// Default weekly conversions for MDE estimation.
pub const DEFAULT_WEEKLY_CONVERSIONS: u64 = 200;

/// Default number of weeks projected by the MDE table.
pub const DEFAULT_WEEKS: u32 = 5;

/// Default statistical power, in percent.
pub const DEFAULT_POWER_PCT: f64 = 80.0;

// =============================================================================
// Power-analysis plot geometry
// =============================================================================

/// Number of grid points sampled per density curve.
pub const DEFAULT_PLOT_RESOLUTION: usize = 1000;

/// Half-width of the plot domain beyond the MDE, in units of σ.
pub const PLOT_DOMAIN_SIGMAS: f64 = 4.0;

/// Headroom above the tallest density peak.
pub const PLOT_Y_HEADROOM: f64 = 1.2;
