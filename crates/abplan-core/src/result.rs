//! Result types returned by the estimators.

use core::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Duration estimation
// ============================================================================

/// Required traffic and the calendar time needed to collect it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationResult {
    /// Required sample size, rounded to the nearest visitor.
    pub sample_size: u64,

    /// Days needed at the configured daily traffic: `floor(m / daily) + 1`.
    pub duration_days: u64,
}

/// Outcome of a duration estimate.
///
/// Zero daily traffic is a valid business input with no meaningful answer,
/// so it is reported as [`NoEstimate`](DurationOutcome::NoEstimate) instead
/// of an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DurationOutcome {
    /// The test can be sized.
    Estimated(EstimationResult),

    /// No traffic, so no duration can be given.
    NoEstimate,
}

impl DurationOutcome {
    /// The estimate, if there is one.
    pub fn estimate(&self) -> Option<EstimationResult> {
        match self {
            DurationOutcome::Estimated(r) => Some(*r),
            DurationOutcome::NoEstimate => None,
        }
    }

    /// Whether an estimate is available.
    pub fn is_estimated(&self) -> bool {
        matches!(self, DurationOutcome::Estimated(_))
    }
}

impl fmt::Display for DurationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationOutcome::Estimated(r) => write!(
                f,
                "{} visitors over {} day{}",
                r.sample_size,
                r.duration_days,
                if r.duration_days == 1 { "" } else { "s" }
            ),
            DurationOutcome::NoEstimate => write!(f, "no estimate available"),
        }
    }
}

// ============================================================================
// MDE projection
// ============================================================================

/// One row of the week-by-week MDE projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MdeRow {
    /// Number of weeks the test has been running (1-based).
    pub week: u32,

    /// Minimum detectable effect as a fraction (multiply by 100 for percent).
    pub mde: f64,

    /// Visitors needed per variant to detect `mde`.
    pub visitors: u64,
}

impl MdeRow {
    /// MDE in percent.
    pub fn mde_percentage(&self) -> f64 {
        self.mde * 100.0
    }
}
