//! Error type for planning calculations.

use alloc::string::String;

/// Error returned when estimator input is malformed.
///
/// Range checks for user-facing fields belong to the caller. These errors
/// cover input that would otherwise produce NaN, infinity or a division by
/// zero inside a formula. A zero daily traffic is not an error: it yields
/// [`DurationOutcome::NoEstimate`](crate::result::DurationOutcome::NoEstimate).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// A parameter is outside the domain of the formula.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A denominator of the formula is exactly zero.
    #[error("division by zero: {0} must be non-zero")]
    DivisionByZero(&'static str),
}

/// Result alias for planning calculations.
pub type PlanResult<T> = Result<T, PlanError>;

impl PlanError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PlanError::InvalidArgument(msg.into())
    }
}

/// Reject non-finite values.
pub(crate) fn ensure_finite(name: &str, value: f64) -> PlanResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PlanError::invalid(alloc::format!(
            "{name} must be finite, got {value}"
        )))
    }
}

/// Check that a percentage lies strictly inside (0, 100) and return it as a fraction.
pub(crate) fn open_percentage(name: &str, pct: f64) -> PlanResult<f64> {
    ensure_finite(name, pct)?;
    if pct <= 0.0 || pct >= 100.0 {
        return Err(PlanError::invalid(alloc::format!(
            "{name} must be in (0, 100), got {pct}"
        )));
    }
    Ok(pct / 100.0)
}
