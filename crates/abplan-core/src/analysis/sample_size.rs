//! Sample size and test duration estimation.
//!
//! Closed-form normal approximation with a Bonferroni correction across
//! variants:
//! ```text
//! c      = 100/control_allocation + 100/variant_allocation
//! z_sum  = Φ⁻¹(1 - α/k) + Φ⁻¹(1 - β)
//! m      = c · σ² · z_sum² / (baseline · mde)²
//! days   = floor(m / daily_visitors) + 1
//! ```
//! where α, β, mde are fractions, `k` is the number of variants, and σ² is
//! `p(1-p)` for a binomial metric or `std²` for a continuous one.
//!
//! One-sided and two-sided hypotheses share the same `z_sum`.

use alloc::format;

use crate::error::{ensure_finite, open_percentage, PlanError, PlanResult};
use crate::math;
use crate::result::{DurationOutcome, EstimationResult};
use crate::statistics::quantile;
use crate::types::{Metric, TestParameters};

/// Variance and baseline of the metric, both in fraction form.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MetricMoments {
    variance: f64,
    baseline: f64,
}

fn metric_moments(params: &TestParameters) -> PlanResult<MetricMoments> {
    let baseline = params.baseline_metric;
    ensure_finite("baseline_metric", baseline)?;
    if baseline < 0.0 {
        return Err(PlanError::invalid(format!(
            "baseline_metric must be >= 0, got {baseline}"
        )));
    }
    if baseline == 0.0 {
        return Err(PlanError::DivisionByZero("baseline_metric"));
    }

    match params.metric {
        Metric::Binomial => {
            if baseline > 100.0 {
                return Err(PlanError::invalid(format!(
                    "binomial baseline_metric is a rate in percent, got {baseline}"
                )));
            }
            let p = baseline / 100.0;
            Ok(MetricMoments {
                variance: p * (1.0 - p),
                baseline: p,
            })
        }
        Metric::Continuous { std_dev } => {
            ensure_finite("std_dev", std_dev)?;
            if std_dev <= 0.0 {
                return Err(PlanError::invalid(format!(
                    "std_dev must be > 0 for a continuous metric, got {std_dev}"
                )));
            }
            Ok(MetricMoments {
                variance: math::sq(std_dev),
                baseline,
            })
        }
    }
}

fn allocation_share(name: &'static str, pct: f64) -> PlanResult<f64> {
    ensure_finite(name, pct)?;
    if pct == 0.0 {
        return Err(PlanError::DivisionByZero(name));
    }
    if !(0.0..=100.0).contains(&pct) {
        return Err(PlanError::invalid(format!(
            "{name} must be in (0, 100], got {pct}"
        )));
    }
    Ok(100.0 / pct)
}

/// Total required sample size `m`, before rounding.
///
/// Validates every input the formula touches; `daily_visitors` is ignored.
///
/// # Errors
///
/// - [`PlanError::InvalidArgument`] if `number_of_variants < 1`, α or β is
///   outside `(0, 100)`, an allocation is negative or above 100, the MDE or
///   baseline is negative, a continuous `std_dev` is not positive, or the
///   resulting sample size overflows (effect or baseline vanishingly small).
/// - [`PlanError::DivisionByZero`] if an allocation, the MDE or the
///   baseline is exactly zero.
pub fn required_sample_size(params: &TestParameters) -> PlanResult<f64> {
    if params.number_of_variants < 1 {
        return Err(PlanError::invalid("number_of_variants must be >= 1"));
    }
    let k = f64::from(params.number_of_variants);
    let alpha = open_percentage("significance_level", params.significance_level)?;
    let beta = open_percentage("beta", params.beta)?;

    let c = allocation_share("control_allocation", params.control_allocation)?
        + allocation_share("variant_allocation", params.variant_allocation)?;

    let mde_pct = params.min_detectable_effect_percentage;
    ensure_finite("min_detectable_effect_percentage", mde_pct)?;
    if mde_pct < 0.0 {
        return Err(PlanError::invalid(format!(
            "min_detectable_effect_percentage must be >= 0, got {mde_pct}"
        )));
    }
    if mde_pct == 0.0 {
        return Err(PlanError::DivisionByZero("min_detectable_effect_percentage"));
    }
    let mde = mde_pct / 100.0;

    let moments = metric_moments(params)?;

    let z_sum = quantile(1.0 - alpha / k) + quantile(1.0 - beta);
    let m = c * moments.variance * math::sq(z_sum) / math::sq(moments.baseline * mde);

    log::debug!(
        "sample size: metric={} sigma2={:.6} c={:.4} z_sum={:.6} m={:.3} ({})",
        params.metric.label(),
        moments.variance,
        c,
        z_sum,
        m,
        params.hypothesis,
    );

    if !m.is_finite() || m >= u64::MAX as f64 {
        return Err(PlanError::invalid(format!(
            "required sample size is not representable (m = {m}); \
             baseline_metric and min_detectable_effect_percentage are too small"
        )));
    }

    Ok(m)
}

/// Estimate the required sample size and the test duration in days.
///
/// Returns [`DurationOutcome::NoEstimate`] when `daily_visitors == 0`
/// (after validating the other inputs).
///
/// # Errors
///
/// See [`required_sample_size`].
pub fn estimate_duration(params: &TestParameters) -> PlanResult<DurationOutcome> {
    let m = required_sample_size(params)?;

    if params.daily_visitors == 0 {
        log::debug!("daily_visitors is 0, no duration estimate");
        return Ok(DurationOutcome::NoEstimate);
    }

    // Duration uses the unrounded m.
    let days = math::floor(m / params.daily_visitors as f64) + 1.0;

    Ok(DurationOutcome::Estimated(EstimationResult {
        sample_size: math::round(m) as u64,
        duration_days: days as u64,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Hypothesis;

    fn reference_binomial() -> TestParameters {
        TestParameters::binomial(10.0, 20.0)
            .with_variants(1)
            .with_daily_visitors(1000)
    }

    #[test]
    fn binomial_reference_scenario() {
        let out = estimate_duration(&reference_binomial()).unwrap();
        assert_eq!(
            out,
            DurationOutcome::Estimated(EstimationResult {
                sample_size: 5564,
                duration_days: 6,
            })
        );
    }

    #[test]
    fn unrounded_sample_size() {
        let m = required_sample_size(&reference_binomial()).unwrap();
        assert!((m - 5564.301_508_817_788).abs() < 1e-6, "m = {m}");
    }

    #[test]
    fn two_sided_matches_one_sided() {
        let one = estimate_duration(&reference_binomial()).unwrap();
        let two =
            estimate_duration(&reference_binomial().with_hypothesis(Hypothesis::TwoSided)).unwrap();
        assert_eq!(one, two);
    }

    #[test]
    fn bonferroni_increases_sample_size() {
        let one = required_sample_size(&reference_binomial()).unwrap();
        let two = required_sample_size(&reference_binomial().with_variants(2)).unwrap();
        assert!(two > one);
        assert!((two - 7063.991_760_914_178).abs() < 1e-6, "m = {two}");
    }

    #[test]
    fn continuous_metric() {
        let p = TestParameters::continuous(50.0, 10.0, 5.0)
            .with_variants(1)
            .with_daily_visitors(500);
        let out = estimate_duration(&p).unwrap();
        assert_eq!(
            out.estimate(),
            Some(EstimationResult {
                sample_size: 396,
                duration_days: 1,
            })
        );
    }

    #[test]
    fn unequal_allocation() {
        let p = reference_binomial()
            .with_allocation(30.0, 70.0)
            .with_daily_visitors(100);
        let r = estimate_duration(&p).unwrap().estimate().unwrap();
        assert_eq!(r.sample_size, 6624);
        assert_eq!(r.duration_days, 67);
    }

    #[test]
    fn zero_traffic_has_no_estimate() {
        let p = reference_binomial().with_daily_visitors(0);
        assert_eq!(estimate_duration(&p), Ok(DurationOutcome::NoEstimate));
    }

    #[test]
    fn zero_traffic_still_validates() {
        let p = reference_binomial()
            .with_daily_visitors(0)
            .with_allocation(0.0, 50.0);
        assert!(estimate_duration(&p).is_err());
    }

    #[test]
    fn rejects_zero_allocation() {
        let p = reference_binomial().with_allocation(50.0, 0.0);
        assert_eq!(
            estimate_duration(&p),
            Err(PlanError::DivisionByZero("variant_allocation"))
        );
    }

    #[test]
    fn rejects_negative_allocation() {
        let p = reference_binomial().with_allocation(-10.0, 50.0);
        assert!(matches!(
            estimate_duration(&p),
            Err(PlanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_zero_variants() {
        let p = reference_binomial().with_variants(0);
        assert!(matches!(
            estimate_duration(&p),
            Err(PlanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_degenerate_error_rates() {
        for (alpha, beta) in [(0.0, 20.0), (100.0, 20.0), (5.0, 0.0), (5.0, 100.0)] {
            let p = reference_binomial().with_error_rates(alpha, beta);
            assert!(
                matches!(estimate_duration(&p), Err(PlanError::InvalidArgument(_))),
                "alpha={alpha} beta={beta} accepted"
            );
        }
    }

    #[test]
    fn rejects_zero_effect_and_baseline() {
        let p = TestParameters::binomial(10.0, 0.0);
        assert_eq!(
            estimate_duration(&p),
            Err(PlanError::DivisionByZero("min_detectable_effect_percentage"))
        );
        let p = TestParameters::binomial(0.0, 20.0);
        assert_eq!(
            estimate_duration(&p),
            Err(PlanError::DivisionByZero("baseline_metric"))
        );
    }

    #[test]
    fn rejects_bad_std_dev() {
        let p = TestParameters::continuous(50.0, 0.0, 5.0);
        assert!(matches!(
            estimate_duration(&p),
            Err(PlanError::InvalidArgument(_))
        ));
        let p = TestParameters::continuous(50.0, f64::NAN, 5.0);
        assert!(estimate_duration(&p).is_err());
    }

    #[test]
    fn rejects_overflowing_sample_size() {
        let p = TestParameters::continuous(1e-200, 1.0, 1.0).with_variants(1);
        assert!(matches!(
            required_sample_size(&p),
            Err(PlanError::InvalidArgument(_))
        ));
        assert!(matches!(
            estimate_duration(&p),
            Err(PlanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_binomial_rate_above_100() {
        let p = TestParameters::binomial(120.0, 20.0);
        assert!(matches!(
            estimate_duration(&p),
            Err(PlanError::InvalidArgument(_))
        ));
    }
}
