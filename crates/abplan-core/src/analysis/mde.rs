//! Minimum Detectable Effect (MDE) estimation.
//!
//! The MDE answers: "given the traffic I already see, what's the smallest
//! relative lift this test could reliably detect?"
//!
//! Formula, with `p = conversions / visitors` and `k` variants:
//! ```text
//! MDE = 2 · (z_α - z_β) · sqrt(k · p(1-p) / (n · p²))
//! z_α = Φ⁻¹(1 - α/k)
//! z_β = Φ⁻¹(β)
//! ```
//! Note the β quantile is taken at `β`, not `1 - β` as in the duration
//! estimator. Since `Φ⁻¹(β) = -Φ⁻¹(1 - β)`, the bracket equals the duration
//! estimator's `z_sum`, which makes the MDE table below self-consistent:
//! a test sized for `MDE(n)` needs about `n / k` visitors per variant.

use alloc::format;
use alloc::vec::Vec;

use crate::error::{open_percentage, PlanError, PlanResult};
use crate::math;
use crate::result::MdeRow;
use crate::statistics::quantile;
use crate::types::{Hypothesis, Metric, MdeParameters, TestParameters};

/// Allocation used when sizing the table rows (even split).
const TABLE_ALLOCATION_PCT: f64 = 50.0;

/// Estimate the minimum detectable effect as a fraction.
///
/// # Errors
///
/// - [`PlanError::InvalidArgument`] if `weekly_visitors == 0`,
///   `number_of_variants < 1`, α/β are outside `(0, 100)`, or
///   `weekly_conversions >= weekly_visitors` (a conversion rate of 100% or
///   more has no variance to detect an effect against).
/// - [`PlanError::DivisionByZero`] if `weekly_conversions == 0` (the
///   baseline appears squared in the denominator).
pub fn estimate_mde(params: &MdeParameters) -> PlanResult<f64> {
    if params.weekly_visitors == 0 {
        return Err(PlanError::invalid("weekly_visitors must be > 0"));
    }
    if params.number_of_variants < 1 {
        return Err(PlanError::invalid("number_of_variants must be >= 1"));
    }
    if params.weekly_conversions == 0 {
        return Err(PlanError::DivisionByZero("weekly_conversions"));
    }
    if params.weekly_conversions >= params.weekly_visitors {
        return Err(PlanError::invalid(format!(
            "weekly_conversions must be < weekly_visitors, got {} of {}",
            params.weekly_conversions, params.weekly_visitors
        )));
    }
    let alpha = open_percentage("significance_level", params.significance_level)?;
    let beta = open_percentage("beta", params.beta)?;

    let k = f64::from(params.number_of_variants);
    let n = params.weekly_visitors as f64;
    let baseline = params.weekly_conversions as f64 / n;

    let z_alpha = quantile(1.0 - alpha / k);
    let z_beta = quantile(beta);

    let mde = 2.0 * (z_alpha - z_beta)
        * math::sqrt(k * baseline * (1.0 - baseline) / (n * math::sq(baseline)));

    log::debug!(
        "mde: n={} baseline={:.6} z_alpha={:.6} z_beta={:.6} mde={:.6}",
        params.weekly_visitors,
        baseline,
        z_alpha,
        z_beta,
        mde
    );

    Ok(mde)
}

/// Project the MDE over `1..=number_weeks` weeks of accumulated traffic.
///
/// Each row scales visitors and conversions by the week number (constant
/// conversion rate), computes the MDE, and sizes a binomial test for that
/// MDE with an even 50/50 split to obtain the visitors needed per variant.
/// Rows are computed independently.
///
/// # Errors
///
/// - [`PlanError::InvalidArgument`] if `number_weeks == 0`, plus any error
///   of [`estimate_mde`] or of the duration estimator.
pub fn mde_table(params: &MdeParameters) -> PlanResult<Vec<MdeRow>> {
    if params.number_weeks == 0 {
        return Err(PlanError::invalid("number_weeks must be >= 1"));
    }

    (1..=params.number_weeks)
        .map(|week| -> PlanResult<MdeRow> {
            let scaled = params.scaled(week);
            let mde = estimate_mde(&scaled)?;
            let visitors = visitors_for(params, mde)?;
            log::trace!("mde table: week={week} mde={mde:.6} visitors={visitors}");
            Ok(MdeRow {
                week,
                mde,
                visitors,
            })
        })
        .collect()
}

/// Visitors needed to detect `mde` at the observed weekly traffic.
fn visitors_for(params: &MdeParameters, mde: f64) -> PlanResult<u64> {
    // estimate_mde already rejected zero traffic.
    let rate = params.conversion_rate().unwrap_or_default();
    let sizing = TestParameters {
        significance_level: params.significance_level,
        beta: params.beta,
        number_of_variants: params.number_of_variants,
        metric: Metric::Binomial,
        min_detectable_effect_percentage: mde * 100.0,
        daily_visitors: params.weekly_visitors,
        control_allocation: TABLE_ALLOCATION_PCT,
        variant_allocation: TABLE_ALLOCATION_PCT,
        baseline_metric: rate * 100.0,
        hypothesis: Hypothesis::OneSided,
    };

    // daily_visitors is weekly_visitors, already checked non-zero.
    super::estimate_duration(&sizing)?
        .estimate()
        .map(|r| r.sample_size)
        .ok_or(PlanError::DivisionByZero("weekly_visitors"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> MdeParameters {
        MdeParameters::new(1000, 200)
            .with_error_rates(5.0, 20.0)
            .with_variants(2)
            .with_weeks(5)
    }

    #[test]
    fn reference_value() {
        let mde = estimate_mde(&reference()).unwrap();
        assert!(mde > 0.0 && mde < 1.0);
        assert!((mde - 0.501_162_799_396_733_7).abs() < 1e-9, "mde = {mde}");
    }

    #[test]
    fn more_traffic_smaller_mde() {
        let small = estimate_mde(&reference()).unwrap();
        let large = estimate_mde(&reference().scaled(4)).unwrap();
        // MDE scales with 1/sqrt(n).
        assert!((small / large - 2.0).abs() < 1e-9);
    }

    #[test]
    fn zero_visitors_is_invalid() {
        let p = MdeParameters::new(0, 0);
        assert!(matches!(
            estimate_mde(&p),
            Err(PlanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn zero_conversions_is_division_by_zero() {
        let p = MdeParameters::new(1000, 0);
        assert_eq!(
            estimate_mde(&p),
            Err(PlanError::DivisionByZero("weekly_conversions"))
        );
    }

    #[test]
    fn rate_of_one_or_more_is_invalid() {
        for (visitors, conversions) in [(100, 150), (100, 100)] {
            let p = MdeParameters::new(visitors, conversions);
            assert!(
                matches!(estimate_mde(&p), Err(PlanError::InvalidArgument(_))),
                "{conversions}/{visitors} accepted"
            );
        }
        assert!(estimate_mde(&MdeParameters::new(100, 99)).is_ok());
    }

    #[test]
    fn rejects_degenerate_error_rates() {
        for (alpha, beta) in [(0.0, 20.0), (100.0, 20.0), (5.0, 0.0), (5.0, 100.0)] {
            let p = reference().with_error_rates(alpha, beta);
            assert!(
                matches!(estimate_mde(&p), Err(PlanError::InvalidArgument(_))),
                "alpha={alpha} beta={beta} accepted"
            );
        }
    }

    #[test]
    fn rejects_zero_variants() {
        assert!(matches!(
            estimate_mde(&reference().with_variants(0)),
            Err(PlanError::InvalidArgument(_))
        ));
    }

    #[test]
    fn table_rows() {
        let rows = mde_table(&reference()).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].week, 1);
        assert!((rows[0].mde - 0.501_162_799_396_733_7).abs() < 1e-9);
        assert!((rows[4].mde - 0.224_126_817_449_037_4).abs() < 1e-9);
        let visitors: Vec<u64> = rows.iter().map(|r| r.visitors).collect();
        assert_eq!(visitors, [500, 1000, 1500, 2000, 2500]);
    }

    #[test]
    fn table_requires_a_week() {
        assert!(mde_table(&reference().with_weeks(0)).is_err());
    }
}
