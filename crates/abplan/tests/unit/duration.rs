//! Sample size and duration scenarios.

use abplan::{
    estimate_duration, DurationOutcome, EstimationResult, Hypothesis, Metric, PlanError,
    TestParameters,
};

/// The planner's reference scenario: 10% baseline, 20% relative lift,
/// 1000 visitors/day, a single variant, even split, one-sided.
fn reference() -> TestParameters {
    TestParameters {
        significance_level: 5.0,
        beta: 20.0,
        number_of_variants: 1,
        metric: Metric::Binomial,
        min_detectable_effect_percentage: 20.0,
        daily_visitors: 1000,
        control_allocation: 50.0,
        variant_allocation: 50.0,
        baseline_metric: 10.0,
        hypothesis: Hypothesis::OneSided,
    }
}

#[test]
fn reference_scenario_is_pinned() {
    assert_eq!(
        estimate_duration(&reference()),
        Ok(DurationOutcome::Estimated(EstimationResult {
            sample_size: 5564,
            duration_days: 6,
        }))
    );
}

#[test]
fn duration_counts_partial_days() {
    // 5564.3 visitors at 1000/day: five full days plus a partial sixth.
    let r = estimate_duration(&reference()).unwrap().estimate().unwrap();
    assert!(r.duration_days >= 1);
    assert_eq!(r.duration_days, r.sample_size / 1000 + 1);
}

#[test]
fn more_variants_need_more_samples() {
    let one = estimate_duration(&reference()).unwrap().estimate().unwrap();
    let mut params = reference();
    params.number_of_variants = 2;
    let two = estimate_duration(&params).unwrap().estimate().unwrap();
    assert_eq!(two.sample_size, 7064);
    assert_eq!(two.duration_days, 8);
    assert!(two.sample_size > one.sample_size);
}

#[test]
fn halving_the_effect_quadruples_the_sample() {
    let mut params = reference();
    params.min_detectable_effect_percentage = 10.0;
    let r = estimate_duration(&params).unwrap().estimate().unwrap();
    assert_eq!(r.sample_size, 22257);
    assert_eq!(r.duration_days, 23);
}

#[test]
fn zero_traffic_yields_no_estimate() {
    let mut params = reference();
    params.daily_visitors = 0;
    let outcome = estimate_duration(&params).unwrap();
    assert_eq!(outcome, DurationOutcome::NoEstimate);
    assert!(outcome.estimate().is_none());
}

#[test]
fn continuous_metric_uses_std_dev() {
    let params = TestParameters {
        metric: Metric::Continuous { std_dev: 10.0 },
        baseline_metric: 50.0,
        min_detectable_effect_percentage: 5.0,
        daily_visitors: 500,
        ..reference()
    };
    let r = estimate_duration(&params).unwrap().estimate().unwrap();
    assert_eq!(r.sample_size, 396);
    assert_eq!(r.duration_days, 1);

    let noisier = TestParameters {
        metric: Metric::Continuous { std_dev: 20.0 },
        ..params
    };
    let r2 = estimate_duration(&noisier).unwrap().estimate().unwrap();
    // Variance scales with sd².
    assert!((r2.sample_size as f64 / r.sample_size as f64 - 4.0).abs() < 0.01);
}

#[test]
fn malformed_input_fails_fast() {
    let cases = [
        TestParameters {
            number_of_variants: 0,
            ..reference()
        },
        TestParameters {
            control_allocation: -5.0,
            ..reference()
        },
        TestParameters {
            significance_level: 0.0,
            ..reference()
        },
        TestParameters {
            beta: 100.0,
            ..reference()
        },
        TestParameters {
            metric: Metric::Continuous { std_dev: -1.0 },
            ..reference()
        },
    ];
    for params in &cases {
        assert!(
            matches!(estimate_duration(params), Err(PlanError::InvalidArgument(_))),
            "accepted {params:?}"
        );
    }
}

#[test]
fn zero_allocation_is_division_by_zero() {
    let params = TestParameters {
        control_allocation: 0.0,
        ..reference()
    };
    assert_eq!(
        estimate_duration(&params),
        Err(PlanError::DivisionByZero("control_allocation"))
    );
}

#[test]
fn vanishing_baseline_is_rejected_not_saturated() {
    let params = TestParameters {
        metric: Metric::Continuous { std_dev: 1.0 },
        baseline_metric: 1e-200,
        min_detectable_effect_percentage: 1.0,
        ..reference()
    };
    assert!(matches!(
        estimate_duration(&params),
        Err(PlanError::InvalidArgument(_))
    ));
}
