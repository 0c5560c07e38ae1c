//! Property tests: monotonicity and concurrent use.

use proptest::prelude::*;

use abplan::{estimate_duration, estimate_mde, MdeParameters, TestParameters};

fn binomial(baseline: f64, mde: f64, daily: u64) -> TestParameters {
    TestParameters::binomial(baseline, mde)
        .with_variants(1)
        .with_allocation(50.0, 50.0)
        .with_daily_visitors(daily)
}

proptest! {
    #[test]
    fn duration_non_increasing_in_traffic(
        baseline in 1.0_f64..90.0,
        mde in 1.0_f64..50.0,
        daily in 1_u64..100_000,
        extra in 1_u64..100_000
    ) {
        let slow = estimate_duration(&binomial(baseline, mde, daily)).unwrap().estimate().unwrap();
        let fast = estimate_duration(&binomial(baseline, mde, daily + extra))
            .unwrap()
            .estimate()
            .unwrap();
        prop_assert!(fast.duration_days <= slow.duration_days);
        prop_assert_eq!(fast.sample_size, slow.sample_size);
    }

    #[test]
    fn sample_size_decreasing_in_effect(
        baseline in 1.0_f64..90.0,
        mde in 1.0_f64..50.0,
        factor in 1.1_f64..4.0
    ) {
        let small = TestParameters::binomial(baseline, mde).with_variants(1);
        let large = TestParameters::binomial(baseline, mde * factor).with_variants(1);
        let m_small = abplan::required_sample_size(&small).unwrap();
        let m_large = abplan::required_sample_size(&large).unwrap();
        prop_assert!(m_large < m_small);
    }

    #[test]
    fn mde_decreasing_in_traffic(
        visitors in 100_u64..1_000_000,
        rate_permille in 1_u64..999,
        multiplier in 2_u32..20
    ) {
        let conversions = (visitors * rate_permille / 1000).max(1);
        let params = MdeParameters::new(visitors, conversions);
        let base = estimate_mde(&params).unwrap();
        let more = estimate_mde(&params.scaled(multiplier)).unwrap();
        prop_assert!(more < base);
        prop_assert!(more > 0.0);
    }
}

#[test]
fn estimators_are_safe_to_share_across_threads() {
    let params = std::sync::Arc::new(binomial(10.0, 20.0, 1000));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let params = std::sync::Arc::clone(&params);
            std::thread::spawn(move || estimate_duration(&params).unwrap())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
