//! MDE estimation and the week-by-week projection.

use abplan::{estimate_mde, mde_table, MdeParameters, PlanError};

fn reference() -> MdeParameters {
    MdeParameters {
        significance_level: 5.0,
        beta: 20.0,
        number_of_variants: 2,
        weekly_visitors: 1000,
        weekly_conversions: 200,
        number_weeks: 5,
    }
}

#[test]
fn reference_mde_is_pinned() {
    let mde = estimate_mde(&reference()).unwrap();
    assert!(mde > 0.0 && mde < 1.0);
    assert!((mde - 0.501_162_799_396_733_7).abs() < 1e-9, "mde = {mde}");
}

#[test]
fn zero_weekly_visitors_is_invalid() {
    let params = MdeParameters {
        weekly_visitors: 0,
        ..reference()
    };
    let err = estimate_mde(&params).unwrap_err();
    assert!(matches!(err, PlanError::InvalidArgument(_)), "{err:?}");
}

#[test]
fn table_projects_each_week() {
    let rows = mde_table(&reference()).unwrap();
    assert_eq!(rows.len(), 5);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.week as usize, i + 1);
        // Sizing a test for MDE(n) recovers n / k visitors per variant.
        assert_eq!(row.visitors, 500 * u64::from(row.week));
    }
    assert!(rows.windows(2).all(|w| w[1].mde < w[0].mde));
    assert!((rows[1].mde_percentage() - 35.437_561_393_186_38).abs() < 1e-7);
}

#[test]
fn table_rows_match_direct_estimates() {
    let params = reference();
    let rows = mde_table(&params).unwrap();
    for row in &rows {
        let direct = estimate_mde(&params.scaled(row.week)).unwrap();
        assert_eq!(row.mde, direct);
    }
}

#[test]
fn table_propagates_errors() {
    let params = MdeParameters {
        weekly_conversions: 0,
        ..reference()
    };
    assert_eq!(
        mde_table(&params),
        Err(PlanError::DivisionByZero("weekly_conversions"))
    );
}

#[test]
fn conversions_at_or_above_visitors_are_invalid() {
    let over = MdeParameters::new(100, 150);
    assert!(matches!(
        estimate_mde(&over),
        Err(PlanError::InvalidArgument(_))
    ));

    let saturated = MdeParameters::new(100, 100);
    assert!(matches!(
        estimate_mde(&saturated),
        Err(PlanError::InvalidArgument(_))
    ));
    assert!(matches!(
        mde_table(&saturated),
        Err(PlanError::InvalidArgument(_))
    ));
}
