//! Integration tests for bondlab-bonds.
//!
//! These tests drive the catalog end to end with a 10 year 5% semi-annual
//! bond issued 2022-01-01 and settled 2025-04-26.

use std::thread;

use approx::assert_relative_eq;
use bondlab_bonds::prelude::*;
use bondlab_core::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn catalog_at(settlement: Date) -> BondCatalog {
    BondCatalog::new(CatalogConfig::new(settlement)).unwrap()
}

fn scenario_catalog() -> BondCatalog {
    catalog_at(date(2025, 4, 26))
}

fn ten_year_schedule(catalog: &BondCatalog) -> Schedule {
    catalog
        .create_schedule(
            date(2022, 1, 1),
            date(2032, 1, 1),
            Period::months(6),
            BusinessDayConvention::Unadjusted,
            DateGenerationRule::Backward,
        )
        .unwrap()
}

fn scenario_bond(catalog: &BondCatalog) -> Bond {
    catalog
        .create_fixed_rate_bond(
            dec!(1000),
            ten_year_schedule(catalog),
            dec!(0.05),
            DayCountConvention::Thirty360BondBasis,
            date(2022, 1, 1),
            BusinessDayConvention::Unadjusted,
        )
        .unwrap()
}

// =============================================================================
// SCENARIO
// =============================================================================

#[test]
fn test_scenario_price_and_yield() {
    let catalog = scenario_catalog();
    let bond = scenario_bond(&catalog);
    let conv = YieldConvention::default();

    let clean = catalog.price_from_yield(&bond, 0.052, &conv);
    assert_relative_eq!(clean, 98.87595, epsilon = 1e-4);
    assert_eq!(catalog.clean_price(&bond, 0.052, &conv), clean);

    let accrued_per_100 = 1.597_222_222;
    assert_relative_eq!(
        catalog.dirty_price(&bond, 0.052, &conv),
        clean + accrued_per_100,
        epsilon = 1e-8
    );

    let y = catalog.yield_from_price(&bond, 98.5, &conv).unwrap();
    assert_relative_eq!(y, 0.0526792, epsilon = 1e-6);
}

#[test]
fn test_scenario_annual_compounding() {
    let catalog = scenario_catalog();
    let bond = scenario_bond(&catalog);
    let conv = YieldConvention::default().with_frequency(Frequency::Annual);

    assert_relative_eq!(catalog.price_from_yield(&bond, 0.052, &conv), 99.2423, epsilon = 1e-3);
    assert_relative_eq!(
        catalog.yield_from_price(&bond, 98.5, &conv).unwrap(),
        0.053373,
        epsilon = 1e-5
    );
}

#[test]
fn test_scenario_accrued() {
    let catalog = scenario_catalog();
    let bond = scenario_bond(&catalog);

    let accrued = catalog.accrued_interest(&bond);
    assert!((accrued - dec!(15.9722)).abs() < dec!(0.0001));
    assert_eq!(catalog.accrued_days(&bond), 115);
}

#[test]
fn test_scenario_risk() {
    let catalog = scenario_catalog();
    let bond = scenario_bond(&catalog);
    let conv = YieldConvention::default();
    let y = 0.052;

    let dv01 = catalog.dv01(&bond, y, &conv);
    let modified = catalog.duration(&bond, y, &conv, DurationType::Modified);
    let dirty = catalog.dirty_price(&bond, y, &conv);

    assert!(dv01 < 0.0);
    assert_relative_eq!(-dv01, modified * dirty / 10_000.0, max_relative = 1e-3);
    assert_eq!(catalog.pv01(&bond, y, &conv), dv01);
    assert_relative_eq!(catalog.dollar_dv01(&bond, y, &conv), dv01 * 10.0, epsilon = 1e-12);

    let macaulay = catalog.duration(&bond, y, &conv, DurationType::Macaulay);
    assert_relative_eq!(modified, macaulay / 1.026, max_relative = 1e-12);
    assert!(macaulay > 5.0 && macaulay < 6.7);
    assert!(catalog.convexity(&bond, y, &conv) > 0.0);
}

#[test]
fn test_scenario_cashflows() {
    let catalog = scenario_catalog();
    let bond = scenario_bond(&catalog);

    let flows = catalog.cashflows(&bond);
    assert_eq!(flows.len(), 14);
    assert!(flows.iter().all(|f| f.date >= catalog.settlement_date()));
    assert_eq!(flows.last().unwrap().amount, dec!(1025));
    assert_eq!(catalog.payment_schedule(&bond).len(), 20);
}

// =============================================================================
// ACCRUED INTEREST
// =============================================================================

#[test]
fn test_accrued_zero_on_coupon_date() {
    let catalog = catalog_at(date(2025, 7, 1));
    let bond = scenario_bond(&catalog);
    assert_eq!(catalog.accrued_interest(&bond), Decimal::ZERO);
    assert_eq!(catalog.accrued_days(&bond), 0);
}

#[test]
fn test_accrued_half_coupon_mid_period() {
    let catalog = catalog_at(date(2025, 4, 1));
    let bond = scenario_bond(&catalog);
    assert_eq!(catalog.accrued_interest(&bond), dec!(12.5));
    assert_eq!(catalog.accrued_days(&bond), 90);
}

// =============================================================================
// STRUCTURAL VARIANTS
// =============================================================================

#[test]
fn test_amortizing_principal() {
    let catalog = scenario_catalog();
    let base = scenario_bond(&catalog);
    let reductions = vec![
        AmortizationEntry::new(date(2023, 1, 1), dec!(0.10)),
        AmortizationEntry::new(date(2024, 1, 1), dec!(0.10)),
        AmortizationEntry::new(date(2025, 1, 1), dec!(0.10)),
    ];
    let bond = catalog.create_amortizing_bond(&base, reductions).unwrap();

    assert_eq!(bond.total_principal(), dec!(700));
    assert_eq!(bond.cashflows().last().unwrap().principal(), dec!(700));
    assert_eq!(bond.variant().name(), "amortizing");

    let over = vec![
        AmortizationEntry::new(date(2023, 1, 1), dec!(0.60)),
        AmortizationEntry::new(date(2024, 1, 1), dec!(0.50)),
    ];
    assert!(matches!(
        catalog.create_amortizing_bond(&base, over),
        Err(BondError::OverAmortization { .. })
    ));
}

#[test]
fn test_stepped_coupon_rates() {
    let catalog = scenario_catalog();
    let steps = vec![
        CouponStep::new(date(2022, 1, 1), dec!(0.03)),
        CouponStep::new(date(2027, 1, 1), dec!(0.05)),
        CouponStep::new(date(2030, 1, 1), dec!(0.06)),
    ];
    let bond = catalog
        .create_stepped_coupon_bond(
            dec!(1000),
            ten_year_schedule(&catalog),
            steps,
            DayCountConvention::Thirty360BondBasis,
            date(2022, 1, 1),
            BusinessDayConvention::Unadjusted,
        )
        .unwrap();

    let rate_from = |start: Date| {
        bond.cashflows()
            .iter()
            .find(|cf| cf.accrual_start() == start)
            .map(CashFlow::rate)
            .unwrap()
    };
    assert_eq!(rate_from(date(2026, 7, 1)), dec!(0.03));
    assert_eq!(rate_from(date(2027, 7, 1)), dec!(0.05));
    assert_eq!(rate_from(date(2031, 7, 1)), dec!(0.06));

    let unsorted = vec![
        CouponStep::new(date(2027, 1, 1), dec!(0.05)),
        CouponStep::new(date(2022, 1, 1), dec!(0.03)),
    ];
    assert!(matches!(
        catalog.create_stepped_coupon_bond(
            dec!(1000),
            ten_year_schedule(&catalog),
            unsorted,
            DayCountConvention::Thirty360BondBasis,
            date(2022, 1, 1),
            BusinessDayConvention::Unadjusted,
        ),
        Err(BondError::InvalidStepSchedule { .. })
    ));
}

#[test]
fn test_mbs_factor_scales_coupons_only() {
    let catalog = scenario_catalog();
    let base = scenario_bond(&catalog);
    let mbs = catalog.create_mbs_bond(&base, dec!(0.8)).unwrap();

    assert_eq!(mbs.cashflows()[0].coupon(), dec!(20));
    assert_eq!(mbs.total_principal(), dec!(1000));
    assert!(catalog.create_mbs_bond(&base, dec!(1.2)).is_err());

    let conv = YieldConvention::default();
    assert!(catalog.price_from_yield(&mbs, 0.05, &conv) < catalog.price_from_yield(&base, 0.05, &conv));
}

// =============================================================================
// EXERCISE OVERLAYS
// =============================================================================

#[test]
fn test_callable_premium_bond_yields_to_call() {
    let catalog = scenario_catalog();
    let base = scenario_bond(&catalog);
    let call = ExercisePoint::new(date(2028, 1, 1), dec!(100));
    let callable = catalog.create_callable_bond(&base, vec![call]).unwrap();
    let conv = YieldConvention::default();

    let ytm = catalog.yield_from_price(&callable, 105.0, &conv).unwrap();
    let ytw = catalog.yield_to_worst(&callable, 105.0, &conv).unwrap();
    let ytc = catalog
        .pricing_engine()
        .yield_to_exercise(&callable, 105.0, &call, &conv)
        .unwrap();

    assert!(ytw < ytm);
    assert_eq!(ytw, ytc);

    // Overlays do not change the cash flows
    assert_eq!(callable.cashflows(), base.cashflows());
}

#[test]
fn test_puttable_discount_bond_yields_to_maturity() {
    let catalog = scenario_catalog();
    let base = scenario_bond(&catalog);
    let puttable = catalog
        .create_puttable_bond(&base, vec![ExercisePoint::new(date(2028, 1, 1), dec!(100))])
        .unwrap();
    let conv = YieldConvention::default();

    let ytm = catalog.yield_from_price(&puttable, 95.0, &conv).unwrap();
    assert_eq!(catalog.yield_to_worst(&puttable, 95.0, &conv).unwrap(), ytm);
}

#[test]
fn test_exercise_after_maturity_rejected() {
    let catalog = scenario_catalog();
    let base = scenario_bond(&catalog);
    let result =
        catalog.create_callable_bond(&base, vec![ExercisePoint::new(date(2033, 1, 1), dec!(100))]);
    assert!(matches!(result, Err(BondError::InvalidBond { .. })));
}

// =============================================================================
// CONFIGURATION AND CONTEXTS
// =============================================================================

#[test]
fn test_catalog_from_json() {
    let catalog = BondCatalog::from_json(
        r#"{
            "settlement_date": "2025-04-26",
            "calendar": { "type": "weekend" },
            "solver": { "tolerance": 1e-10, "max_iterations": 100 },
            "include_settlement_date_flows": true
        }"#,
    )
    .unwrap();
    assert_eq!(catalog.settlement_date(), date(2025, 4, 26));
    assert_eq!(catalog.context().calendar().name(), "Weekend Only");

    let bond = scenario_bond(&catalog);
    let conv = YieldConvention::default();
    assert_relative_eq!(catalog.price_from_yield(&bond, 0.052, &conv), 98.87595, epsilon = 1e-4);
}

#[test]
fn test_settlement_date_flow_inclusion() {
    let inclusive = catalog_at(date(2025, 7, 1));
    let exclusive = BondCatalog::new(
        CatalogConfig::new(date(2025, 7, 1)).with_settlement_date_flows(false),
    )
    .unwrap();
    let bond = scenario_bond(&inclusive);
    let conv = YieldConvention::default();

    let diff = inclusive.dirty_price(&bond, 0.05, &conv) - exclusive.dirty_price(&bond, 0.05, &conv);
    assert_relative_eq!(diff, 2.5, epsilon = 1e-10);
}

#[test]
fn test_catalogs_with_different_settlements_across_threads() {
    let early = catalog_at(date(2025, 4, 26));
    let late = catalog_at(date(2028, 4, 26));
    let bond = scenario_bond(&early);
    let conv = YieldConvention::default();

    let (early_price, late_price) = thread::scope(|s| {
        let a = s.spawn(|| early.price_from_yield(&bond, 0.052, &conv));
        let b = s.spawn(|| late.price_from_yield(&bond, 0.052, &conv));
        (a.join().unwrap(), b.join().unwrap())
    });

    assert_relative_eq!(early_price, 98.87595, epsilon = 1e-4);
    assert!(late_price > early_price);
    assert_eq!(early.settlement_date(), date(2025, 4, 26));
    assert_eq!(late.settlement_date(), date(2028, 4, 26));
}
