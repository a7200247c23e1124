//! Edge-case tests: documented scenarios and degenerate transactions for every model.

use nanobook_commission::{
    Commission, CommissionModel, Model, OpenCloseCost, PerDollar, PerShare, PerTrade, Transaction,
};

fn assert_commission(c: Commission, unit: f64, total: f64) {
    assert!(
        (c.unit_cost - unit).abs() < 1e-9 && (c.total_cost - total).abs() < 1e-9,
        "expected ({unit}, {total}), got {c:?}"
    );
}

fn all_models() -> Vec<Model> {
    vec![
        PerShare::default().into(),
        PerShare::new(0.01).with_min_trade_cost(1.0).into(),
        PerTrade::default().into(),
        PerDollar::default().into(),
        OpenCloseCost::default().into(),
    ]
}

// ============================================================================
// Documented scenarios
// ============================================================================

#[test]
fn per_share_without_minimum() {
    for price in [0.0, 1.0, 999.99] {
        let c = PerShare::new(0.03).calculate(&Transaction::new(100.0, price));
        assert_commission(c, 0.03, 3.0);
    }
}

#[test]
fn per_share_minimum_applies() {
    let c = PerShare::new(0.03)
        .with_min_trade_cost(5.0)
        .calculate(&Transaction::new(100.0, 55.0));
    assert_commission(c, 0.05, 5.0);
}

#[test]
fn per_trade_fee() {
    let c = PerTrade::new(5.0).calculate(&Transaction::new(50.0, 10.0));
    assert_commission(c, 0.1, 5.0);
}

#[test]
fn per_dollar_sell() {
    let c = PerDollar::new(0.0015).calculate(&Transaction::new(-1000.0, 10.0));
    assert_commission(c, 0.015, 15.0);
}

#[test]
fn open_close_buy_and_sell() {
    let model = OpenCloseCost::new(0.0, 0.001, 0.003, 0.003);
    assert_commission(model.calculate(&Transaction::new(100.0, 10.0)), 0.03, 3.0);
    assert_commission(model.calculate(&Transaction::new(-100.0, 10.0)), 0.04, 4.0);
}

// ============================================================================
// Zero-amount transactions
// ============================================================================

#[test]
fn zero_amount_never_charges() {
    let txn = Transaction::new(0.0, 10.0);
    for model in all_models() {
        assert_eq!(model.calculate(&txn).total_cost, 0.0, "{model}");
    }
}

#[test]
fn zero_amount_short_circuits() {
    let txn = Transaction::new(0.0, 10.0);
    assert_eq!(PerTrade::new(5.0).calculate(&txn), Commission::ZERO);
    assert_eq!(OpenCloseCost::default().calculate(&txn), Commission::ZERO);
    assert_eq!(
        PerShare::new(0.03).with_min_trade_cost(5.0).calculate(&txn),
        Commission::ZERO
    );
}

#[test]
fn negative_zero_amount() {
    let txn = Transaction::new(-0.0, 10.0);
    for model in all_models() {
        let c = model.calculate(&txn);
        assert!(c.total_cost == 0.0 && c.unit_cost.is_finite(), "{model}: {c:?}");
    }
}

// ============================================================================
// Other degenerate inputs
// ============================================================================

#[test]
fn zero_price() {
    let txn = Transaction::new(100.0, 0.0);
    assert_eq!(PerDollar::default().calculate(&txn).total_cost, 0.0);
    assert_eq!(OpenCloseCost::default().calculate(&txn).total_cost, 0.0);
    // per-unit and per-trade models ignore price
    assert_commission(PerShare::new(0.03).calculate(&txn), 0.03, 3.0);
    assert_commission(PerTrade::new(5.0).calculate(&txn), 0.05, 5.0);
}

#[test]
fn fractional_amount() {
    let c = PerTrade::new(1.0).calculate(&Transaction::new(0.5, 100.0));
    assert_commission(c, 2.0, 1.0);
}

#[test]
fn zero_cost_models_are_free() {
    let txn = Transaction::new(-250.0, 40.0);
    let models: Vec<Model> = vec![
        PerShare::new(0.0).into(),
        PerTrade::new(0.0).into(),
        PerDollar::new(0.0).into(),
        OpenCloseCost::new(0.0, 0.0, 0.0, 0.0).into(),
    ];
    for model in models {
        assert_eq!(model.calculate(&txn).total_cost, 0.0, "{model}");
    }
}

#[test]
fn huge_trade_stays_finite() {
    let txn = Transaction::new(-1e12, 1e6);
    for model in all_models() {
        let c = model.calculate(&txn);
        assert!(c.total_cost.is_finite() && c.total_cost >= 0.0, "{model}: {c:?}");
    }
}

#[test]
fn display_names_model() {
    for model in all_models() {
        assert!(model.to_string().starts_with(model.name()));
    }
}
