//! Scenario: a reversal closes the whole short and opens the excess long.
//!
//! Position -0.6, action +1.0: one fill for 0.6, lot history cleared, and a
//! single +0.4 lot opened at the same trade price. No second fill.

use tgym_ledger::{PositionLedger, PriceSource};

#[test]
fn scenario_reversal_from_short_to_long() {
    // paired source: buying executes at the ask
    let ask = vec![101.0, 99.0, 104.0];
    let bid = vec![100.0, 98.0, 103.0];
    let prices = PriceSource::paired(ask, bid).unwrap();
    let mut ledger = PositionLedger::new(prices, 0.0, 0.0);

    // two short lots sold at the bid: 0.3 @ 100, 0.3 @ 98
    ledger.apply(0.0, -0.3, 0, 0).unwrap();
    ledger.apply(-0.3, -0.3, 1, 0).unwrap();
    assert_eq!(ledger.lots().len(), 2);

    let fill = ledger.apply(-0.6, 1.0, 2, 0).unwrap().expect("reversal fills once");

    assert!((fill.amount - 0.6).abs() < 1e-12);
    assert!((fill.entry_price - 99.0).abs() < 1e-12);
    assert_eq!(fill.exit_price, 104.0);
    // (99 - 104) * 0.6
    assert!((fill.pl + 3.0).abs() < 1e-9);

    assert_eq!(ledger.lots().len(), 1);
    assert_eq!(ledger.lots()[0].entry_price, 104.0);
    assert!((ledger.lots()[0].amount - 0.4).abs() < 1e-12);
    assert!(ledger.lots()[0].is_long());

    // short drawdown over [0, 2): max bid 100 vs first entry 100
    assert_eq!(fill.drawdown, Some(0.0));
}
