//! Scenario: an episode with partial covers, a reversal, drawdown tracking
//! (including the window restart when a position opens from flat), per-step
//! history, and a reset that clears ledger and metrics together.

use tgym_ledger::{PositionLedger, PriceSource};
use tgym_metrics::RewardKind;
use tgym_session::TradingSession;

fn prices() -> PriceSource {
    // tick:    0      1      2      3      4      5
    let ask = vec![100.5, 104.5, 96.5, 98.5, 95.5, 97.5];
    let bid = vec![99.5, 103.5, 95.5, 97.5, 94.5, 96.5];
    PriceSource::paired(ask, bid).unwrap()
}

#[test]
fn scenario_short_partial_cover_then_reversal() {
    let ledger = PositionLedger::new(prices(), 0.0, 0.0);
    let mut s = TradingSession::new(ledger, RewardKind::Profit, 0);

    // open short at the bid (99.5)
    assert!(s.step(-1.0, 0).unwrap().fill.is_none());

    // cover half at the ask of tick 2 (96.5): (99.5 - 96.5) * 0.5
    let cover = s.step(0.5, 2).unwrap();
    let fill = cover.fill.unwrap();
    assert!((fill.pl - 1.5).abs() < 1e-12);
    // short excursion over [0, 2): max bid 103.5 vs entry 99.5
    assert!((fill.drawdown.unwrap() - (1.0 - 103.5 / 99.5)).abs() < 1e-12);
    assert!((s.position() + 0.5).abs() < 1e-12);
    assert_eq!(s.ledger().lots()[0].entry_price, 99.5);

    // reverse at tick 4 with +1.0: cover 0.5 at 95.5, open 0.5 long
    let rev = s.step(1.0, 4).unwrap();
    let fill = rev.fill.unwrap();
    assert!((fill.pl - 2.0).abs() < 1e-12);
    // window restarted at tick 2: max bid over [2, 4) is 97.5
    assert!((fill.drawdown.unwrap() - (1.0 - 97.5 / 99.5)).abs() < 1e-12);
    assert!((s.position() - 0.5).abs() < 1e-12);
    assert_eq!(s.ledger().lots().len(), 1);
    assert_eq!(s.ledger().lots()[0].entry_price, 95.5);

    let state = *s.metrics().state();
    assert_eq!(state.trades, 2);
    assert!((state.profit - 3.5).abs() < 1e-12);
    assert!((state.max_dd - (1.0 - 103.5 / 99.5)).abs() < 1e-12);

    // one history row per step
    assert_eq!(s.history().len(), 3);
    assert_eq!(s.history().column("Trades"), Some(&[0.0, 1.0, 2.0][..]));
}

#[test]
fn scenario_reset_clears_everything() {
    let ledger = PositionLedger::new(prices(), 0.001, 0.001);
    let mut s = TradingSession::new(ledger, RewardKind::WinRate, 0);

    s.step(1.0, 0).unwrap();
    s.step(-1.0, 1).unwrap();
    s.step(-0.5, 1).unwrap();
    assert_eq!(s.metrics().state().trades, 1);
    assert!(!s.ledger().is_flat());

    s.reset(3);
    assert_eq!(s.position(), 0.0);
    assert!(s.ledger().is_flat());
    assert_eq!(s.metrics().state().trades, 0);
    assert_eq!(s.last_trade_tick(), 3);
    assert_eq!(s.start_tick(), 3);
    assert!(s.history().is_empty());
    assert_eq!(s.info().get("WinRate"), Some(0.0));

    // next episode starts from a flat ledger again
    assert!(s.step(0.25, 3).unwrap().fill.is_none());
}

#[test]
fn scenario_drawdown_ignores_prices_before_the_position_opened() {
    // dip to 50 happens while flat; the long opened at tick 3 never trades below 100
    let prices = PriceSource::single(vec![100.0, 50.0, 100.0, 100.0, 101.0]).unwrap();
    let mut s = TradingSession::new(PositionLedger::new(prices, 0.0, 0.0), RewardKind::Profit, 0);

    s.step(1.0, 3).unwrap();
    assert_eq!(s.last_trade_tick(), 3);

    let fill = s.step(-1.0, 4).unwrap().fill.unwrap();
    assert_eq!(fill.drawdown, Some(0.0));
    assert_eq!(s.metrics().state().max_dd, 0.0);
    assert!(s.info().get("RecoveryFactor").unwrap().is_nan());
}

#[test]
fn scenario_reopen_after_close_restarts_drawdown_window() {
    // tick:           0      1      2     3      4     5
    let prices = vec![100.0, 105.0, 80.0, 100.0, 97.0, 102.0];
    let prices = PriceSource::single(prices).unwrap();
    let mut s = TradingSession::new(PositionLedger::new(prices, 0.0, 0.0), RewardKind::Profit, 0);

    s.step(1.0, 0).unwrap();
    let first = s.step(-1.0, 1).unwrap().fill.unwrap();
    assert_eq!(first.drawdown, Some(0.0));
    assert_eq!(s.last_trade_tick(), 1);

    // flat through the dip at tick 2, reopen at tick 3
    s.step(1.0, 3).unwrap();
    assert_eq!(s.last_trade_tick(), 3);

    // window [3, 5): worst price 97 against entry 100
    let second = s.step(-1.0, 5).unwrap().fill.unwrap();
    assert!((second.drawdown.unwrap() - (97.0 / 100.0 - 1.0)).abs() < 1e-12);
    assert!((s.metrics().state().max_dd - (97.0 / 100.0 - 1.0)).abs() < 1e-12);
    assert_eq!(s.metrics().state().trades, 2);
}

#[test]
fn scenario_adding_to_an_open_position_keeps_the_window() {
    // dip at tick 1 happens while already long; adding at tick 2 must not hide it
    let prices = PriceSource::single(vec![100.0, 90.0, 100.0, 101.0]).unwrap();
    let mut s = TradingSession::new(PositionLedger::new(prices, 0.0, 0.0), RewardKind::Profit, 0);

    s.step(0.5, 0).unwrap();
    s.step(0.5, 2).unwrap();
    assert_eq!(s.last_trade_tick(), 0);

    let fill = s.step(-1.0, 3).unwrap().fill.unwrap();
    assert!((fill.drawdown.unwrap() - (90.0 / 100.0 - 1.0)).abs() < 1e-12);
}
