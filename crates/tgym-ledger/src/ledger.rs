//! Position ledger: turns signed position-change orders into realized fills.
//!
//! # Accounting rules
//! - Opening from flat, or adding in the current direction, pushes a lot and
//!   realizes nothing.
//! - An opposing order offsets `min(|position|, |action|)` against the
//!   weighted-average entry price of the open lots (weights = `|amount|`).
//!   `pl = diff * offset - |diff| * offset * fee`, where the fee is the ask
//!   fee when closing a long and the bid fee when closing a short.
//! - A partial offset scales every lot by `new_position / position`, which
//!   keeps the weighted-average entry price unchanged.
//! - A reversal clears every lot and opens one lot for the excess in the new
//!   direction, at the same trade price. Only one fill is produced.
//!
//! # Invariants
//! - All persisted lots share the sign of the net position.
//! - `position()` equals the signed sum of every applied action.
//!
//! # Determinism
//! No IO, no time, no randomness. Two ledgers fed the same orders hold
//! identical state.

use tracing::debug;

use crate::{is_flat, Direction, Fill, LedgerError, Lot, PriceSource, POSITION_EPSILON};

/// Net position and weighted-average cost basis for one session.
#[derive(Clone, Debug)]
pub struct PositionLedger {
    prices: PriceSource,
    fee_ask_percent: f64,
    fee_bid_percent: f64,
    lots: Vec<Lot>,
}

impl PositionLedger {
    /// Fees are fractions (`0.0003` = 3 bps) of the absolute realized price
    /// difference.
    pub fn new(prices: PriceSource, fee_ask_percent: f64, fee_bid_percent: f64) -> Self {
        Self {
            prices,
            fee_ask_percent,
            fee_bid_percent,
            lots: Vec::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Write surface
    // -----------------------------------------------------------------------

    /// Apply one order.
    ///
    /// `position` is the caller's net exposure before this order; `action`
    /// is the requested change. The caller clamps so that
    /// `|position + action| <= 1`. Ticks `[last_trade_tick, tick)` bound the
    /// drawdown lookback for a closing order.
    ///
    /// Returns `Ok(None)` for a no-op (`action == 0`) or an opening order,
    /// and `Ok(Some(fill))` when exposure was offset.
    ///
    /// # Errors
    /// [`LedgerError::InvalidOrder`] on out-of-bounds input,
    /// [`LedgerError::InconsistentLedger`] if `position` disagrees with the
    /// lots, [`LedgerError::TickOutOfRange`] for a bad tick. The ledger is
    /// **not** mutated on error.
    pub fn apply(
        &mut self,
        position: f64,
        action: f64,
        tick: usize,
        last_trade_tick: usize,
    ) -> Result<Option<Fill>, LedgerError> {
        if action == 0.0 {
            return Ok(None);
        }
        Self::validate_order(position, action)?;
        self.check_consistent(position)?;

        let trade_price = self.prices.trade_price(tick, action)?;

        let held = Direction::of(position).filter(|_| !is_flat(position));
        let incoming = Direction::of(action);

        match held {
            Some(dir) if Some(dir) != incoming => {
                let fill = self.offset(dir, position, action, trade_price, tick, last_trade_tick)?;
                Ok(Some(fill))
            }
            _ => {
                if held.is_none() {
                    self.lots.clear();
                }
                self.lots.push(Lot::new(trade_price, action));
                debug!(tick, action, price = trade_price, lots = self.lots.len(), "lot opened");
                Ok(None)
            }
        }
    }

    /// Drop all open lots (episode boundary).
    pub fn reset(&mut self) {
        self.lots.clear();
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// Net position: signed sum of open lot amounts.
    pub fn position(&self) -> f64 {
        self.lots.iter().map(|l| l.amount).sum()
    }

    pub fn is_flat(&self) -> bool {
        is_flat(self.position())
    }

    /// Open lots in the order they were opened.
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Weighted-average entry price (weights = `|amount|`), `None` when flat.
    pub fn average_entry_price(&self) -> Option<f64> {
        weighted_average(&self.lots)
    }

    /// Mark-to-market P&L of the open lots at the price that would close
    /// them. Fees are not deducted.
    pub fn unrealized_pl(&self, tick: usize) -> Result<f64, LedgerError> {
        let position = self.position();
        let Some(avg) = self.average_entry_price() else {
            return Ok(0.0);
        };
        let mark = self.prices.trade_price(tick, -position)?;
        Ok((mark - avg) * position)
    }

    pub fn prices(&self) -> &PriceSource {
        &self.prices
    }

    pub fn fee_ask_percent(&self) -> f64 {
        self.fee_ask_percent
    }

    pub fn fee_bid_percent(&self) -> f64 {
        self.fee_bid_percent
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    fn offset(
        &mut self,
        held: Direction,
        position: f64,
        action: f64,
        trade_price: f64,
        tick: usize,
        last_trade_tick: usize,
    ) -> Result<Fill, LedgerError> {
        let offset_amount = position.abs().min(action.abs());
        let Some(avg_entry) = weighted_average(&self.lots) else {
            return Err(LedgerError::InconsistentLedger {
                tracked: self.position(),
                supplied: position,
            });
        };
        let first_entry = self.lots.first().map_or(avg_entry, |l| l.entry_price);

        let (price_diff, fee_rate) = match held {
            Direction::Long => (trade_price - avg_entry, self.fee_ask_percent),
            Direction::Short => (avg_entry - trade_price, self.fee_bid_percent),
        };
        let pl = price_diff * offset_amount - price_diff.abs() * offset_amount * fee_rate;

        let drawdown = self
            .prices
            .adverse_excursion(held, first_entry, last_trade_tick, tick);

        let next = position + action;
        if is_flat(next) {
            self.lots.clear();
        } else if Direction::of(next) != Some(held) {
            self.lots.clear();
            self.lots.push(Lot::new(trade_price, next));
        } else {
            let scale = next / position;
            for lot in &mut self.lots {
                lot.amount *= scale;
            }
        }

        debug!(
            tick,
            action,
            offset = offset_amount,
            entry = avg_entry,
            exit = trade_price,
            pl,
            remaining = self.position(),
            "position offset"
        );

        Ok(Fill {
            pl,
            entry_price: avg_entry,
            exit_price: trade_price,
            amount: offset_amount,
            direction: held,
            tick,
            drawdown,
        })
    }

    fn validate_order(position: f64, action: f64) -> Result<(), LedgerError> {
        let bound = 1.0 + POSITION_EPSILON;
        let in_bounds = action.is_finite()
            && position.is_finite()
            && action.abs() <= bound
            && position.abs() <= bound
            && (position + action).abs() <= bound;
        if !in_bounds {
            return Err(LedgerError::InvalidOrder { position, action });
        }
        Ok(())
    }

    fn check_consistent(&self, position: f64) -> Result<(), LedgerError> {
        let tracked = self.position();
        let mixed = self.lots.iter().any(|l| l.is_long()) && self.lots.iter().any(|l| l.is_short());
        if mixed || (tracked - position).abs() > POSITION_EPSILON {
            return Err(LedgerError::InconsistentLedger {
                tracked,
                supplied: position,
            });
        }
        Ok(())
    }
}

fn weighted_average(lots: &[Lot]) -> Option<f64> {
    let weight: f64 = lots.iter().map(Lot::abs_amount).sum();
    if weight <= 0.0 {
        return None;
    }
    let notional: f64 = lots.iter().map(|l| l.entry_price * l.abs_amount()).sum();
    Some(notional / weight)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
