//! tgym-ledger
//!
//! Position ledger for fractional-position trading sessions.
//! - Orders are signed position changes in [-1, 1]
//! - Weighted-average cost basis across partial offsets and reversals
//! - At most one realized fill per order (opening never realizes P&L)
//! - Adverse-excursion lookup for drawdown tracking
//! - Pure deterministic logic (no IO, no time)

mod error;
mod ledger;
mod price;
mod types;

pub use error::LedgerError;
pub use ledger::PositionLedger;
pub use price::PriceSource;
pub use types::{Direction, Fill, Lot};

/// Tolerance used for position bounds and flatness checks.
pub const POSITION_EPSILON: f64 = 1e-9;

/// `true` if `x` is within [`POSITION_EPSILON`] of zero.
pub fn is_flat(x: f64) -> bool {
    x.abs() <= POSITION_EPSILON
}
