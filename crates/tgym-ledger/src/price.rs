//! Price lookup for the ledger.
//!
//! A session is configured with exactly one of:
//! - a single price series, used for both directions, or
//! - a paired ask/bid series of equal length (ask when buying, bid when
//!   selling, midpoint for a no-op).
//!
//! Both forms are validated once, at construction. Every lookup after that
//! only has to bounds-check the tick.

use tracing::trace;

use crate::{Direction, LedgerError};

#[derive(Clone, Debug, PartialEq)]
enum Series {
    Single(Vec<f64>),
    Paired { ask: Vec<f64>, bid: Vec<f64> },
}

/// Validated price source, indexed by tick.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceSource {
    series: Series,
}

impl PriceSource {
    /// One series for both directions.
    pub fn single(prices: Vec<f64>) -> Result<Self, LedgerError> {
        validate_series(&prices)?;
        Ok(Self {
            series: Series::Single(prices),
        })
    }

    /// Ask/bid pair; both series must have the same length.
    pub fn paired(ask: Vec<f64>, bid: Vec<f64>) -> Result<Self, LedgerError> {
        if ask.len() != bid.len() {
            return Err(LedgerError::MismatchedSeries {
                ask_len: ask.len(),
                bid_len: bid.len(),
            });
        }
        validate_series(&ask)?;
        validate_series(&bid)?;
        Ok(Self {
            series: Series::Paired { ask, bid },
        })
    }

    /// Build from optionally-configured columns.
    ///
    /// A complete ask/bid pair wins over a single series. Half a pair with no
    /// single series is rejected.
    pub fn from_parts(
        prices: Option<Vec<f64>>,
        ask: Option<Vec<f64>>,
        bid: Option<Vec<f64>>,
    ) -> Result<Self, LedgerError> {
        match (prices, ask, bid) {
            (_, Some(ask), Some(bid)) => Self::paired(ask, bid),
            (Some(prices), _, _) => Self::single(prices),
            _ => Err(LedgerError::InvalidPriceSource),
        }
    }

    pub fn is_paired(&self) -> bool {
        matches!(self.series, Series::Paired { .. })
    }

    /// Number of ticks.
    pub fn len(&self) -> usize {
        match &self.series {
            Series::Single(p) => p.len(),
            Series::Paired { ask, .. } => ask.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Execution price for an order of the given signed size.
    ///
    /// Paired: ask for `action > 0`, bid for `action < 0`, midpoint for 0.
    pub fn trade_price(&self, tick: usize, action: f64) -> Result<f64, LedgerError> {
        self.check_tick(tick)?;
        let px = match &self.series {
            Series::Single(p) => p[tick],
            Series::Paired { ask, bid } => {
                if action > 0.0 {
                    ask[tick]
                } else if action < 0.0 {
                    bid[tick]
                } else {
                    (ask[tick] + bid[tick]) / 2.0
                }
            }
        };
        trace!(tick, action, price = px, "trade price");
        Ok(px)
    }

    pub fn mid_price(&self, tick: usize) -> Result<f64, LedgerError> {
        self.trade_price(tick, 0.0)
    }

    /// Worst adverse excursion over ticks `[from, to)`, relative to `entry_price`.
    ///
    /// long:  min(ask) / entry - 1
    /// short: 1 - max(bid) / entry
    ///
    /// The window is clamped to the series. An empty window yields `None`.
    pub fn adverse_excursion(
        &self,
        direction: Direction,
        entry_price: f64,
        from: usize,
        to: usize,
    ) -> Option<f64> {
        let to = to.min(self.len());
        if from >= to {
            return None;
        }

        let window = match (&self.series, direction) {
            (Series::Single(p), _) => &p[from..to],
            (Series::Paired { ask, .. }, Direction::Long) => &ask[from..to],
            (Series::Paired { bid, .. }, Direction::Short) => &bid[from..to],
        };

        match direction {
            Direction::Long => {
                let low = window.iter().copied().fold(f64::INFINITY, f64::min);
                Some(low / entry_price - 1.0)
            }
            Direction::Short => {
                let high = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                Some(1.0 - high / entry_price)
            }
        }
    }

    fn check_tick(&self, tick: usize) -> Result<(), LedgerError> {
        let len = self.len();
        if tick >= len {
            return Err(LedgerError::TickOutOfRange { tick, len });
        }
        Ok(())
    }
}

fn validate_series(prices: &[f64]) -> Result<(), LedgerError> {
    if prices.is_empty() {
        return Err(LedgerError::EmptySeries);
    }
    if let Some((tick, &price)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !p.is_finite() || **p <= 0.0)
    {
        return Err(LedgerError::InvalidPrice { tick, price });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paired() -> PriceSource {
        PriceSource::paired(vec![101.0, 103.0, 99.0], vec![99.0, 101.0, 97.0]).unwrap()
    }

    #[test]
    fn single_series_ignores_direction() {
        let p = PriceSource::single(vec![100.0, 110.0]).unwrap();
        assert_eq!(p.trade_price(1, 0.5).unwrap(), 110.0);
        assert_eq!(p.trade_price(1, -0.5).unwrap(), 110.0);
        assert_eq!(p.mid_price(0).unwrap(), 100.0);
        assert!(!p.is_paired());
    }

    #[test]
    fn paired_series_picks_side_by_sign() {
        let p = paired();
        assert_eq!(p.trade_price(0, 1.0).unwrap(), 101.0);
        assert_eq!(p.trade_price(0, -1.0).unwrap(), 99.0);
        assert_eq!(p.trade_price(0, 0.0).unwrap(), 100.0);
        assert!(p.is_paired());
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = PriceSource::paired(vec![1.0, 2.0], vec![1.0]);
        assert_eq!(
            err,
            Err(LedgerError::MismatchedSeries {
                ask_len: 2,
                bid_len: 1
            })
        );
        assert!(err.unwrap_err().is_configuration());
    }

    #[test]
    fn rejects_missing_source() {
        assert_eq!(
            PriceSource::from_parts(None, Some(vec![1.0]), None),
            Err(LedgerError::InvalidPriceSource)
        );
        assert_eq!(
            PriceSource::from_parts(None, None, None),
            Err(LedgerError::InvalidPriceSource)
        );
    }

    #[test]
    fn from_parts_prefers_complete_pair() {
        let p = PriceSource::from_parts(
            Some(vec![50.0]),
            Some(vec![51.0]),
            Some(vec![49.0]),
        )
        .unwrap();
        assert!(p.is_paired());

        let p = PriceSource::from_parts(Some(vec![50.0]), Some(vec![51.0]), None).unwrap();
        assert!(!p.is_paired());
    }

    #[test]
    fn rejects_empty_and_non_positive_prices() {
        assert_eq!(PriceSource::single(vec![]), Err(LedgerError::EmptySeries));
        assert_eq!(
            PriceSource::single(vec![1.0, 0.0]),
            Err(LedgerError::InvalidPrice {
                tick: 1,
                price: 0.0
            })
        );
        assert!(matches!(
            PriceSource::single(vec![f64::NAN]),
            Err(LedgerError::InvalidPrice { tick: 0, .. })
        ));
    }

    #[test]
    fn out_of_range_tick() {
        let p = paired();
        assert_eq!(
            p.trade_price(3, 1.0),
            Err(LedgerError::TickOutOfRange { tick: 3, len: 3 })
        );
    }

    #[test]
    fn excursion_uses_ask_for_long_and_bid_for_short() {
        let p = paired();
        // long: min ask over [0, 3) = 99 -> 99/100 - 1
        let dd = p.adverse_excursion(Direction::Long, 100.0, 0, 3).unwrap();
        assert!((dd - (-0.01)).abs() < 1e-12);
        // short: max bid over [0, 2) = 101 -> 1 - 101/100
        let dd = p.adverse_excursion(Direction::Short, 100.0, 0, 2).unwrap();
        assert!((dd - (-0.01)).abs() < 1e-12);
    }

    #[test]
    fn excursion_window_is_clamped_and_may_be_empty() {
        let p = paired();
        assert_eq!(p.adverse_excursion(Direction::Long, 100.0, 2, 2), None);
        assert_eq!(p.adverse_excursion(Direction::Long, 100.0, 5, 9), None);
        assert!(p.adverse_excursion(Direction::Long, 100.0, 2, 99).is_some());
    }
}
