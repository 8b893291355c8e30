use thiserror::Error;

/// Everything the ledger can refuse.
///
/// Configuration variants surface once, at construction. Order and
/// consistency variants are caller bugs: the ledger never clamps silently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Neither a single series nor a complete ask/bid pair was supplied.
    #[error("invalid price source: need a price series or both ask and bid series")]
    InvalidPriceSource,

    #[error("mismatched ask/bid series: ask has {ask_len} ticks, bid has {bid_len}")]
    MismatchedSeries { ask_len: usize, bid_len: usize },

    #[error("price series is empty")]
    EmptySeries,

    /// Prices must be finite and strictly positive.
    #[error("invalid price at tick {tick}: {price}")]
    InvalidPrice { tick: usize, price: f64 },

    #[error("tick {tick} out of range for a series of {len} ticks")]
    TickOutOfRange { tick: usize, len: usize },

    /// `action`, `position`, or `position + action` left [-1, 1].
    #[error("invalid order: position {position} + action {action} must stay within [-1, 1]")]
    InvalidOrder { position: f64, action: f64 },

    /// The caller's position and the lot sequence disagree.
    #[error("inconsistent ledger: lots hold {tracked}, caller supplied {supplied}")]
    InconsistentLedger { tracked: f64, supplied: f64 },
}

impl LedgerError {
    /// `true` for errors raised while building a [`PriceSource`](crate::PriceSource).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidPriceSource
                | Self::MismatchedSeries { .. }
                | Self::EmptySeries
                | Self::InvalidPrice { .. }
        )
    }
}
