/// Direction of an exposure (never flat).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    /// Direction of a signed amount; `None` for zero.
    pub fn of(amount: f64) -> Option<Self> {
        if amount > 0.0 {
            Some(Direction::Long)
        } else if amount < 0.0 {
            Some(Direction::Short)
        } else {
            None
        }
    }

    pub fn sign(self) -> f64 {
        match self {
            Direction::Long => 1.0,
            Direction::Short => -1.0,
        }
    }
}

/// An open inventory entry. `amount` carries direction:
/// +amount = long lot, -amount = short lot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Lot {
    pub entry_price: f64,
    pub amount: f64,
}

impl Lot {
    pub fn new(entry_price: f64, amount: f64) -> Self {
        debug_assert!(entry_price > 0.0, "Lot.entry_price must be > 0");
        Self {
            entry_price,
            amount,
        }
    }

    pub fn is_long(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_short(&self) -> bool {
        self.amount < 0.0
    }

    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// The realized outcome of an offsetting order.
///
/// `pl` is net of fees and already scaled by `amount`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fill {
    /// Realized profit/loss for the offset portion.
    pub pl: f64,
    /// Weighted-average entry price of the lots that were offset.
    pub entry_price: f64,
    /// Price the offset executed at.
    pub exit_price: f64,
    /// Offset size, always positive.
    pub amount: f64,
    /// Direction of the exposure that was (partly) closed.
    pub direction: Direction,
    pub tick: usize,
    /// Worst adverse excursion since the last trade, as a fraction of the
    /// first lot's entry price. `None` when the lookback window is empty.
    pub drawdown: Option<f64>,
}
