use serde::Serialize;

/// Running sufficient statistics for one session.
///
/// Zero on construction and on reset. Only [`MetricsEngine::update`]
/// mutates it.
///
/// [`MetricsEngine::update`]: crate::MetricsEngine::update
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct MetricsState {
    pub mean_pl: f64,
    /// Sum of squared P&L deviations (not divided by `trades`).
    pub var_pl: f64,
    pub mean_returns: f64,
    /// Sum of squared return deviations (not divided by `trades`).
    pub var_returns: f64,
    /// Cumulative `ln(returns)`.
    pub log_returns: f64,
    /// Sum of positive realized P&L.
    pub profit: f64,
    /// Sum of negative realized P&L (<= 0).
    pub loss: f64,
    pub trades: u64,
    pub win_trades: u64,
    pub lose_trades: u64,
    /// Most negative drawdown seen (<= 0).
    pub max_dd: f64,
}

/// Names of the state fields, in snapshot order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    MeanPL,
    VarPL,
    MeanReturns,
    VarReturns,
    LogReturns,
    Profit,
    Loss,
    Trades,
    WinTrades,
    LoseTrades,
    MaxDD,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::MeanPL,
        Metric::VarPL,
        Metric::MeanReturns,
        Metric::VarReturns,
        Metric::LogReturns,
        Metric::Profit,
        Metric::Loss,
        Metric::Trades,
        Metric::WinTrades,
        Metric::LoseTrades,
        Metric::MaxDD,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::MeanPL => "MeanPL",
            Metric::VarPL => "VarPL",
            Metric::MeanReturns => "MeanReturns",
            Metric::VarReturns => "VarReturns",
            Metric::LogReturns => "LogReturns",
            Metric::Profit => "Profit",
            Metric::Loss => "Loss",
            Metric::Trades => "Trades",
            Metric::WinTrades => "WinTrades",
            Metric::LoseTrades => "LoseTrades",
            Metric::MaxDD => "MaxDD",
        }
    }
}

impl MetricsState {
    /// Field value as a float, counters included.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::MeanPL => self.mean_pl,
            Metric::VarPL => self.var_pl,
            Metric::MeanReturns => self.mean_returns,
            Metric::VarReturns => self.var_returns,
            Metric::LogReturns => self.log_returns,
            Metric::Profit => self.profit,
            Metric::Loss => self.loss,
            Metric::Trades => self.trades as f64,
            Metric::WinTrades => self.win_trades as f64,
            Metric::LoseTrades => self.lose_trades as f64,
            Metric::MaxDD => self.max_dd,
        }
    }
}
