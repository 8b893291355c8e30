//! Reward ratios computed from [`MetricsState`].
//!
//! Every ratio has an explicit fallback for its degenerate inputs, so
//! computing a reward never fails. `RecoveryFactor` is the one ratio whose
//! fallback is NaN (no drawdown yet means the ratio is undefined).
//!
//! `Returns` is the compounded return in percent: `(exp(LogReturns) - 1) * 100`.
//!
//! `SQN` divides by `sqrt(VarPL)` where `VarPL` is the undivided sum of
//! squared deviations. This is not the textbook sample standard deviation;
//! it is kept as-is so reward values stay comparable across versions.

use std::fmt;
use std::str::FromStr;

use crate::{MetricsError, MetricsState};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RewardKind {
    Profit,
    Returns,
    LogReturns,
    WinRate,
    ProfitPerTrade,
    ProfitFactor,
    PesimisticProfitFactor,
    KellyCriterion,
    GHPR,
    AHPR,
    SQN,
    RecoveryFactor,
}

impl RewardKind {
    pub const ALL: [RewardKind; 12] = [
        RewardKind::Profit,
        RewardKind::Returns,
        RewardKind::LogReturns,
        RewardKind::WinRate,
        RewardKind::ProfitPerTrade,
        RewardKind::ProfitFactor,
        RewardKind::PesimisticProfitFactor,
        RewardKind::KellyCriterion,
        RewardKind::GHPR,
        RewardKind::AHPR,
        RewardKind::SQN,
        RewardKind::RecoveryFactor,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RewardKind::Profit => "Profit",
            RewardKind::Returns => "Returns",
            RewardKind::LogReturns => "LogReturns",
            RewardKind::WinRate => "WinRate",
            RewardKind::ProfitPerTrade => "ProfitPerTrade",
            RewardKind::ProfitFactor => "ProfitFactor",
            RewardKind::PesimisticProfitFactor => "PesimisticProfitFactor",
            RewardKind::KellyCriterion => "KellyCriterion",
            RewardKind::GHPR => "GHPR",
            RewardKind::AHPR => "AHPR",
            RewardKind::SQN => "SQN",
            RewardKind::RecoveryFactor => "RecoveryFactor",
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardKind {
    type Err = MetricsError;

    /// Exact, case-sensitive match on [`RewardKind::as_str`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        RewardKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| MetricsError::UnsupportedMetric(name.to_string()))
    }
}

/// Pure function of the state; no mutation.
pub fn compute_reward(s: &MetricsState, kind: RewardKind) -> f64 {
    let trades = s.trades as f64;
    let wins = s.win_trades as f64;
    let losses = s.lose_trades as f64;

    match kind {
        RewardKind::Profit => s.profit,
        RewardKind::Returns => (s.log_returns.exp() - 1.0) * 100.0,
        RewardKind::LogReturns => s.log_returns,
        RewardKind::WinRate => {
            if s.trades == 0 {
                return 0.0;
            }
            wins / trades
        }
        RewardKind::ProfitPerTrade => {
            if s.trades == 0 {
                return 0.0;
            }
            s.profit / trades
        }
        RewardKind::ProfitFactor => {
            if s.lose_trades == 0 {
                return 0.0;
            }
            -s.profit / s.loss
        }
        RewardKind::PesimisticProfitFactor => {
            if s.win_trades == 0 || s.lose_trades == 0 {
                return 0.0;
            }
            let avg_win = s.profit / wins;
            let avg_loss = s.loss / losses;
            -((wins - wins.sqrt()) * avg_win) / ((losses + losses.sqrt()) * avg_loss)
        }
        RewardKind::KellyCriterion => {
            if s.win_trades == 0 || s.lose_trades == 0 {
                return 0.0;
            }
            let win_rate = wins / trades;
            let avg_win = s.profit / wins;
            let avg_loss = s.loss / losses;
            win_rate - (1.0 - win_rate) / avg_win / avg_loss
        }
        RewardKind::GHPR => {
            if s.trades == 0 {
                return 0.0;
            }
            s.log_returns.exp().powf(1.0 / trades)
        }
        RewardKind::AHPR => s.mean_returns,
        RewardKind::SQN => {
            if s.var_pl == 0.0 {
                return 0.0;
            }
            trades.sqrt() * s.mean_pl / s.var_pl.sqrt()
        }
        RewardKind::RecoveryFactor => {
            if s.max_dd == 0.0 {
                return f64::NAN;
            }
            -s.log_returns.exp() / s.max_dd
        }
    }
}
