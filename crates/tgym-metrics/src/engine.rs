use tgym_ledger::Fill;
use tracing::{debug, warn};

use crate::{compute_reward, welford_update, MetricsError, MetricsSnapshot, MetricsState, RewardKind};

/// Owns the [`MetricsState`] of one session.
#[derive(Clone, Debug, Default)]
pub struct MetricsEngine {
    state: MetricsState,
}

impl MetricsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one realized fill into the running statistics.
    ///
    /// `returns = pl / entry_price + 1`. Mean and sum of squared deviations
    /// of both P&L and returns follow Welford; `MaxDD` keeps the most
    /// negative drawdown carried by any fill.
    pub fn update(&mut self, fill: &Fill) {
        let s = &mut self.state;
        let pl = fill.pl;
        let returns = pl / fill.entry_price + 1.0;

        (s.mean_pl, s.var_pl) = welford_update(s.mean_pl, s.var_pl, s.trades, pl);
        (s.mean_returns, s.var_returns) =
            welford_update(s.mean_returns, s.var_returns, s.trades, returns);

        let log_return = returns.ln();
        if !log_return.is_finite() {
            warn!(tick = fill.tick, pl, returns, "non-finite log return folded into metrics");
        }
        s.log_returns += log_return;

        s.profit += pl.max(0.0);
        s.loss += pl.min(0.0);
        s.trades += 1;
        if pl > 0.0 {
            s.win_trades += 1;
        } else if pl < 0.0 {
            s.lose_trades += 1;
        }

        if let Some(dd) = fill.drawdown {
            s.max_dd = s.max_dd.min(dd);
        }

        debug!(
            tick = fill.tick,
            pl,
            returns,
            trades = s.trades,
            log_returns = s.log_returns,
            max_dd = s.max_dd,
            "metrics updated"
        );
    }

    pub fn reward(&self, kind: RewardKind) -> f64 {
        compute_reward(&self.state, kind)
    }

    /// String-keyed [`reward`](Self::reward).
    ///
    /// # Errors
    /// [`MetricsError::UnsupportedMetric`] for an unknown name.
    pub fn reward_by_name(&self, name: &str) -> Result<f64, MetricsError> {
        let kind: RewardKind = name.parse()?;
        Ok(self.reward(kind))
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot::from_state(&self.state)
    }

    pub fn state(&self) -> &MetricsState {
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = MetricsState::default();
    }
}
