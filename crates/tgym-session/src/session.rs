use thiserror::Error;
use tracing::{debug, info};

use tgym_ledger::{is_flat, Fill, LedgerError, PositionLedger};
use tgym_metrics::{MetricsEngine, MetricsError, MetricsSnapshot, RewardKind};

use crate::EpisodeHistory;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
}

/// Clip `action` so both it and `position + action` stay within [-1, 1].
pub fn clamp_action(position: f64, action: f64) -> f64 {
    let action = action.clamp(-1.0, 1.0);
    if position + action > 1.0 {
        1.0 - position
    } else if position + action < -1.0 {
        -1.0 - position
    } else {
        action
    }
}

/// Result of a single [`TradingSession::step`].
#[derive(Clone, Debug)]
pub struct StepOutcome {
    /// Change of the configured reward across this step (0.0 without a fill).
    pub reward: f64,
    /// Action after clamping.
    pub applied_action: f64,
    /// Position after the step.
    pub position: f64,
    pub fill: Option<Fill>,
    pub info: MetricsSnapshot,
}

/// One episode's ledger + metrics pair and the caller-side position.
#[derive(Clone, Debug)]
pub struct TradingSession {
    ledger: PositionLedger,
    metrics: MetricsEngine,
    reward_kind: RewardKind,
    position: f64,
    start_tick: usize,
    last_trade_tick: usize,
    history: EpisodeHistory,
}

impl TradingSession {
    pub fn new(ledger: PositionLedger, reward_kind: RewardKind, start_tick: usize) -> Self {
        let mut session = Self {
            ledger,
            metrics: MetricsEngine::new(),
            reward_kind,
            position: 0.0,
            start_tick,
            last_trade_tick: start_tick,
            history: EpisodeHistory::new(),
        };
        session.reset(start_tick);
        session
    }

    /// Like [`new`](Self::new), with the reward given by name.
    pub fn with_reward_name(
        ledger: PositionLedger,
        reward: &str,
        start_tick: usize,
    ) -> Result<Self, SessionError> {
        let kind: RewardKind = reward.parse()?;
        Ok(Self::new(ledger, kind, start_tick))
    }

    /// Execute one order at `tick`.
    ///
    /// # Errors
    /// Forwards ledger errors (bad tick, inconsistent state). Session state is
    /// unchanged on error.
    pub fn step(&mut self, action: f64, tick: usize) -> Result<StepOutcome, SessionError> {
        let applied = clamp_action(self.position, action);
        let before = self.metrics.reward(self.reward_kind);

        let fill = self
            .ledger
            .apply(self.position, applied, tick, self.last_trade_tick)?;

        let opened_from_flat = is_flat(self.position) && applied != 0.0;
        let reward = match &fill {
            Some(f) => {
                self.metrics.update(f);
                self.last_trade_tick = tick;
                self.metrics.reward(self.reward_kind) - before
            }
            None => {
                // drawdown lookback covers only the life of the new position
                if opened_from_flat {
                    self.last_trade_tick = tick;
                }
                0.0
            }
        };

        let next = self.position + applied;
        self.position = if is_flat(next) { 0.0 } else { next };

        let info = self.metrics.snapshot();
        self.history.push(&info);

        debug!(
            tick,
            action,
            applied,
            position = self.position,
            reward,
            filled = fill.is_some(),
            "step"
        );

        Ok(StepOutcome {
            reward,
            applied_action: applied,
            position: self.position,
            fill,
            info,
        })
    }

    /// Start a new episode: ledger, metrics, position, and history together.
    pub fn reset(&mut self, start_tick: usize) {
        self.ledger.reset();
        self.metrics.reset();
        self.position = 0.0;
        self.start_tick = start_tick;
        self.last_trade_tick = start_tick;
        self.history.clear();
        info!(start_tick, reward = %self.reward_kind, "session reset");
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn last_trade_tick(&self) -> usize {
        self.last_trade_tick
    }

    pub fn start_tick(&self) -> usize {
        self.start_tick
    }

    pub fn reward_kind(&self) -> RewardKind {
        self.reward_kind
    }

    pub fn info(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn ledger(&self) -> &PositionLedger {
        &self.ledger
    }

    pub fn metrics(&self) -> &MetricsEngine {
        &self.metrics
    }

    pub fn history(&self) -> &EpisodeHistory {
        &self.history
    }
}
