//! tgym-session
//!
//! Per-step accounting glue for a trading environment loop.
//!
//! Pipeline per step: CLAMP -> LEDGER -> (fill?) METRICS -> REWARD DELTA -> HISTORY
//!
//! - One ledger + metrics pair per session, reset together
//! - The step reward is the change in the configured reward across the step
//! - The drawdown window restarts at every realized fill and whenever a
//!   position opens from flat
//! - No tick advancement, observation windowing, or truncation here; the
//!   caller owns the episode loop

mod history;
mod session;

pub use history::EpisodeHistory;
pub use session::{clamp_action, SessionError, StepOutcome, TradingSession};
