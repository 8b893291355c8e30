//! `tgym replay`: drive a [`TradingSession`] from an order file.

use anyhow::{Context, Result};
use serde::Serialize;
use tgym_ledger::PositionLedger;
use tgym_metrics::MetricsSnapshot;
use tgym_session::TradingSession;
use tracing::info;

use super::{load_orders_csv, load_price_source};

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub config_hash: String,
    pub reward: &'static str,
    pub steps: usize,
    pub fills: usize,
    pub position: f64,
    pub metrics: MetricsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewards: Option<Vec<f64>>,
}

pub fn replay(
    config_paths: &[String],
    prices_path: &str,
    orders_path: &str,
    with_history: bool,
) -> Result<()> {
    let report = run_replay(config_paths, prices_path, orders_path, with_history)?;
    let json = serde_json::to_string_pretty(&report).context("serialize replay report failed")?;
    println!("{json}");
    Ok(())
}

pub fn run_replay(
    config_paths: &[String],
    prices_path: &str,
    orders_path: &str,
    with_history: bool,
) -> Result<ReplayReport> {
    let tgym_config::LoadedSession {
        config: loaded,
        session: cfg,
    } = tgym_config::load_session_config(config_paths)?;
    let kind = cfg.reward_kind()?;

    let prices = load_price_source(prices_path, &cfg.data)?;
    let orders = load_orders_csv(orders_path)?;

    let ledger = PositionLedger::new(prices, cfg.fees.ask_percent, cfg.fees.bid_percent);
    let mut session = TradingSession::new(ledger, kind, cfg.session.start_tick);

    let mut rewards = Vec::with_capacity(orders.len());
    let mut fills = 0_usize;
    for (i, order) in orders.iter().enumerate() {
        let out = session
            .step(order.action, order.tick)
            .with_context(|| format!("order {} (tick={}, action={})", i + 1, order.tick, order.action))?;
        if out.fill.is_some() {
            fills += 1;
        }
        rewards.push(out.reward);
    }

    info!(
        config_hash = %loaded.config_hash,
        steps = orders.len(),
        fills,
        "replay complete"
    );

    Ok(ReplayReport {
        config_hash: loaded.config_hash,
        reward: kind.as_str(),
        steps: orders.len(),
        fills,
        position: session.position(),
        metrics: session.info(),
        rewards: with_history.then_some(rewards),
    })
}
