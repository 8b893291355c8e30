use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tgym_metrics::RewardKind;

/// Typed view of a merged session config.
///
/// ```yaml
/// fees:
///   ask_percent: 0.0003
///   bid_percent: 0.0003
/// session:
///   reward: LogReturns
///   start_tick: 0
/// data:
///   price_column: close
///   ask_column: ask
///   bid_column: bid
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub fees: FeeConfig,
    pub session: SessionSection,
    pub data: DataColumns,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeeConfig {
    /// Fraction charged when closing a long.
    pub ask_percent: f64,
    /// Fraction charged when closing a short.
    pub bid_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    pub reward: String,
    pub start_tick: usize,
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            reward: RewardKind::LogReturns.as_str().to_string(),
            start_tick: 0,
        }
    }
}

/// Which CSV columns feed the price source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataColumns {
    pub price_column: Option<String>,
    pub ask_column: Option<String>,
    pub bid_column: Option<String>,
}

impl Default for DataColumns {
    fn default() -> Self {
        Self {
            price_column: Some("close".to_string()),
            ask_column: None,
            bid_column: None,
        }
    }
}

impl DataColumns {
    pub fn has_pair(&self) -> bool {
        self.ask_column.is_some() && self.bid_column.is_some()
    }
}

impl SessionConfig {
    /// Deserialize and validate.
    pub fn from_json(v: &Value) -> Result<Self> {
        let cfg: SessionConfig =
            serde_json::from_value(v.clone()).context("invalid session config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, fee) in [
            ("fees.ask_percent", self.fees.ask_percent),
            ("fees.bid_percent", self.fees.bid_percent),
        ] {
            if !fee.is_finite() || !(0.0..1.0).contains(&fee) {
                bail!("CONFIG_INVALID_FEE {}={} (must be a fraction in [0, 1))", name, fee);
            }
        }

        self.reward_kind()?;

        if self.data.price_column.is_none() && !self.data.has_pair() {
            bail!(
                "CONFIG_NO_PRICE_SOURCE: set data.price_column or both data.ask_column and data.bid_column"
            );
        }
        Ok(())
    }

    pub fn reward_kind(&self) -> Result<RewardKind> {
        self.session
            .reward
            .parse()
            .with_context(|| format!("session.reward '{}'", self.session.reward))
    }
}
