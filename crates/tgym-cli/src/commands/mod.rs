//! Command handler modules for tgym-cli.
//!
//! Shared CSV loading lives here. Command-specific logic lives in the
//! submodules.

pub mod replay;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tgym_config::DataColumns;
use tgym_ledger::PriceSource;
use tgym_metrics::RewardKind;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

pub fn reward_names() -> impl Iterator<Item = &'static str> {
    RewardKind::ALL.into_iter().map(|k| k.as_str())
}

/// One row of an order file.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct OrderRow {
    pub tick: usize,
    pub action: f64,
}

/// Load `tick,action` rows in file order.
pub fn load_orders_csv(path: &str) -> Result<Vec<OrderRow>> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("open orders csv: {path}"))?;
    let mut out = Vec::new();
    for (i, rec) in rdr.deserialize().enumerate() {
        let row: OrderRow = rec.with_context(|| format!("orders csv row {}", i + 1))?;
        out.push(row);
    }
    Ok(out)
}

/// Build a [`PriceSource`] from the columns named in `columns`.
///
/// Columns named in config but absent from the header are an error, even
/// when another source would have been sufficient.
pub fn load_price_source(path: &str, columns: &DataColumns) -> Result<PriceSource> {
    let mut rdr =
        csv::Reader::from_path(path).with_context(|| format!("open prices csv: {path}"))?;
    let headers = rdr
        .headers()
        .with_context(|| format!("read prices csv header: {path}"))?
        .clone();

    let index_of = |name: &Option<String>| -> Result<Option<usize>> {
        match name {
            None => Ok(None),
            Some(n) => match headers.iter().position(|h| h.trim() == n) {
                Some(i) => Ok(Some(i)),
                None => bail!("PRICE_COLUMN_MISSING '{}' not found in {}", n, path),
            },
        }
    };

    // A complete pair makes the single column optional.
    let price_idx = if columns.has_pair() {
        headers
            .iter()
            .position(|h| Some(h.trim()) == columns.price_column.as_deref())
    } else {
        index_of(&columns.price_column)?
    };
    let ask_idx = index_of(&columns.ask_column)?;
    let bid_idx = index_of(&columns.bid_column)?;

    let mut price = price_idx.map(|_| Vec::new());
    let mut ask = ask_idx.map(|_| Vec::new());
    let mut bid = bid_idx.map(|_| Vec::new());

    for (row, rec) in rdr.records().enumerate() {
        let rec = rec.with_context(|| format!("prices csv row {}", row + 1))?;
        for (idx, series) in [
            (price_idx, price.as_mut()),
            (ask_idx, ask.as_mut()),
            (bid_idx, bid.as_mut()),
        ] {
            if let (Some(idx), Some(series)) = (idx, series) {
                let field = rec.get(idx).unwrap_or("").trim();
                let v: f64 = field.parse().with_context(|| {
                    format!("prices csv row {} column {}: '{}'", row + 1, idx, field)
                })?;
                series.push(v);
            }
        }
    }

    let source = PriceSource::from_parts(price, ask, bid)
        .with_context(|| format!("build price source from {path}"))?;
    Ok(source)
}
