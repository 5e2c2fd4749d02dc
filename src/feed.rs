// ===============================
// src/feed.rs
// ===============================
//
// Mock trade feed for the demo:
// - random walk per stock, starting at par value
// - round-robin over listed symbols, random side & lot size
//
// Trades are stamped with the caller's `now`, so the whole batch lands
// inside the VWSP window.
//
use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::info;

use crate::domain::{Side, Trade};
use crate::error::Result;
use crate::market::Market;

/// Record `n` random trades across every listed stock.
pub fn run_mock<R: Rng>(market: &mut Market, n: u32, rng: &mut R, now: DateTime<Utc>) -> Result<Vec<Trade>> {
    let symbols: Vec<String> = market.symbols().into_iter().map(str::to_string).collect();
    if symbols.is_empty() || n == 0 {
        return Ok(Vec::new());
    }

    // last px per symbol, mulai dari par value
    let mut last_px: Vec<f64> = symbols
        .iter()
        .map(|s| market.stock(s).map(|st| st.par_value()))
        .collect::<Result<_>>()?;

    let mut out = Vec::with_capacity(n as usize);
    for i in 0..n as usize {
        let k = i % symbols.len();
        // +/- 2% step, floor at 1% of start
        let step = rng.gen_range(-0.02..=0.02);
        last_px[k] = (last_px[k] * (1.0 + step)).max(0.01);
        let side = if rng.gen_bool(0.5) { Side::Buy } else { Side::Sell };
        let qty = rng.gen_range(1..=500_u64);

        let trade = market.stock_mut(&symbols[k])?.record_trade_at(now, qty, side, last_px[k])?;
        out.push(trade);
    }
    info!(trades = out.len(), symbols = symbols.len(), "mock feed done");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_market;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn spreads_trades_over_every_symbol() {
        let mut m = sample_market().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc::now();
        let trades = run_mock(&mut m, 20, &mut rng, now).unwrap();
        assert_eq!(trades.len(), 20);
        for s in m.symbols() {
            assert_eq!(m.stock(s).unwrap().trades().len(), 4);
            assert!(m.stock(s).unwrap().volume_weighted_stock_price_at(now) > 0.0);
        }
        // every stock active -> index is a proper geometric mean, above 1
        assert!(m.gbce_all_share_index_at(now) > 1.0);
    }

    #[test]
    fn noop_on_empty_market_or_zero_count() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(run_mock(&mut Market::new(), 10, &mut rng, Utc::now()).unwrap().is_empty());
        let mut m = sample_market().unwrap();
        assert!(run_mock(&mut m, 0, &mut rng, Utc::now()).unwrap().is_empty());
    }
}
