// ===============================
// src/metrics.rs
// ===============================
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

use crate::domain::IndexSnapshot;
use crate::market::Market;

// Single custom registry (we register everything here)
pub static REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Prices are exported as integer ticks of 1e-4.
pub const PRICE_SCALE: f64 = 10_000.0;

pub fn to_ticks(px: f64) -> i64 {
    if px.is_finite() { (px * PRICE_SCALE).round() as i64 } else { 0 }
}

// -------- Ledger --------
pub static TRADES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("trades_recorded_total", "trades appended to a stock ledger"),
        &["symbol", "side"],
    )
    .unwrap()
});

pub static REJECTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("trades_rejected_total", "inputs rejected by validation (label: reason)"),
        &["reason"],
    )
    .unwrap()
});

// -------- Prices --------
pub static VWSP: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("stock_vwsp", "volume weighted stock price, last computed (1e-4 ticks)"),
        &["symbol"],
    )
    .unwrap()
});

pub static GBCE_INDEX: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("gbce_all_share_index", "GBCE all share index, last computed (1e-4 ticks)").unwrap()
});

pub static STOCKS_REGISTERED: Lazy<IntGauge> =
    Lazy::new(|| IntGauge::new("market_stocks_registered", "stocks listed on the market").unwrap());

pub fn init() {
    // Register all metrics to the custom registry; double registration is ignored
    for m in [
        REGISTRY.register(Box::new(TRADES.clone())),
        REGISTRY.register(Box::new(REJECTS.clone())),
        REGISTRY.register(Box::new(VWSP.clone())),
        REGISTRY.register(Box::new(GBCE_INDEX.clone())),
        REGISTRY.register(Box::new(STOCKS_REGISTERED.clone())),
    ] {
        let _ = m;
    }
}

/// Push one market's prices into the gauges. Only the driver calls this;
/// library queries never touch process-wide state.
pub fn publish(market: &Market, now: DateTime<Utc>) -> IndexSnapshot {
    // drop symbols from a previously published market
    VWSP.reset();
    for sym in market.symbols() {
        if let Ok(stock) = market.stock(sym) {
            VWSP.with_label_values(&[sym]).set(to_ticks(stock.volume_weighted_stock_price_at(now)));
        }
    }
    let snapshot = market.snapshot_at(now);
    STOCKS_REGISTERED.set(snapshot.stocks as i64);
    GBCE_INDEX.set(to_ticks(snapshot.index));
    snapshot
}

// Encode all metrics in Prometheus text format
pub fn encode() -> String {
    let encoder = TextEncoder::new();
    let families = REGISTRY.gather();
    let mut buf = Vec::new();
    if encoder.encode(&families, &mut buf).is_err() || buf.is_empty() {
        buf.clear();
        buf.extend_from_slice(b"# no metrics\n");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_round_and_drop_non_finite() {
        assert_eq!(to_ticks(105.0), 1_050_000);
        assert_eq!(to_ticks(13.333_33), 133_333);
        assert_eq!(to_ticks(f64::INFINITY), 0);
    }

    // Single test for the gauges: they are process-wide.
    #[test]
    fn publish_tracks_the_last_market() {
        use crate::domain::Side;
        use crate::stock::Stock;

        let now = Utc::now();
        let mut m = Market::new();
        m.add_stock(Stock::common("QQQ", 1.0, 10.0).unwrap());
        m.stock_mut("QQQ").unwrap().record_trade_at(now, 10, Side::Buy, 25.0).unwrap();

        let snap = publish(&m, now);
        assert_eq!(snap.active, 1);
        assert_eq!(VWSP.with_label_values(&["QQQ"]).get(), 250_000);
        assert_eq!(GBCE_INDEX.get(), 250_000);
        assert_eq!(STOCKS_REGISTERED.get(), 1);

        // empty market resets the index instead of leaving it stale
        publish(&Market::new(), now);
        assert_eq!(GBCE_INDEX.get(), 0);
        assert_eq!(STOCKS_REGISTERED.get(), 0);
        assert!(!encode_with_init().contains("stock_vwsp{symbol=\"QQQ\"}"));
    }

    fn encode_with_init() -> String {
        init();
        encode()
    }

    #[test]
    fn encode_after_init_exposes_families() {
        init();
        init();
        TRADES.with_label_values(&["ZZZ", "buy"]).inc();
        let text = encode();
        assert!(text.contains("trades_recorded_total"));
        assert!(text.contains("symbol=\"ZZZ\""));
    }
}
