// ===============================
// src/market.rs (listing + GBCE all share index)
// ===============================
use ahash::AHashMap as HashMap;
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{IndexSnapshot, Side, StockQuote, Trade};
use crate::error::{Result, TickerError};
use crate::stock::Stock;

/// Stocks keyed by symbol. The market owns every stock it lists.
#[derive(Debug, Clone, Default)]
pub struct Market {
    stocks: HashMap<String, Stock>,
}

impl Market {
    pub fn new() -> Self { Self::default() }

    /// List `stock` under its symbol. Last write wins: an existing entry
    /// (and its ledger) is replaced and handed back to the caller.
    pub fn add_stock(&mut self, stock: Stock) -> Option<Stock> {
        let symbol = stock.symbol().to_string();
        let prev = self.stocks.insert(symbol.clone(), stock);
        match &prev {
            Some(old) => warn!(%symbol, dropped_trades = old.trades().len(), "stock re-registered, previous entry replaced"),
            None => info!(%symbol, "stock listed"),
        }
        prev
    }

    pub fn stock(&self, symbol: &str) -> Result<&Stock> {
        self.stocks.get(symbol).ok_or_else(|| TickerError::UnknownSymbol(symbol.to_string()))
    }

    pub fn stock_mut(&mut self, symbol: &str) -> Result<&mut Stock> {
        self.stocks.get_mut(symbol).ok_or_else(|| TickerError::UnknownSymbol(symbol.to_string()))
    }

    pub fn contains(&self, symbol: &str) -> bool { self.stocks.contains_key(symbol) }
    pub fn len(&self) -> usize { self.stocks.len() }
    pub fn is_empty(&self) -> bool { self.stocks.is_empty() }

    /// Listed symbols, sorted.
    pub fn symbols(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self.stocks.keys().map(String::as_str).collect();
        out.sort_unstable();
        out
    }

    pub fn record_trade(&mut self, symbol: &str, quantity: u64, side: Side, price: f64) -> Result<Trade> {
        self.stock_mut(symbol)?.record_trade(quantity, side, price)
    }

    pub fn quote(&self, symbol: &str, price: f64) -> Result<StockQuote> {
        self.stock(symbol)?.quote(price)
    }

    pub fn gbce_all_share_index(&self) -> f64 {
        self.gbce_all_share_index_at(Utc::now())
    }

    /// Geometric mean of every listed stock's VWSP at `now`.
    ///
    /// Stocks with a zero VWSP are left out of the product but still count
    /// in the root degree `n`. An empty market gives 0; a market where no
    /// stock traded inside the window gives `1^(1/n) = 1`.
    pub fn gbce_all_share_index_at(&self, now: DateTime<Utc>) -> f64 {
        self.index_parts(now).2
    }

    pub fn snapshot_at(&self, now: DateTime<Utc>) -> IndexSnapshot {
        let (stocks, active, index) = self.index_parts(now);
        IndexSnapshot { ts: now, stocks, active, index }
    }

    fn index_parts(&self, now: DateTime<Utc>) -> (usize, usize, f64) {
        if self.stocks.is_empty() {
            return (0, 0, 0.0);
        }

        let n = self.stocks.len();
        let mut product = 1.0_f64;
        let mut active = 0_usize;
        for stock in self.stocks.values() {
            let vwsp = stock.volume_weighted_stock_price_at(now);
            if vwsp > 0.0 {
                product *= vwsp;
                active += 1;
            }
        }

        let index = product.powf(1.0 / n as f64);
        debug!(stocks = n, active, index, "gbce all share index");
        (n, active, index)
    }
}
