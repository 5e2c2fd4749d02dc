// ===============================
// src/stock.rs (dividend, P/E & VWSP per listed stock)
// ===============================
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::domain::{Side, StockQuote, StockType, Trade};
use crate::error::{ensure_non_negative, ensure_positive, Result, TickerError};
use crate::metrics::{REJECTS, TRADES};

/// Trailing window used by the volume weighted stock price.
pub const VWSP_WINDOW_MINUTES: i64 = 10;

pub fn vwsp_window() -> Duration { Duration::minutes(VWSP_WINDOW_MINUTES) }

/// A listed stock with its own append-only trade ledger.
///
/// All attributes are validated in the constructor, so the formulas below
/// only need to check the price they are queried with.
#[derive(Debug, Clone)]
pub struct Stock {
    symbol: String,
    stock_type: StockType,
    last_dividend: f64,
    fixed_dividend: Option<f64>,
    par_value: f64,
    trades: Vec<Trade>,
}

impl Stock {
    /// General constructor.
    ///
    /// `fixed_dividend` is a fraction of par (0.02 = 2%). It is required for
    /// `Preferred` and ignored by every Common formula.
    pub fn new(
        symbol: impl Into<String>,
        stock_type: StockType,
        last_dividend: f64,
        fixed_dividend: Option<f64>,
        par_value: f64,
    ) -> Result<Self> {
        // kept verbatim, it is the market lookup key
        let symbol: String = symbol.into();
        if symbol.trim().is_empty() {
            return Err(TickerError::invalid("symbol", "symbol cannot be empty"));
        }
        let last_dividend = ensure_non_negative("last_dividend", last_dividend)?;
        let par_value = ensure_positive("par_value", par_value)?;
        let fixed_dividend = match (stock_type, fixed_dividend) {
            (StockType::Preferred, None) => {
                return Err(TickerError::invalid("fixed_dividend", format!("required for preferred stock {symbol}")));
            }
            (_, Some(fd)) => Some(ensure_non_negative("fixed_dividend", fd)?),
            (StockType::Common, None) => None,
        };

        Ok(Self { symbol, stock_type, last_dividend, fixed_dividend, par_value, trades: Vec::new() })
    }

    pub fn common(symbol: impl Into<String>, last_dividend: f64, par_value: f64) -> Result<Self> {
        Self::new(symbol, StockType::Common, last_dividend, None, par_value)
    }

    pub fn preferred(symbol: impl Into<String>, last_dividend: f64, fixed_dividend: f64, par_value: f64) -> Result<Self> {
        Self::new(symbol, StockType::Preferred, last_dividend, Some(fixed_dividend), par_value)
    }

    pub fn symbol(&self) -> &str { &self.symbol }
    pub fn stock_type(&self) -> StockType { self.stock_type }
    pub fn last_dividend(&self) -> f64 { self.last_dividend }
    pub fn fixed_dividend(&self) -> Option<f64> { self.fixed_dividend }
    pub fn par_value(&self) -> f64 { self.par_value }

    /// Ledger in recording order. Old trades stay here even once they fall
    /// outside the VWSP window.
    pub fn trades(&self) -> &[Trade] { &self.trades }

    /// Per-share dividend amount, independent of price.
    fn dividend_amount(&self) -> f64 {
        match self.stock_type {
            StockType::Common => self.last_dividend,
            // constructor guarantees Some for Preferred
            StockType::Preferred => self.fixed_dividend.unwrap_or(0.0) * self.par_value,
        }
    }

    /// Common: `last_dividend / price`. Preferred: `fixed_dividend * par_value / price`.
    pub fn dividend_yield(&self, price: f64) -> Result<f64> {
        let price = self.checked_price(price)?;
        Ok(self.dividend_amount() / price)
    }

    /// `price / dividend`, or `f64::INFINITY` for a stock paying no dividend.
    pub fn pe_ratio(&self, price: f64) -> Result<f64> {
        let dividend = self.dividend_yield(price)? * price;
        if dividend == 0.0 {
            return Ok(f64::INFINITY);
        }
        Ok(price / dividend)
    }

    pub fn record_trade(&mut self, quantity: u64, side: Side, price: f64) -> Result<Trade> {
        self.record_trade_at(Utc::now(), quantity, side, price)
    }

    /// Append a trade stamped with `timestamp`. Callers are expected to
    /// record in chronological order.
    pub fn record_trade_at(&mut self, timestamp: DateTime<Utc>, quantity: u64, side: Side, price: f64) -> Result<Trade> {
        if quantity == 0 {
            let e = TickerError::invalid("quantity", "must be > 0");
            REJECTS.with_label_values(&[e.kind()]).inc();
            warn!(symbol = %self.symbol, "trade rejected: zero quantity");
            return Err(e);
        }
        let price = self.checked_price(price)?;

        let trade = Trade { timestamp, quantity, side, price };
        self.trades.push(trade.clone());
        TRADES.with_label_values(&[&self.symbol, side.as_str()]).inc();
        debug!(symbol = %self.symbol, qty = quantity, %side, px = price, ledger = self.trades.len(), "trade recorded");
        Ok(trade)
    }

    pub fn volume_weighted_stock_price(&self) -> f64 {
        self.volume_weighted_stock_price_at(Utc::now())
    }

    /// `Σ(price·qty) / Σqty` over trades with `timestamp >= now - 10min`.
    /// Returns 0 when no trade falls inside the window.
    pub fn volume_weighted_stock_price_at(&self, now: DateTime<Utc>) -> f64 {
        let cutoff = now - vwsp_window();

        // u128: a handful of u64::MAX-sized lots must not overflow
        let (mut notional, mut qty) = (0.0_f64, 0_u128);
        for t in self.trades.iter().filter(|t| t.timestamp >= cutoff) {
            notional += t.notional();
            qty += u128::from(t.quantity);
        }

        let vwsp = if qty == 0 { 0.0 } else { notional / qty as f64 };
        debug!(symbol = %self.symbol, qty = %qty, vwsp, "vwsp");
        vwsp
    }

    pub fn quote(&self, price: f64) -> Result<StockQuote> {
        self.quote_at(price, Utc::now())
    }

    pub fn quote_at(&self, price: f64, now: DateTime<Utc>) -> Result<StockQuote> {
        Ok(StockQuote {
            symbol: self.symbol.clone(),
            price,
            dividend_yield: self.dividend_yield(price)?,
            pe_ratio: self.pe_ratio(price)?,
            vwsp: self.volume_weighted_stock_price_at(now),
        })
    }

    fn checked_price(&self, price: f64) -> Result<f64> {
        ensure_positive("price", price).map_err(|e| {
            REJECTS.with_label_values(&[e.kind()]).inc();
            warn!(symbol = %self.symbol, px = price, "price rejected");
            e
        })
    }
}
