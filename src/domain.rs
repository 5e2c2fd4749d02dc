// ===============================
// src/domain.rs
// ===============================
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TickerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side { Buy, Sell }
impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl FromStr for Side {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" | "b" => Ok(Side::Buy),
            "sell" | "s" => Ok(Side::Sell),
            other => Err(TickerError::invalid("side", format!("unknown side '{other}'"))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Dividend model of a listed stock.
///
/// Closed on purpose: every formula matches on both variants, so an
/// unsupported type can only show up while parsing a text tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockType { Common, Preferred }

impl StockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockType::Common => "Common",
            StockType::Preferred => "Preferred",
        }
    }
}

impl FromStr for StockType {
    type Err = TickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "common" => Ok(StockType::Common),
            "preferred" => Ok(StockType::Preferred),
            _ => Err(TickerError::UnknownStockType(s.to_string())),
        }
    }
}

impl fmt::Display for StockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// One executed trade. Built by `Stock::record_trade*`, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade { pub timestamp: DateTime<Utc>, pub quantity: u64, pub side: Side, pub price: f64 }

impl Trade {
    /// price * quantity
    pub fn notional(&self) -> f64 { self.price * self.quantity as f64 }
}

// Read-only snapshots (printed by the demo, serde_json friendly)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub dividend_yield: f64,
    /// `f64::INFINITY` when the stock pays no dividend (serialises as `null`).
    pub pe_ratio: f64,
    pub vwsp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    pub ts: DateTime<Utc>,
    pub stocks: usize,
    /// stocks with at least one trade inside the VWSP window
    pub active: usize,
    pub index: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_parses_loose_tags() {
        assert_eq!("BUY".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" s ".parse::<Side>().unwrap(), Side::Sell);
        assert!(matches!("hold".parse::<Side>(), Err(TickerError::InvalidInput { field: "side", .. })));
    }

    #[test]
    fn stock_type_rejects_unknown_tag() {
        assert_eq!("Preferred".parse::<StockType>().unwrap(), StockType::Preferred);
        assert_eq!("common".parse::<StockType>().unwrap(), StockType::Common);
        match "Convertible".parse::<StockType>() {
            Err(TickerError::UnknownStockType(tag)) => assert_eq!(tag, "Convertible"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn quote_with_infinite_pe_serialises_as_null() {
        let q = StockQuote { symbol: "TEA".into(), price: 100.0, dividend_yield: 0.0, pe_ratio: f64::INFINITY, vwsp: 0.0 };
        let v: serde_json::Value = serde_json::to_value(&q).unwrap();
        assert!(v["pe_ratio"].is_null());
        assert_eq!(v["symbol"], "TEA");
    }
}
