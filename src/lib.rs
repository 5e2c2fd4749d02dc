// ===============================
// src/lib.rs
// ===============================
//! GBCE ticker: listed stocks, their trade ledgers, and the derived
//! dividend yield, P/E ratio, volume weighted stock price and
//! GBCE all share index.

pub mod domain;
pub mod error;
pub mod config;
pub mod metrics;
pub mod stock;
pub mod market;
pub mod sample;
pub mod feed;

pub use domain::{IndexSnapshot, Side, StockQuote, StockType, Trade};
pub use error::{Result, TickerError};
pub use market::Market;
pub use sample::sample_market;
pub use stock::{Stock, VWSP_WINDOW_MINUTES};
