// ===============================
// src/config.rs
// ===============================
/*
=============================================================================
Project : gbce_ticker — Global Beverage Corporation Exchange ticker in Rust
Module  : config.rs
Version : 0.5.0
Author  : Kukuh Tripamungkas Wicaksono (Kukuh TW)
License : MIT (see LICENSE)

Summary : Lists GBCE stocks, records trades, and derives dividend yield,
          P/E ratio, volume weighted stock price and the GBCE all share
          index. Demo driver reads its knobs from .env / environment.

(c) 2025 Kukuh TW. All rights reserved where applicable.
=============================================================================
*/
use std::env;
use dotenvy::dotenv;

use crate::domain::Side;

/// Output format of the demo driver
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn from_env(key: &str, default_mode: OutputMode) -> OutputMode {
        match env::var(key).unwrap_or_default().to_ascii_lowercase().as_str() {
            "text" => OutputMode::Text,
            "json" => OutputMode::Json,
            _ => default_mode,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Args {
    pub log_filter: String,

    // stock yang di-quote + trade contoh
    pub demo_symbol: String,
    pub quote_price: f64,
    pub trade_qty: u64,
    pub trade_side: Side,
    pub trade_price: f64,

    // random trades across all stocks (0 = off)
    pub sim_trades: u32,

    pub output: OutputMode,
    pub print_metrics: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            demo_symbol: "POP".to_string(),
            quote_price: 100.0,
            trade_qty: 100,
            trade_side: Side::Buy,
            trade_price: 105.0,
            sim_trades: 0,
            output: OutputMode::Text,
            print_metrics: false,
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

fn parse_flag(key: &str) -> Option<bool> {
    env::var(key).ok().map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

pub fn load() -> Args {
    // .env optional
    let _ = dotenv();
    from_env()
}

/// Environment only, without touching `.env`. Invalid values fall back to defaults.
pub fn from_env() -> Args {
    let d = Args::default();

    let log_filter = env::var("LOG_FILTER").unwrap_or(d.log_filter);
    let demo_symbol = env::var("DEMO_SYMBOL")
        .ok()
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .unwrap_or(d.demo_symbol);

    let quote_price = parse_env::<f64>("QUOTE_PRICE").filter(|p| *p > 0.0).unwrap_or(d.quote_price);
    let trade_qty   = parse_env::<u64>("TRADE_QTY").filter(|q| *q > 0).unwrap_or(d.trade_qty);
    let trade_side  = parse_env::<Side>("TRADE_SIDE").unwrap_or(d.trade_side);
    let trade_price = parse_env::<f64>("TRADE_PRICE").filter(|p| *p > 0.0).unwrap_or(d.trade_price);
    let sim_trades  = parse_env::<u32>("SIM_TRADES").unwrap_or(d.sim_trades);

    let output = OutputMode::from_env("OUTPUT", d.output);
    let print_metrics = parse_flag("PRINT_METRICS").unwrap_or(d.print_metrics);

    Args {
        log_filter,
        demo_symbol,
        quote_price,
        trade_qty,
        trade_side,
        trade_price,
        sim_trades,
        output,
        print_metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: env vars are process-wide.
    #[test]
    fn env_overrides_and_fallbacks() {
        let keys = ["DEMO_SYMBOL", "QUOTE_PRICE", "TRADE_QTY", "TRADE_SIDE", "TRADE_PRICE", "OUTPUT", "PRINT_METRICS"];
        for k in keys { env::remove_var(k); }

        let a = from_env();
        assert_eq!(a.demo_symbol, "POP");
        assert_eq!(a.trade_side, Side::Buy);
        assert_eq!(a.output, OutputMode::Text);

        env::set_var("DEMO_SYMBOL", " gin ");
        env::set_var("QUOTE_PRICE", "-4");
        env::set_var("TRADE_QTY", "250");
        env::set_var("TRADE_SIDE", "sell");
        env::set_var("OUTPUT", "JSON");
        env::set_var("PRINT_METRICS", "yes");
        let a = from_env();
        assert_eq!(a.demo_symbol, "GIN");
        assert_eq!(a.quote_price, 100.0);
        assert_eq!(a.trade_qty, 250);
        assert_eq!(a.trade_side, Side::Sell);
        assert_eq!(a.output, OutputMode::Json);
        assert!(a.print_metrics);

        for k in keys { env::remove_var(k); }
    }
}
