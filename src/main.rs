// ===============================
// src/main.rs
// ===============================
/*
 cargo run
 OUTPUT=json SIM_TRADES=50 PRINT_METRICS=1 cargo run
*/
/*
=============================================================================
Project : gbce_ticker — Global Beverage Corporation Exchange ticker in Rust
Module  : main.rs
Version : 0.5.0
Author  : Kukuh Tripamungkas Wicaksono (Kukuh TW)
License : MIT (see LICENSE)

Summary : Lists GBCE stocks, records trades, and derives dividend yield,
          P/E ratio, volume weighted stock price and the GBCE all share
          index. Demo driver reads its knobs from .env / environment.

(c) 2025 Kukuh TW. All rights reserved where applicable.
=============================================================================
*/
use std::process::ExitCode;

use chrono::Utc;
use tracing::{error, info};

use gbce_ticker::config::{self, Args, OutputMode};
use gbce_ticker::{feed, metrics, sample_market, Result};

fn main() -> ExitCode {
    // ---- Load config ----
    let args = config::load();

    // ---- Logging ----
    tracing_subscriber::fmt().with_env_filter(args.log_filter.as_str()).init();

    // ---- Metrics (process-local, printed on request) ----
    metrics::init();

    info!(
        symbol = %args.demo_symbol,
        quote_px = args.quote_price,
        trade_qty = args.trade_qty,
        trade_side = %args.trade_side,
        trade_px = args.trade_price,
        sim_trades = args.sim_trades,
        "startup config"
    );

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(%e, "demo failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut market = sample_market()?;
    let sym = args.demo_symbol.as_str();

    let stock = market.stock(sym)?;
    let dividend_yield = stock.dividend_yield(args.quote_price)?;
    let pe_ratio = stock.pe_ratio(args.quote_price)?;

    market.record_trade(sym, args.trade_qty, args.trade_side, args.trade_price)?;

    if args.sim_trades > 0 {
        feed::run_mock(&mut market, args.sim_trades, &mut rand::thread_rng(), Utc::now())?;
    }

    let now = Utc::now();
    let vwsp = market.stock(sym)?.volume_weighted_stock_price_at(now);
    let snapshot = metrics::publish(&market, now);

    match args.output {
        OutputMode::Text => {
            println!("Dividend Yield for {sym} at price {}: {dividend_yield}", args.quote_price);
            println!("P/E Ratio for {sym} at price {}: {pe_ratio}", args.quote_price);
            println!("Volume Weighted Stock Price for {sym}: {vwsp}");
            println!("GBCE All Share Index: {}", snapshot.index);
        }
        OutputMode::Json => {
            let quotes = market
                .symbols()
                .into_iter()
                .map(|s| market.stock(s).and_then(|st| st.quote_at(args.quote_price, now)))
                .collect::<Result<Vec<_>>>()?;
            let out = serde_json::json!({ "quotes": quotes, "index": snapshot });
            println!("{out}");
        }
    }

    if args.print_metrics {
        print!("{}", metrics::encode());
    }
    Ok(())
}
