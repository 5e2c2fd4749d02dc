// ===============================
// src/sample.rs
// ===============================
use crate::domain::StockType;
use crate::error::Result;
use crate::market::Market;
use crate::stock::Stock;

// symbol, type, last dividend, fixed dividend, par value
const GBCE_LISTING: [(&str, StockType, f64, Option<f64>, f64); 5] = [
    ("TEA", StockType::Common, 0.0, None, 100.0),
    ("POP", StockType::Common, 8.0, None, 100.0),
    ("ALE", StockType::Common, 23.0, None, 60.0),
    ("GIN", StockType::Preferred, 8.0, Some(0.02), 100.0),
    ("JOE", StockType::Common, 13.0, None, 250.0),
];

/// Fresh market holding the Global Beverage Corporation Exchange sample listing.
pub fn sample_market() -> Result<Market> {
    let mut market = Market::new();
    for (symbol, stock_type, last_dividend, fixed_dividend, par_value) in GBCE_LISTING {
        market.add_stock(Stock::new(symbol, stock_type, last_dividend, fixed_dividend, par_value)?);
    }
    Ok(market)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_five_stocks() {
        let m = sample_market().unwrap();
        assert_eq!(m.symbols(), vec!["ALE", "GIN", "JOE", "POP", "TEA"]);
        let gin = m.stock("GIN").unwrap();
        assert_eq!(gin.stock_type(), StockType::Preferred);
        assert_eq!(gin.fixed_dividend(), Some(0.02));
    }

    #[test]
    fn each_call_is_independent() {
        let mut a = sample_market().unwrap();
        let b = sample_market().unwrap();
        a.record_trade("POP", 1, crate::domain::Side::Buy, 1.0).unwrap();
        assert!(b.stock("POP").unwrap().trades().is_empty());
    }
}
