// ===============================
// src/error.rs
// ===============================
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TickerError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("unknown stock type '{0}', expected Common or Preferred")]
    UnknownStockType(String),
    #[error("symbol '{0}' is not listed")]
    UnknownSymbol(String),
}

impl TickerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        TickerError::InvalidInput { field, reason: reason.into() }
    }

    /// Short label for the rejection counter.
    pub fn kind(&self) -> &'static str {
        match self {
            TickerError::InvalidInput { .. } => "invalid_input",
            TickerError::UnknownStockType(_) => "unknown_stock_type",
            TickerError::UnknownSymbol(_) => "unknown_symbol",
        }
    }
}

pub type Result<T> = std::result::Result<T, TickerError>;

/// `value > 0` and finite
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(TickerError::invalid(field, format!("{value} is not finite")));
    }
    if value <= 0.0 {
        return Err(TickerError::invalid(field, format!("{value} must be > 0")));
    }
    Ok(value)
}

/// `value >= 0` and finite
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(TickerError::invalid(field, format!("{value} is not finite")));
    }
    if value < 0.0 {
        return Err(TickerError::invalid(field, format!("{value} must be >= 0")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_guard() {
        assert_eq!(ensure_positive("price", 1.5), Ok(1.5));
        assert!(ensure_positive("price", 0.0).is_err());
        assert!(ensure_positive("price", -3.0).is_err());
        assert!(ensure_positive("price", f64::NAN).is_err());
        assert!(ensure_positive("price", f64::INFINITY).is_err());
    }

    #[test]
    fn non_negative_guard_allows_zero() {
        assert_eq!(ensure_non_negative("last_dividend", 0.0), Ok(0.0));
        let err = ensure_non_negative("last_dividend", -1.0).unwrap_err();
        assert_eq!(err.kind(), "invalid_input");
        assert_eq!(err.to_string(), "invalid last_dividend: -1 must be >= 0");
    }
}
