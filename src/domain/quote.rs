//! Externally supplied price quotes and the symbol-indexed price table.

use rust_decimal::Decimal;
use std::collections::HashMap;

use super::error::OrderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceQuote {
    pub symbol: String,
    pub price: Decimal,
}

impl PriceQuote {
    pub fn new(symbol: impl Into<String>, price: Decimal) -> Self {
        PriceQuote {
            symbol: symbol.into(),
            price,
        }
    }
}

/// Validated lookup over a slice of quotes.
///
/// Every price is strictly positive and every symbol appears once.
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    prices: HashMap<String, Decimal>,
}

impl PriceTable {
    pub fn from_quotes(quotes: &[PriceQuote]) -> Result<Self, OrderError> {
        let mut prices = HashMap::with_capacity(quotes.len());
        for quote in quotes {
            if quote.symbol.trim().is_empty() {
                return Err(OrderError::invalid_input("price quote with empty symbol"));
            }
            if quote.price <= Decimal::ZERO {
                return Err(OrderError::invalid_input(format!(
                    "price for {} must be positive, got {}",
                    quote.symbol, quote.price
                )));
            }
            if prices.insert(quote.symbol.clone(), quote.price).is_some() {
                return Err(OrderError::invalid_input(format!(
                    "duplicate price quote for {}",
                    quote.symbol
                )));
            }
        }
        Ok(PriceTable { prices })
    }

    pub fn price(&self, symbol: &str) -> Option<Decimal> {
        self.prices.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.prices.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}
