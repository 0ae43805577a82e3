#![allow(dead_code)]

use papertrade::domain::error::PapertradeError;
use papertrade::domain::instrument::Instrument;
use papertrade::domain::quote::PriceQuote;
use papertrade::ports::quote_port::QuotePort;
use rust_decimal::Decimal;
use std::str::FromStr;

pub struct MockQuotePort {
    pub instruments: Vec<Instrument>,
    pub error: Option<String>,
}

impl MockQuotePort {
    pub fn new() -> Self {
        Self {
            instruments: Vec::new(),
            error: None,
        }
    }

    pub fn with_instrument(mut self, symbol: &str, name: &str, price: &str) -> Self {
        self.instruments.push(Instrument {
            symbol: symbol.to_string(),
            name: name.to_string(),
            price: d(price),
            change_pct: Decimal::ZERO,
        });
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl QuotePort for MockQuotePort {
    fn fetch_instruments(&self) -> Result<Vec<Instrument>, PapertradeError> {
        if let Some(reason) = &self.error {
            return Err(PapertradeError::DataLoad {
                source_name: "mock".into(),
                reason: reason.clone(),
            });
        }
        Ok(self.instruments.clone())
    }
}

/// The three listings shown on the simulator screen.
pub fn sample_port() -> MockQuotePort {
    MockQuotePort::new()
        .with_instrument("AAPL", "Apple Inc.", "150.25")
        .with_instrument("MSFT", "Microsoft Corporation", "280.75")
        .with_instrument("GOOGL", "Alphabet Inc.", "2750.00")
}

pub fn d(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn quote(symbol: &str, price: &str) -> PriceQuote {
    PriceQuote::new(symbol, d(price))
}
