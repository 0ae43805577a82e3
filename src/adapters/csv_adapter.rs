//! CSV file adapters for the instrument catalog and order batches.

use crate::domain::error::PapertradeError;
use crate::domain::instrument::Instrument;
use crate::domain::order::{Order, Side};
use crate::ports::quote_port::QuotePort;
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Reads instruments from a `symbol,name,price,change` CSV file.
pub struct CsvQuoteAdapter {
    path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn load_error(&self, reason: impl Into<String>) -> PapertradeError {
        PapertradeError::DataLoad {
            source_name: self.path.display().to_string(),
            reason: reason.into(),
        }
    }

    fn decimal_field(
        &self,
        record: &csv::StringRecord,
        idx: usize,
        column: &str,
    ) -> Result<Decimal, PapertradeError> {
        let raw = record
            .get(idx)
            .ok_or_else(|| self.load_error(format!("missing {column} column")))?;
        Decimal::from_str(raw.trim())
            .map_err(|e| self.load_error(format!("invalid {column} value '{raw}': {e}")))
    }
}

impl QuotePort for CsvQuoteAdapter {
    fn fetch_instruments(&self) -> Result<Vec<Instrument>, PapertradeError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.load_error(format!("failed to read: {e}")))?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut instruments = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| self.load_error(format!("CSV parse error: {e}")))?;

            let symbol = record
                .get(0)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| self.load_error("missing symbol column"))?
                .to_uppercase();
            let name = record.get(1).unwrap_or_default().to_string();
            let price = self.decimal_field(&record, 2, "price")?;
            let change_pct = match record.get(3) {
                Some(raw) if !raw.is_empty() => self.decimal_field(&record, 3, "change")?,
                _ => Decimal::ZERO,
            };

            instruments.push(Instrument {
                symbol,
                name,
                price,
                change_pct,
            });
        }

        debug!(path = %self.path.display(), count = instruments.len(), "loaded instruments");
        Ok(instruments)
    }
}

/// Reads an order batch from a `side,symbol,quantity` CSV file.
///
/// Line numbers in errors are 1-based and count the header.
pub fn read_orders<P: AsRef<Path>>(path: P) -> Result<Vec<Order>, PapertradeError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| PapertradeError::DataLoad {
        source_name: path.display().to_string(),
        reason: format!("failed to read: {e}"),
    })?;
    parse_orders(&content)
}

pub fn parse_orders(content: &str) -> Result<Vec<Order>, PapertradeError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let mut orders = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|e| PapertradeError::OrderParse {
            line: e.position().map(|p| p.line() as usize).unwrap_or(0),
            reason: e.to_string(),
        })?;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
        let parse_error = |reason: String| PapertradeError::OrderParse { line, reason };

        let side: Side = record
            .get(0)
            .ok_or_else(|| parse_error("missing side column".into()))?
            .parse()
            .map_err(parse_error)?;
        let symbol = record
            .get(1)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| parse_error("missing symbol column".into()))?
            .to_uppercase();
        let raw_quantity = record
            .get(2)
            .ok_or_else(|| parse_error("missing quantity column".into()))?;
        let quantity: i64 = raw_quantity
            .parse()
            .map_err(|e| parse_error(format!("invalid quantity '{raw_quantity}': {e}")))?;

        orders.push(Order::new(symbol, side, quantity));
    }

    Ok(orders)
}
