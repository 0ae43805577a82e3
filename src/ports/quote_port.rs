//! Price source port trait.

use crate::domain::error::PapertradeError;
use crate::domain::instrument::{self, Instrument};
use crate::domain::quote::PriceQuote;

/// Supplies the instrument catalog and current prices. The ledger never
/// fetches prices itself; callers refresh them through this port.
pub trait QuotePort {
    fn fetch_instruments(&self) -> Result<Vec<Instrument>, PapertradeError>;

    fn fetch_quotes(&self) -> Result<Vec<PriceQuote>, PapertradeError> {
        Ok(instrument::quotes(&self.fetch_instruments()?))
    }
}
