//! Tradable instrument catalog.

use rust_decimal::Decimal;

use super::quote::PriceQuote;

/// A listed instrument as shown on the quote board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    pub symbol: String,
    pub name: String,
    pub price: Decimal,
    /// Day change in percent.
    pub change_pct: Decimal,
}

impl Instrument {
    pub fn quote(&self) -> PriceQuote {
        PriceQuote::new(self.symbol.clone(), self.price)
    }
}

pub fn quotes(catalog: &[Instrument]) -> Vec<PriceQuote> {
    catalog.iter().map(Instrument::quote).collect()
}

pub fn find<'a>(catalog: &'a [Instrument], symbol: &str) -> Option<&'a Instrument> {
    catalog.iter().find(|i| i.symbol == symbol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn catalog() -> Vec<Instrument> {
        vec![
            Instrument {
                symbol: "AAPL".into(),
                name: "Apple Inc.".into(),
                price: dec!(150.25),
                change_pct: dec!(2.5),
            },
            Instrument {
                symbol: "MSFT".into(),
                name: "Microsoft Corporation".into(),
                price: dec!(280.75),
                change_pct: dec!(-1.2),
            },
        ]
    }

    #[test]
    fn projects_quotes() {
        let quotes = quotes(&catalog());
        assert_eq!(
            quotes,
            vec![
                PriceQuote::new("AAPL", dec!(150.25)),
                PriceQuote::new("MSFT", dec!(280.75)),
            ]
        );
    }

    #[test]
    fn find_by_symbol() {
        let catalog = catalog();
        assert_eq!(find(&catalog, "MSFT").unwrap().name, "Microsoft Corporation");
        assert!(find(&catalog, "GOOGL").is_none());
    }
}
