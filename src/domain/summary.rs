//! Display-ready view of a portfolio.

use rust_decimal::Decimal;

use super::instrument::{self, Instrument};
use super::portfolio::PortfolioState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldingRow {
    pub symbol: String,
    pub name: Option<String>,
    pub quantity: i64,
    pub avg_price: Decimal,
    pub price: Option<Decimal>,
    pub market_value: Option<Decimal>,
    pub unrealized_pnl: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioSummary {
    pub cash: Decimal,
    pub stock_value: Decimal,
    pub total_value: Decimal,
    pub rows: Vec<HoldingRow>,
}

impl PortfolioSummary {
    /// Joins holdings with catalog entries. Holdings missing from the catalog
    /// still get a row, with no name or current price.
    pub fn build(state: &PortfolioState, catalog: &[Instrument]) -> Self {
        let rows = state
            .holdings()
            .iter()
            .map(|holding| {
                let listed = instrument::find(catalog, &holding.symbol);
                let price = listed.map(|i| i.price);
                HoldingRow {
                    symbol: holding.symbol.clone(),
                    name: listed.map(|i| i.name.clone()),
                    quantity: holding.quantity,
                    avg_price: holding.avg_price,
                    price,
                    market_value: price.and_then(|p| holding.market_value(p)),
                    unrealized_pnl: price.and_then(|p| holding.unrealized_pnl(p)),
                }
            })
            .collect();

        PortfolioSummary {
            cash: state.cash(),
            stock_value: state.stock_value(),
            total_value: state.total_value(),
            rows,
        }
    }
}
