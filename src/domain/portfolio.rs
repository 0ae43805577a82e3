//! Portfolio snapshot: cash, holdings and derived valuation.

use rust_decimal::Decimal;
use std::collections::HashSet;

use super::error::OrderError;
use super::holding::Holding;
use super::quote::{PriceQuote, PriceTable};

/// Complete snapshot of a simulated portfolio.
///
/// Fields are read-only from outside the crate: `total_value` is always
/// `cash + Σ quantity × price` for the price table the snapshot was built
/// against, and holdings are unique per symbol with positive quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortfolioState {
    cash: Decimal,
    holdings: Vec<Holding>,
    total_value: Decimal,
}

impl PortfolioState {
    /// Starting state: an endowment of cash and nothing else.
    pub fn new(cash: Decimal) -> Result<Self, OrderError> {
        check_cash(cash)?;
        Ok(PortfolioState {
            cash,
            holdings: Vec::new(),
            total_value: cash,
        })
    }

    pub fn with_holdings(
        cash: Decimal,
        holdings: Vec<Holding>,
        prices: &[PriceQuote],
    ) -> Result<Self, OrderError> {
        check_cash(cash)?;
        check_holdings(&holdings)?;
        let table = PriceTable::from_quotes(prices)?;
        Self::derive(cash, holdings, &table)
    }

    /// Builds a state whose valuation is computed from `table`.
    pub(crate) fn derive(
        cash: Decimal,
        holdings: Vec<Holding>,
        table: &PriceTable,
    ) -> Result<Self, OrderError> {
        let total_value = total_value(cash, &holdings, table)?;
        Ok(PortfolioState {
            cash,
            holdings,
            total_value,
        })
    }

    /// Same cash and holdings, marked to a fresh set of prices.
    pub fn revalue(&self, prices: &[PriceQuote]) -> Result<Self, OrderError> {
        let table = PriceTable::from_quotes(prices)?;
        Self::derive(self.cash, self.holdings.clone(), &table)
    }

    pub fn cash(&self) -> Decimal {
        self.cash
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    /// Market value of all holdings at the last valuation.
    pub fn stock_value(&self) -> Decimal {
        self.total_value - self.cash
    }

    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    pub fn has_holding(&self, symbol: &str) -> bool {
        self.holding(symbol).is_some()
    }

    pub fn holding_count(&self) -> usize {
        self.holdings.len()
    }
}

pub(crate) fn check_cash(cash: Decimal) -> Result<(), OrderError> {
    if cash < Decimal::ZERO {
        return Err(OrderError::invalid_input(format!(
            "cash must be non-negative, got {cash}"
        )));
    }
    Ok(())
}

pub(crate) fn check_holdings(holdings: &[Holding]) -> Result<(), OrderError> {
    let mut seen = HashSet::with_capacity(holdings.len());
    for holding in holdings {
        if holding.quantity <= 0 {
            return Err(OrderError::invalid_input(format!(
                "holding {} has non-positive quantity {}",
                holding.symbol, holding.quantity
            )));
        }
        if holding.avg_price <= Decimal::ZERO {
            return Err(OrderError::invalid_input(format!(
                "holding {} has non-positive average price {}",
                holding.symbol, holding.avg_price
            )));
        }
        if !seen.insert(holding.symbol.as_str()) {
            return Err(OrderError::invalid_input(format!(
                "duplicate holding for {}",
                holding.symbol
            )));
        }
    }
    Ok(())
}

/// `cash + Σ quantity × price` over `holdings`; every held symbol must be priced.
pub(crate) fn total_value(
    cash: Decimal,
    holdings: &[Holding],
    table: &PriceTable,
) -> Result<Decimal, OrderError> {
    holdings.iter().try_fold(cash, |acc, holding| {
        let price = table.price(&holding.symbol).ok_or_else(|| {
            OrderError::invalid_input(format!("no price quote for held symbol {}", holding.symbol))
        })?;
        Decimal::from(holding.quantity)
            .checked_mul(price)
            .and_then(|value| acc.checked_add(value))
            .ok_or_else(|| OrderError::invalid_input("portfolio valuation overflow"))
    })
}
