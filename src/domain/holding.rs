//! Shares owned in a single symbol.

use rust_decimal::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holding {
    pub symbol: String,
    pub quantity: i64,
    pub avg_price: Decimal,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, quantity: i64, avg_price: Decimal) -> Self {
        Holding {
            symbol: symbol.into(),
            quantity,
            avg_price,
        }
    }

    /// `None` when the amount does not fit in a `Decimal`.
    pub fn market_value(&self, price: Decimal) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(price)
    }

    /// Total amount paid for the shares still held.
    pub fn cost_basis(&self) -> Option<Decimal> {
        Decimal::from(self.quantity).checked_mul(self.avg_price)
    }

    pub fn unrealized_pnl(&self, price: Decimal) -> Option<Decimal> {
        price
            .checked_sub(self.avg_price)
            .and_then(|diff| Decimal::from(self.quantity).checked_mul(diff))
    }
}
