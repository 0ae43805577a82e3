//! Buy/sell instructions against a single symbol.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "buy" | "b" => Ok(Side::Buy),
            "sell" | "s" => Ok(Side::Sell),
            other => Err(format!("unknown order side '{other}' (expected buy or sell)")),
        }
    }
}

/// A single proposed trade. Quantity is signed so that non-positive values
/// reach the ledger and are rejected there rather than silently wrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub symbol: String,
    pub side: Side,
    pub quantity: i64,
}

impl Order {
    pub fn new(symbol: impl Into<String>, side: Side, quantity: i64) -> Self {
        Order {
            symbol: symbol.into(),
            side,
            quantity,
        }
    }

    pub fn buy(symbol: impl Into<String>, quantity: i64) -> Self {
        Self::new(symbol, Side::Buy, quantity)
    }

    pub fn sell(symbol: impl Into<String>, quantity: i64) -> Self {
        Self::new(symbol, Side::Sell, quantity)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.side, self.quantity, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_side() {
        assert_eq!("buy".parse::<Side>().unwrap(), Side::Buy);
        assert_eq!(" SELL ".parse::<Side>().unwrap(), Side::Sell);
        assert_eq!("b".parse::<Side>().unwrap(), Side::Buy);
        assert!("short".parse::<Side>().is_err());
    }

    #[test]
    fn constructors() {
        let order = Order::buy("AAPL", 10);
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.quantity, 10);
        assert_eq!(Order::sell("MSFT", 2).side, Side::Sell);
    }

    #[test]
    fn display() {
        assert_eq!(Order::sell("AAPL", 5).to_string(), "SELL 5 AAPL");
    }
}
