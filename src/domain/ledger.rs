//! Order validation and application.
//!
//! [`apply_order`] is a pure function: it borrows the current state and the
//! caller's price quotes and returns either a fresh [`PortfolioState`] or the
//! reason the order was rejected. The input state is never modified, so a
//! rejected order leaves the caller holding exactly what it had before.

use rust_decimal::Decimal;

use super::error::OrderError;
use super::holding::Holding;
use super::order::{Order, Side};
use super::portfolio::PortfolioState;
use super::quote::{PriceQuote, PriceTable};

/// Validates `order` against `state` and `prices` and returns the resulting state.
///
/// Checks run in a fixed order: quantity, symbol, then funds (buy) or shares
/// (sell). On success the new state's `total_value` is recomputed from scratch
/// against the same `prices`.
pub fn apply_order(
    state: &PortfolioState,
    order: &Order,
    prices: &[PriceQuote],
) -> Result<PortfolioState, OrderError> {
    if order.quantity <= 0 {
        return Err(OrderError::InvalidQuantity {
            quantity: order.quantity,
        });
    }

    let table = PriceTable::from_quotes(prices)?;
    let price = table
        .price(&order.symbol)
        .ok_or_else(|| OrderError::UnknownSymbol {
            symbol: order.symbol.clone(),
        })?;

    let quantity = Decimal::from(order.quantity);
    let notional = price
        .checked_mul(quantity)
        .ok_or_else(|| OrderError::invalid_input("order notional overflow"))?;

    let mut holdings = state.holdings().to_vec();
    let position = holdings.iter().position(|h| h.symbol == order.symbol);

    let cash = match order.side {
        Side::Buy => {
            if notional > state.cash() {
                return Err(OrderError::InsufficientFunds {
                    required: notional,
                    available: state.cash(),
                });
            }
            match position {
                Some(idx) => blend_purchase(&mut holdings[idx], order.quantity, notional)?,
                None => holdings.push(Holding::new(order.symbol.clone(), order.quantity, price)),
            }
            state.cash() - notional
        }
        Side::Sell => {
            let held = position.map(|idx| holdings[idx].quantity).unwrap_or(0);
            let idx = match position {
                Some(idx) if held >= order.quantity => idx,
                _ => {
                    return Err(OrderError::InsufficientShares {
                        symbol: order.symbol.clone(),
                        requested: order.quantity,
                        held,
                    });
                }
            };
            holdings[idx].quantity -= order.quantity;
            if holdings[idx].quantity == 0 {
                holdings.remove(idx);
            }
            state
                .cash()
                .checked_add(notional)
                .ok_or_else(|| OrderError::invalid_input("cash balance overflow"))?
        }
    };

    PortfolioState::derive(cash, holdings, &table)
}

/// Adds `quantity` shares bought for `notional` to `holding`, re-weighting its
/// average price: `(old_qty × old_avg + notional) / (old_qty + quantity)`.
fn blend_purchase(holding: &mut Holding, quantity: i64, notional: Decimal) -> Result<(), OrderError> {
    let overflow = || OrderError::invalid_input(format!("holding {} overflow", holding.symbol));

    let new_quantity = holding.quantity.checked_add(quantity).ok_or_else(overflow)?;
    let new_avg = holding
        .cost_basis()
        .and_then(|cost| cost.checked_add(notional))
        .and_then(|cost| cost.checked_div(Decimal::from(new_quantity)))
        .ok_or_else(overflow)?;

    holding.quantity = new_quantity;
    holding.avg_price = new_avg;
    Ok(())
}
