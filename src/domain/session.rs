//! Single owner of a portfolio over a trading session.
//!
//! The ledger has no notion of concurrent callers. A [`Session`] is the one
//! place orders are fed through, strictly in sequence, each result becoming
//! the input of the next call. It also keeps prior snapshots for undo and an
//! append-only journal of every submission.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::error::OrderError;
use super::ledger::apply_order;
use super::order::Order;
use super::portfolio::PortfolioState;
use super::quote::PriceQuote;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Filled,
    Rejected(OrderError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalEntry {
    pub sequence: usize,
    pub order: Order,
    /// Quote used for the order, if the symbol was priced.
    pub price: Option<Decimal>,
    pub outcome: Outcome,
}

impl JournalEntry {
    pub fn is_filled(&self) -> bool {
        matches!(self.outcome, Outcome::Filled)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone)]
pub struct Session {
    initial_cash: Decimal,
    current: PortfolioState,
    undo_stack: Vec<PortfolioState>,
    journal: Vec<JournalEntry>,
}

impl Session {
    pub fn new(initial_cash: Decimal) -> Result<Self, OrderError> {
        Ok(Session {
            initial_cash,
            current: PortfolioState::new(initial_cash)?,
            undo_stack: Vec::new(),
            journal: Vec::new(),
        })
    }

    pub fn state(&self) -> &PortfolioState {
        &self.current
    }

    pub fn initial_cash(&self) -> Decimal {
        self.initial_cash
    }

    pub fn journal(&self) -> &[JournalEntry] {
        &self.journal
    }

    /// Applies one order. On rejection the current state is kept as is.
    pub fn submit(
        &mut self,
        order: Order,
        prices: &[PriceQuote],
    ) -> Result<&PortfolioState, OrderError> {
        let result = apply_order(&self.current, &order, prices);
        let price = prices
            .iter()
            .find(|q| q.symbol == order.symbol)
            .map(|q| q.price);
        let sequence = self.journal.len() + 1;

        match result {
            Ok(next) => {
                debug!(sequence, %order, cash = %next.cash(), total = %next.total_value(), "order filled");
                let prior = std::mem::replace(&mut self.current, next);
                self.undo_stack.push(prior);
                self.journal.push(JournalEntry {
                    sequence,
                    order,
                    price,
                    outcome: Outcome::Filled,
                });
                Ok(&self.current)
            }
            Err(err) => {
                warn!(sequence, %order, error = %err, "order rejected");
                self.journal.push(JournalEntry {
                    sequence,
                    order,
                    price,
                    outcome: Outcome::Rejected(err.clone()),
                });
                Err(err)
            }
        }
    }

    /// Submits `orders` in sequence against one price table.
    ///
    /// With `stop_on_reject` the first rejection is returned as an error and
    /// the remaining orders are not submitted; otherwise rejections are
    /// counted and the batch continues. Contract violations always stop.
    pub fn replay(
        &mut self,
        orders: impl IntoIterator<Item = Order>,
        prices: &[PriceQuote],
        stop_on_reject: bool,
    ) -> Result<ReplayReport, OrderError> {
        let mut report = ReplayReport::default();
        for order in orders {
            match self.submit(order, prices) {
                Ok(_) => report.accepted += 1,
                Err(err) if err.is_rejection() && !stop_on_reject => report.rejected += 1,
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }

    /// Restores the state before the last filled order. The journal is not
    /// rewritten.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop() {
            Some(prior) => {
                debug!(cash = %prior.cash(), "undo");
                self.current = prior;
                true
            }
            None => false,
        }
    }

    /// Growth of total value over the initial endowment, in percent.
    /// `None` when the figure does not fit in a `Decimal`.
    pub fn return_pct(&self) -> Option<Decimal> {
        if self.initial_cash.is_zero() {
            return Some(Decimal::ZERO);
        }
        self.current
            .total_value()
            .checked_sub(self.initial_cash)
            .and_then(|gain| gain.checked_div(self.initial_cash))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prices() -> Vec<PriceQuote> {
        vec![
            PriceQuote::new("AAPL", dec!(150.25)),
            PriceQuote::new("MSFT", dec!(280.75)),
        ]
    }

    #[test]
    fn submit_advances_state() {
        let mut session = Session::new(dec!(100000)).unwrap();
        let state = session.submit(Order::buy("AAPL", 10), &prices()).unwrap();
        assert_eq!(state.cash(), dec!(98497.5));

        assert_eq!(session.journal().len(), 1);
        let entry = &session.journal()[0];
        assert_eq!(entry.sequence, 1);
        assert_eq!(entry.price, Some(dec!(150.25)));
        assert!(entry.is_filled());
    }

    #[test]
    fn rejection_keeps_state_and_is_journaled() {
        let mut session = Session::new(dec!(100)).unwrap();
        let before = session.state().clone();
        let err = session.submit(Order::buy("AAPL", 1), &prices()).unwrap_err();

        assert!(matches!(err, OrderError::InsufficientFunds { .. }));
        assert_eq!(session.state(), &before);
        assert_eq!(session.journal()[0].outcome, Outcome::Rejected(err));
    }

    #[test]
    fn unknown_symbol_journal_has_no_price() {
        let mut session = Session::new(dec!(100)).unwrap();
        let _ = session.submit(Order::buy("TSLA", 1), &prices());
        assert_eq!(session.journal()[0].price, None);
    }

    #[test]
    fn undo_restores_previous_state() {
        let mut session = Session::new(dec!(100000)).unwrap();
        session.submit(Order::buy("AAPL", 10), &prices()).unwrap();
        session.submit(Order::buy("MSFT", 1), &prices()).unwrap();

        assert!(session.undo());
        assert_eq!(session.state().holding_count(), 1);
        assert!(session.undo());
        assert_eq!(session.state(), &PortfolioState::new(dec!(100000)).unwrap());
        assert!(!session.undo());
        assert_eq!(session.journal().len(), 2);
    }

    #[test]
    fn replay_counts_rejections() {
        let mut session = Session::new(dec!(1000)).unwrap();
        let report = session
            .replay(
                vec![
                    Order::buy("AAPL", 2),
                    Order::buy("MSFT", 5),
                    Order::sell("AAPL", 1),
                ],
                &prices(),
                false,
            )
            .unwrap();

        assert_eq!(
            report,
            ReplayReport {
                accepted: 2,
                rejected: 1
            }
        );
        assert_eq!(session.state().holding("AAPL").unwrap().quantity, 1);
    }

    #[test]
    fn replay_stops_on_reject_when_asked() {
        let mut session = Session::new(dec!(1000)).unwrap();
        let err = session
            .replay(
                vec![Order::sell("AAPL", 1), Order::buy("AAPL", 1)],
                &prices(),
                true,
            )
            .unwrap_err();

        assert!(matches!(err, OrderError::InsufficientShares { .. }));
        assert_eq!(session.journal().len(), 1);
    }

    #[test]
    fn replay_always_stops_on_invalid_input() {
        let mut session = Session::new(dec!(1000)).unwrap();
        let bad = vec![PriceQuote::new("AAPL", dec!(-1))];
        let err = session
            .replay(vec![Order::buy("AAPL", 1)], &bad, false)
            .unwrap_err();
        assert!(!err.is_rejection());
    }

    #[test]
    fn return_pct_tracks_growth() {
        let mut session = Session::new(dec!(100000)).unwrap();
        session
            .submit(Order::buy("AAPL", 10), &[PriceQuote::new("AAPL", dec!(150.25))])
            .unwrap();
        session
            .submit(Order::sell("AAPL", 10), &[PriceQuote::new("AAPL", dec!(160))])
            .unwrap();

        assert_eq!(session.return_pct(), Some(dec!(0.0975)));
    }

    #[test]
    fn return_pct_zero_endowment() {
        let session = Session::new(dec!(0)).unwrap();
        assert_eq!(session.return_pct(), Some(dec!(0)));
    }

    #[test]
    fn return_pct_out_of_range_is_none() {
        let mut session = Session::new(dec!(0.00000000000000000001)).unwrap();
        session
            .submit(
                Order::buy("AAPL", 100_000_000),
                &[PriceQuote::new("AAPL", dec!(0.0000000000000000000000000001))],
            )
            .unwrap();
        session
            .submit(
                Order::sell("AAPL", 100_000_000),
                &[PriceQuote::new("AAPL", dec!(100000000000000000000))],
            )
            .unwrap();

        assert_eq!(session.state().total_value(), dec!(10000000000000000000000000000));
        assert_eq!(session.return_pct(), None);
    }

    #[test]
    fn journal_records_quote_even_when_table_is_invalid() {
        let mut session = Session::new(dec!(1000)).unwrap();
        let bad = vec![
            PriceQuote::new("AAPL", dec!(150)),
            PriceQuote::new("MSFT", dec!(-1)),
        ];
        let err = session.submit(Order::buy("AAPL", 1), &bad).unwrap_err();
        assert!(!err.is_rejection());
        assert_eq!(session.journal()[0].price, Some(dec!(150)));
    }
}
