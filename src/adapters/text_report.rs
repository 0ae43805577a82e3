//! Plain-text portfolio report.

use std::io::Write;

use rust_decimal::Decimal;

use crate::domain::error::PapertradeError;
use crate::domain::instrument::Instrument;
use crate::domain::session::{Outcome, Session};
use crate::domain::summary::PortfolioSummary;
use crate::ports::report_port::ReportPort;

pub struct TextReportAdapter;

fn money(value: Decimal) -> String {
    format!("${:.2}", value)
}

fn opt_money(value: Option<Decimal>) -> String {
    value.map(money).unwrap_or_else(|| "-".to_string())
}

impl TextReportAdapter {
    fn write_overview(
        summary: &PortfolioSummary,
        session: &Session,
        out: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(out, "=== Portfolio Overview ===")?;
        writeln!(out, "Cash Balance:   {}", money(summary.cash))?;
        writeln!(out, "Stock Value:    {}", money(summary.stock_value))?;
        writeln!(out, "Total Value:    {}", money(summary.total_value))?;
        let return_pct = session
            .return_pct()
            .map(|pct| format!("{pct:.2}%"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(out, "Return:         {return_pct}")
    }

    fn write_holdings(summary: &PortfolioSummary, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "\n=== Holdings ===")?;
        if summary.rows.is_empty() {
            return writeln!(out, "  (none)");
        }
        writeln!(
            out,
            "{:<8} {:<24} {:>8} {:>12} {:>12} {:>14} {:>12}",
            "Symbol", "Name", "Shares", "Avg", "Price", "Value", "P&L"
        )?;
        for row in &summary.rows {
            writeln!(
                out,
                "{:<8} {:<24} {:>8} {:>12} {:>12} {:>14} {:>12}",
                row.symbol,
                row.name.as_deref().unwrap_or("-"),
                row.quantity,
                money(row.avg_price),
                opt_money(row.price),
                opt_money(row.market_value),
                opt_money(row.unrealized_pnl),
            )?;
        }
        Ok(())
    }

    fn write_journal(session: &Session, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "\n=== Order Journal ===")?;
        if session.journal().is_empty() {
            return writeln!(out, "  (no orders)");
        }
        for entry in session.journal() {
            let status = match &entry.outcome {
                Outcome::Filled => "filled".to_string(),
                Outcome::Rejected(err) => format!("rejected: {err}"),
            };
            writeln!(
                out,
                "{:>4}. {:<20} @ {:<12} {}",
                entry.sequence,
                entry.order.to_string(),
                opt_money(entry.price),
                status
            )?;
        }
        Ok(())
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        session: &Session,
        catalog: &[Instrument],
        out: &mut dyn Write,
    ) -> Result<(), PapertradeError> {
        let summary = PortfolioSummary::build(session.state(), catalog);
        Self::write_overview(&summary, session, out)?;
        Self::write_holdings(&summary, out)?;
        Self::write_journal(session, out)?;
        Ok(())
    }
}
