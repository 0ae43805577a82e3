//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::{read_orders, CsvQuoteAdapter};
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::TextReportAdapter;
use crate::domain::config_validation::{initial_cash, validate_simulator_config};
use crate::domain::error::PapertradeError;
use crate::domain::instrument::{self, Instrument};
use crate::domain::order::Order;
use crate::domain::session::{ReplayReport, Session};
use crate::ports::config_port::ConfigPort;
use crate::ports::quote_port::QuotePort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "papertrade", about = "Virtual trading simulator")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay an order file against a fresh portfolio
    Trade {
        #[arg(short, long)]
        config: PathBuf,
        /// Overrides [simulator] prices
        #[arg(short, long)]
        prices: Option<PathBuf>,
        #[arg(long)]
        orders: PathBuf,
        /// Overrides [report] output
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the instrument catalog
    Quotes {
        #[arg(short, long)]
        prices: PathBuf,
    },
    /// Validate a simulator configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Outcome of a completed trading session.
pub struct SessionRun {
    pub session: Session,
    pub catalog: Vec<Instrument>,
    pub report: ReplayReport,
}

pub fn run(cli: Cli) -> ExitCode {
    match execute(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn execute(command: Command) -> Result<(), PapertradeError> {
    match command {
        Command::Trade {
            config,
            prices,
            orders,
            output,
        } => run_trade(&config, prices.as_deref(), &orders, output.as_deref()),
        Command::Quotes { prices } => run_quotes(&prices),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, PapertradeError> {
    FileConfigAdapter::from_file(path).map_err(|e| PapertradeError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Resolves the price file: command-line override first, then
/// `[simulator] prices` relative to the config file's directory.
pub fn resolve_prices_path(
    prices_override: Option<&Path>,
    config: &dyn ConfigPort,
    config_path: &Path,
) -> Result<PathBuf, PapertradeError> {
    if let Some(p) = prices_override {
        return Ok(p.to_path_buf());
    }
    let configured = config
        .get_string("simulator", "prices")
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| PapertradeError::ConfigMissing {
            section: "simulator".into(),
            key: "prices".into(),
        })?;
    let configured = PathBuf::from(configured.trim());
    if configured.is_absolute() {
        return Ok(configured);
    }
    Ok(config_path
        .parent()
        .map(|dir| dir.join(&configured))
        .unwrap_or(configured))
}

/// Runs one session: fresh portfolio from the configured endowment, orders
/// submitted in file order against a single snapshot of prices.
pub fn run_session(
    config: &dyn ConfigPort,
    quote_port: &dyn QuotePort,
    orders: Vec<Order>,
) -> Result<SessionRun, PapertradeError> {
    let catalog = quote_port.fetch_instruments()?;
    let quotes = instrument::quotes(&catalog);
    let stop_on_reject = config.get_bool("simulator", "stop_on_reject", false);

    let mut session = Session::new(initial_cash(config)?)?;
    info!(
        cash = %session.initial_cash(),
        instruments = catalog.len(),
        orders = orders.len(),
        "starting session"
    );

    let report = session.replay(orders, &quotes, stop_on_reject)?;
    if report.rejected > 0 {
        warn!(rejected = report.rejected, "some orders were rejected");
    }
    info!(
        accepted = report.accepted,
        total_value = %session.state().total_value(),
        "session complete"
    );

    Ok(SessionRun {
        session,
        catalog,
        report,
    })
}

fn run_trade(
    config_path: &Path,
    prices_override: Option<&Path>,
    orders_path: &Path,
    output_override: Option<&Path>,
) -> Result<(), PapertradeError> {
    info!(path = %config_path.display(), "loading config");
    let config = load_config(config_path)?;
    validate_simulator_config(&config, prices_override.is_none())?;

    let prices_path = resolve_prices_path(prices_override, &config, config_path)?;
    let quote_port = CsvQuoteAdapter::new(prices_path);
    let orders = read_orders(orders_path)?;

    let run = run_session(&config, &quote_port, orders)?;

    let output = output_override
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("report", "output").map(PathBuf::from));

    match output {
        Some(path) => {
            let mut out = BufWriter::new(File::create(&path)?);
            TextReportAdapter.write(&run.session, &run.catalog, &mut out)?;
            out.flush()?;
            eprintln!("Report written to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            TextReportAdapter.write(&run.session, &run.catalog, &mut out)?;
        }
    }

    eprintln!(
        "{} orders filled, {} rejected",
        run.report.accepted, run.report.rejected
    );
    Ok(())
}

fn run_quotes(prices_path: &Path) -> Result<(), PapertradeError> {
    let catalog = CsvQuoteAdapter::new(prices_path.to_path_buf()).fetch_instruments()?;
    if catalog.is_empty() {
        eprintln!("No instruments found in {}", prices_path.display());
        return Ok(());
    }
    for instrument in &catalog {
        println!(
            "{:<8} {:<28} {:>12.2} {:>+7.2}%",
            instrument.symbol, instrument.name, instrument.price, instrument.change_pct
        );
    }
    eprintln!("{} instruments", catalog.len());
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), PapertradeError> {
    eprintln!("Validating config: {}", config_path.display());
    let config = load_config(config_path)?;
    validate_simulator_config(&config, true)?;
    eprintln!("  initial_cash: {}", initial_cash(&config)?);
    eprintln!(
        "  stop_on_reject: {}",
        config.get_bool("simulator", "stop_on_reject", false)
    );
    eprintln!("\nConfiguration is valid.");
    Ok(())
}
