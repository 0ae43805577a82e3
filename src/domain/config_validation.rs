//! Configuration validation.
//!
//! Validates simulator config fields before a session runs.

use crate::domain::error::PapertradeError;
use crate::ports::config_port::ConfigPort;
use rust_decimal::Decimal;

pub const DEFAULT_INITIAL_CASH: i64 = 100_000;

/// `require_prices` is false when the price file is supplied on the command line.
pub fn validate_simulator_config(
    config: &dyn ConfigPort,
    require_prices: bool,
) -> Result<(), PapertradeError> {
    validate_initial_cash(config)?;
    if require_prices {
        validate_prices_path(config)?;
    }
    Ok(())
}

/// Reads `[simulator] initial_cash`, falling back to the default when absent.
pub fn initial_cash(config: &dyn ConfigPort) -> Result<Decimal, PapertradeError> {
    match config.get_string("simulator", "initial_cash") {
        None => Ok(Decimal::from(DEFAULT_INITIAL_CASH)),
        Some(_) => config
            .get_decimal("simulator", "initial_cash")
            .ok_or_else(|| PapertradeError::ConfigInvalid {
                section: "simulator".to_string(),
                key: "initial_cash".to_string(),
                reason: "initial_cash must be a decimal number".to_string(),
            }),
    }
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    let value = initial_cash(config)?;
    if value < Decimal::ZERO {
        return Err(PapertradeError::ConfigInvalid {
            section: "simulator".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be non-negative".to_string(),
        });
    }
    Ok(())
}

fn validate_prices_path(config: &dyn ConfigPort) -> Result<(), PapertradeError> {
    match config.get_string("simulator", "prices") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(PapertradeError::ConfigMissing {
            section: "simulator".to_string(),
            key: "prices".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use rust_decimal_macros::dec;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_config() {
        let config = adapter("[simulator]\ninitial_cash = 50000\nprices = prices.csv\n");
        assert!(validate_simulator_config(&config, true).is_ok());
        assert_eq!(initial_cash(&config).unwrap(), dec!(50000));
    }

    #[test]
    fn default_initial_cash() {
        let config = adapter("[simulator]\nprices = prices.csv\n");
        assert_eq!(initial_cash(&config).unwrap(), dec!(100000));
    }

    #[test]
    fn zero_initial_cash_is_allowed() {
        let config = adapter("[simulator]\ninitial_cash = 0\nprices = p.csv\n");
        assert!(validate_simulator_config(&config, true).is_ok());
    }

    #[test]
    fn negative_initial_cash() {
        let config = adapter("[simulator]\ninitial_cash = -5\nprices = p.csv\n");
        let err = validate_simulator_config(&config, true).unwrap_err();
        assert!(
            matches!(err, PapertradeError::ConfigInvalid { ref key, .. } if key == "initial_cash")
        );
    }

    #[test]
    fn non_numeric_initial_cash() {
        let config = adapter("[simulator]\ninitial_cash = plenty\nprices = p.csv\n");
        let err = validate_simulator_config(&config, true).unwrap_err();
        assert!(err.to_string().contains("must be a decimal number"));
    }

    #[test]
    fn missing_prices() {
        let config = adapter("[simulator]\ninitial_cash = 100\n");
        let err = validate_simulator_config(&config, true).unwrap_err();
        assert!(
            matches!(err, PapertradeError::ConfigMissing { ref key, .. } if key == "prices")
        );
        assert!(validate_simulator_config(&config, false).is_ok());
    }
}
