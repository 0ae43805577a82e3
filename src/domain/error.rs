//! Domain error types.

use rust_decimal::Decimal;

/// Why an order was not applied to a portfolio.
///
/// The first four variants are business-rule rejections: the order was
/// well-formed but cannot be executed against the current state. The last one
/// is a contract violation by the caller (bad price table, corrupt state).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("invalid quantity {quantity}: must be greater than zero")]
    InvalidQuantity { quantity: i64 },

    #[error("unknown symbol {symbol}: no price quote available")]
    UnknownSymbol { symbol: String },

    #[error("insufficient funds: order costs {required}, available cash is {available}")]
    InsufficientFunds { required: Decimal, available: Decimal },

    #[error("insufficient shares of {symbol}: requested {requested}, held {held}")]
    InsufficientShares {
        symbol: String,
        requested: i64,
        held: i64,
    },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}

impl OrderError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        OrderError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// True for ordinary business rejections, false for contract violations.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, OrderError::InvalidInput { .. })
    }
}

/// Top-level error type for papertrade.
#[derive(Debug, thiserror::Error)]
pub enum PapertradeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to load {source_name}: {reason}")]
    DataLoad { source_name: String, reason: String },

    #[error("order file line {line}: {reason}")]
    OrderParse { line: usize, reason: String },

    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PapertradeError {
    /// Process exit status for this error class.
    pub fn exit_status(&self) -> u8 {
        match self {
            PapertradeError::Io(_) => 1,
            PapertradeError::ConfigParse { .. }
            | PapertradeError::ConfigMissing { .. }
            | PapertradeError::ConfigInvalid { .. } => 2,
            PapertradeError::DataLoad { .. } => 3,
            PapertradeError::OrderParse { .. } => 4,
            PapertradeError::Order(_) => 5,
        }
    }
}

impl From<&PapertradeError> for std::process::ExitCode {
    fn from(err: &PapertradeError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
