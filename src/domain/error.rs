//! Domain error types.
//!
//! Missing market data is never an error: indicators report it as `None`
//! (or the neutral `0.0`). These variants cover configuration, data loading
//! and backend failures only.

/// Top-level error type for pipsignal.
#[derive(Debug, thiserror::Error)]
pub enum PipsignalError {
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

    #[error("invalid timeframe: {minutes} minutes")]
    InvalidTimeframe { minutes: i64 },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error("execution backend rejected {action} on {symbol}: {reason}")]
    Execution {
        action: String,
        symbol: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PipsignalError> for std::process::ExitCode {
    fn from(err: &PipsignalError) -> Self {
        let code: u8 = match err {
            PipsignalError::Io(_) => 1,
            PipsignalError::ConfigParse { .. }
            | PipsignalError::ConfigMissing { .. }
            | PipsignalError::ConfigInvalid { .. }
            | PipsignalError::InvalidTimeframe { .. } => 2,
            PipsignalError::Data { .. } | PipsignalError::NoData { .. } => 3,
            PipsignalError::Execution { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
