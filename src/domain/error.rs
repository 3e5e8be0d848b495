//! Domain error types.
//!
//! Three families: configuration errors (bad config file, unknown strategy,
//! bad parameter), data errors (unreadable source, malformed bar series),
//! and I/O. Numeric edge cases (zero-variance Sharpe, zero-trade win rate)
//! are not errors; the metrics module reports them as not-applicable.

/// Top-level error type for sigtrader.
#[derive(Debug, thiserror::Error)]
pub enum SigtraderError {
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

    #[error("unknown strategy type '{name}' (available: {available})")]
    UnknownStrategy { name: String, available: String },

    #[error("strategy '{strategy}' requires parameter '{param}'")]
    ParamMissing { strategy: String, param: String },

    #[error("invalid parameter '{param}' for strategy '{strategy}': {reason}")]
    ParamInvalid {
        strategy: String,
        param: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    Data { reason: String },

    #[error("no bars for {symbol} in the requested range")]
    EmptySeries { symbol: String },

    #[error("bar timestamps not strictly increasing at index {index} ({timestamp})")]
    NonMonotonic { index: usize, timestamp: String },

    #[error("invalid bar at index {index}: {reason}")]
    InvalidBar { index: usize, reason: String },

    #[error("signal column has {signals} entries for {bars} bars")]
    SignalMismatch { bars: usize, signals: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SigtraderError> for std::process::ExitCode {
    fn from(err: &SigtraderError) -> Self {
        let code: u8 = match err {
            SigtraderError::Io(_) => 1,
            SigtraderError::ConfigParse { .. }
            | SigtraderError::ConfigMissing { .. }
            | SigtraderError::ConfigInvalid { .. } => 2,
            SigtraderError::UnknownStrategy { .. }
            | SigtraderError::ParamMissing { .. }
            | SigtraderError::ParamInvalid { .. } => 3,
            SigtraderError::Data { .. } => 4,
            SigtraderError::EmptySeries { .. }
            | SigtraderError::NonMonotonic { .. }
            | SigtraderError::InvalidBar { .. }
            | SigtraderError::SignalMismatch { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
