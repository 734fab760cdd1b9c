//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for emabacktest.
#[derive(Debug, thiserror::Error)]
pub enum BacktestError {
    #[error("insufficient data: have {points} price points, need at least {minimum}")]
    InsufficientData { points: usize, minimum: usize },

    #[error("out-of-order input at index {index}: {date} does not follow {previous}")]
    OutOfOrderInput {
        index: usize,
        previous: NaiveDate,
        date: NaiveDate,
    },

    #[error("internal consistency error on {date}: {reason}")]
    InternalConsistency { date: NaiveDate, reason: String },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

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

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BacktestError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        BacktestError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        BacktestError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            BacktestError::Io(_) => 1,
            BacktestError::ConfigParse { .. }
            | BacktestError::ConfigMissing { .. }
            | BacktestError::ConfigInvalid { .. } => 2,
            BacktestError::DataSource { .. } => 3,
            BacktestError::InsufficientData { .. }
            | BacktestError::OutOfOrderInput { .. }
            | BacktestError::InvalidParameter { .. } => 4,
            BacktestError::NoData { .. } => 5,
            BacktestError::InternalConsistency { .. } => 6,
        }
    }
}

impl From<&BacktestError> for std::process::ExitCode {
    fn from(err: &BacktestError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
