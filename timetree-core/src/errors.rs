use thiserror::Error;

/// Result type used across the timetree crates.
pub type Result<T> = std::result::Result<T, TimeTreeError>;

/// Canonical error representation shared by the index and its callers.
#[derive(Debug, Error)]
pub enum TimeTreeError {
    /// The backing store could not be reached or failed at the transport
    /// level. Fatal for the current call and never retried internally;
    /// retrying the whole call is safe because every write is idempotent.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// A key that does not match the level's field schema. Always a
    /// programming defect in the caller, surfaced immediately.
    #[error("malformed key for {label}: {message}")]
    MalformedKey {
        label: &'static str,
        message: String,
    },
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid weekday value: {0}")]
    InvalidWeekday(String),
    #[error("invalid value for {key}: {value}")]
    InvalidFlag { key: &'static str, value: String },
    #[error("no granularity levels enabled")]
    NoLevelsEnabled,
}

impl From<ConfigError> for TimeTreeError {
    fn from(value: ConfigError) -> Self {
        TimeTreeError::Configuration(value.to_string())
    }
}
