use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from file: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    #[error("Initial equity must be between 0 and 100 percent, got {0}")]
    InitialEquityOutOfRange(Decimal),

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}
