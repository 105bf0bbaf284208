use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid funding round (investment {investment}, valuation {valuation}): {reason}")]
    InvalidRound {
        investment: Decimal,
        valuation: Decimal,
        reason: &'static str,
    },

    #[error("Could not parse funding round '{input}': {reason}")]
    Parse { input: String, reason: String },
}
