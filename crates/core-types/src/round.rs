use crate::error::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single funding event: an investment made at a given post-money valuation.
///
/// The fields are private so that every `FundingRound` in the system has passed
/// through [`FundingRound::new`]. Deserialization is routed through the same
/// check, so a round read from a config file is as trustworthy as one built in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFundingRound")]
pub struct FundingRound {
    investment: Decimal,
    valuation: Decimal,
}

/// The unchecked wire shape of a `FundingRound`.
#[derive(Debug, Deserialize)]
struct RawFundingRound {
    investment: Decimal,
    valuation: Decimal,
}

impl FundingRound {
    /// Creates a round, enforcing `0 <= investment <= valuation` and `valuation > 0`.
    pub fn new(investment: Decimal, valuation: Decimal) -> Result<Self, CoreError> {
        let invalid = |reason| CoreError::InvalidRound {
            investment,
            valuation,
            reason,
        };

        if investment < Decimal::ZERO {
            return Err(invalid("investment must not be negative"));
        }
        if valuation <= Decimal::ZERO {
            return Err(invalid("post-money valuation must be greater than zero"));
        }
        if investment > valuation {
            return Err(invalid("investment cannot exceed the post-money valuation"));
        }

        Ok(Self {
            investment,
            valuation,
        })
    }

    pub fn investment(&self) -> Decimal {
        self.investment
    }

    pub fn valuation(&self) -> Decimal {
        self.valuation
    }
}

impl TryFrom<RawFundingRound> for FundingRound {
    type Error = CoreError;

    fn try_from(raw: RawFundingRound) -> Result<Self, Self::Error> {
        FundingRound::new(raw.investment, raw.valuation)
    }
}

/// Parses the `INVESTMENT:VALUATION` form used on the command line.
///
/// Underscores and commas are accepted as digit separators, e.g. `500_000:5,000,000`.
impl FromStr for FundingRound {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = |reason: String| CoreError::Parse {
            input: s.to_string(),
            reason,
        };

        let (investment, valuation) = s
            .split_once(':')
            .ok_or_else(|| parse_err("expected INVESTMENT:VALUATION".to_string()))?;

        let parse_amount = |field: &str, raw: &str| -> Result<Decimal, CoreError> {
            let cleaned: String = raw
                .trim()
                .chars()
                .filter(|c| *c != '_' && *c != ',')
                .collect();
            Decimal::from_str(&cleaned).map_err(|e| parse_err(format!("{field}: {e}")))
        };

        let investment = parse_amount("investment", investment)?;
        let valuation = parse_amount("valuation", valuation)?;

        FundingRound::new(investment, valuation)
    }
}

impl fmt::Display for FundingRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.investment, self.valuation)
    }
}
