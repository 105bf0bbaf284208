use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalculatorError {
    #[error("Calculation error: Division by zero in round {round} (post-money valuation is zero)")]
    DivisionUndefined { round: usize },

    #[error("Calculation error: Arithmetic overflow while diluting round {round}")]
    Overflow { round: usize },
}
