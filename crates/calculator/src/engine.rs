use crate::error::CalculatorError;
use crate::report::{DilutionRecord, DilutionReport};
use core_types::FundingRound;
use rust_decimal::Decimal;

/// A stateless calculator for founder equity dilution across funding rounds.
#[derive(Debug, Default, Clone, Copy)]
pub struct DilutionCalculator {}

impl DilutionCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating dilution.
    ///
    /// # Arguments
    ///
    /// * `initial_equity` - The founder's ownership before the first round, as a percentage.
    ///   The expected range is 0 to 100; callers are responsible for enforcing it.
    /// * `funding_rounds` - The rounds in the order they were raised. May be empty.
    ///
    /// # Returns
    ///
    /// A `Result` containing one `DilutionRecord` per round, in input order, or the
    /// `CalculatorError` of the first round whose arithmetic failed. No partial report
    /// is ever returned.
    ///
    /// # Errors
    ///
    /// Rounds built through `FundingRound::new` always have a positive valuation and
    /// `investment <= valuation`, so neither `DivisionUndefined` nor `Overflow` can
    /// occur for them. The checked arithmetic keeps the calculation panic-free
    /// regardless.
    pub fn calculate(
        &self,
        initial_equity: Decimal,
        funding_rounds: &[FundingRound],
    ) -> Result<DilutionReport, CalculatorError> {
        let mut equity = initial_equity;
        let mut records = Vec::with_capacity(funding_rounds.len());

        for (index, funding_round) in funding_rounds.iter().enumerate() {
            let round = index + 1;
            let new_equity = Self::dilute(
                equity,
                funding_round.investment(),
                funding_round.valuation(),
                round,
            )?;

            tracing::debug!(
                round,
                investment = %funding_round.investment(),
                valuation = %funding_round.valuation(),
                pre_round_equity = %equity,
                post_round_equity = %new_equity,
                "Applied funding round"
            );

            records.push(DilutionRecord::new(
                round,
                funding_round.investment(),
                funding_round.valuation(),
                equity,
                new_equity,
            ));
            equity = new_equity;
        }

        Ok(DilutionReport::new(initial_equity, records))
    }

    /// Computes `equity * (1 - investment / valuation)` with checked arithmetic.
    fn dilute(
        equity: Decimal,
        investment: Decimal,
        valuation: Decimal,
        round: usize,
    ) -> Result<Decimal, CalculatorError> {
        let sold_fraction = investment
            .checked_div(valuation)
            .ok_or(if valuation.is_zero() {
                CalculatorError::DivisionUndefined { round }
            } else {
                CalculatorError::Overflow { round }
            })?;

        equity
            .checked_mul(Decimal::ONE - sold_fraction)
            .ok_or(CalculatorError::Overflow { round })
    }
}
