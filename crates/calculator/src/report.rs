use rust_decimal::Decimal;
use serde::Serialize;

/// One row of the dilution report: the founder's position before and after a round.
///
/// Records are only produced by the `DilutionCalculator`, which guarantees the
/// chaining between consecutive rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DilutionRecord {
    round: usize,
    investment: Decimal,
    post_money_valuation: Decimal,
    pre_round_equity: Decimal,
    post_round_equity: Decimal,
}

impl DilutionRecord {
    pub(crate) fn new(
        round: usize,
        investment: Decimal,
        post_money_valuation: Decimal,
        pre_round_equity: Decimal,
        post_round_equity: Decimal,
    ) -> Self {
        Self {
            round,
            investment,
            post_money_valuation,
            pre_round_equity,
            post_round_equity,
        }
    }

    /// 1-based position of the round in the financing history.
    pub fn round(&self) -> usize {
        self.round
    }

    /// Human-readable round name, e.g. "Round 2".
    pub fn label(&self) -> String {
        format!("Round {}", self.round)
    }

    pub fn investment(&self) -> Decimal {
        self.investment
    }

    pub fn post_money_valuation(&self) -> Decimal {
        self.post_money_valuation
    }

    pub fn pre_round_equity(&self) -> Decimal {
        self.pre_round_equity
    }

    pub fn post_round_equity(&self) -> Decimal {
        self.post_round_equity
    }

    /// Percentage points of ownership given up in this round.
    pub fn dilution_pct(&self) -> Decimal {
        self.pre_round_equity - self.post_round_equity
    }
}

/// The ordered result of a dilution calculation, one record per funding round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DilutionReport {
    initial_equity: Decimal,
    records: Vec<DilutionRecord>,
}

impl DilutionReport {
    pub(crate) fn new(initial_equity: Decimal, records: Vec<DilutionRecord>) -> Self {
        Self {
            initial_equity,
            records,
        }
    }

    pub fn initial_equity(&self) -> Decimal {
        self.initial_equity
    }

    pub fn records(&self) -> &[DilutionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ownership after the last round, or the initial equity when there were no rounds.
    pub fn final_equity(&self) -> Decimal {
        self.records
            .last()
            .map(DilutionRecord::post_round_equity)
            .unwrap_or(self.initial_equity)
    }

    /// Total percentage points lost across all rounds.
    pub fn total_dilution_pct(&self) -> Decimal {
        self.initial_equity - self.final_equity()
    }
}

impl<'a> IntoIterator for &'a DilutionReport {
    type Item = &'a DilutionRecord;
    type IntoIter = std::slice::Iter<'a, DilutionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
