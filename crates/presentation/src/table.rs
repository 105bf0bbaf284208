use calculator::{DilutionRecord, DilutionReport};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use rust_decimal::Decimal;

/// Renders a dilution report as a text table.
pub trait TableRenderer {
    fn render_table(&self, report: &DilutionReport) -> String;
}

pub const COLUMNS: [&str; 5] = [
    "Round",
    "Investment",
    "Post-Money Valuation",
    "Pre-Round Equity (%)",
    "Post-Round Equity (%)",
];

/// A `TableRenderer` backed by `comfy-table`.
#[derive(Debug, Clone, Copy)]
pub struct ComfyTableRenderer {
    decimals: u32,
}

impl ComfyTableRenderer {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    fn row(&self, record: &DilutionRecord) -> Vec<Cell> {
        vec![
            Cell::new(record.label()),
            numeric_cell(format_money(record.investment(), self.decimals)),
            numeric_cell(format_money(record.post_money_valuation(), self.decimals)),
            numeric_cell(format_fixed(record.pre_round_equity(), self.decimals)),
            numeric_cell(format_fixed(record.post_round_equity(), self.decimals)),
        ]
    }
}

impl Default for ComfyTableRenderer {
    fn default() -> Self {
        Self::new(2)
    }
}

impl TableRenderer for ComfyTableRenderer {
    fn render_table(&self, report: &DilutionReport) -> String {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(COLUMNS);

        for record in report {
            table.add_row(self.row(record));
        }

        table.to_string()
    }
}

/// One-line outcome under the table, e.g.
/// "Founder equity: 100.00% -> 81.00% (19.00 points diluted over 2 rounds)".
pub fn summary(report: &DilutionReport, decimals: u32) -> String {
    let rounds = match report.len() {
        1 => "1 round".to_string(),
        n => format!("{n} rounds"),
    };
    format!(
        "Founder equity: {}% -> {}% ({} points diluted over {})",
        format_fixed(report.initial_equity(), decimals),
        format_fixed(report.final_equity(), decimals),
        format_fixed(report.total_dilution_pct(), decimals),
        rounds
    )
}

fn numeric_cell(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn format_fixed(value: Decimal, decimals: u32) -> String {
    format!("{:.*}", decimals as usize, value.round_dp(decimals))
}

/// Fixed-point with thousands separators on the integer part: 5000000 -> "5,000,000.00".
fn format_money(value: Decimal, decimals: u32) -> String {
    let fixed = format_fixed(value.abs(), decimals);
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}
