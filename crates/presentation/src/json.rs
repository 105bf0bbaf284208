use crate::error::PresentationError;
use calculator::DilutionReport;

/// Serializes the report as pretty-printed JSON. Decimal values are written as
/// strings so no precision is lost.
pub fn render_json(report: &DilutionReport) -> Result<String, PresentationError> {
    Ok(serde_json::to_string_pretty(report)?)
}
