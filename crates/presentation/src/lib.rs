//! Presentation of dilution reports: a table, a terminal chart and JSON.
//!
//! The calculator knows nothing about how its output is shown. Rendering is split
//! into two capabilities, `TableRenderer` and `ChartRenderer`, so the binary can
//! pick implementations without the core depending on any of them.

pub mod chart;
pub mod error;
pub mod json;
pub mod table;

pub use chart::{ChartRenderer, TerminalChartRenderer};
pub use error::PresentationError;
pub use json::render_json;
pub use table::{ComfyTableRenderer, TableRenderer, summary};
