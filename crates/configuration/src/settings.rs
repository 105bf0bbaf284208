use crate::error::ConfigError;
use core_types::FundingRound;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// The founder's ownership before the first round, as a percentage (0 to 100).
    #[serde(default = "default_initial_equity")]
    pub initial_equity: Decimal,

    /// Funding rounds in the order they were raised.
    #[serde(default = "default_rounds")]
    pub rounds: Vec<FundingRound>,

    #[serde(default)]
    pub display: Display,

    #[serde(default)]
    pub logging: Logging,
}

/// How the dilution report is presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Display {
    pub format: OutputFormat,
    /// Decimal places shown for money and percentage columns.
    pub decimals: u32,
    /// Whether to draw the equity chart below the table.
    pub chart: bool,
    pub chart_width: u16,
    pub chart_height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Table,
    Json,
}

/// Logging output settings. `RUST_LOG` takes precedence over `level` when set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Logging {
    /// An `EnvFilter` directive string, e.g. "info" or "warn,calculator=debug".
    pub level: String,
    pub format: LogFormat,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum LogFormat {
    Text,
    Json,
}

pub const MAX_DECIMALS: u32 = 10;
pub const MIN_CHART_WIDTH: u16 = 30;
pub const MIN_CHART_HEIGHT: u16 = 8;
/// ratatui sizes its canvas grid with `u16` arithmetic, so width * height must fit.
pub const MAX_CHART_CELLS: u32 = u16::MAX as u32;

fn default_initial_equity() -> Decimal {
    dec!(100)
}

fn default_rounds() -> Vec<FundingRound> {
    // A single seed round, the same starting point the input form offered.
    FundingRound::new(dec!(500000), dec!(5000000))
        .into_iter()
        .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_equity: default_initial_equity(),
            rounds: default_rounds(),
            display: Display::default(),
            logging: Logging::default(),
        }
    }
}

impl Default for Display {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            decimals: 2,
            chart: true,
            chart_width: 80,
            chart_height: 20,
        }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            directory: None,
        }
    }
}

impl Settings {
    /// Checks the numeric bounds the calculator relies on its callers to enforce.
    ///
    /// Individual rounds are already validated when they are constructed, so only
    /// the cross-cutting values are checked here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_equity < Decimal::ZERO || self.initial_equity > dec!(100) {
            return Err(ConfigError::InitialEquityOutOfRange(self.initial_equity));
        }

        if self.display.decimals > MAX_DECIMALS {
            return Err(ConfigError::ValidationError(format!(
                "display.decimals must be at most {MAX_DECIMALS}"
            )));
        }
        if self.display.chart_width < MIN_CHART_WIDTH
            || self.display.chart_height < MIN_CHART_HEIGHT
        {
            return Err(ConfigError::ValidationError(format!(
                "chart must be at least {MIN_CHART_WIDTH}x{MIN_CHART_HEIGHT} cells"
            )));
        }
        let chart_cells = u32::from(self.display.chart_width) * u32::from(self.display.chart_height);
        if chart_cells > MAX_CHART_CELLS {
            return Err(ConfigError::ValidationError(format!(
                "chart of {}x{} cells exceeds the {MAX_CHART_CELLS}-cell limit",
                self.display.chart_width, self.display.chart_height
            )));
        }

        EnvFilter::try_new(&self.logging.level).map_err(|e| {
            ConfigError::ValidationError(format!(
                "logging.level '{}' is not a valid filter: {e}",
                self.logging.level
            ))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.initial_equity, dec!(100));
        assert_eq!(settings.rounds.len(), 1);
        assert_eq!(settings.rounds[0].investment(), dec!(500000));
        assert_eq!(settings.rounds[0].valuation(), dec!(5000000));
    }

    #[test]
    fn rejects_equity_above_one_hundred() {
        let settings = Settings {
            initial_equity: dec!(100.01),
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InitialEquityOutOfRange(_))
        ));
    }

    #[test]
    fn rejects_negative_equity() {
        let settings = Settings {
            initial_equity: dec!(-1),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn accepts_boundary_equity() {
        for equity in [dec!(0), dec!(100)] {
            let settings = Settings {
                initial_equity: equity,
                ..Settings::default()
            };
            assert!(settings.validate().is_ok());
        }
    }

    #[test]
    fn rejects_tiny_chart() {
        let mut settings = Settings::default();
        settings.display.chart_height = 2;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_chart_over_cell_limit() {
        let mut settings = Settings::default();
        settings.display.chart_width = 400;
        settings.display.chart_height = 200;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::ValidationError(_))
        ));

        settings.display.chart_width = 256;
        settings.display.chart_height = 256;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn accepts_chart_at_cell_limit() {
        let mut settings = Settings::default();
        // 255 * 257 == 65535
        settings.display.chart_width = 255;
        settings.display.chart_height = 257;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_too_many_decimals() {
        let mut settings = Settings::default();
        settings.display.decimals = MAX_DECIMALS + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_malformed_log_filter() {
        let mut settings = Settings::default();
        settings.logging.level = "calculator=loud".to_string();
        assert!(settings.validate().is_err());
    }
}
