use anyhow::Context;
use calculator::{DilutionCalculator, DilutionReport};
use clap::{Parser, Subcommand};
use configuration::{OutputFormat, Settings};
use core_types::FundingRound;
use presentation::{
    ChartRenderer, ComfyTableRenderer, TableRenderer, TerminalChartRenderer, render_json, summary,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::process::ExitCode;

/// The main entry point for the founder dilution calculator.
fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            // The whole chain, so the reason behind "Failed to ..." is visible.
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Founder equity dilution across sequential funding rounds.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults to ./config.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate founder dilution and print the report.
    Calculate(CalculateArgs),
    /// Print the resolved configuration (file, environment and defaults) as JSON.
    ShowConfig,
}

#[derive(Parser, Debug)]
struct CalculateArgs {
    /// Founder's ownership before the first round, in percent (0-100).
    #[arg(long)]
    initial_equity: Option<Decimal>,

    /// A funding round as INVESTMENT:VALUATION (post-money), e.g. 500000:5000000.
    /// Repeat in round order. Replaces the rounds from the config file.
    #[arg(long = "round", value_name = "INVESTMENT:VALUATION")]
    rounds: Vec<FundingRound>,

    /// Output format for the report.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Decimal places for money and percentage columns.
    #[arg(long)]
    decimals: Option<u32>,

    /// Skip the equity chart.
    #[arg(long)]
    no_chart: bool,
}

impl CalculateArgs {
    /// Command-line values take precedence over everything loaded from config.
    fn apply_to(self, settings: &mut Settings) {
        if let Some(initial_equity) = self.initial_equity {
            settings.initial_equity = initial_equity;
        }
        if !self.rounds.is_empty() {
            settings.rounds = self.rounds;
        }
        if let Some(format) = self.format {
            settings.display.format = format;
        }
        if let Some(decimals) = self.decimals {
            settings.display.decimals = decimals;
        }
        if self.no_chart {
            settings.display.chart = false;
        }
    }
}

// ==============================================================================
// Command Handling
// ==============================================================================

/// Resolves settings, sets up logging and dispatches the command. Returns the text
/// to print on stdout.
fn run(cli: Cli) -> anyhow::Result<String> {
    // A missing .env file is the normal case.
    dotenvy::dotenv().ok();

    let mut settings =
        configuration::load_config(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Commands::Calculate(args) => {
            args.apply_to(&mut settings);
            settings.validate().context("Invalid input")?;

            let _guard = configuration::init_logging(&settings.logging)?;
            handle_calculate(&settings)
        }
        Commands::ShowConfig => {
            serde_json::to_string_pretty(&settings).context("Failed to serialize configuration")
        }
    }
}

/// Runs the calculator on fully-formed input and renders the report.
///
/// Called only after logging is installed, so the resolved settings are logged here.
fn handle_calculate(settings: &Settings) -> anyhow::Result<String> {
    tracing::debug!(
        format = ?settings.display.format,
        decimals = settings.display.decimals,
        chart = settings.display.chart,
        "Configuration resolved"
    );
    tracing::info!(
        initial_equity = %settings.initial_equity,
        rounds = settings.rounds.len(),
        "Calculating dilution"
    );

    let report = DilutionCalculator::new()
        .calculate(settings.initial_equity, &settings.rounds)
        .context("Dilution calculation failed")?;

    tracing::info!(final_equity = %report.final_equity(), "Calculation complete");

    render_report(&report, settings)
}

fn render_report(report: &DilutionReport, settings: &Settings) -> anyhow::Result<String> {
    let display = &settings.display;

    match display.format {
        OutputFormat::Json => Ok(render_json(report)?),
        OutputFormat::Table => {
            let table: &dyn TableRenderer = &ComfyTableRenderer::new(display.decimals);
            let mut sections = vec![
                "Equity Dilution Report".to_string(),
                table.render_table(report),
                summary(report, display.decimals),
            ];

            if display.chart {
                let chart: &dyn ChartRenderer =
                    &TerminalChartRenderer::new(display.chart_width, display.chart_height);
                sections.push(chart.render_chart(report));
            }

            Ok(sections.join("\n\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    fn calculate_args(argv: &[&str]) -> CalculateArgs {
        let cli = Cli::try_parse_from(argv.iter().copied()).unwrap();
        match cli.command {
            Commands::Calculate(args) => args,
            other => panic!("expected calculate, got {other:?}"),
        }
    }

    #[test]
    fn parses_repeated_rounds_in_order() {
        let args = calculate_args(&[
            "dilution",
            "calculate",
            "--initial-equity",
            "90",
            "--round",
            "500000:5000000",
            "--round",
            "1000000:10000000",
        ]);

        assert_eq!(args.initial_equity, Some(dec!(90)));
        assert_eq!(args.rounds.len(), 2);
        assert_eq!(args.rounds[1].investment(), dec!(1000000));
    }

    #[test]
    fn rejects_round_above_valuation_at_parse_time() {
        let result = Cli::try_parse_from(["dilution", "calculate", "--round", "6:5"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_global_config_and_show_config() {
        let cli = Cli::try_parse_from(["dilution", "show-config", "--config", "other.toml"]).unwrap();
        assert!(matches!(cli.command, Commands::ShowConfig));
        assert_eq!(cli.config, Some(PathBuf::from("other.toml")));
    }

    #[test]
    fn cli_overrides_settings() {
        let args = calculate_args(&[
            "dilution",
            "calculate",
            "--initial-equity",
            "50",
            "--round",
            "1:4",
            "--format",
            "json",
            "--decimals",
            "3",
            "--no-chart",
        ]);
        let mut settings = Settings::default();
        args.apply_to(&mut settings);

        assert_eq!(settings.initial_equity, dec!(50));
        assert_eq!(settings.rounds, vec![FundingRound::new(dec!(1), dec!(4)).unwrap()]);
        assert_eq!(settings.display.format, OutputFormat::Json);
        assert_eq!(settings.display.decimals, 3);
        assert!(!settings.display.chart);
    }

    #[test]
    fn omitted_flags_keep_config_values() {
        let args = calculate_args(&["dilution", "calculate"]);
        let mut settings = Settings::default();
        args.apply_to(&mut settings);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn table_output_includes_table_summary_and_chart() {
        let settings = Settings::default();
        let output = handle_calculate(&settings).unwrap();

        assert!(output.contains("Equity Dilution Report"));
        assert!(output.contains("Round 1"));
        assert!(output.contains("90.00"));
        assert!(output.contains("Founder equity: 100.00% -> 90.00%"));
        assert!(output.contains("Founder Equity Dilution Over Rounds"));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn calculate_logs_resolved_settings() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let settings = Settings::default();
        tracing::subscriber::with_default(subscriber, || handle_calculate(&settings)).unwrap();

        let captured = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(captured.contains("Configuration resolved"), "logs were:\n{captured}");
        assert!(captured.contains("Calculating dilution"));
        assert!(captured.contains("Calculation complete"));
    }

    #[test]
    fn chart_can_be_disabled() {
        let mut settings = Settings::default();
        settings.display.chart = false;
        let output = handle_calculate(&settings).unwrap();
        assert!(!output.contains("Founder Equity Dilution Over Rounds"));
    }

    #[test]
    fn json_output_is_parseable() {
        let mut settings = Settings::default();
        settings.display.format = OutputFormat::Json;
        let output = handle_calculate(&settings).unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn no_rounds_is_not_an_error() {
        let mut settings = Settings::default();
        settings.rounds.clear();
        let output = handle_calculate(&settings).unwrap();
        assert!(output.contains("No funding rounds to plot."));
    }
}
