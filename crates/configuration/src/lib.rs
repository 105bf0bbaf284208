use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use logging::init_logging;
pub use settings::{Display, LogFormat, Logging, OutputFormat, Settings};

/// The file looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `DILUTION__INITIAL_EQUITY=80` or
/// `DILUTION__DISPLAY__FORMAT=json`.
pub const ENV_PREFIX: &str = "DILUTION";

/// Loads the application configuration.
///
/// Sources are layered, later ones winning: built-in defaults, then the TOML file
/// (`path` if given, otherwise an optional `config.toml` in the working directory),
/// then `DILUTION__*` environment variables. The result is validated before it is
/// returned.
pub fn load_config(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_config_from(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_config_from(
    path: Option<&Path>,
    environment: config::Environment,
) -> Result<Settings, ConfigError> {
    let file = match path {
        // An explicitly requested file must exist.
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(environment)
        .build()?;

    // Attempt to deserialize the entire configuration into our `Settings` struct
    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
