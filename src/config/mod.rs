//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `PROPOSAL_OUTLINE`
//! prefix and nested values are separated by double underscores. Every
//! setting has a default, so an empty environment yields a usable config.
//!
//! # Example
//!
//! ```no_run
//! use proposal_outline::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! let workspace = config.workspace();
//! ```

mod error;
mod export;
mod history;
mod logging;
mod navigation;
mod parser;

pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use history::HistoryConfig;
pub use logging::LoggingConfig;
pub use navigation::NavigationConfig;
pub use parser::ParserConfig;

use serde::Deserialize;

use crate::domain::workspace::ProposalWorkspace;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Section parser configuration (intro title)
    #[serde(default)]
    pub parser: ParserConfig,

    /// Navigation configuration (follow window)
    #[serde(default)]
    pub navigation: NavigationConfig,

    /// Version history configuration (snapshot labels)
    #[serde(default)]
    pub history: HistoryConfig,

    /// Export configuration (titles, filenames, styling)
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PROPOSAL_OUTLINE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PROPOSAL_OUTLINE__NAVIGATION__FOLLOW_WINDOW=3` -> `navigation.follow_window = 3`
    /// - `PROPOSAL_OUTLINE__LOGGING__LEVEL=debug` -> `logging.level = "debug"`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PROPOSAL_OUTLINE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load and validate in one step
    pub fn load_validated() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for blank titles or labels, a zero follow
    /// window, an unsafe export filename, or an unparseable log filter.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.parser.validate()?;
        self.navigation.validate()?;
        self.history.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Empty workspace wired with the configured parser and navigation policy
    pub fn workspace(&self) -> ProposalWorkspace {
        ProposalWorkspace::new(
            self.parser.section_parser(),
            self.navigation.navigation_state(),
        )
    }
}
