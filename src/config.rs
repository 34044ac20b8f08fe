use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "papersieve";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Providers the backend registry knows how to construct.
pub const SUPPORTED_PROVIDERS: &[&str] = &["anthropic", "openai", "gemini"];

/// Default screening recency window: items published more than this many
/// days ago are skipped before classification.
pub const DEFAULT_SCREEN_WINDOW_DAYS: i64 = 10;

/// Default reporting window for `assemble_report`.
pub const DEFAULT_REPORT_WINDOW_DAYS: i64 = 7;

/// Get the application data directory (~/.papersieve)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(".papersieve")
}

/// Default location of the relevance store database
pub fn default_db_path() -> PathBuf {
    app_data_dir().join("papers.db")
}

/// Errors in the configuration shape handed to us by the loader.
///
/// All of these are fatal before any item is processed — a run never starts
/// with a provider or credential problem.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown provider '{name}'. Choose from: {supported:?}")]
    UnknownProvider {
        name: String,
        supported: &'static [&'static str],
    },

    #[error("API key for provider '{0}' is not configured")]
    MissingApiKey(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Validated configuration consumed by the screening pipeline.
///
/// Loading this from YAML/env is the job of an external collaborator; this
/// struct only defines the shape and validates it before a run starts.
#[derive(Debug, Clone)]
pub struct ScreeningConfig {
    /// Provider name, one of [`SUPPORTED_PROVIDERS`].
    pub provider: String,
    /// Optional model override; each provider has its own default.
    pub model: Option<String>,
    /// Screening recency window in days. 0 disables the staleness filter.
    pub screen_window_days: i64,
    /// Reporting window in days.
    pub report_window_days: i64,
    /// Max items classified per origin feed per run. 0 = unlimited.
    pub max_per_feed: usize,
    /// Relevance store location.
    pub database_path: PathBuf,
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        Self {
            provider: "anthropic".to_string(),
            model: None,
            screen_window_days: DEFAULT_SCREEN_WINDOW_DAYS,
            report_window_days: DEFAULT_REPORT_WINDOW_DAYS,
            max_per_feed: 0,
            database_path: default_db_path(),
        }
    }
}

impl ScreeningConfig {
    /// Validate the shape. Called before the store or backend is constructed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(ConfigError::UnknownProvider {
                name: self.provider.clone(),
                supported: SUPPORTED_PROVIDERS,
            });
        }
        if self.screen_window_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "screen_window_days".to_string(),
                reason: format!("must be >= 0, got {}", self.screen_window_days),
            });
        }
        if self.report_window_days < 0 {
            return Err(ConfigError::InvalidValue {
                field: "report_window_days".to_string(),
                reason: format!("must be >= 0, got {}", self.report_window_days),
            });
        }
        Ok(())
    }

    /// Screening staleness window as a duration. None when disabled.
    pub fn screen_window(&self) -> Option<chrono::Duration> {
        (self.screen_window_days > 0).then(|| chrono::Duration::days(self.screen_window_days))
    }

    /// Reporting window as a duration. None when disabled.
    pub fn report_window(&self) -> Option<chrono::Duration> {
        (self.report_window_days > 0).then(|| chrono::Duration::days(self.report_window_days))
    }
}
