//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field has a default so an empty file is valid.

pub mod auth;
pub mod backend;
pub mod cache;
pub mod logging;
pub mod mock;
pub mod presentation;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

pub use self::auth::{AuthConfig, SessionConfig};
pub use self::backend::{BackendConfig, BackendMode};
pub use self::cache::{CacheConfig, MemoryCacheConfig};
pub use self::logging::LoggingConfig;
pub use self::mock::MockConfig;
pub use self::presentation::{EmailConfig, TableConfig};

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay + an
/// explicit file) and `DAK__` environment variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Which data backend to talk to.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Demo backend settings.
    #[serde(default)]
    pub mock: MockConfig,
    /// Where the signed-in session is persisted.
    #[serde(default)]
    pub session: SessionConfig,
    /// Credential rules checked before contacting the backend.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Query cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
    /// File list presentation settings.
    #[serde(default)]
    pub table: TableConfig,
    /// Email composer defaults.
    #[serde(default)]
    pub email: EmailConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default.toml`, the `config/{DAK_ENV}.toml` overlay,
    /// the file at `config_path`, and environment variables prefixed with
    /// `DAK__` (for example `DAK__BACKEND__MODE=rest`). Missing files are
    /// skipped.
    pub fn load(config_path: &str) -> Result<Self, AppError> {
        let env = std::env::var("DAK_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("DAK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that deserialize but cannot work.
    ///
    /// Collects every problem instead of stopping at the first one.
    pub fn validate(&self) -> Result<(), AppError> {
        let mut problems = Vec::new();

        collect_field_errors(&mut problems, self.backend.validate());
        collect_field_errors(&mut problems, self.session.validate());
        collect_field_errors(&mut problems, self.auth.validate());
        collect_field_errors(&mut problems, self.cache.validate());
        collect_field_errors(&mut problems, self.table.validate());

        match self.backend.mode {
            BackendMode::Rest => {
                let base_url = self.backend.base_url.trim();
                if base_url.is_empty() {
                    problems.push("backend.base_url must not be empty in rest mode".to_string());
                } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    problems.push(format!(
                        "backend.base_url `{base_url}` must start with http:// or https://"
                    ));
                }
            }
            BackendMode::Mock => {
                if self.mock.data_dir.trim().is_empty() {
                    problems.push("mock.data_dir must not be empty in mock mode".to_string());
                }
            }
        }

        if self.cache.provider != "memory" {
            problems.push(format!(
                "cache.provider `{}` is not supported (expected `memory`)",
                self.cache.provider
            ));
        }
        if !matches!(self.logging.format.as_str(), "json" | "pretty") {
            problems.push(format!(
                "logging.format `{}` must be `json` or `pretty`",
                self.logging.format
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            problems.sort();
            Err(AppError::configuration(format!(
                "Invalid configuration: {}",
                problems.join("; ")
            )))
        }
    }

    /// Parse configuration from an in-memory TOML string.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    /// Render the configuration back to TOML-compatible JSON for display.
    pub fn to_pretty_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn collect_field_errors(problems: &mut Vec<String>, result: Result<(), ValidationErrors>) {
    let Err(errors) = result else {
        return;
    };
    for (field, errs) in errors.field_errors() {
        for err in errs {
            problems.push(match &err.message {
                Some(message) => message.to_string(),
                None => format!("Invalid value for '{field}'"),
            });
        }
    }
}
