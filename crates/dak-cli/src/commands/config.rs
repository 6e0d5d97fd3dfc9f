//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use dak_core::config::AppConfig;
use dak_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration file
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(&config),
            OutputFormat::Table => println!("{}", config.to_pretty_json()?),
        },
        ConfigCommand::Validate => {
            config.validate()?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
            output::print_kv("Backend", &config.backend.mode.to_string());
            match config.backend.mode {
                dak_core::config::BackendMode::Rest => {
                    output::print_kv("Base URL", &config.backend.base_url);
                }
                dak_core::config::BackendMode::Mock => {
                    output::print_kv("Data dir", &config.mock.data_dir);
                }
            }
            output::print_kv("Session file", &config.session.file);
            output::print_kv("Cache", &config.cache.provider);
        }
        ConfigCommand::Generate { output: out_path } => {
            let default_config = include_str!("../../../../config/default.toml");

            if let Some(parent) = std::path::Path::new(out_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
            {
                std::fs::create_dir_all(parent)
                    .map_err(|e| AppError::storage(format!("Failed to create dir: {e}")))?;
            }

            std::fs::write(out_path, default_config)
                .map_err(|e| AppError::storage(format!("Failed to write config: {e}")))?;

            output::print_success(&format!("Default config written to '{out_path}'"));
        }
    }

    Ok(())
}
