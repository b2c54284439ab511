//! CLI interface module
//!
//! This module provides command-line interface functionality for regionportal.

pub mod commands;

use crate::cli::{Commands, ConfigCommands, LeadCommands, LocaleCommands};
use crate::storage::StorageFactory;
use commands::{check_locales, config_generate, export_leads};
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::PortalError> for CliError {
    fn from(err: crate::errors::PortalError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    match cmd {
        // 以下两个命令不需要数据库连接
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,

        Commands::Locales {
            action: LocaleCommands::Check,
        } => check_locales(),

        Commands::Leads {
            action:
                LeadCommands::Export {
                    region,
                    source,
                    file_path,
                },
        } => {
            let storage = StorageFactory::create()
                .await
                .map_err(|e| CliError::StorageError(e.to_string()))?;
            export_leads(storage, region, source, file_path).await
        }
    }
}
