//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::downloads::LeadSource;
use crate::region::Region;

/// Region Portal - region-scoped content gateway
#[derive(Parser)]
#[command(name = "regionportal")]
#[command(version)]
#[command(about = "Region-scoped content gateway for a multi-country trade portal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands (no subcommand starts the server)
#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Inspect translation tables
    Locales {
        #[command(subcommand)]
        action: LocaleCommands,
    },

    /// Manage captured leads
    Leads {
        #[command(subcommand)]
        action: LeadCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum LocaleCommands {
    /// Check that every region defines every translation key
    Check,
}

#[derive(Subcommand)]
pub enum LeadCommands {
    /// Export a region's leads to CSV
    Export {
        /// Region code (br, mx, fr)
        #[arg(long)]
        region: Region,

        /// Only export leads from this source (newsletter, ebook, technical, media-kit)
        #[arg(long)]
        source: Option<LeadSource>,

        /// Output file path (default: leads_<region>_<timestamp>.csv)
        file_path: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_leads_export() {
        let cli = Cli::try_parse_from([
            "regionportal",
            "leads",
            "export",
            "--region",
            "mx",
            "--source",
            "media-kit",
            "out.csv",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Leads {
                action:
                    LeadCommands::Export {
                        region,
                        source,
                        file_path,
                    },
            }) => {
                assert_eq!(region, Region::Mx);
                assert_eq!(source, Some(LeadSource::MediaKit));
                assert_eq!(file_path.as_deref(), Some("out.csv"));
            }
            _ => panic!("unexpected command"),
        }
    }

    #[test]
    fn test_no_subcommand_runs_server() {
        let cli = Cli::try_parse_from(["regionportal"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unknown_region_rejected() {
        assert!(
            Cli::try_parse_from(["regionportal", "leads", "export", "--region", "ar"]).is_err()
        );
    }
}
