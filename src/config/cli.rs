use crate::config::toml_config::{ScalingMode, TomlConfig};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "home-score")]
#[command(about = "Score home buying affordability for a U.S. place using census data")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Command-line settings that take precedence over the configuration file.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Census API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// How the price-to-income ratio is rescaled
    #[arg(long, global = true, value_enum)]
    pub scaling: Option<ScalingArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScalingArg {
    ReferenceRange,
    SingleSample,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the states the census service knows about
    Regions,

    /// List the places of a state by their cleaned-up names
    Places {
        /// State name, e.g. "California"
        region: String,

        /// Write name, full name and place id as CSV
        #[arg(long)]
        csv: bool,
    },

    /// Fetch median home value and income for a place and score it
    Score {
        /// State name, e.g. "California"
        region: String,

        /// Place name as listed by `places`, e.g. "Springfield"
        place: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Overrides {
    pub fn apply(&self, config: &mut TomlConfig) {
        if let Some(base_url) = &self.base_url {
            tracing::debug!("Base URL overridden to {}", base_url);
            config.service.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            tracing::debug!("Timeout overridden to {}s", timeout);
            config.service.timeout_seconds = timeout;
        }
        if let Some(scaling) = self.scaling {
            tracing::debug!("Scaling overridden to {:?}", scaling);
            config.scoring.mode = match scaling {
                ScalingArg::ReferenceRange => ScalingMode::ReferenceRange,
                ScalingArg::SingleSample => ScalingMode::SingleSample,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_command() {
        let cli = CliConfig::parse_from([
            "home-score",
            "score",
            "California",
            "Springfield",
            "--format",
            "json",
            "--scaling",
            "single-sample",
        ]);

        match &cli.command {
            Command::Score { region, place, format } => {
                assert_eq!(region, "California");
                assert_eq!(place, "Springfield");
                assert_eq!(*format, OutputFormat::Json);
            }
            other => panic!("unexpected command {:?}", other),
        }

        let mut config = TomlConfig::default();
        cli.overrides.apply(&mut config);
        assert_eq!(config.scoring.mode, ScalingMode::SingleSample);
    }

    #[test]
    fn test_overrides_apply() {
        let cli = CliConfig::parse_from([
            "home-score",
            "--base-url",
            "http://localhost:1234",
            "--timeout",
            "9",
            "places",
            "Ohio",
        ]);

        let mut config = TomlConfig::default();
        cli.overrides.apply(&mut config);
        assert_eq!(config.service.base_url, "http://localhost:1234");
        assert_eq!(config.service.timeout_seconds, 9);
        assert!(matches!(cli.command, Command::Places { csv: false, .. }));
    }
}
