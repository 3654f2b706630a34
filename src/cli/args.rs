//! Command-line argument parsing
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::config::Config;

/// Detect sarcasm in Indonesian text using a remote classification service
#[derive(Parser, Debug)]
#[command(name = "sarcasm-detector")]
#[command(version)]
#[command(about = "Detect sarcasm in Indonesian text", long_about = None)]
pub struct Args {
    /// Text to analyze (max 1000 characters)
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Backend host
    #[arg(long)]
    pub host: Option<String>,

    /// Backend port
    #[arg(long)]
    pub port: Option<u16>,

    /// Backend base URL (overrides host and port)
    #[arg(long)]
    pub url: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only the result and errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start interactive mode
    Start,

    /// Check whether the backend is reachable
    Health,

    /// Display current configuration
    Config {
        /// Write the effective configuration to the default location
        #[arg(long)]
        init: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Verbosity from flags, falling back to the configured level
    pub fn verbosity(&self, configured: Verbosity) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => configured,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Check that text and subcommand are not mixed
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_none() && self.text.is_none() {
            return Err(
                "Text required. Use 'sarcasm-detector <TEXT>' or run a subcommand.".to_string(),
            );
        }

        if self.command.is_some() && self.text.is_some() {
            return Err("Cannot specify text with subcommand.".to_string());
        }

        Ok(())
    }

    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.backend.host = host.clone();
        }
        if let Some(port) = self.port {
            config.backend.port = port;
        }
        if let Some(url) = &self.url {
            config.backend.url = Some(url.clone());
        }
        if self.no_color {
            config.telemetry.color_output = false;
        }
    }
}

impl Verbosity {
    /// Parse a configured level, as accepted by `Config::validate`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if should show the progress spinner
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(cli: &[&str]) -> Args {
        Args::parse_from(std::iter::once("sarcasm-detector").chain(cli.iter().copied()))
    }

    #[test]
    fn test_verbosity_quiet() {
        assert_eq!(args(&["-q", "halo"]).verbosity(Verbosity::Normal), Verbosity::Quiet);
    }

    #[test]
    fn test_verbosity_uses_configured_default() {
        assert_eq!(args(&["halo"]).verbosity(Verbosity::Verbose), Verbosity::Verbose);
    }

    #[test]
    fn test_verbosity_flags() {
        assert_eq!(args(&["-v", "halo"]).verbosity(Verbosity::Normal), Verbosity::Verbose);
        assert_eq!(
            args(&["-vv", "halo"]).verbosity(Verbosity::Normal),
            Verbosity::VeryVerbose
        );
    }

    #[test]
    fn test_validate_success_with_text() {
        assert!(args(&["halo"]).validate().is_ok());
    }

    #[test]
    fn test_validate_success_with_subcommand() {
        let parsed = args(&["health"]);
        assert!(matches!(parsed.command, Some(Commands::Health)));
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_validate_fail_no_text_or_command() {
        assert!(args(&[]).validate().is_err());
    }

    #[test]
    fn test_config_init_flag() {
        let parsed = args(&["config", "--init"]);
        assert!(matches!(parsed.command, Some(Commands::Config { init: true })));
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        args(&["--host", "10.1.1.1", "--port", "9000", "--no-color", "halo"])
            .apply_overrides(&mut config);
        assert_eq!(config.base_url().unwrap().as_str(), "http://10.1.1.1:9000/");
        assert!(!config.telemetry.color_output);

        args(&["--url", "https://api.example.com", "halo"]).apply_overrides(&mut config);
        assert_eq!(config.base_url().unwrap().as_str(), "https://api.example.com/");
    }

    #[test]
    fn test_verbosity_parse() {
        for level in ["quiet", "normal", "verbose", "very_verbose"] {
            assert_eq!(Verbosity::parse(level).unwrap().as_str(), level);
        }
        assert!(Verbosity::parse("loud").is_none());
    }
}
