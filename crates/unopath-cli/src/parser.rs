//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::time::Duration;

use clap::Parser;
use unopath_core::{DEFAULT_LOCATOR_TIMEOUT, DiscoveryConfig, parse_definition};

use crate::commands::Commands;

/// Locate a LibreOffice (UNO) installation directory.
#[derive(Parser, Debug)]
#[command(name = "unopath")]
#[command(about = "Locate a LibreOffice installation directory")]
#[command(version)]
pub struct Cli {
    /// Set a process property, like `-Dkey=value` (repeatable)
    #[arg(
        short = 'D',
        long = "define",
        value_name = "KEY=VALUE",
        value_parser = parse_define,
        global = true
    )]
    pub defines: Vec<(String, String)>,

    /// Executable that marks an installation
    #[arg(long, value_name = "NAME", global = true)]
    pub executable: Option<String>,

    /// Program used to look the executable up on PATH
    #[arg(long, value_name = "PROGRAM", global = true)]
    pub locator: Option<String>,

    /// Seconds to wait for the locator before giving up
    #[arg(
        long = "locator-timeout-secs",
        env = "UNOPATH_LOCATOR_TIMEOUT_SECS",
        value_name = "SECS",
        default_value_t = DEFAULT_LOCATOR_TIMEOUT.as_secs(),
        global = true
    )]
    pub locator_timeout_secs: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Build the discovery configuration selected by the flags.
    pub fn discovery_config(&self) -> DiscoveryConfig {
        let mut config = DiscoveryConfig::default()
            .with_locator_timeout(Duration::from_secs(self.locator_timeout_secs));
        if let Some(executable) = &self.executable {
            config = config.with_executable_name(executable.as_str());
        }
        if let Some(locator) = &self.locator {
            config = config.with_locator_program(locator.as_str());
        }
        config
    }
}

fn parse_define(raw: &str) -> Result<(String, String), String> {
    parse_definition(raw)
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "unopath",
            "find",
            "-v",
            "-D",
            "com.sun.star.lib.loader.unopath=/opt/lo/program",
            "--executable",
            "soffice",
            "--locator-timeout-secs",
            "3",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.command, Some(Commands::Find));
        assert_eq!(
            cli.defines,
            vec![(
                "com.sun.star.lib.loader.unopath".to_string(),
                "/opt/lo/program".to_string()
            )]
        );

        let config = cli.discovery_config();
        assert_eq!(config.executable_name, "soffice");
        assert_eq!(config.locator_timeout, Duration::from_secs(3));
        assert_eq!(config.locator_program, "which");
    }

    #[test]
    fn test_define_requires_key() {
        assert!(Cli::try_parse_from(["unopath", "-D", "=value", "find"]).is_err());
        assert!(Cli::try_parse_from(["unopath", "-D", "novalue", "find"]).is_err());
    }

    #[test]
    fn test_explain_json_flag() {
        let cli = Cli::parse_from(["unopath", "explain", "--json"]);
        assert_eq!(cli.command, Some(Commands::Explain { json: true }));
    }

    #[test]
    fn test_decode_url_takes_positional() {
        let cli = Cli::parse_from(["unopath", "decode-url", "file:///opt/lo/"]);
        assert_eq!(
            cli.command,
            Some(Commands::DecodeUrl {
                url: "file:///opt/lo/".to_string()
            })
        );
    }
}
