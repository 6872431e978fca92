//! Command-line interface parsing for the gamemon binary
//!
//! This module handles parsing of CLI arguments using clap and their
//! translation into client construction options.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::client::MonitorOptions;
use crate::log::DebugLevel;

/// gamemon - query game-server status via the game-monitor service
#[derive(Parser, Debug)]
#[command(name = "gamemon")]
#[command(about = "Game-server status lookup with a local cache")]
#[command(version)]
pub struct Cli {
    /// Server host to query (IPv4 address or hostname)
    pub host: Option<String>,

    /// Server port to query
    pub port: Option<u16>,

    /// Seconds a cached record is served without contacting the service
    #[arg(long, default_value_t = 600)]
    pub ttl: u64,

    /// Cache document path (defaults to the platform cache directory)
    #[arg(long, value_name = "FILE")]
    pub cache_file: Option<PathBuf>,

    /// Append diagnostics to this file
    #[arg(long, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,

    /// Verbosity of the debug log
    #[arg(long, value_enum, default_value_t = DebugLevel::Info)]
    pub debug_level: DebugLevel,

    /// Print the record as JSON instead of a text summary
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds client construction options from the parsed arguments.
    ///
    /// The debug log stays disabled unless a log file was given, regardless
    /// of `--debug-level`.
    pub fn monitor_options(&self) -> MonitorOptions {
        let mut options = MonitorOptions::default().with_ttl(Duration::from_secs(self.ttl));

        if let Some(path) = &self.cache_file {
            options = options.with_cache_path(path);
        }
        if let Some(path) = &self.debug_log {
            options = options.with_debug_log(path, self.debug_level);
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_host_and_port() {
        let cli = Cli::parse_from(["gamemon", "1.2.3.4", "9999"]);
        assert_eq!(cli.host.as_deref(), Some("1.2.3.4"));
        assert_eq!(cli.port, Some(9999));
    }

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["gamemon"]);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert_eq!(cli.ttl, 600);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parse_ttl_override() {
        let cli = Cli::parse_from(["gamemon", "--ttl", "30", "1.2.3.4", "9999"]);
        assert_eq!(cli.ttl, 30);
    }

    #[test]
    fn test_cli_rejects_non_numeric_port() {
        let result = Cli::try_parse_from(["gamemon", "1.2.3.4", "notaport"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_monitor_options_carry_ttl_and_cache_file() {
        let cli = Cli::parse_from([
            "gamemon",
            "--ttl",
            "120",
            "--cache-file",
            "/tmp/custom.json",
        ]);
        let options = cli.monitor_options();

        assert_eq!(options.cache_ttl, Duration::from_secs(120));
        assert_eq!(options.cache_path, Some(PathBuf::from("/tmp/custom.json")));
    }

    #[test]
    fn test_debug_level_parses_from_name() {
        let cli = Cli::parse_from(["gamemon", "--debug-level", "trace"]);
        assert_eq!(cli.debug_level, DebugLevel::Trace);
    }
}
