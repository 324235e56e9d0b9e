//! Main CLI parser and top-level argument handling.

use std::time::Duration;

use clap::{Parser, Subcommand};
use docgate_core::DEFAULT_OUTPUT_LIMIT;

/// Command-line interface for the docgate documentation gateway.
#[derive(Debug, Parser)]
#[command(name = "docgate")]
#[command(about = "Serve document compilation, diagram rendering and stub generation over MCP")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output (logs go to stderr)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Kill external converters that run longer than this many seconds
    #[arg(long = "process-timeout", env = "DOCGATE_PROCESS_TIMEOUT", global = true)]
    pub process_timeout: Option<u64>,

    /// Per-stream capture ceiling for converter output, in bytes
    #[arg(long = "output-limit", default_value_t = DEFAULT_OUTPUT_LIMIT, global = true)]
    pub output_limit: usize,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The command to run; `serve` when none was given.
    pub fn command(&self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }

    pub fn process_timeout(&self) -> Option<Duration> {
        self.process_timeout
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout (default)
    Serve,

    /// Show resolved paths for configuration and bundled assets
    Paths,

    /// Load and validate the configuration, then exit
    CheckConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn parser_builds() {
        <Cli as CommandFactory>::command().debug_assert();
    }

    #[test]
    fn serve_is_the_default() {
        let cli = Cli::parse_from(["docgate"]);
        assert_eq!(cli.command(), Commands::Serve);
        assert!(!cli.verbose);
        assert_eq!(cli.output_limit, DEFAULT_OUTPUT_LIMIT);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "docgate",
            "check-config",
            "--verbose",
            "--process-timeout",
            "90",
            "--output-limit",
            "4096",
        ]);
        assert_eq!(cli.command(), Commands::CheckConfig);
        assert!(cli.verbose);
        assert_eq!(cli.process_timeout(), Some(Duration::from_secs(90)));
        assert_eq!(cli.output_limit, 4096);
    }

    #[test]
    fn zero_timeout_means_none() {
        let cli = Cli::parse_from(["docgate", "--process-timeout", "0", "serve"]);
        assert_eq!(cli.process_timeout(), None);
    }

    #[test]
    fn rejects_non_numeric_timeout() {
        assert!(Cli::try_parse_from(["docgate", "--process-timeout", "soon"]).is_err());
    }
}
