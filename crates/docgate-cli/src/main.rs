//! CLI entry point - the composition root.
//!
//! stdout belongs to the protocol, so logging goes to stderr.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use docgate_cli::{Cli, CliConfig, CliError, Commands, handlers};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run(cli: &Cli) -> Result<()> {
    match cli.command() {
        Commands::Paths => handlers::paths::execute()?,
        Commands::CheckConfig => handlers::check_config::execute(&CliConfig::from_cli(cli)?)?,
        Commands::Serve => handlers::serve::execute(&CliConfig::from_cli(cli)?).await?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("docgate: {e:#}");
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
