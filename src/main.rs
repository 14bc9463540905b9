//! Binary entry point for the `vultr-cli` tool.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vultr_cli::cli::{Cli, RootCommand};
use vultr_cli::{CommandError, ConfigError, VultrClient, VultrConfig, VultrError, dispatch};

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("error creating API client : {0}")]
    Client(VultrError),
    #[error(transparent)]
    Command(#[from] CommandError<VultrError>),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => process::exit(report_parse_error(&err)),
    };
    init_tracing(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init()
        .ok();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = VultrConfig::load_without_cli_args()?;
    config.validate()?;
    debug!(api_url = %config.api_url, timeout_secs = config.request_timeout_secs, "loaded configuration");
    let client = VultrClient::new(&config).map_err(CliError::Client)?;

    let RootCommand::Server(command) = cli.command;
    dispatch(&client, command, io::stdout().lock()).await?;
    Ok(())
}

/// Prints a clap error and returns the matching exit code: zero for help and
/// version output, one for every usage error.
fn report_parse_error(err: &clap::Error) -> i32 {
    err.print().ok();
    i32::from(err.use_stderr())
}

fn report_error(err: &CliError) {
    write_error(io::stdout(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}

#[cfg(test)]
mod main_tests;
