use std::io;
use std::process::ExitCode;

use astool_batch::Console;
use astool_store::{AerospikeStore, ClientConfig, RecordStore, StoreResult};
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

fn main() -> anyhow::Result<ExitCode> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose)?;

    let mut out = io::stdout().lock();
    let mut err = io::stderr();
    let mut console = Console::new(&mut out, &mut err);

    let status = commands::run_command(cli.command, &connect, &mut console);
    Ok(ExitCode::from(status.code()))
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(format!(
            "astool={level},astool_batch={level},astool_store={level}"
        ))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn connect(config: &ClientConfig) -> StoreResult<Box<dyn RecordStore>> {
    Ok(Box::new(AerospikeStore::connect(config)?))
}
