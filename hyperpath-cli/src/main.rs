//! Entry point for the `hyperpath` binary.
//!
//! Initialises logging, loads the JSON Lines input named on the command line,
//! runs one query, and writes the report to stdout. Failures are logged with
//! their stable error code and mapped to a non-zero exit status.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, field};

use hyperpath_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let mut writer = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut writer).context("failed to render report")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err.downcast_ref::<CliError>().and_then(|cli_error| match cli_error {
                CliError::Core(core) => Some(core.code().as_str()),
                _ => None,
            });
            error!(
                error = %err,
                cause = %err.root_cause(),
                code = code.map(field::display),
                "command execution failed"
            );
            ExitCode::FAILURE
        }
    }
}

fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
