//! CLI entry point for corefcheck.
//!
//! Parses arguments with clap, runs the requested command, writes its report
//! to stdout and maps the outcome to an exit code: success only when the
//! command ran and found nothing wrong.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use corefcheck_cli::{
    cli::{Cli, CliError, render_outcome, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Parse CLI arguments, execute the command, render the report, and flush
/// the output stream. Returns whether the command found nothing wrong.
fn try_main() -> Result<bool> {
    let cli = Cli::parse();
    let outcome = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_outcome(&outcome, &mut writer).context("failed to render report")?;
    writer.flush().context("failed to flush output")?;
    Ok(outcome.is_clean())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            let code = err
                .downcast_ref::<CliError>()
                .and_then(|cli_error| match cli_error {
                    CliError::Validation(validation) => Some(validation.code()),
                    _ => None,
                })
                .map(|code| field::display(code.as_str()));
            error!(error = %err, code, "command execution failed");
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
