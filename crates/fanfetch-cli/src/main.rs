use std::process::ExitCode;

use fanfetch_core::logging;

mod cli;

use crate::cli::Cli;

fn main() -> ExitCode {
    // Initialize logging as early as possible; stdout is reserved for the report.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::debug!("file logging unavailable: {:#}", err);
    }

    // Parse CLI and dispatch.
    match Cli::run_from_args() {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            eprintln!("fanfetch error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
