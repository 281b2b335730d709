use secr_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    // Fall back to stderr so an unwritable state dir never blocks a lookup.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    match CliCommand::run_from_args().await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("secr error: {:#}", err);
            std::process::ExitCode::FAILURE
        }
    }
}
