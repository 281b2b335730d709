//! `secr check` – classify a URL with the safety guard.

use secr_core::guard;
use std::process::ExitCode;

use crate::cli::EXIT_UNSAFE;

pub fn run_check(url: &str) -> ExitCode {
    match guard::check(url) {
        Ok(_) => {
            println!("safe");
            ExitCode::SUCCESS
        }
        Err(rejection) => {
            println!("unsafe: {}", rejection);
            ExitCode::from(EXIT_UNSAFE)
        }
    }
}
