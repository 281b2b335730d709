//! CLI command handlers, one per file.

mod check;
mod config;
mod resolve;

pub use check::run_check;
pub use config::run_config;
pub use resolve::run_resolve;

#[cfg(test)]
pub(crate) use resolve::result_line;
