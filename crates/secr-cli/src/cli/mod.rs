//! CLI for the SECR preview image resolver.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use secr_core::config::{self, SecrConfig};
use std::path::PathBuf;
use std::process::ExitCode;

use commands::{run_check, run_config, run_resolve};

/// Exit status when input URLs were refused by the safety guard.
pub(crate) const EXIT_UNSAFE: u8 = 2;

/// Top-level CLI for the SECR resolver.
#[derive(Debug, Parser)]
#[command(name = "secr")]
#[command(about = "SECR: fetch preview images for external URLs without SSRF", long_about = None)]
pub struct Cli {
    /// Use this config file instead of ~/.config/secr/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve the preview image of one or more URLs.
    Resolve {
        /// HTTP/HTTPS URLs to resolve.
        #[arg(required = true, value_name = "URL")]
        urls: Vec<String>,
        /// Include why a URL produced no image.
        #[arg(long)]
        explain: bool,
    },

    /// Report whether a URL passes the safety guard, without fetching it.
    Check {
        /// URL to classify.
        url: String,
    },

    /// Print the effective configuration as TOML.
    Config,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<ExitCode> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        let code = match cli.command {
            CliCommand::Resolve { urls, explain } => run_resolve(&cfg, &urls, explain).await?,
            CliCommand::Check { url } => run_check(&url),
            CliCommand::Config => run_config(&cfg)?,
        };
        Ok(code)
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<SecrConfig> {
    match path {
        Some(p) => config::load_or_init_at(p),
        None => config::load_or_init(),
    }
}

#[cfg(test)]
mod tests;
