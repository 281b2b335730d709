//! `secr config` – print the effective configuration.

use anyhow::{Context, Result};
use secr_core::config::SecrConfig;
use std::process::ExitCode;

pub fn run_config(cfg: &SecrConfig) -> Result<ExitCode> {
    let text = toml::to_string_pretty(cfg).context("serialize config")?;
    print!("{}", text);
    Ok(ExitCode::SUCCESS)
}
