//! `secr resolve` – resolve preview images, one JSON line per input URL.

use anyhow::Result;
use secr_core::config::SecrConfig;
use secr_core::{Outcome, PreviewResolver};
use serde_json::{json, Value};
use std::process::ExitCode;
use tokio::task::JoinSet;

use crate::cli::EXIT_UNSAFE;

/// Resolves all `urls` concurrently through one resolver and prints results in input order.
/// Exits with [`EXIT_UNSAFE`] when every URL was rejected by the guard.
pub async fn run_resolve(cfg: &SecrConfig, urls: &[String], explain: bool) -> Result<ExitCode> {
    let resolver = PreviewResolver::from_config(cfg);

    let mut set = JoinSet::new();
    for (idx, url) in urls.iter().enumerate() {
        let resolver = resolver.clone();
        let url = url.clone();
        set.spawn(async move {
            let outcome = resolver.resolve_outcome(&url).await;
            (idx, url, outcome)
        });
    }

    let mut results: Vec<(usize, String, Outcome)> = Vec::with_capacity(urls.len());
    while let Some(joined) = set.join_next().await {
        results.push(joined?);
    }
    results.sort_by_key(|(idx, _, _)| *idx);

    let mut rejected = 0usize;
    for (_, url, outcome) in &results {
        if matches!(outcome, Outcome::Rejected(_)) {
            rejected += 1;
        }
        println!("{}", result_line(url, outcome, explain));
    }

    if rejected == results.len() {
        Ok(ExitCode::from(EXIT_UNSAFE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// One output record. Rejections are always flagged; the reason only with `explain`.
pub(crate) fn result_line(url: &str, outcome: &Outcome, explain: bool) -> Value {
    let mut line = json!({
        "url": url,
        "image": outcome.clone().into_image(),
    });
    if matches!(outcome, Outcome::Rejected(_)) {
        line["rejected"] = Value::Bool(true);
    }
    if explain {
        line["outcome"] = Value::String(outcome.label());
    }
    line
}
