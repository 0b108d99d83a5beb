//! Command wiring: config, header merge, URL collection, batch download,
//! human-readable reporting.

use super::Cli;
use anyhow::{Context, Result};
use bget_core::config;
use bget_core::downloader;
use bget_core::fetch::FetchOptions;
use bget_core::headers;
use bget_core::url_list;
use std::time::Duration;

/// Outcome of the whole invocation; the caller maps this to an exit code.
#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub failed: usize,
}

pub fn run(cli: Cli) -> Result<RunSummary> {
    let cfg = config::load_or_init()?;
    tracing::debug!("loaded config: {:?}", cfg);

    // Everything below until download_all is configuration; any error here
    // aborts before the first network request.
    let user_agent = cli.user_agent.as_deref().unwrap_or(&cfg.user_agent);
    let header_set = headers::build_headers(user_agent, cli.referer.as_deref(), &cli.headers)?;
    let urls = url_list::collect_urls(&cli.urls, cli.url_file.as_deref())?;
    std::fs::create_dir_all(&cli.output_dir).with_context(|| {
        format!("invalid output directory: {}", cli.output_dir.display())
    })?;

    let mut opts = FetchOptions::from_config(&cfg);
    if let Some(secs) = cli.timeout {
        opts.timeout = Duration::from_secs(secs);
    }

    let reports = downloader::download_all(&urls, &header_set, &cli.output_dir, &opts);

    let mut failed = 0usize;
    for report in &reports {
        match &report.outcome {
            Ok(done) => {
                println!("ok {} ({} bytes)", done.path.display(), done.bytes);
            }
            Err(e) => {
                failed += 1;
                eprintln!("FAILED {}: {}", report.url, e);
            }
        }
    }

    if failed > 0 {
        eprintln!("{failed} of {} downloads failed", reports.len());
    } else {
        println!("all {} downloads completed", reports.len());
    }

    Ok(RunSummary { failed })
}
