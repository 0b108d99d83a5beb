//! CLI surface for bget.
//!
//! A single top-level command: gather URLs, download them in order, report
//! per-URL outcomes. Exit 0 only if every URL succeeded; exit 1 when any
//! download failed; exit 2 for configuration errors (no URLs, bad header
//! syntax, unreadable URL file).

mod run;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

pub use run::RunSummary;

/// Batch HTTP downloader with per-URL validation.
#[derive(Debug, Parser)]
#[command(name = "bget")]
#[command(about = "Download a list of URLs and validate every result", long_about = None)]
pub struct Cli {
    /// Direct URL to download (can be repeated).
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Text file with one URL per line; blank lines and # comments ignored.
    #[arg(long, value_name = "PATH")]
    pub url_file: Option<PathBuf>,

    /// Directory to write downloaded files into (created if absent).
    #[arg(long, value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Additional request header in 'Name: Value' form (can be repeated).
    #[arg(long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Shorthand for the Referer header; an explicit --header wins.
    #[arg(long, value_name = "URL")]
    pub referer: Option<String>,

    /// Override the configured User-Agent.
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Override the configured per-request timeout.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

pub fn run_from_args() -> Result<RunSummary> {
    let cli = Cli::parse();
    run::run(cli)
}

/// Maps the invocation outcome to a process exit code: 0 when every URL
/// succeeded, 1 when any download failed, 2 for configuration errors.
pub fn exit_code(outcome: &Result<RunSummary>) -> i32 {
    match outcome {
        Ok(summary) if summary.failed == 0 => 0,
        Ok(_) => 1,
        Err(_) => 2,
    }
}
