//! Logging setup.
//!
//! The writer is chosen once at startup: a log file under the XDG state dir
//! (`~/.local/state/bget/bget.log`) when it can be opened, stderr otherwise.
//! A one-shot CLI never needs to switch writers mid-run.

use std::fs::{self, File};
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the whole process. Never fails: an unwritable
/// state dir just means logs go to stderr.
pub fn init() {
    let writer = match open_log_file() {
        Ok(file) => BoxMakeWriter::new(Mutex::new(file)),
        Err(_) => BoxMakeWriter::new(std::io::stderr),
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,bget=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
}

fn open_log_file() -> anyhow::Result<File> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bget")?;
    let path = xdg_dirs.place_state_file("bget.log")?;
    let file = fs::OpenOptions::new().create(true).append(true).open(&path)?;
    Ok(file)
}
