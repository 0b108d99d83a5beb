//! HTTP GET via the curl easy API.
//!
//! Streams the response body into a `PartWriter` through the write callback
//! and captures Content-Disposition from the response headers. Follows
//! redirects; only the final response's status and headers matter.

use crate::config::BgetConfig;
use crate::downloader::DownloadError;
use crate::headers::HeaderSet;
use crate::storage::PartWriter;
use std::io;
use std::time::Duration;

/// Per-request knobs taken from config (with CLI overrides applied).
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

impl FetchOptions {
    pub fn from_config(cfg: &BgetConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }
}

/// Final response metadata; the body has already gone to the writer.
#[derive(Debug)]
pub struct FetchOutcome {
    pub status: u32,
    pub content_disposition: Option<String>,
}

/// Performs a GET for `url`, writing the body to `writer`.
///
/// Returns the final status code without judging it; status and body-size
/// validation is the downloader's job. Errors are either connectivity
/// (curl) or local I/O surfaced from the write callback.
pub fn fetch(
    url: &str,
    headers: &HeaderSet,
    writer: &mut PartWriter,
    opts: &FetchOptions,
) -> Result<FetchOutcome, DownloadError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(opts.connect_timeout)?;
    easy.timeout(opts.timeout)?;

    let mut list = curl::easy::List::new();
    for (name, value) in headers.iter() {
        list.append(&format!("{name}: {value}"))?;
    }
    if !headers.is_empty() {
        easy.http_headers(list)?;
    }

    let mut content_disposition: Option<String> = None;
    let mut write_error: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(line) = std::str::from_utf8(data) {
                let line = line.trim();
                if line.starts_with("HTTP/") {
                    // New response (e.g. after a redirect): earlier headers don't apply.
                    content_disposition = None;
                } else if let Some((name, value)) = line.split_once(':') {
                    if name.trim().eq_ignore_ascii_case("content-disposition") {
                        content_disposition = Some(value.trim().to_string());
                    }
                }
            }
            true
        })?;
        transfer.write_function(|data| match writer.write(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_error = Some(e);
                Ok(0) // abort transfer
            }
        })?;
        transfer.perform()
    };

    if let Some(e) = write_error {
        return Err(DownloadError::Storage(e));
    }
    performed?;

    let status = easy.response_code()?;
    Ok(FetchOutcome {
        status,
        content_disposition,
    })
}
