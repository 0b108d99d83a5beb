//! Per-URL download contract and the sequential batch runner.
//!
//! Each URL gets exactly one attempt: GET, stream to a part file, validate
//! (status 200, non-empty body), then atomic rename into the output
//! directory. A failed URL leaves nothing behind and never stops the rest
//! of the batch.

use crate::fetch::{self, FetchOptions};
use crate::filename;
use crate::headers::HeaderSet;
use crate::storage::PartWriter;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Terminal failure for a single URL. None of these are retried.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// DNS, TLS, refused connection, timeout, or any other curl-level failure.
    #[error("connection error: {0}")]
    Connect(#[from] curl::Error),
    /// Response completed with a status other than 200.
    #[error("HTTP {0}")]
    HttpStatus(u32),
    /// Status 200 but zero body bytes.
    #[error("empty response body")]
    EmptyBody,
    /// Local filesystem failure (permissions, disk full).
    #[error("local I/O error: {0}")]
    Storage(#[from] std::io::Error),
}

/// A validated, finalized download.
#[derive(Debug)]
pub struct Downloaded {
    pub path: PathBuf,
    pub status: u32,
    pub bytes: u64,
}

/// One report per processed URL, success or failure.
#[derive(Debug)]
pub struct DownloadReport {
    pub url: String,
    pub outcome: Result<Downloaded, DownloadError>,
}

impl DownloadReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Downloads a single URL into `dir`.
///
/// The part file is named from the URL up front; the final name may differ
/// if the response carries a Content-Disposition filename. Any validation
/// failure discards the part file.
pub fn download_one(
    url: &str,
    headers: &HeaderSet,
    dir: &Path,
    opts: &FetchOptions,
) -> Result<Downloaded, DownloadError> {
    tracing::info!("downloading {}", url);

    let stem = filename::derive_filename(url, None);
    let mut writer = PartWriter::create(dir, &stem)?;

    let outcome = match fetch::fetch(url, headers, &mut writer, opts) {
        Ok(outcome) => outcome,
        Err(e) => {
            writer.discard();
            return Err(e);
        }
    };

    if outcome.status != 200 {
        writer.discard();
        return Err(DownloadError::HttpStatus(outcome.status));
    }
    let bytes = writer.bytes_written();
    if bytes == 0 {
        writer.discard();
        return Err(DownloadError::EmptyBody);
    }

    let final_name = filename::derive_filename(url, outcome.content_disposition.as_deref());
    let path = writer.finalize(&final_name)?;
    tracing::info!("saved {} ({} bytes)", path.display(), bytes);

    Ok(Downloaded {
        path,
        status: outcome.status,
        bytes,
    })
}

/// Processes every URL in order, never short-circuiting. Returns exactly one
/// report per URL.
pub fn download_all(
    urls: &[String],
    headers: &HeaderSet,
    dir: &Path,
    opts: &FetchOptions,
) -> Vec<DownloadReport> {
    urls.iter()
        .map(|url| {
            let outcome = download_one(url, headers, dir, opts);
            if let Err(e) = &outcome {
                tracing::error!("failed to download {}: {}", url, e);
            }
            DownloadReport {
                url: url.clone(),
                outcome,
            }
        })
        .collect()
}
