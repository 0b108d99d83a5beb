//! URL list ingestion: direct arguments plus an optional line-delimited file.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

/// Read URLs from a text file, one per line. Blank lines and lines starting
/// with `#` are ignored; surrounding whitespace is trimmed.
pub fn read_url_file(path: &Path) -> Result<Vec<String>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read URL file: {}", path.display()))?;
    let urls = data
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();
    Ok(urls)
}

/// Combine `--url` arguments and the optional `--url-file` into one ordered
/// set. Direct arguments come first, then file entries. Duplicate URLs are
/// collapsed to their first occurrence, so each unique URL is processed once.
///
/// An empty combined set is a configuration error.
pub fn collect_urls(direct: &[String], url_file: Option<&Path>) -> Result<Vec<String>> {
    let mut urls: Vec<String> = direct.to_vec();
    if let Some(path) = url_file {
        urls.extend(read_url_file(path)?);
    }

    let mut unique = Vec::with_capacity(urls.len());
    for url in urls {
        if !unique.contains(&url) {
            unique.push(url);
        }
    }

    if unique.is_empty() {
        bail!("no URLs provided; use --url or --url-file");
    }
    Ok(unique)
}
