//! Request header assembly.
//!
//! Headers come from three places, merged in a fixed order: the configured
//! User-Agent, the `--referer` shorthand, and explicit `--header` arguments.
//! Later inserts replace earlier ones for the same (case-insensitive) name,
//! so an explicit `--header "Referer: X"` wins over `--referer`.

use anyhow::{bail, Result};

/// Ordered set of request headers with case-insensitive unique names.
#[derive(Debug, Clone, Default)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a header. If a header with the same name (ignoring ASCII case)
    /// already exists, its value is replaced in place.
    pub fn insert(&mut self, name: &str, value: &str) {
        let name = name.trim();
        let value = value.trim();
        match self
            .entries
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }

    /// Look up a header value by name, ignoring ASCII case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a raw `--header` argument of the form `Name: Value`.
///
/// Splits on the first colon only, so values may themselves contain colons
/// (e.g. `X-Forwarded-Host: example.com:8080`). An empty name or a missing
/// colon is a configuration error.
pub fn parse_header_arg(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("invalid header {:?}: expected 'Name: Value'", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("invalid header {:?}: empty header name", raw);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Build the merged header set for all requests in this invocation.
///
/// Precedence, lowest to highest: User-Agent from config, `--referer`,
/// then each `--header` in the order given on the command line.
pub fn build_headers(
    user_agent: &str,
    referer: Option<&str>,
    raw_headers: &[String],
) -> Result<HeaderSet> {
    let mut set = HeaderSet::new();
    set.insert("User-Agent", user_agent);
    if let Some(referer) = referer {
        set.insert("Referer", referer);
    }
    for raw in raw_headers {
        let (name, value) = parse_header_arg(raw)?;
        set.insert(&name, &value);
    }
    Ok(set)
}
