//! Manifest main-section headers.

use crate::errors::{BundiffError, Result};

/// Ordered manifest headers.
///
/// Header names compare case-insensitively; inserting an existing name
/// replaces its value in place and keeps the original spelling and position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    headers: Vec<(String, String)>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Headers in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Parse the main section of a `MANIFEST.MF` text.
    ///
    /// # Errors
    ///
    /// As [`Manifest::parse_bytes`].
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_bytes(text.as_bytes())
    }

    /// Parse the main section of raw `MANIFEST.MF` bytes.
    ///
    /// Lines are `Name: value`; a line starting with a single space continues
    /// the previous value. The main section ends at the first blank line.
    /// Continuations are joined before decoding, so a multi-byte character
    /// may be split across lines.
    ///
    /// # Errors
    ///
    /// `MalformedManifest` with the 1-based line number of the header for a
    /// line without a `:` separator, an empty or illegal header name, a value
    /// that is not UTF-8, or a continuation line with nothing to continue.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self> {
        let mut manifest = Manifest::new();
        let mut current: Option<(usize, Vec<u8>)> = None;

        for (index, raw) in bytes.split(|b| *b == b'\n').enumerate() {
            let line_no = index + 1;
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.is_empty() {
                break;
            }
            if let Some(continued) = raw.strip_prefix(b" ") {
                match current.as_mut() {
                    Some((_, logical)) => logical.extend_from_slice(continued),
                    None => return Err(malformed(line_no, "continuation without a header")),
                }
                continue;
            }
            if let Some((start, logical)) = current.replace((line_no, raw.to_vec())) {
                manifest.insert_line(start, &logical)?;
            }
        }

        if let Some((start, logical)) = current {
            manifest.insert_line(start, &logical)?;
        }
        Ok(manifest)
    }

    fn insert_line(&mut self, line_no: usize, logical: &[u8]) -> Result<()> {
        let line = std::str::from_utf8(logical).map_err(|_| malformed(line_no, "invalid UTF-8"))?;
        let (name, value) = line
            .split_once(':')
            .ok_or_else(|| malformed(line_no, "missing ':' separator"))?;
        if name.is_empty()
            || !name
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        {
            return Err(malformed(line_no, "illegal header name"));
        }
        let value = value.strip_prefix(' ').unwrap_or(value);
        self.insert(name, value);
        Ok(())
    }
}

fn malformed(line: usize, reason: &str) -> BundiffError {
    BundiffError::MalformedManifest {
        line,
        reason: reason.to_string(),
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Manifest {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut manifest = Manifest::new();
        for (name, value) in iter {
            manifest.insert(name, value);
        }
        manifest
    }
}
