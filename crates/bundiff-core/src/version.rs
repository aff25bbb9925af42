//! Module version numbers: `major[.minor[.micro[.qualifier]]]`.

use crate::errors::{BundiffError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed module version.
///
/// Ordering compares the numeric parts, then the qualifier as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub micro: u32,
    pub qualifier: Option<String>,
}

impl Version {
    pub const fn new(major: u32, minor: u32, micro: u32) -> Self {
        Self {
            major,
            minor,
            micro,
            qualifier: None,
        }
    }

    /// Parse a version string. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// `InvalidVersion` if a numeric part is missing or not a number, there
    /// are more than four parts, or the qualifier contains characters other
    /// than ASCII alphanumerics, `-`, and `_`.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| BundiffError::InvalidVersion {
            value: raw.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty version"));
        }

        let mut parts = trimmed.splitn(4, '.');
        let mut numbers = [0u32; 3];
        for (i, slot) in numbers.iter_mut().enumerate() {
            match parts.next() {
                Some(part) => {
                    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(invalid("numeric part expected"));
                    }
                    *slot = part.parse().map_err(|_| invalid("numeric part too large"))?;
                }
                None if i > 0 => break,
                None => return Err(invalid("numeric part expected")),
            }
        }

        let qualifier = match parts.next() {
            Some(q) if q.is_empty() => return Err(invalid("empty qualifier")),
            Some(q)
                if !q
                    .bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') =>
            {
                return Err(invalid("qualifier has illegal characters"));
            }
            Some(q) => Some(q.to_string()),
            None => None,
        };

        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            micro: numbers[2],
            qualifier,
        })
    }

    /// The same version with the qualifier dropped.
    pub fn without_qualifier(&self) -> Self {
        Self::new(self.major, self.minor, self.micro)
    }
}

impl FromStr for Version {
    type Err = BundiffError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
        if let Some(q) = &self.qualifier {
            write!(f, ".{}", q)?;
        }
        Ok(())
    }
}
