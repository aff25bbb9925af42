//! Engine configuration.

use crate::version::Version;
use serde::{Deserialize, Serialize};

/// Engine version from which companion-source hashing is available.
pub const SOURCE_SUBSTITUTION_SINCE: Version = Version::new(3, 0, 0);

/// Optional engine behaviors, gated by compatibility version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Hash `OSGI-OPT/src` companions in place of compiled classes
    #[serde(default = "enabled")]
    pub source_substitution: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            source_substitution: true,
        }
    }
}

impl Capabilities {
    /// The capabilities of an engine at compatibility version `version`.
    /// The qualifier is ignored.
    pub fn since(version: &Version) -> Self {
        Self {
            source_substitution: version.without_qualifier() >= SOURCE_SUBSTITUTION_SINCE,
        }
    }
}

/// Configuration of one extraction engine.
///
/// ```json
/// {"ignore": "Bundle-Description, *.txt", "capabilities": {"source_substitution": false}}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Caller ignore patterns, `;`/`,`-separated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<String>,
    #[serde(default)]
    pub capabilities: Capabilities,
}

impl EngineConfig {
    pub fn with_ignore(mut self, ignore: impl Into<String>) -> Self {
        self.ignore = Some(ignore.into());
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }
}
