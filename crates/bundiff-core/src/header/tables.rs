//! Fixed header classification tables.
//!
//! Lookups are case-insensitive, matching manifest header name semantics.
//! The table is built on first use and never mutated afterwards.

use std::collections::HashMap;
use std::sync::OnceLock;

pub const EXPORT_PACKAGE: &str = "Export-Package";
pub const IMPORT_PACKAGE: &str = "Import-Package";
pub const REQUIRE_BUNDLE: &str = "Require-Bundle";
pub const FRAGMENT_HOST: &str = "Fragment-Host";
pub const BUNDLE_SYMBOLICNAME: &str = "Bundle-SymbolicName";
pub const BUNDLE_LICENSE: &str = "Bundle-License";
pub const BUNDLE_NATIVECODE: &str = "Bundle-NativeCode";
pub const BUNDLE_REQUIREDEXECUTIONENVIRONMENT: &str = "Bundle-RequiredExecutionEnvironment";
pub const DYNAMICIMPORT_PACKAGE: &str = "DynamicImport-Package";
pub const BUNDLE_VERSION: &str = "Bundle-Version";

pub const TOOL: &str = "Tool";
pub const BND_LASTMODIFIED: &str = "Bnd-LastModified";
pub const CREATED_BY: &str = "Created-By";

pub const SERVICE_COMPONENT: &str = "Service-Component";
pub const TESTCASES: &str = "Test-Cases";

/// Directive key (as stored, with trailing `:`) whose list value is sorted
/// on `Export-Package`.
pub const USES_DIRECTIVE: &str = "uses:";

/// How a header takes part in comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderClass {
    /// Volatile, never compared
    Ignored,
    /// Version header, compared without qualifier
    Version,
    /// Clause/parameter grammar, compared structurally
    Structured,
    /// Comma-separated list whose order carries no meaning
    Ordered,
    /// Compared verbatim
    Plain,
}

const IGNORED_HEADERS: &[&str] = &[TOOL, BND_LASTMODIFIED, CREATED_BY];

const STRUCTURED_HEADERS: &[&str] = &[
    EXPORT_PACKAGE,
    IMPORT_PACKAGE,
    REQUIRE_BUNDLE,
    FRAGMENT_HOST,
    BUNDLE_SYMBOLICNAME,
    BUNDLE_LICENSE,
    BUNDLE_NATIVECODE,
    BUNDLE_REQUIREDEXECUTIONENVIRONMENT,
    DYNAMICIMPORT_PACKAGE,
];

const ORDERED_HEADERS: &[&str] = &[SERVICE_COMPONENT, TESTCASES];

fn table() -> &'static HashMap<String, HeaderClass> {
    static TABLE: OnceLock<HashMap<String, HeaderClass>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table = HashMap::new();
        let groups: [(&[&str], HeaderClass); 4] = [
            (ORDERED_HEADERS, HeaderClass::Ordered),
            (STRUCTURED_HEADERS, HeaderClass::Structured),
            (&[BUNDLE_VERSION], HeaderClass::Version),
            (IGNORED_HEADERS, HeaderClass::Ignored),
        ];
        for (names, class) in groups {
            for name in names {
                table.insert(name.to_ascii_lowercase(), class);
            }
        }
        table
    })
}

/// Classify a header by name using the fixed tables only.
pub fn classify(name: &str) -> HeaderClass {
    table()
        .get(&name.to_ascii_lowercase())
        .copied()
        .unwrap_or(HeaderClass::Plain)
}

/// Whether a header is one of the fixed volatile headers.
pub fn is_fixed_ignored(name: &str) -> bool {
    classify(name) == HeaderClass::Ignored
}
