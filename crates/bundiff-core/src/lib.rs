//! bundiff Core - structural diff engine for packaged modules
//!
//! This crate turns a packaged module into a normalized structure tree and
//! compares two such trees, including:
//! - Structure tree model with sibling-unique identities
//! - Manifest header normalization (volatile, structured, ordered, plain)
//! - Resource hashing with companion-source substitution for compiled classes
//! - Structure extraction over pluggable module and API resolver seams
//! - Delta trees with ADDED / REMOVED / CHANGED / UNCHANGED verdicts
//! - Generic data (de)serialization of both tree kinds

pub mod config;
pub mod diff;
pub mod differ;
pub mod errors;
pub mod extract;
pub mod hash;
pub mod header;
pub mod ignore;
pub mod logging_facility;
pub mod module;
pub mod tree;
pub mod version;

// Used by the exported logging macros.
pub use bundiff_core_types;

// Re-export commonly used types
pub use config::{Capabilities, EngineConfig};
pub use diff::{Delta, DeltaNode, DeltaTree};
pub use differ::Differ;
pub use errors::{BundiffError, ExError, ExErrorKind, Result};
pub use extract::Extractor;
pub use module::{ApiResolver, BundleModule, DirModule, MemoryModule, StaticApiResolver};
pub use tree::{Node, NodeKind, StructureTree};
pub use version::Version;
