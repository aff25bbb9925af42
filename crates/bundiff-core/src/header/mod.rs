//! Manifest header normalization.
//!
//! Headers fall into one of five classes (see [`HeaderClass`]). Volatile
//! headers vanish, structured headers become `HEADER → CLAUSE → PARAMETER`
//! subtrees, and everything else becomes a single `name:value` leaf.

pub mod clauses;
pub mod normalizer;
pub mod tables;

pub use clauses::{parse_clauses, Clause};
pub use normalizer::{normalize_header, normalize_manifest};
pub use tables::{classify, HeaderClass};
