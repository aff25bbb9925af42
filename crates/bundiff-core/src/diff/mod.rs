//! Structure tree differ.
//!
//! ## Entry point
//!
//! ```ignore
//! use bundiff_core::diff::compute_delta;
//!
//! let delta = compute_delta(&older_tree, &newer_tree);
//! let summary = bundiff_core::diff::render_human_summary(&delta);
//! ```
//!
//! ## Guarantees
//!
//! - **Self-diff**: a tree compared with itself is UNCHANGED everywhere.
//! - **Symmetry**: swapping the arguments swaps ADDED and REMOVED and leaves
//!   CHANGED and UNCHANGED where they were.
//! - **Purely structural**: no compatibility judgment is made here.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compute_delta;
pub use human_summary::render_human_summary;
pub use model::{ChangeEntry, Delta, DeltaCounts, DeltaNode, DeltaTree};
