//! Structure tree model.
//!
//! A structure tree is the normalized, one-sided description of a single
//! module version: its API, its manifest headers, and its resources, all
//! expressed as [`Node`]s. Trees are plain immutable values; the differ
//! reads two of them and builds a separate delta tree.
//!
//! ## Shape
//!
//! ```text
//! MODULE <name>
//! ├── API <api>                      (only with a manifest)
//! │   └── PACKAGE p → TYPE p.A → MEMBER sig
//! ├── MANIFEST <manifest>            (only with a manifest)
//! │   ├── HEADER Bundle-Version:1.2.3
//! │   └── HEADER Export-Package → CLAUSE p → PARAMETER version:1.0
//! └── RESOURCE_SET <resources>
//!     └── RESOURCE p/A.class → CONTENT_HASH SHA-256:<hex>
//! ```

pub mod node;

pub use node::{Node, NodeKind};

use crate::errors::{BundiffError, Result};
use serde_json::Value;

/// Name of the API node under the module root.
pub const API_NAME: &str = "<api>";
/// Name of the manifest node under the module root.
pub const MANIFEST_NAME: &str = "<manifest>";
/// Name of the resource set node under the module root.
pub const RESOURCES_NAME: &str = "<resources>";

/// A validated structure tree rooted at a `MODULE` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureTree {
    root: Node,
}

impl StructureTree {
    /// Wrap a root node.
    ///
    /// # Errors
    ///
    /// - `InvalidTree` if the root is not a `MODULE` node
    /// - `DuplicateIdentity` if any sibling group repeats an identity
    pub fn new(root: Node) -> Result<Self> {
        if root.kind() != NodeKind::Module {
            return Err(BundiffError::InvalidTree {
                reason: format!("root must be MODULE, got {}", root.kind()),
            });
        }
        root.validate()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// The module name (root label).
    pub fn module_name(&self) -> &str {
        self.root.name()
    }

    pub fn api(&self) -> Option<&Node> {
        self.root.child(NodeKind::Api, API_NAME)
    }

    pub fn manifest(&self) -> Option<&Node> {
        self.root.child(NodeKind::Manifest, MANIFEST_NAME)
    }

    pub fn resources(&self) -> Option<&Node> {
        self.root.child(NodeKind::ResourceSet, RESOURCES_NAME)
    }

    /// Serialize into generic structured data (nested maps and lists).
    ///
    /// # Errors
    ///
    /// `Serialization` if the tree cannot be represented as JSON data.
    pub fn to_data(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.root)?)
    }

    /// Rebuild a tree from generic structured data, re-checking invariants.
    ///
    /// # Errors
    ///
    /// - `InvalidTree` if the data does not describe a node tree rooted at `MODULE`
    /// - `DuplicateIdentity` if a sibling group repeats an identity
    pub fn from_data(data: Value) -> Result<Self> {
        let root: Node = serde_json::from_value(data).map_err(|e| BundiffError::InvalidTree {
            reason: e.to_string(),
        })?;
        Self::new(root)
    }
}
