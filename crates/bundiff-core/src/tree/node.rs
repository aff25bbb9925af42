//! Node and node kind definitions.

use crate::errors::{BundiffError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// Closed set of node categories.
///
/// Declaration order is the sort order used for delta trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Module,
    Api,
    Package,
    Type,
    Member,
    Manifest,
    Header,
    Clause,
    Parameter,
    ResourceSet,
    Resource,
    ContentHash,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Module => "MODULE",
            NodeKind::Api => "API",
            NodeKind::Package => "PACKAGE",
            NodeKind::Type => "TYPE",
            NodeKind::Member => "MEMBER",
            NodeKind::Manifest => "MANIFEST",
            NodeKind::Header => "HEADER",
            NodeKind::Clause => "CLAUSE",
            NodeKind::Parameter => "PARAMETER",
            NodeKind::ResourceSet => "RESOURCE_SET",
            NodeKind::Resource => "RESOURCE",
            NodeKind::ContentHash => "CONTENT_HASH",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a structure tree.
///
/// A node is identified among its siblings by `(kind, name)`. Leaves may
/// carry a comparison `value`; the rendered [`label`](Node::label) is then
/// `name:value`, so a header whose value moved from `1.0.0` to `1.0.1` is
/// still the same header.
///
/// Nodes are immutable once built. Branches are created through
/// [`Node::branch`], which rejects duplicate sibling identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    kind: NodeKind,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Node>,
}

impl Node {
    /// A leaf whose whole label is its name (e.g. an API member signature).
    pub fn leaf(kind: NodeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: None,
            comment: None,
            children: Vec::new(),
        }
    }

    /// A leaf carrying a comparison value, rendered as `name:value`.
    pub fn valued(kind: NodeKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: Some(value.into()),
            comment: None,
            children: Vec::new(),
        }
    }

    /// A node wrapping `children`.
    ///
    /// # Errors
    ///
    /// `DuplicateIdentity` if two children share kind and name.
    pub fn branch(kind: NodeKind, name: impl Into<String>, children: Vec<Node>) -> Result<Self> {
        let name = name.into();
        check_unique(&name, &children)?;
        Ok(Self {
            kind,
            name,
            value: None,
            comment: None,
            children,
        })
    }

    /// Attach a provenance comment. Comments never take part in comparison.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The cross-tree matching key.
    pub fn identity(&self) -> (NodeKind, &str) {
        (self.kind, &self.name)
    }

    /// Rendered label: `name`, or `name:value` for valued leaves.
    pub fn label(&self) -> Cow<'_, str> {
        match &self.value {
            Some(value) => Cow::Owned(format!("{}:{}", self.name, value)),
            None => Cow::Borrowed(&self.name),
        }
    }

    /// Find a direct child by identity.
    pub fn child(&self, kind: NodeKind, name: &str) -> Option<&Node> {
        self.children
            .iter()
            .find(|c| c.kind == kind && c.name == name)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Check sibling uniqueness for this whole subtree.
    ///
    /// Needed for nodes that did not come through [`Node::branch`], i.e.
    /// deserialized data.
    ///
    /// # Errors
    ///
    /// `DuplicateIdentity` naming the first offending parent.
    pub fn validate(&self) -> Result<()> {
        check_unique(&self.name, &self.children)?;
        self.children.iter().try_for_each(Node::validate)
    }
}

fn check_unique(parent: &str, children: &[Node]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for child in children {
        if !seen.insert(child.identity()) {
            return Err(BundiffError::DuplicateIdentity {
                parent: parent.to_string(),
                kind: child.kind.to_string(),
                name: child.name.clone(),
            });
        }
    }
    Ok(())
}
