//! Delta tree types.
//!
//! A delta tree has the shape of the union of two structure trees. Every
//! node carries the values it had on each side and one [`Delta`] verdict.
//! Children are sorted by `(kind, name)`, so the layout does not depend on
//! which side a node came from.

use crate::errors::{BundiffError, Result};
use crate::tree::NodeKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Per-node comparison verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Delta {
    Unchanged,
    Changed,
    /// Present only in the newer tree
    Added,
    /// Present only in the older tree
    Removed,
}

impl Delta {
    /// The verdict with sides swapped.
    pub fn inverse(self) -> Self {
        match self {
            Delta::Added => Delta::Removed,
            Delta::Removed => Delta::Added,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Delta::Unchanged => "UNCHANGED",
            Delta::Changed => "CHANGED",
            Delta::Added => "ADDED",
            Delta::Removed => "REMOVED",
        }
    }
}

impl std::fmt::Display for Delta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a delta tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaNode {
    pub(crate) kind: NodeKind,
    pub(crate) name: String,
    pub(crate) delta: Delta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) older: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) newer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) children: Vec<DeltaNode>,
}

impl DeltaNode {
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delta(&self) -> Delta {
        self.delta
    }

    /// Value in the older tree, if the node existed there and carried one.
    pub fn older_value(&self) -> Option<&str> {
        self.older.as_deref()
    }

    /// Value in the newer tree, if the node exists there and carries one.
    pub fn newer_value(&self) -> Option<&str> {
        self.newer.as_deref()
    }

    /// Provenance comment, newer side first.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn children(&self) -> &[DeltaNode] {
        &self.children
    }

    pub fn is_unchanged(&self) -> bool {
        self.delta == Delta::Unchanged
    }

    pub fn child(&self, kind: NodeKind, name: &str) -> Option<&DeltaNode> {
        self.children
            .iter()
            .find(|c| c.kind == kind && c.name == name)
    }

    /// Label on the side the node is reported from: newer unless removed.
    pub fn label(&self) -> Cow<'_, str> {
        let value = match self.delta {
            Delta::Removed => &self.older,
            _ => &self.newer,
        };
        match value {
            Some(value) => Cow::Owned(format!("{}:{}", self.name, value)),
            None => Cow::Borrowed(&self.name),
        }
    }

    /// The same node with sides swapped.
    pub fn inverse(&self) -> DeltaNode {
        DeltaNode {
            kind: self.kind,
            name: self.name.clone(),
            delta: self.delta.inverse(),
            older: self.newer.clone(),
            newer: self.older.clone(),
            comment: self.comment.clone(),
            children: self.children.iter().map(DeltaNode::inverse).collect(),
        }
    }

    fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for child in &self.children {
            if !seen.insert((child.kind, child.name.as_str())) {
                return Err(BundiffError::DuplicateIdentity {
                    parent: self.name.clone(),
                    kind: child.kind.to_string(),
                    name: child.name.clone(),
                });
            }
            let consistent = match self.delta {
                Delta::Added | Delta::Removed => child.delta == self.delta,
                Delta::Unchanged => child.delta == Delta::Unchanged,
                Delta::Changed => true,
            };
            if !consistent {
                return Err(BundiffError::InvalidTree {
                    reason: format!(
                        "{} child {:?} of {} node {:?}",
                        child.delta, child.name, self.delta, self.name
                    ),
                });
            }
            child.validate()?;
        }
        Ok(())
    }
}

/// Node counts per verdict.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaCounts {
    pub unchanged: usize,
    pub changed: usize,
    pub added: usize,
    pub removed: usize,
}

/// One reportable change: the labels from the root to the changed node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEntry {
    pub path: Vec<String>,
    pub kind: NodeKind,
    pub delta: Delta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub older: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newer: Option<String>,
}

/// A complete delta tree rooted at the two matched `MODULE` nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaTree {
    root: DeltaNode,
}

impl DeltaTree {
    pub(crate) fn from_root(root: DeltaNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &DeltaNode {
        &self.root
    }

    pub fn is_unchanged(&self) -> bool {
        self.root.is_unchanged()
    }

    /// The same comparison with older and newer swapped.
    pub fn inverse(&self) -> DeltaTree {
        DeltaTree::from_root(self.root.inverse())
    }

    /// Count every node by verdict.
    pub fn counts(&self) -> DeltaCounts {
        fn walk(node: &DeltaNode, counts: &mut DeltaCounts) {
            match node.delta {
                Delta::Unchanged => counts.unchanged += 1,
                Delta::Changed => counts.changed += 1,
                Delta::Added => counts.added += 1,
                Delta::Removed => counts.removed += 1,
            }
            node.children.iter().for_each(|c| walk(c, counts));
        }
        let mut counts = DeltaCounts::default();
        walk(&self.root, &mut counts);
        counts
    }

    /// Changes worth reporting, in tree order.
    ///
    /// An added or removed subtree is reported once at its root. A changed
    /// node is reported when its own value differs; its children are then
    /// searched as well.
    pub fn changes(&self) -> Vec<ChangeEntry> {
        fn walk(node: &DeltaNode, path: &mut Vec<String>, out: &mut Vec<ChangeEntry>) {
            path.push(node.name.clone());
            let report = match node.delta {
                Delta::Unchanged => false,
                Delta::Added | Delta::Removed => true,
                Delta::Changed => node.older != node.newer,
            };
            if report {
                out.push(ChangeEntry {
                    path: path.clone(),
                    kind: node.kind,
                    delta: node.delta,
                    older: node.older.clone(),
                    newer: node.newer.clone(),
                });
            }
            if node.delta == Delta::Changed {
                for child in &node.children {
                    walk(child, path, out);
                }
            }
            path.pop();
        }
        let mut out = Vec::new();
        walk(&self.root, &mut Vec::new(), &mut out);
        out
    }

    /// Serialize into generic structured data.
    ///
    /// # Errors
    ///
    /// `Serialization` if the tree cannot be represented as JSON data.
    pub fn to_data(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.root)?)
    }

    /// Rebuild a delta tree from generic structured data.
    ///
    /// # Errors
    ///
    /// - `InvalidTree` if the data is not a delta tree rooted at `MODULE`, or a
    ///   verdict contradicts its parent's
    /// - `DuplicateIdentity` if a sibling group repeats an identity
    pub fn from_data(data: Value) -> Result<Self> {
        let root: DeltaNode =
            serde_json::from_value(data).map_err(|e| BundiffError::InvalidTree {
                reason: e.to_string(),
            })?;
        if root.kind != NodeKind::Module {
            return Err(BundiffError::InvalidTree {
                reason: format!("root must be MODULE, got {}", root.kind),
            });
        }
        root.validate()?;
        Ok(Self { root })
    }
}
