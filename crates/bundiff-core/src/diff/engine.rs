//! Structural merge of two structure trees.
//!
//! The core entry point is [`compute_delta`]. It is a pure function of its
//! inputs and cannot fail: both trees have already been validated.

use crate::diff::model::{Delta, DeltaNode, DeltaTree};
use crate::tree::{Node, NodeKind, StructureTree};
use std::collections::{BTreeMap, BTreeSet};

/// Compare `older` against `newer`.
///
/// The two roots are always matched with each other. Below them, nodes are
/// matched by `(kind, name)`; a node found on one side only marks its whole
/// subtree ADDED or REMOVED. A matched node is UNCHANGED when its values are
/// equal and every child is UNCHANGED, otherwise CHANGED.
pub fn compute_delta(older: &StructureTree, newer: &StructureTree) -> DeltaTree {
    DeltaTree::from_root(merge(older.root(), newer.root()))
}

fn merge(older: &Node, newer: &Node) -> DeltaNode {
    let older_children = by_identity(older);
    let newer_children = by_identity(newer);
    let identities: BTreeSet<_> = older_children
        .keys()
        .chain(newer_children.keys())
        .copied()
        .collect();

    let children: Vec<DeltaNode> = identities
        .into_iter()
        .filter_map(
            |id| match (older_children.get(&id), newer_children.get(&id)) {
                (Some(o), Some(n)) => Some(merge(o, n)),
                (Some(o), None) => Some(one_sided(o, Delta::Removed)),
                (None, Some(n)) => Some(one_sided(n, Delta::Added)),
                (None, None) => None,
            },
        )
        .collect();

    let delta = if older.value() == newer.value() && children.iter().all(DeltaNode::is_unchanged)
    {
        Delta::Unchanged
    } else {
        Delta::Changed
    };

    DeltaNode {
        kind: newer.kind(),
        name: newer.name().to_string(),
        delta,
        older: older.value().map(str::to_string),
        newer: newer.value().map(str::to_string),
        comment: newer.comment().or(older.comment()).map(str::to_string),
        children,
    }
}

fn one_sided(node: &Node, delta: Delta) -> DeltaNode {
    let value = node.value().map(str::to_string);
    let (older, newer) = match delta {
        Delta::Removed => (value, None),
        _ => (None, value),
    };
    let mut children: Vec<DeltaNode> = node
        .children()
        .iter()
        .map(|c| one_sided(c, delta))
        .collect();
    children.sort_by(|a, b| (a.kind, &a.name).cmp(&(b.kind, &b.name)));

    DeltaNode {
        kind: node.kind(),
        name: node.name().to_string(),
        delta,
        older,
        newer,
        comment: node.comment().map(str::to_string),
        children,
    }
}

fn by_identity(node: &Node) -> BTreeMap<(NodeKind, &str), &Node> {
    node.children().iter().map(|c| (c.identity(), c)).collect()
}
