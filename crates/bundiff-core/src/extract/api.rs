//! API subtree construction.

use crate::errors::Result;
use crate::module::{ApiMember, ApiSurface};
use crate::tree::{Node, NodeKind, API_NAME};

/// Build the `API` node for a surface. Packages, types and members are
/// sorted by name so the subtree does not depend on resolver ordering.
///
/// # Errors
///
/// `DuplicateIdentity` if the surface lists a package, type or member twice.
pub fn api_node(surface: &ApiSurface) -> Result<Node> {
    let mut packages: Vec<_> = surface.packages.iter().collect();
    packages.sort_by(|a, b| a.name.cmp(&b.name));

    let mut package_nodes = Vec::with_capacity(packages.len());
    for package in packages {
        let mut types: Vec<_> = package.types.iter().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));

        let mut type_nodes = Vec::with_capacity(types.len());
        for ty in types {
            let mut members: Vec<_> = ty.members.iter().collect();
            members.sort_by(|a, b| a.signature.cmp(&b.signature));
            let member_nodes = members.into_iter().map(member_node).collect();
            type_nodes.push(Node::branch(NodeKind::Type, &ty.name, member_nodes)?);
        }
        package_nodes.push(Node::branch(NodeKind::Package, &package.name, type_nodes)?);
    }

    Node::branch(NodeKind::Api, API_NAME, package_nodes)
}

fn member_node(member: &ApiMember) -> Node {
    match &member.descriptor {
        Some(descriptor) => Node::valued(NodeKind::Member, &member.signature, descriptor),
        None => Node::leaf(NodeKind::Member, &member.signature),
    }
}
