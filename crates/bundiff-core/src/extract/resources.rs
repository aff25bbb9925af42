//! Resource walk.

use crate::errors::Result;
use crate::hash::{ResourceHasher, DIGEST_ALGORITHM};
use crate::ignore::IgnoreSet;
use crate::module::BundleModule;
use crate::tree::{Node, NodeKind, RESOURCES_NAME};

const SIGNATURE_EXTENSIONS: &[&str] = &["MF", "SF", "DSA", "RSA"];

/// Whether `path` is reserved packaging metadata: a manifest or signature
/// file directly under `META-INF/`, or anything starting with `SIG-`.
pub fn is_reserved_metadata(path: &str) -> bool {
    if path.starts_with("SIG-") {
        return true;
    }
    let Some(file) = path.strip_prefix("META-INF/") else {
        return false;
    };
    if file.contains('/') {
        return false;
    }
    match file.rsplit_once('.') {
        Some((stem, ext)) => !stem.is_empty() && SIGNATURE_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Build the `RESOURCE_SET` node, in module path order.
///
/// # Errors
///
/// The first hashing failure; no partial set is returned.
pub fn resource_set_node(
    module: &dyn BundleModule,
    hasher: &ResourceHasher<'_>,
    ignore: Option<&IgnoreSet>,
) -> Result<Node> {
    let mut resources = Vec::new();
    for path in module.resource_paths() {
        if is_reserved_metadata(&path) {
            tracing::debug!(resource_path = path.as_str(), "reserved metadata skipped");
            continue;
        }
        if ignore.is_some_and(|set| set.matches(&path)) {
            tracing::debug!(resource_path = path.as_str(), "resource ignored by pattern");
            continue;
        }

        let fingerprint = hasher.fingerprint(&path)?;
        let mut hash = Node::valued(NodeKind::ContentHash, DIGEST_ALGORITHM, fingerprint.digest);
        if let Some(annotation) = fingerprint.annotation {
            hash = hash.with_comment(annotation);
        }
        resources.push(Node::branch(NodeKind::Resource, path, vec![hash])?);
    }
    Node::branch(NodeKind::ResourceSet, RESOURCES_NAME, resources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_metadata() {
        for path in [
            "META-INF/MANIFEST.MF",
            "META-INF/ACME.SF",
            "META-INF/ACME.DSA",
            "META-INF/ACME.RSA",
            "SIG-anything",
            "SIG-dir/file",
        ] {
            assert!(is_reserved_metadata(path), "{path}");
        }
    }

    #[test]
    fn test_not_reserved() {
        for path in [
            "META-INF/services/x.MF",
            "META-INF/.MF",
            "META-INF/maven/pom.xml",
            "META-INF/acme.mf",
            "a/META-INF/MANIFEST.MF",
            "OSGI-INF/SIG-x",
            "x.txt",
        ] {
            assert!(!is_reserved_metadata(path), "{path}");
        }
    }
}
