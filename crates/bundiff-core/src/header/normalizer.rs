//! Header normalization: one raw manifest header in, zero or one node out.

use super::clauses::{parse_clauses, Clause};
use super::tables::{classify, HeaderClass, EXPORT_PACKAGE, USES_DIRECTIVE};
use crate::errors::{BundiffError, Result};
use crate::ignore::IgnoreSet;
use crate::module::Manifest;
use crate::tree::{Node, NodeKind, MANIFEST_NAME};
use crate::version::Version;

/// Normalize one header into its comparable node.
///
/// Returns `Ok(None)` for headers that take no part in comparison: the fixed
/// volatile headers and any name matched by `ignore`. Caller patterns are
/// consulted before any other classification.
///
/// # Errors
///
/// - `MalformedHeader` if a structured value violates the clause grammar
/// - `InvalidVersion` if `Bundle-Version` does not parse
pub fn normalize_header(
    name: &str,
    value: &str,
    ignore: Option<&IgnoreSet>,
) -> Result<Option<Node>> {
    if ignore.is_some_and(|set| set.matches(name)) {
        tracing::debug!(header = name, "header ignored by pattern");
        return Ok(None);
    }

    let node = match classify(name) {
        HeaderClass::Ignored => return Ok(None),
        HeaderClass::Version => {
            let version = Version::parse(value)?.without_qualifier();
            Node::valued(NodeKind::Header, name, version.to_string())
        }
        HeaderClass::Structured => structured(name, value)?,
        HeaderClass::Ordered => Node::valued(NodeKind::Header, name, sorted_list(value, true)),
        HeaderClass::Plain => Node::valued(NodeKind::Header, name, value),
    };
    Ok(Some(node))
}

/// Normalize every header of a manifest main section, preserving order.
///
/// # Errors
///
/// The first error from [`normalize_header`].
pub fn normalize_manifest(manifest: &Manifest, ignore: Option<&IgnoreSet>) -> Result<Node> {
    let mut headers = Vec::with_capacity(manifest.len());
    for (name, value) in manifest.iter() {
        if let Some(node) = normalize_header(name, value, ignore)? {
            headers.push(node);
        }
    }
    Node::branch(NodeKind::Manifest, MANIFEST_NAME, headers)
}

fn structured(name: &str, value: &str) -> Result<Node> {
    let clauses = parse_clauses(value).map_err(|reason| BundiffError::MalformedHeader {
        header: name.to_string(),
        value: value.to_string(),
        reason,
    })?;
    let sort_uses = name.eq_ignore_ascii_case(EXPORT_PACKAGE);

    let children = clauses
        .into_iter()
        .map(|clause| clause_node(clause, sort_uses))
        .collect::<Result<Vec<_>>>()?;
    Node::branch(NodeKind::Header, name, children)
}

fn clause_node(clause: Clause, sort_uses: bool) -> Result<Node> {
    let parameters = clause
        .parameters
        .into_iter()
        .map(|(key, value)| {
            let value = if sort_uses && key == USES_DIRECTIVE {
                sorted_list(&value, false)
            } else {
                value
            };
            Node::valued(NodeKind::Parameter, key, value)
        })
        .collect();
    Node::branch(NodeKind::Clause, clause.key, parameters)
}

/// Split on commas, trim, sort, rejoin with `,`.
fn sorted_list(value: &str, keep_empty: bool) -> String {
    let mut items: Vec<&str> = value
        .split(',')
        .map(str::trim)
        .filter(|item| keep_empty || !item.is_empty())
        .collect();
    items.sort_unstable();
    items.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(name: &str, value: &str) -> Node {
        normalize_header(name, value, None)
            .unwrap()
            .expect("header should not be ignored")
    }

    #[test]
    fn test_plain_header_verbatim() {
        let node = header("Bundle-Name", "  Acme Core ");
        assert_eq!(node.label(), "Bundle-Name:  Acme Core ");
        assert!(node.is_leaf());
    }

    #[test]
    fn test_ordered_header_sorted() {
        let node = header("Service-Component", "OSGI-INF/b.xml, OSGI-INF/a.xml");
        assert_eq!(node.label(), "Service-Component:OSGI-INF/a.xml,OSGI-INF/b.xml");
    }

    #[test]
    fn test_structured_header_shape() {
        let node = header("Import-Package", "org.b;version=\"[1,2)\",org.a");
        assert_eq!(node.kind(), NodeKind::Header);
        assert_eq!(node.value(), None);
        let clause = node.child(NodeKind::Clause, "org.b").unwrap();
        let param = clause.child(NodeKind::Parameter, "version").unwrap();
        assert_eq!(param.label(), "version:[1,2)");
        assert!(node.child(NodeKind::Clause, "org.a").unwrap().is_leaf());
    }

    #[test]
    fn test_uses_sorted_only_on_export_package() {
        let export = header("Export-Package", "p;uses:=\"c,a,b\"");
        let uses = export
            .child(NodeKind::Clause, "p")
            .and_then(|c| c.child(NodeKind::Parameter, "uses:"))
            .unwrap();
        assert_eq!(uses.value(), Some("a,b,c"));

        let import = header("Import-Package", "p;uses:=\"c,a,b\"");
        let uses = import
            .child(NodeKind::Clause, "p")
            .and_then(|c| c.child(NodeKind::Parameter, "uses:"))
            .unwrap();
        assert_eq!(uses.value(), Some("c,a,b"));
    }

    #[test]
    fn test_malformed_structured_value() {
        let err = normalize_header("Export-Package", "p;version=\"1.0", None).unwrap_err();
        assert!(matches!(
            err,
            BundiffError::MalformedHeader { ref header, .. } if header == "Export-Package"
        ));
    }

    #[test]
    fn test_bad_version() {
        let err = normalize_header("Bundle-Version", "one", None).unwrap_err();
        assert!(matches!(err, BundiffError::InvalidVersion { .. }));
    }

    #[test]
    fn test_caller_pattern_wins_over_structure() {
        let ignore = IgnoreSet::parse("Export-*").unwrap();
        assert!(normalize_header("Export-Package", "\"broken", Some(&ignore))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_manifest_keeps_order_and_drops_ignored() {
        let mut manifest = Manifest::new();
        manifest.insert("Bundle-SymbolicName", "acme.core");
        manifest.insert("Created-By", "javac");
        manifest.insert("Bundle-Name", "Acme");
        let node = normalize_manifest(&manifest, None).unwrap();
        let names: Vec<_> = node.children().iter().map(Node::name).collect();
        assert_eq!(names, ["Bundle-SymbolicName", "Bundle-Name"]);
        assert_eq!(node.name(), MANIFEST_NAME);
    }
}
