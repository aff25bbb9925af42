//! Header normalization scenarios.
//!
//! Each test feeds raw header text through the normalizer and inspects the
//! resulting node (or its absence).

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bundiff_core::errors::BundiffError;
use bundiff_core::header::{normalize_header, normalize_manifest};
use bundiff_core::ignore::IgnoreSet;
use bundiff_core::module::Manifest;
use bundiff_core::tree::{Node, NodeKind};

fn normalize(name: &str, value: &str) -> Node {
    normalize_header(name, value, None)
        .unwrap()
        .expect("header should produce a node")
}

// ---------------------------------------------------------------------------
// Ignored headers
// ---------------------------------------------------------------------------

#[test]
fn test_fixed_ignored_headers_never_produce_nodes() {
    for name in ["Tool", "Bnd-LastModified", "Created-By", "created-by", "TOOL"] {
        for value in ["", "1.8.0_292 (Oracle)", "1700000000000", "\"unterminated"] {
            assert!(
                normalize_header(name, value, None).unwrap().is_none(),
                "{name}: {value:?}"
            );
        }
    }
}

#[test]
fn test_caller_patterns_ignore_headers() {
    let ignore = IgnoreSet::parse("Bundle-Description, Include-*").unwrap();
    assert!(normalize_header("Bundle-Description", "text", Some(&ignore))
        .unwrap()
        .is_none());
    assert!(normalize_header("Include-Resource", "x", Some(&ignore))
        .unwrap()
        .is_none());
    assert!(normalize_header("Bundle-Name", "x", Some(&ignore))
        .unwrap()
        .is_some());
}

// ---------------------------------------------------------------------------
// Structured headers
// ---------------------------------------------------------------------------

#[test]
fn test_export_package_uses_order_is_irrelevant() {
    let scrambled = normalize("Export-Package", "com.acme;version=1.0;uses:=\"b,a,c\"");
    let sorted = normalize("Export-Package", "com.acme;version=1.0;uses:=\"a,b,c\"");
    assert_eq!(scrambled, sorted);

    let uses = sorted
        .child(NodeKind::Clause, "com.acme")
        .and_then(|c| c.child(NodeKind::Parameter, "uses:"))
        .unwrap();
    assert_eq!(uses.label(), "uses:a,b,c");
}

#[test]
fn test_export_package_single_quoted_uses() {
    let scrambled = normalize("Export-Package", "p;uses:='b,a'");
    let sorted = normalize("Export-Package", "p;uses:='a,b'");
    assert_eq!(scrambled, sorted);
    assert_eq!(scrambled.children().len(), 1);

    let uses = scrambled
        .child(NodeKind::Clause, "p")
        .and_then(|c| c.child(NodeKind::Parameter, "uses:"))
        .unwrap();
    assert_eq!(uses.value(), Some("a,b"));
    assert_eq!(sorted, normalize("Export-Package", "p;uses:=\"a,b\""));
}

#[test]
fn test_export_package_lowercase_name_still_sorts_uses() {
    let node = normalize("export-package", "p;uses:=\"z, y\"");
    let uses = node
        .child(NodeKind::Clause, "p")
        .and_then(|c| c.child(NodeKind::Parameter, "uses:"))
        .unwrap();
    assert_eq!(uses.value(), Some("y,z"));
}

#[test]
fn test_require_bundle_clauses() {
    let node = normalize(
        "Require-Bundle",
        "org.acme.base;bundle-version=\"[1.0,2.0)\";resolution:=optional, org.acme.util",
    );
    assert_eq!(node.children().len(), 2);
    let base = node.child(NodeKind::Clause, "org.acme.base").unwrap();
    let labels: Vec<_> = base.children().iter().map(|p| p.label().into_owned()).collect();
    assert_eq!(
        labels,
        ["bundle-version:[1.0,2.0)", "resolution::optional"]
    );
}

#[test]
fn test_symbolic_name_with_directive() {
    let node = normalize("Bundle-SymbolicName", "com.acme.core;singleton:=true");
    let clause = node.child(NodeKind::Clause, "com.acme.core").unwrap();
    assert_eq!(
        clause.child(NodeKind::Parameter, "singleton:").unwrap().value(),
        Some("true")
    );
}

#[test]
fn test_malformed_structured_header_names_header_and_value() {
    let err = normalize_header("Import-Package", "a;version=\"[1,2)", None).unwrap_err();
    match err {
        BundiffError::MalformedHeader { header, value, .. } => {
            assert_eq!(header, "Import-Package");
            assert_eq!(value, "a;version=\"[1,2)");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Version, ordered and plain headers
// ---------------------------------------------------------------------------

#[test]
fn test_bundle_version_drops_qualifier() {
    assert_eq!(
        normalize("Bundle-Version", "1.2.3.qualifier").label(),
        "Bundle-Version:1.2.3"
    );
    assert_eq!(normalize("Bundle-Version", "2.0.0").label(), "Bundle-Version:2.0.0");
    assert_eq!(normalize("Bundle-Version", "2").label(), "Bundle-Version:2.0.0");
}

#[test]
fn test_bundle_version_unparseable() {
    let err = normalize_header("Bundle-Version", "1.x", None).unwrap_err();
    assert!(matches!(err, BundiffError::InvalidVersion { ref value, .. } if value == "1.x"));
}

#[test]
fn test_ordered_headers_sorted() {
    assert_eq!(normalize("Test-Cases", "b,a").label(), "Test-Cases:a,b");
    assert_eq!(
        normalize("Service-Component", "b,a").label(),
        "Service-Component:a,b"
    );
}

#[test]
fn test_default_header_verbatim() {
    assert_eq!(
        normalize("Bundle-Description", "b,a").label(),
        "Bundle-Description:b,a"
    );
}

#[test]
fn test_manifest_node_wraps_headers_in_order() {
    let manifest: Manifest = [
        ("Bundle-Version", "1.0.0.v1"),
        ("Tool", "bnd"),
        ("Export-Package", "p"),
        ("Bundle-Name", "Acme"),
    ]
    .into_iter()
    .collect();
    let node = normalize_manifest(&manifest, None).unwrap();
    assert_eq!(node.kind(), NodeKind::Manifest);
    let labels: Vec<_> = node.children().iter().map(|h| h.label().into_owned()).collect();
    assert_eq!(
        labels,
        ["Bundle-Version:1.0.0", "Export-Package", "Bundle-Name:Acme"]
    );
}
