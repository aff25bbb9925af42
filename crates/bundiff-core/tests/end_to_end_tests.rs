//! End-to-end comparisons through the `Differ` facade.
//!
//! Scenarios build two versions of a module (in memory or as exploded
//! directories), extract both, and inspect the delta tree.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use bundiff_core::config::EngineConfig;
use bundiff_core::diff::{render_human_summary, Delta};
use bundiff_core::errors::ExErrorKind;
use bundiff_core::hash::hash_bytes;
use bundiff_core::module::{MemoryModule, StaticApiResolver};
use bundiff_core::tree::{NodeKind, MANIFEST_NAME, RESOURCES_NAME};
use bundiff_core::Differ;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn version(bundle_version: &str, text: &str) -> MemoryModule {
    MemoryModule::new("acme.core")
        .with_header("Bundle-SymbolicName", "acme.core")
        .with_header("Bundle-Version", bundle_version)
        .with_header("Created-By", format!("builder {}", bundle_version))
        .with_resource("x.txt", text)
}

fn write_module(root: &Path, manifest: &str, files: &[(&str, &str)]) {
    fs::create_dir_all(root.join("META-INF")).unwrap();
    fs::write(root.join("META-INF/MANIFEST.MF"), manifest).unwrap();
    for (path, content) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_version_bump_and_content_change() {
    let differ = Differ::new(EngineConfig::default()).unwrap();
    let resolver = StaticApiResolver::default();
    let older = differ.tree(&version("1.0.0", "hi"), &resolver).unwrap();
    let newer = differ.tree(&version("1.0.1", "bye"), &resolver).unwrap();

    let delta = differ.diff(&older, &newer);
    let root = delta.root();
    assert_eq!(root.delta(), Delta::Changed);

    let manifest = root.child(NodeKind::Manifest, MANIFEST_NAME).unwrap();
    assert_eq!(manifest.delta(), Delta::Changed);
    let bundle_version = manifest.child(NodeKind::Header, "Bundle-Version").unwrap();
    assert_eq!(bundle_version.delta(), Delta::Changed);
    assert_eq!(bundle_version.older_value(), Some("1.0.0"));
    assert_eq!(bundle_version.newer_value(), Some("1.0.1"));
    assert_eq!(
        manifest
            .child(NodeKind::Header, "Bundle-SymbolicName")
            .unwrap()
            .delta(),
        Delta::Unchanged
    );
    assert!(manifest.child(NodeKind::Header, "Created-By").is_none());

    let resource = root
        .child(NodeKind::ResourceSet, RESOURCES_NAME)
        .and_then(|set| set.child(NodeKind::Resource, "x.txt"))
        .unwrap();
    assert_eq!(resource.delta(), Delta::Changed);
    let content_hash = &resource.children()[0];
    assert_eq!(content_hash.kind(), NodeKind::ContentHash);
    assert_eq!(content_hash.delta(), Delta::Changed);
    assert_eq!(content_hash.older_value(), Some(hash_bytes(b"hi").as_str()));
    assert_eq!(content_hash.newer_value(), Some(hash_bytes(b"bye").as_str()));

    let api = root.child(NodeKind::Api, "<api>").unwrap();
    assert_eq!(api.delta(), Delta::Unchanged);
}

#[test]
fn test_qualifier_only_change_is_unchanged() {
    let differ = Differ::new(EngineConfig::default()).unwrap();
    let resolver = StaticApiResolver::default();
    let older = differ.tree(&version("1.0.0.v1", "hi"), &resolver).unwrap();
    let newer = differ.tree(&version("1.0.0.v2", "hi"), &resolver).unwrap();
    assert!(differ.diff(&older, &newer).is_unchanged());
}

#[test]
fn test_exploded_directories() {
    let temp = TempDir::new().unwrap();
    let old_dir = temp.path().join("old");
    let new_dir = temp.path().join("new");
    write_module(
        &old_dir,
        "Manifest-Version: 1.0\nBundle-Version: 1.0.0\nTool: bnd 6.4\nExport-Package: com.acme;uses:=\"b,a\"\n",
        &[("x.txt", "hi"), ("docs/notes.md", "n"), ("META-INF/ACME.SF", "s1")],
    );
    write_module(
        &new_dir,
        "Manifest-Version: 1.0\nBundle-Version: 1.0.1\nTool: bnd 7.0\nExport-Package: com.acme;uses:=\"a,b\"\n",
        &[("x.txt", "bye"), ("y.txt", "new"), ("META-INF/ACME.SF", "s2")],
    );

    let differ = Differ::new(EngineConfig::default()).unwrap();
    let resolver = StaticApiResolver::default();
    let older = differ.tree_from_dir(&old_dir, &resolver).unwrap();
    let newer = differ.tree_from_dir(&new_dir, &resolver).unwrap();
    assert_eq!(older.module_name(), "old");

    let delta = differ.diff(&older, &newer);
    let manifest = delta.root().child(NodeKind::Manifest, MANIFEST_NAME).unwrap();
    assert_eq!(
        manifest
            .child(NodeKind::Header, "Export-Package")
            .unwrap()
            .delta(),
        Delta::Unchanged
    );
    assert_eq!(
        manifest
            .child(NodeKind::Header, "Bundle-Version")
            .unwrap()
            .delta(),
        Delta::Changed
    );

    let resources = delta
        .root()
        .child(NodeKind::ResourceSet, RESOURCES_NAME)
        .unwrap();
    let verdicts: Vec<_> = resources
        .children()
        .iter()
        .map(|r| (r.name().to_string(), r.delta()))
        .collect();
    assert_eq!(
        verdicts,
        [
            ("docs/notes.md".to_string(), Delta::Removed),
            ("x.txt".to_string(), Delta::Changed),
            ("y.txt".to_string(), Delta::Added),
        ]
    );

    let summary = render_human_summary(&delta);
    assert!(summary.contains("**Added** RESOURCE `<resources> > y.txt`"));
    assert!(summary.contains("**Removed** RESOURCE `<resources> > docs/notes.md`"));
}

#[test]
fn test_ignore_hides_differences() {
    let mut differ = Differ::new(EngineConfig::default()).unwrap();
    differ.set_ignore(Some("Bundle-Version;*.txt")).unwrap();
    let resolver = StaticApiResolver::default();
    let older = differ.tree(&version("1.0.0", "hi"), &resolver).unwrap();
    let newer = differ.tree(&version("2.0.0", "bye"), &resolver).unwrap();
    assert!(differ.diff(&older, &newer).is_unchanged());
}

#[test]
fn test_saved_tree_compares_like_fresh_one() {
    let differ = Differ::new(EngineConfig::default()).unwrap();
    let resolver = StaticApiResolver::default();
    let older = differ.tree(&version("1.0.0", "hi"), &resolver).unwrap();
    let saved = serde_json::to_string(&older.to_data().unwrap()).unwrap();

    let restored = differ
        .deserialize(serde_json::from_str(&saved).unwrap())
        .unwrap();
    let newer = differ.tree(&version("1.0.1", "hi"), &resolver).unwrap();
    assert_eq!(
        differ.diff(&restored, &newer),
        differ.diff(&older, &newer)
    );
}

#[test]
fn test_deserialize_rejects_bad_data() {
    let differ = Differ::new(EngineConfig::default()).unwrap();
    let err = differ
        .deserialize(serde_json::json!({"kind": "MODULE"}))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidTree);
    assert_eq!(err.op(), Some("deserialize"));
}

#[test]
fn test_missing_directory_is_io_error() {
    let temp = TempDir::new().unwrap();
    let differ = Differ::new(EngineConfig::default()).unwrap();
    let err = differ
        .tree_from_dir(temp.path().join("nope"), &StaticApiResolver::default())
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Io);
    assert_eq!(err.code(), "ERR_IO");
}
