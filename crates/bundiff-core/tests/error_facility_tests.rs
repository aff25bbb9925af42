use bundiff_core::errors::{BundiffError, ExError, ExErrorKind};
use bundiff_core_types::RunId;

#[test]
fn test_resource_unreadable_is_io_with_path() {
    let err = BundiffError::ResourceUnreadable {
        path: "com/acme/Foo.class".to_string(),
        reason: "permission denied".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::Io);
    assert_eq!(ex_err.code(), "ERR_IO");
    assert_eq!(ex_err.path(), Some("com/acme/Foo.class"));
    assert!(ex_err.message().contains("permission denied"));
}

#[test]
fn test_malformed_header_names_header() {
    let err = BundiffError::MalformedHeader {
        header: "Export-Package".to_string(),
        value: "a;version=\"1".to_string(),
        reason: "unterminated quoted string".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidHeader);
    assert_eq!(ex_err.code(), "ERR_INVALID_HEADER");
    assert_eq!(ex_err.header(), Some("Export-Package"));
    assert!(ex_err.message().contains("a;version=\\\"1"));
}

#[test]
fn test_invalid_version_distinct_from_header() {
    let err = BundiffError::InvalidVersion {
        value: "1.x".to_string(),
        reason: "numeric part expected".to_string(),
    };

    let ex_err: ExError = err.into();

    assert_eq!(ex_err.kind(), ExErrorKind::InvalidVersion);
    assert_ne!(ex_err.kind(), ExErrorKind::InvalidHeader);
    assert!(ex_err.message().contains("1.x"));
}

#[test]
fn test_missing_structure_kinds() {
    let manifest: ExError = BundiffError::MissingManifest {
        module: "acme".to_string(),
        reason: "unreadable".to_string(),
    }
    .into();
    assert_eq!(manifest.code(), "ERR_MISSING_MANIFEST");
    assert_eq!(manifest.module(), Some("acme"));

    let api: ExError = BundiffError::MissingApi {
        module: "acme".to_string(),
        reason: "no index".to_string(),
    }
    .into();
    assert_eq!(api.code(), "ERR_MISSING_API");

    let class: ExError = BundiffError::ClassInfoUnavailable {
        path: "p/A.class".to_string(),
        reason: "no index".to_string(),
    }
    .into();
    assert_eq!(class.kind(), ExErrorKind::MissingApi);
    assert_eq!(class.path(), Some("p/A.class"));
}

#[test]
fn test_duplicate_identity_code() {
    let err = BundiffError::DuplicateIdentity {
        parent: "<resources>".to_string(),
        kind: "RESOURCE".to_string(),
        name: "x.txt".to_string(),
    };
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.code(), "ERR_DUPLICATE_IDENTITY");
    assert!(ex_err.message().contains("x.txt"));
}

#[test]
fn test_serde_error_converts_to_serialization() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: BundiffError = serde_err.into();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::Serialization);
}

#[test]
fn test_context_builders_and_display() {
    let run_id = RunId::from_string("run-1".to_string());
    let ex_err = ExError::new(ExErrorKind::InvalidPattern)
        .with_op("set_ignore")
        .with_module("acme")
        .with_run_id(run_id.clone())
        .with_message("bad glob");

    assert_eq!(ex_err.op(), Some("set_ignore"));
    assert_eq!(ex_err.run_id(), Some(&run_id));
    let text = ex_err.to_string();
    assert_eq!(
        text,
        "[ERR_INVALID_PATTERN] in operation 'set_ignore': bad glob (module: acme)"
    );
}

#[test]
fn test_all_codes_are_distinct() {
    let kinds = [
        ExErrorKind::InvalidInput,
        ExErrorKind::InvalidHeader,
        ExErrorKind::InvalidVersion,
        ExErrorKind::InvalidPattern,
        ExErrorKind::InvalidTree,
        ExErrorKind::MissingManifest,
        ExErrorKind::MissingApi,
        ExErrorKind::DuplicateIdentity,
        ExErrorKind::Io,
        ExErrorKind::Serialization,
    ];
    let codes: std::collections::BTreeSet<_> = kinds.iter().map(|k| k.code()).collect();
    assert_eq!(codes.len(), kinds.len());
    assert!(codes.iter().all(|c| c.starts_with("ERR_")));
}
