#![allow(clippy::unwrap_used, clippy::expect_used)]

use importer::{ImportError, MissingFileFallback};

use crate::helpers::evaluator::evaluate;
use crate::helpers::fixtures::{PROJECT, dispatcher};

#[test]
fn test_missing_file_without_fallback_fails() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &["vendor"]);

    let err = dispatcher.resolve("models/caller.jsonnet", "missing.libsonnet").unwrap_err();

    match err {
        ImportError::NotFound { address, searched } => {
            assert_eq!(address, "missing.libsonnet");
            assert_eq!(searched, vec!["models/missing.libsonnet", "vendor/missing.libsonnet"]);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_literal_fallback() {
    let files = [(
        "main.jsonnet",
        "[import 'config://set?onMissingFile=%22%7B%7D%22', import 'sub/missing.libsonnet']",
    )];
    let (memfs, mut dispatcher) = dispatcher(&files, &[]);

    let got = evaluate(&mut dispatcher, &*memfs, "main.jsonnet").unwrap();

    assert_eq!(got, "[{}, {}]");
}

#[test]
fn test_literal_fallback_location() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &[]);
    dispatcher.set_missing_file_fallback(Some(MissingFileFallback::Literal("{ none: true }".to_string())));

    let got = dispatcher.resolve("models/caller.jsonnet", "missing.libsonnet").unwrap();

    assert_eq!(got.content, "{ none: true }");
    assert_eq!(got.found_at, "models/missing.libsonnet");
}

#[test]
fn test_file_fallback() {
    let files = [
        ("models/caller.jsonnet", "{}"),
        ("models/default.libsonnet", "{ default: true }"),
    ];
    let (_, mut dispatcher) = dispatcher(&files, &[]);

    dispatcher
        .resolve("models/caller.jsonnet", "config://set?onMissingFile=default.libsonnet")
        .unwrap();
    let got = dispatcher.resolve("models/caller.jsonnet", "missing.libsonnet").unwrap();

    assert_eq!(got.content, "{ default: true }");
    assert_eq!(got.found_at, "models/default.libsonnet");
}

#[test]
fn test_missing_substitute_is_reported() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &[]);
    dispatcher.set_missing_file_fallback(Some(MissingFileFallback::File("nope.libsonnet".to_string())));

    let err = dispatcher.resolve("main.jsonnet", "missing.libsonnet").unwrap_err();

    assert!(matches!(err, ImportError::NotFound { ref address, .. } if address == "nope.libsonnet"));
}

#[test]
fn test_fallback_does_not_cover_empty_patterns() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &[]);
    dispatcher.set_missing_file_fallback(Some(MissingFileFallback::Literal("{}".to_string())));

    let err = dispatcher.resolve("main.jsonnet", "glob+://*.missing").unwrap_err();

    assert!(matches!(err, ImportError::EmptyResult { .. }));
}
