#![allow(clippy::unwrap_used, clippy::expect_used)]

use importer::{ImportError, LogLevel, MissingFileFallback, Resolution};

use crate::helpers::fixtures::{PROJECT, dispatcher};

#[test]
fn test_config_address_is_intercepted() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &[]);

    let got = dispatcher
        .resolve("main.jsonnet", "config://set?logLevel=debug")
        .unwrap();

    assert_eq!(got, Resolution::new("{}", ""));
    assert_eq!(dispatcher.session().config().log_level, LogLevel::Debug);
    // Not an import: no edge, no sequence number
    assert!(dispatcher.session().graph().is_empty());
    assert_eq!(dispatcher.session().sequence(), 0);
}

#[test]
fn test_import_graph_is_persisted_after_config() {
    let (memfs, mut dispatcher) = dispatcher(PROJECT, &[]);

    dispatcher
        .resolve("main.jsonnet", "config://set?logLevel=info&importGraph=graph.gv")
        .unwrap();
    assert!(memfs.contents("graph.gv").is_none());

    dispatcher.resolve("main.jsonnet", "models/host.libsonnet").unwrap();

    let dot = memfs.contents("graph.gv").unwrap();
    assert!(dot.starts_with("strict digraph {"));
    assert!(dot.contains(r#""main.jsonnet" -> "models/host.libsonnet" [weight=0];"#));
}

#[test]
fn test_import_graph_setter() {
    let (memfs, mut dispatcher) = dispatcher(PROJECT, &[]);
    dispatcher.set_import_graph_file("out.gv");

    dispatcher.resolve("main.jsonnet", "glob+://envs/*.jsonnet").unwrap();

    assert!(memfs.contents("out.gv").unwrap().contains("glob+://envs/*.jsonnet"));
}

#[test]
fn test_graph_not_written_by_default() {
    let (memfs, mut dispatcher) = dispatcher(PROJECT, &[]);
    let files = memfs.len();

    dispatcher.resolve("main.jsonnet", "models/host.libsonnet").unwrap();

    assert_eq!(memfs.len(), files);
}

#[test]
fn test_invalid_config_fails_the_import() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &[]);

    let err = dispatcher
        .resolve("main.jsonnet", "config://set?logLevel=loud")
        .unwrap_err();

    assert!(matches!(err, ImportError::UnknownConfigValue { .. }));
    assert_eq!(dispatcher.session().config().log_level, LogLevel::Off);
}

#[test]
fn test_malformed_config_query() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &[]);

    let err = dispatcher
        .resolve("main.jsonnet", "config://set?logLevel=debug;")
        .unwrap_err();

    assert!(matches!(err, ImportError::MalformedQuery { .. }));
}

#[test]
fn test_on_missing_file_config() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &[]);

    dispatcher
        .resolve("main.jsonnet", "config://set?onMissingFile=%27%7B%7D%27")
        .unwrap();

    assert_eq!(
        dispatcher.session().config().on_missing_file,
        Some(MissingFileFallback::Literal("{}".to_string()))
    );
}

#[test]
fn test_setters() {
    let (_, mut dispatcher) = dispatcher(PROJECT, &[]);

    dispatcher.set_log_level(LogLevel::Info);
    dispatcher.ignore_import_cycles();
    dispatcher.set_missing_file_fallback(Some(MissingFileFallback::File("default.jsonnet".to_string())));

    let config = dispatcher.session().config();
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(!config.check_cycles);
    assert!(config.on_missing_file.is_some());
}
