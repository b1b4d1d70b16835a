#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;

use importer::ImportError;

use crate::helpers::evaluator::evaluate;
use crate::helpers::fixtures::dispatcher;

#[test]
fn test_mutual_imports_are_rejected() {
    let files = [
        ("a.jsonnet", "{ b: import 'b.jsonnet' }"),
        ("b.jsonnet", "{ a: import 'a.jsonnet' }"),
    ];
    let (memfs, mut dispatcher) = dispatcher(&files, &[]);

    let err = evaluate(&mut dispatcher, &*memfs, "a.jsonnet").unwrap_err();

    match err {
        ImportError::ImportCycle { from, to, graph_file } => {
            assert_eq!(from, "b.jsonnet");
            assert_eq!(to, "a.jsonnet");
            assert_eq!(graph_file, PathBuf::from("import_graph.gv"));
        }
        other => panic!("expected ImportCycle, got {other:?}"),
    }

    let dump = memfs.contents("import_graph.gv").unwrap();
    assert!(dump.contains(r#""b.jsonnet" -> "a.jsonnet" [color="red", weight=1];"#));
    assert!(!dispatcher.session().graph().contains_edge("b.jsonnet", "a.jsonnet"));
}

#[test]
fn test_cycle_through_relative_spelling() {
    let files = [
        ("caller.jsonnet", "import 'sub/receiver.libsonnet'"),
        ("sub/receiver.libsonnet", "import '../caller.jsonnet'"),
    ];
    let (memfs, mut dispatcher) = dispatcher(&files, &[]);

    let err = evaluate(&mut dispatcher, &*memfs, "caller.jsonnet").unwrap_err();

    assert!(matches!(
        err,
        ImportError::ImportCycle { ref from, ref to, .. } if from == "../caller.jsonnet" && to == "caller.jsonnet"
    ));
}

#[test]
fn test_self_including_pattern_is_rejected() {
    // a globs b, b globs a back
    let files = [
        ("lib/a.jsonnet", "import 'glob+://*.jsonnet'"),
        ("lib/b.jsonnet", "import 'glob+://*.jsonnet'"),
    ];
    let (memfs, mut dispatcher) = dispatcher(&files, &[]);

    let err = evaluate(&mut dispatcher, &*memfs, "lib/a.jsonnet").unwrap_err();

    assert!(matches!(err, ImportError::ImportCycle { .. }));
}

#[test]
fn test_graph_dump_goes_to_configured_file() {
    let files = [
        ("a.jsonnet", "[import 'config://set?importGraph=cycle.gv', import 'b.jsonnet']"),
        ("b.jsonnet", "import 'a.jsonnet'"),
    ];
    let (memfs, mut dispatcher) = dispatcher(&files, &[]);

    let err = evaluate(&mut dispatcher, &*memfs, "a.jsonnet").unwrap_err();

    assert!(matches!(
        err,
        ImportError::ImportCycle { ref graph_file, .. } if graph_file == &PathBuf::from("cycle.gv")
    ));
    assert!(memfs.contents("cycle.gv").unwrap().contains("red"));
    assert!(memfs.contents("import_graph.gv").is_none());
}

#[test]
fn test_ignored_cycles_are_not_reported() {
    let files = [("a.jsonnet", "{}")];
    let (_, mut dispatcher) = dispatcher(&files, &[]);

    dispatcher
        .resolve("a.jsonnet", "config://set?ignoreImportCycles")
        .unwrap();
    let got = dispatcher.resolve("a.jsonnet", "a.jsonnet").unwrap();

    assert_eq!(got.content, "{}");
    assert!(dispatcher.session().graph().is_empty());
}

#[test]
fn test_same_file_from_two_callers_is_no_cycle() {
    let files = [
        ("main.jsonnet", "[import 'x.libsonnet', import 'y.libsonnet']"),
        ("x.libsonnet", "import 'shared.libsonnet'"),
        ("y.libsonnet", "import 'shared.libsonnet'"),
        ("shared.libsonnet", "{ shared: true }"),
    ];
    let (memfs, mut dispatcher) = dispatcher(&files, &[]);

    let got = evaluate(&mut dispatcher, &*memfs, "main.jsonnet").unwrap();

    assert_eq!(got, "[{ shared: true }, { shared: true }]");
}
