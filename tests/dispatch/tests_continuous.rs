#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use importer::graph::VertexKind;
use importer::{Dispatcher, OsFileSystem};
use tempfile::TempDir;

use crate::helpers::evaluator::evaluate;
use crate::helpers::fixtures::{PROJECT, dispatcher, shared_project};

#[test]
fn test_nested_patterns_share_graph_and_counter() {
    let (memfs, mut dispatcher) = dispatcher(PROJECT, &[]);

    let got = evaluate(&mut dispatcher, &*memfs, "main.jsonnet").unwrap();

    assert_eq!(got, "(({ dev: ({\n'app': ({ app: 1 }),\n}) }))");

    // glob, envs/dev.jsonnet, glob, app.libsonnet
    let session = dispatcher.session();
    assert_eq!(session.sequence(), 4);

    let graph = session.graph();
    assert!(graph.contains_edge("main.jsonnet", "glob+://envs/*.jsonnet"));
    assert!(graph.contains_edge("glob+://envs/*.jsonnet", "envs/dev.jsonnet"));
    assert!(graph.contains_edge("envs/dev.jsonnet", "glob.stem://*.libsonnet"));
    assert!(graph.contains_edge("glob.stem://*.libsonnet", "glob.stem://envs/*.libsonnet"));
    assert!(graph.contains_edge("app.libsonnet", "envs/app.libsonnet"));
    assert_eq!(graph.vertex_kind("glob.stem://*.libsonnet"), Some(VertexKind::Pattern));
}

#[test]
fn test_nested_sequence_numbers_increase() {
    let (memfs, mut dispatcher) = dispatcher(PROJECT, &[]);

    evaluate(&mut dispatcher, &*memfs, "main.jsonnet").unwrap();

    let graph = dispatcher.session().graph();
    let outer = graph.edge("main.jsonnet", "glob+://envs/*.jsonnet").unwrap().seq;
    let inner = graph.edge("envs/dev.jsonnet", "glob.stem://*.libsonnet").unwrap().seq;
    assert!(outer < inner);
}

#[test]
fn test_importstr_keeps_raw_text() {
    let mut dispatcher = Dispatcher::new(shared_project());
    let content = "import 'glob-str+://models/*.libsonnet'";

    let got = crate::helpers::evaluator::expand(&mut dispatcher, "main.jsonnet", content).unwrap();

    assert_eq!(got, "(\"{ host: 'local' }\")");
}

#[test]
fn test_os_file_system_end_to_end() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    std::fs::create_dir_all(root.join("vendor")).unwrap();
    std::fs::create_dir_all(root.join("app")).unwrap();
    std::fs::write(root.join("vendor/base.libsonnet"), "{ base: true }").unwrap();
    std::fs::write(root.join("app/extra.libsonnet"), "{ extra: true }").unwrap();
    std::fs::write(root.join("app/main.jsonnet"), "import 'glob+://*.libsonnet'").unwrap();

    let root = root.to_str().unwrap();
    let vendor = format!("{root}/vendor");
    let main = format!("{root}/app/main.jsonnet");
    let fs = Arc::new(OsFileSystem::new());
    let mut dispatcher = Dispatcher::with_library_roots(fs.clone(), vec![vendor]);

    let got = evaluate(&mut dispatcher, &*fs, &main).unwrap();

    assert_eq!(got, "({ base: true })+({ extra: true })");
}
