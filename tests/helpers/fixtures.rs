//! In-memory project trees.

use std::sync::Arc;

use importer::{Dispatcher, FileSystem, MemoryFileSystem};
use once_cell::sync::Lazy;

/// A small project with a library root, grouped model files and nested
/// pattern imports.
///
/// ```text
/// main.jsonnet            glob+://envs/*.jsonnet
/// envs/dev.jsonnet        glob.stem://*.libsonnet
/// envs/app.libsonnet
/// models/host.libsonnet
/// models/sub/host.libsonnet
/// vendor/models/host.libsonnet
/// vendor/grafana.libsonnet
/// lib/grafana.libsonnet
/// ```
pub const PROJECT: &[(&str, &str)] = &[
    ("main.jsonnet", "(import 'glob+://envs/*.jsonnet')"),
    ("envs/dev.jsonnet", "{ dev: (import 'glob.stem://*.libsonnet') }"),
    ("envs/app.libsonnet", "{ app: 1 }"),
    ("models/host.libsonnet", "{ host: 'local' }"),
    ("models/sub/host.libsonnet", "{ host: 'sub' }"),
    ("vendor/models/host.libsonnet", "{ host: 'vendor' }"),
    ("vendor/grafana.libsonnet", "{ grafana: 'vendor' }"),
    ("lib/grafana.libsonnet", "{ grafana: 'lib' }"),
];

/// Read-only copy of [`PROJECT`], shared by tests that never write.
static SHARED_PROJECT: Lazy<Arc<MemoryFileSystem>> = Lazy::new(|| Arc::new(memfs(PROJECT)));

/// A handle on the shared [`PROJECT`] tree.
pub fn shared_project() -> Arc<dyn FileSystem> {
    let project: Arc<MemoryFileSystem> = Arc::clone(&*SHARED_PROJECT);
    project
}

pub fn memfs(files: &[(&str, &str)]) -> MemoryFileSystem {
    let memfs = MemoryFileSystem::new();
    for (file, contents) in files {
        memfs.insert(file, *contents);
    }
    memfs
}

/// A dispatcher over `files` plus the file system, for inspecting writes.
pub fn dispatcher(files: &[(&str, &str)], roots: &[&str]) -> (Arc<MemoryFileSystem>, Dispatcher) {
    let memfs = Arc::new(memfs(files));
    let roots = roots.iter().map(|r| r.to_string()).collect();
    let dispatcher = Dispatcher::with_library_roots(memfs.clone(), roots);
    (memfs, dispatcher)
}
