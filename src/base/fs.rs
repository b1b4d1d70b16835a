//! File-system collaborator.
//!
//! Resolution only needs four primitives: recursive listing, a file test,
//! reading and writing. Everything goes through [`FileSystem`] so the same
//! resolution logic runs against the real disk or an in-memory tree.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use parking_lot::RwLock;
use tracing::warn;
use walkdir::WalkDir;

use super::path;

/// Narrow file-system interface consumed by the resolvers.
///
/// All paths are `/`-separated strings as they appear in import addresses.
pub trait FileSystem: Send + Sync {
    /// Every regular file below `dir`, as paths relative to `dir`.
    ///
    /// With `max_depth`, only files at most that many segments deep are
    /// listed (`Some(1)` lists `dir`'s own files). A missing directory lists
    /// nothing; it is not an error.
    fn list_files(&self, dir: &str, max_depth: Option<usize>) -> io::Result<Vec<String>>;

    /// Whether `path` names an existing regular file.
    fn is_file(&self, path: &str) -> bool;

    fn read(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Creates or truncates `path` and writes `contents`.
    fn write(&self, path: &str, contents: &[u8]) -> io::Result<()>;
}

/// [`FileSystem`] backed by the process's real file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn list_files(&self, dir: &str, max_depth: Option<usize>) -> io::Result<Vec<String>> {
        let root = Path::new(dir);
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut walk = WalkDir::new(root).follow_links(false);
        if let Some(depth) = max_depth {
            walk = walk.max_depth(depth);
        }

        let mut files = Vec::new();
        for entry in walk {
            let entry = match entry {
                Ok(entry) => entry,
                // Only an unreadable `dir` itself fails the listing
                Err(err) if err.depth() > 0 => {
                    warn!("[FS] skipping unreadable entry below '{}': {}", dir, err);
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let Ok(relative) = entry.path().strip_prefix(root) else {
                continue;
            };

            let segments: Option<Vec<&str>> = relative
                .components()
                .map(|component| component.as_os_str().to_str())
                .collect();

            match segments {
                Some(segments) => files.push(segments.join("/")),
                None => warn!(
                    "[FS] skipping non UTF-8 path: {}",
                    entry.path().display()
                ),
            }
        }

        Ok(files)
    }

    fn is_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write(&self, path: &str, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }
}

/// In-memory [`FileSystem`].
///
/// Files are keyed by their cleaned path; directories exist implicitly as
/// prefixes of stored files.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(self, file_path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.insert(file_path, contents);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&self, file_path: &str, contents: impl Into<Vec<u8>>) {
        self.files
            .write()
            .insert(path::clean(file_path), contents.into());
    }

    /// Contents of a file as UTF-8 text, if it exists and decodes.
    pub fn contents(&self, file_path: &str) -> Option<String> {
        self.files
            .read()
            .get(&path::clean(file_path))
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
    }

    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl FileSystem for MemoryFileSystem {
    fn list_files(&self, dir: &str, max_depth: Option<usize>) -> io::Result<Vec<String>> {
        let dir = path::clean(dir);
        let files = self.files.read();

        let listed: Vec<String> = match dir.as_str() {
            "." => files
                .keys()
                .filter(|key| !path::is_absolute(key) && !key.starts_with("../"))
                .cloned()
                .collect(),
            "/" => files
                .keys()
                .filter_map(|key| key.strip_prefix('/'))
                .map(str::to_string)
                .collect(),
            _ => {
                let prefix = format!("{dir}/");
                files
                    .keys()
                    .filter_map(|key| key.strip_prefix(prefix.as_str()))
                    .map(str::to_string)
                    .collect()
            }
        };

        Ok(match max_depth {
            Some(depth) => listed
                .into_iter()
                .filter(|file| file.split('/').count() <= depth)
                .collect(),
            None => listed,
        })
    }

    fn is_file(&self, file_path: &str) -> bool {
        self.files.read().contains_key(&path::clean(file_path))
    }

    fn read(&self, file_path: &str) -> io::Result<Vec<u8>> {
        self.files
            .read()
            .get(&path::clean(file_path))
            .cloned()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("file does not exist: {file_path}"),
                )
            })
    }

    fn write(&self, file_path: &str, contents: &[u8]) -> io::Result<()> {
        self.insert(file_path, contents.to_vec());
        Ok(())
    }
}
