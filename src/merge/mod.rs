//! Grouping of resolved files and rendering of import expressions.
//!
//! Rendering follows the prefix that requested the files:
//!
//! | prefix          | render                                       |
//! |-----------------|----------------------------------------------|
//! | `glob+`         | `(import 'a')+(import 'b')`                  |
//! | `glob.path`     | `{ 'a': (import 'a'), 'b': (import 'b'), }`  |
//! | `glob.<key>`    | `{ '<key>': (import 'last'), }`              |
//! | `glob.<key>+`   | `{ '<key>': (import 'a')+(import 'b'), }`    |
//!
//! Group keys keep the position of their first occurrence, so the output only
//! depends on the resolution order.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::base::path;

/// Key function used to group resolved files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupMode {
    /// The full path; every file is its own group.
    Path,
    /// The base name (`host.libsonnet`).
    File,
    /// The directory part, with trailing separator (`lib/sub/`).
    Dir,
    /// The base name cut at its first `.` (`host`).
    Stem,
}

impl GroupMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "path" => Some(Self::Path),
            "file" => Some(Self::File),
            "dir" => Some(Self::Dir),
            "stem" => Some(Self::Stem),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::File => "file",
            Self::Dir => "dir",
            Self::Stem => "stem",
        }
    }

    /// Group key of `file` under this mode.
    pub fn key(self, file: &str) -> String {
        match self {
            Self::Path => file.to_string(),
            Self::File => path::file_name(file).to_string(),
            Self::Dir => path::split(file).0.to_string(),
            Self::Stem => {
                let name = path::file_name(file);
                name.split_once('.').map_or(name, |(stem, _)| stem).to_string()
            }
        }
    }
}

/// What happens when a group key is seen again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MergePolicy {
    /// The newer file replaces the group's files.
    #[default]
    Overwrite,
    /// The newer file is appended to the group.
    Concatenate,
}

/// How the rendered expression reads each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImportKind {
    /// Parsed content (`import`).
    #[default]
    Content,
    /// Raw text (`importstr`).
    Text,
}

impl ImportKind {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Content => "import",
            Self::Text => "importstr",
        }
    }
}

/// Files grouped under their keys, in first-occurrence key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupedImports {
    groups: IndexMap<String, Vec<String>, FxBuildHasher>,
}

impl GroupedImports {
    /// Group `files` (in resolution order) by `mode` under `policy`.
    ///
    /// `GroupMode::Path` never collides, so the policy doesn't matter there.
    pub fn build(files: &[String], mode: GroupMode, policy: MergePolicy) -> Self {
        let mut grouped = Self::default();
        for file in files {
            grouped.add(mode.key(file), file.clone(), policy);
        }
        grouped
    }

    fn add(&mut self, key: String, file: String, policy: MergePolicy) {
        let group = self.groups.entry(key).or_default();
        if policy == MergePolicy::Overwrite {
            group.clear();
        }
        group.push(file);
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Render as an object literal mapping each key to its joined imports.
    pub fn render(&self, kind: ImportKind) -> String {
        let mut out = String::from("{\n");
        for (key, files) in &self.groups {
            out.push('\'');
            out.push_str(&escape(key));
            out.push_str("': ");
            out.push_str(&render_flat(files, kind));
            out.push_str(",\n");
        }
        out.push('}');
        out
    }
}

/// Single import expression for `file`.
pub fn render_import(file: &str, kind: ImportKind) -> String {
    format!("({} '{}')", kind.keyword(), escape(file))
}

/// Every file joined with `+`, no grouping.
pub fn render_flat(files: &[String], kind: ImportKind) -> String {
    files
        .iter()
        .map(|file| render_import(file, kind))
        .collect::<Vec<_>>()
        .join("+")
}

/// Group and render in one step.
pub fn render_grouped(
    files: &[String],
    mode: GroupMode,
    policy: MergePolicy,
    kind: ImportKind,
) -> String {
    GroupedImports::build(files, mode, policy).render(kind)
}

/// Escape for a single-quoted string literal.
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('\'', "\\'")
}
