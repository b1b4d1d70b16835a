//! Lexical path manipulation on `/`-separated strings.
//!
//! Import addresses are text, not OS paths: the same file can be spelled
//! `host.libsonnet`, `./host.libsonnet` or `sub/../host.libsonnet`. All
//! helpers here work purely on the string and never consult the file system,
//! so two spellings normalize to the same vertex regardless of what exists on
//! disk.

use std::cmp::Ordering;

/// Shortest lexically equivalent path.
///
/// Removes `.` segments and repeated separators, folds `..` into the
/// preceding segment where possible. An empty result is `"."`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                // `/..` is `/`
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Joins `path` onto `base` and cleans the result.
///
/// An absolute `path` ignores `base`.
pub fn join(base: &str, path: &str) -> String {
    if is_absolute(path) || base.is_empty() {
        return clean(path);
    }
    if path.is_empty() {
        return clean(base);
    }
    clean(&format!("{base}/{path}"))
}

/// Splits immediately after the last separator.
///
/// The directory part keeps its trailing `/` and is empty for a bare name.
pub fn split(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(idx) => path.split_at(idx + 1),
        None => ("", path),
    }
}

/// Directory containing `path`, cleaned (`"."` for a bare file name).
pub fn parent(path: &str) -> String {
    clean(split(path).0)
}

/// Final path segment.
pub fn file_name(path: &str) -> &str {
    split(path).1
}

/// Expresses `target` relative to `base`.
///
/// Returns `None` when no lexical relation exists: one side rooted and the
/// other not, or `base` climbing out through `..` segments `target` doesn't
/// share.
pub fn relative(base: &str, target: &str) -> Option<String> {
    let base = clean(base);
    let target = clean(target);

    if is_absolute(&base) != is_absolute(&target) {
        return None;
    }
    if base == "." {
        return Some(target);
    }

    let base_parts: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    let target_parts: Vec<&str> = target
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect();

    let common = base_parts
        .iter()
        .zip(target_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let remaining_base = &base_parts[common..];
    if remaining_base.contains(&"..") {
        return None;
    }

    let mut parts: Vec<&str> = vec![".."; remaining_base.len()];
    parts.extend_from_slice(&target_parts[common..]);

    if parts.is_empty() {
        Some(".".to_string())
    } else {
        Some(parts.join("/"))
    }
}

/// Orders paths with the separator ranked below every other character.
///
/// `a/b/c.jsonnet` sorts before `a/b-c/d.jsonnet`, which plain byte order
/// gets wrong. A longer common directory wins too: `a/x/y.jsonnet` sorts
/// before `a/x.jsonnet` and `a/b/c` before `a/z`.
pub fn hierarchical_cmp(a: &str, b: &str) -> Ordering {
    let key = |byte: u8| if byte == b'/' { 0 } else { byte };
    a.bytes().map(key).cmp(b.bytes().map(key))
}
