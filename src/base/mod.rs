//! Foundation types for the importer.
//!
//! This module provides the primitives every other module builds on:
//! - [`constants`] - Reserved prefixes, default file names
//! - [`path`] - Lexical (file-system free) path helpers on `/`-separated strings
//! - [`FileSystem`] - The narrow file-system collaborator, with an OS and an
//!   in-memory implementation
//!
//! This module has NO dependencies on other importer modules.

pub mod constants;
mod fs;
pub mod path;

pub use fs::{FileSystem, MemoryFileSystem, OsFileSystem};
