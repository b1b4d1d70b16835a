use std::io;

use tracing::debug;

use super::{Resolution, Resolver};
use crate::address::ParsedAddress;
use crate::base::path;
use crate::error::{ImportError, Result};
use crate::session::{LogLevel, Session};

/// Plain file imports, the fallback of every dispatcher.
///
/// Looks next to the caller first, then through the library roots from last
/// to first, so a later root overrides an earlier one.
#[derive(Debug, Clone, Default)]
pub struct FileResolver {
    library_roots: Vec<String>,
}

impl FileResolver {
    pub fn new(library_roots: Vec<String>) -> Self {
        Self { library_roots }
    }

    /// Locations tried for `file`, in order.
    pub fn candidates(&self, caller: &str, file: &str) -> Vec<String> {
        if path::is_absolute(file) {
            return vec![path::clean(file)];
        }

        std::iter::once(path::join(&path::parent(caller), file))
            .chain(self.library_roots.iter().rev().map(|root| path::join(root, file)))
            .collect()
    }
}

impl Resolver for FileResolver {
    fn name(&self) -> &str {
        "FileResolver"
    }

    fn can_handle(&self, _prefix: &str) -> bool {
        true
    }

    fn prefixes(&self) -> Vec<String> {
        vec![String::new()]
    }

    fn is_fallback(&self) -> bool {
        true
    }

    fn resolve(&self, session: &mut Session, caller: &str, address: &str) -> Result<Resolution> {
        let parsed = ParsedAddress::parse(address)?;
        if !parsed.is_plain() {
            return Err(ImportError::UnknownPrefix(parsed.prefix().to_string()));
        }

        let searched = self.candidates(caller, parsed.path());
        let fs = session.fs();

        let Some(found) = searched.iter().find(|candidate| fs.is_file(candidate)) else {
            return Err(ImportError::NotFound {
                address: address.to_string(),
                searched,
            });
        };

        let bytes = fs.read(found).map_err(|e| ImportError::io(found.clone(), e))?;
        let content = String::from_utf8(bytes).map_err(|e| {
            ImportError::io(found.clone(), io::Error::new(io::ErrorKind::InvalidData, e))
        })?;

        if session.logs(LogLevel::Debug) {
            debug!("[FILE] '{}' from '{}' found at '{}'", address, caller, found);
        }

        Ok(Resolution::new(content, found.clone()))
    }
}
