//! Source-unit loaders.
//!
//! Loading is what turns a probed file into symbols the host can see. The
//! resolver only decides *which* file; a `SourceLoader` decides what loading
//! means for the host.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::types::UnitHandle;
use crate::error::LoadError;

/// Capability injected into the resolver to load one source unit.
pub trait SourceLoader {
    /// Load the unit at `path`, which is known to exist.
    ///
    /// An error here is fatal for the current resolution: the resolver
    /// returns it to the host without trying other candidates.
    fn load(&mut self, path: &Path) -> Result<UnitHandle, LoadError>;

    /// Human-readable name for this loader (for debugging/logging).
    fn name(&self) -> &str {
        "loader"
    }
}

impl<F> SourceLoader for F
where
    F: FnMut(&Path) -> Result<UnitHandle, LoadError>,
{
    fn load(&mut self, path: &Path) -> Result<UnitHandle, LoadError> {
        self(path)
    }

    fn name(&self) -> &str {
        "closure"
    }
}

/// Reads each unit as UTF-8 text and keeps it, keyed by path.
///
/// Units are stored rather than executed; a host embedding an interpreter
/// takes the text from here.
#[derive(Debug, Default)]
pub struct FileLoader {
    sources: HashMap<PathBuf, String>,
}

impl FileLoader {
    pub fn new() -> Self {
        FileLoader {
            sources: HashMap::new(),
        }
    }

    /// Text of a previously loaded unit.
    pub fn source(&self, path: &Path) -> Option<&str> {
        self.sources.get(path).map(|s| s.as_str())
    }

    /// Paths loaded so far, in no particular order.
    pub fn loaded_paths(&self) -> impl Iterator<Item = &Path> {
        self.sources.keys().map(|p| p.as_path())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl SourceLoader for FileLoader {
    fn load(&mut self, path: &Path) -> Result<UnitHandle, LoadError> {
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8(bytes).map_err(|e| LoadError::Malformed {
            path: path.to_path_buf(),
            message: format!("not valid UTF-8 ({})", e.utf8_error()),
        })?;
        self.sources.insert(path.to_path_buf(), text);
        Ok(UnitHandle::new(path))
    }

    fn name(&self) -> &str {
        "file"
    }
}
