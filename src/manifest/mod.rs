//! Autoload manifest: the bootstrap file that populates the registry.
//!
//! Expected format:
//! ```text
//! separator = "."
//! extension = ".src"
//! root = ["fallback"]
//!
//! [namespaces]
//! "Acme.Widgets" = ["src/widgets", "vendor/widgets"]
//! "Acme" = "src"
//!
//! [prepend]
//! "Acme.Widgets" = "overrides/widgets"
//! ```
//!
//! Entries are applied in file order. `[prepend]` lists are placed ahead of
//! the directories already registered, keeping their own order.

mod api;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use api::{parse_manifest, ManifestParser, Rule};

use crate::autoload::{AutoloadOptions, NamespaceRegistry, SourceLoader, SymbolResolver};
use crate::error::ManifestError;

/// One `prefix = dirs` line of the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub prefix: String,
    pub directories: Vec<String>,
    pub prepend: bool,
}

/// Parsed autoload manifest.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    options: AutoloadOptions,
    root: Vec<String>,
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Parse manifest text. Relative directories are kept as written.
    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        parse_manifest(text)
    }

    /// Read a manifest file, anchoring relative directories at its parent.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut manifest = Self::parse(&text)?;
        if let Some(base) = path.parent() {
            manifest.anchor(base);
        }
        Ok(manifest)
    }

    fn anchor(&mut self, base: &Path) {
        let rebase = |dir: &mut String| {
            if !dir.is_empty() && Path::new(dir.as_str()).is_relative() {
                *dir = base.join(dir.as_str()).to_string_lossy().into_owned();
            }
        };
        self.root.iter_mut().for_each(rebase);
        for entry in self.entries.iter_mut() {
            entry.directories.iter_mut().for_each(rebase);
        }
    }

    pub fn options(&self) -> &AutoloadOptions {
        &self.options
    }

    pub fn root(&self) -> &[String] {
        &self.root
    }

    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Build a registry holding every root and namespace directory.
    pub fn build_registry(&self) -> Result<NamespaceRegistry, ManifestError> {
        let mut registry = NamespaceRegistry::with_separator(self.options.separator);
        for dir in &self.root {
            registry.add_root_directory(dir, false)?;
        }
        for entry in &self.entries {
            if entry.prepend {
                for dir in entry.directories.iter().rev() {
                    registry.add_base_directory(&entry.prefix, dir, true)?;
                }
            } else {
                for dir in &entry.directories {
                    registry.add_base_directory(&entry.prefix, dir, false)?;
                }
            }
        }
        Ok(registry)
    }

    /// Build a resolver over a fresh registry, using the manifest's extension.
    pub fn build_resolver<L: SourceLoader>(
        &self,
        loader: L,
    ) -> Result<SymbolResolver<L>, ManifestError> {
        let registry = Arc::new(self.build_registry()?);
        Ok(SymbolResolver::new(registry, loader).with_extension(self.options.extension.clone()))
    }
}

/// Manifest file name looked up by [`find_manifest`].
pub const MANIFEST_FILE: &str = "nsload.manifest";

/// Walk up from `start` looking for a [`MANIFEST_FILE`].
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(MANIFEST_FILE))
        .find(|candidate| candidate.is_file())
}
