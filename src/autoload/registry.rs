//! Namespace registry: ordered search roots per namespace prefix.

use std::collections::HashMap;

use super::types::{BaseDirectory, NamespacePrefix, DEFAULT_SEPARATOR};
use crate::error::RegistryError;

/// Registry of base directories keyed by normalized namespace prefix.
///
/// Populated at bootstrap, then shared read-only (typically behind an `Arc`)
/// with every resolver. A present prefix always has at least one directory.
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    /// Separator used to normalize prefixes.
    separator: char,

    /// Search roots by prefix, in search order.
    prefixes: HashMap<NamespacePrefix, Vec<BaseDirectory>>,
}

impl NamespaceRegistry {
    /// Create an empty registry using the default `.` separator.
    pub fn new() -> Self {
        Self::with_separator(DEFAULT_SEPARATOR)
    }

    /// Create an empty registry for names using `separator`.
    pub fn with_separator(separator: char) -> Self {
        NamespaceRegistry {
            separator,
            prefixes: HashMap::new(),
        }
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    /// Register `dir` as a search root for names under `prefix`.
    ///
    /// With `prepend` the directory is searched before every directory already
    /// registered for that prefix. Registering the same pair twice keeps both.
    pub fn add_base_directory(
        &mut self,
        prefix: &str,
        dir: &str,
        prepend: bool,
    ) -> Result<(), RegistryError> {
        let key = NamespacePrefix::normalize(prefix, self.separator)
            .ok_or_else(|| RegistryError::EmptyPrefix(prefix.to_string()))?;
        let dir = BaseDirectory::normalize(dir)
            .ok_or_else(|| RegistryError::EmptyDirectory(prefix.to_string()))?;
        self.insert(key, dir, prepend);
        Ok(())
    }

    /// Register `dir` under the root prefix, searched after every named prefix.
    pub fn add_root_directory(&mut self, dir: &str, prepend: bool) -> Result<(), RegistryError> {
        let dir = BaseDirectory::normalize(dir)
            .ok_or_else(|| RegistryError::EmptyDirectory(String::new()))?;
        self.insert(NamespacePrefix::root(), dir, prepend);
        Ok(())
    }

    fn insert(&mut self, key: NamespacePrefix, dir: BaseDirectory, prepend: bool) {
        log::trace!(
            "registering {} for {}{}",
            dir,
            key,
            if prepend { " (search first)" } else { "" }
        );
        let dirs = self.prefixes.entry(key).or_insert_with(Vec::new);
        if prepend {
            dirs.insert(0, dir);
        } else {
            dirs.push(dir);
        }
    }

    /// Directories registered for `prefix`, normalized first. Empty if unknown.
    ///
    /// Exact match only; narrowing a name down to its prefixes is the
    /// resolver's job.
    pub fn lookup(&self, prefix: &str) -> &[BaseDirectory] {
        match NamespacePrefix::normalize(prefix, self.separator) {
            Some(key) => self.lookup_prefix(&key),
            None => &[],
        }
    }

    /// Directories registered for an already-normalized prefix.
    pub fn lookup_prefix(&self, prefix: &NamespacePrefix) -> &[BaseDirectory] {
        self.prefixes
            .get(prefix)
            .map(|dirs| dirs.as_slice())
            .unwrap_or(&[])
    }

    /// Directories registered under the root prefix.
    pub fn root_directories(&self) -> &[BaseDirectory] {
        self.lookup_prefix(&NamespacePrefix::root())
    }

    /// All registered prefixes with their directories, sorted by prefix.
    pub fn prefixes(&self) -> Vec<(&NamespacePrefix, &[BaseDirectory])> {
        let mut entries: Vec<_> = self
            .prefixes
            .iter()
            .map(|(prefix, dirs)| (prefix, dirs.as_slice()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Number of registered prefixes.
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
