//! Core types for the autoload subsystem.

use std::fmt;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use uuid::Uuid;

/// Namespace separator used when none is configured.
pub const DEFAULT_SEPARATOR: char = '.';

/// Source-unit extension used when none is configured.
pub const DEFAULT_EXTENSION: &str = ".src";

/// A normalized namespace prefix, e.g. `"Foo.Bar."`.
///
/// Separators are stripped from both ends and exactly one trailing separator
/// is appended. The empty prefix is the root and is tried last by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespacePrefix(String);

impl NamespacePrefix {
    /// Normalize a raw prefix. Returns `None` if nothing is left after
    /// stripping separators.
    pub fn normalize(raw: &str, separator: char) -> Option<Self> {
        let trimmed = raw.trim_matches(separator);
        if trimmed.is_empty() {
            return None;
        }
        let mut prefix = String::with_capacity(trimmed.len() + separator.len_utf8());
        prefix.push_str(trimmed);
        prefix.push(separator);
        Some(NamespacePrefix(prefix))
    }

    /// The root (global) prefix.
    pub fn root() -> Self {
        NamespacePrefix(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NamespacePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// A search root, normalized to end in exactly one path separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseDirectory(String);

impl BaseDirectory {
    /// Normalize a raw directory. Returns `None` for an empty string.
    pub fn normalize(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        let trimmed = raw.trim_end_matches(is_path_separator);
        let mut dir = String::with_capacity(trimmed.len() + 1);
        dir.push_str(trimmed);
        dir.push(MAIN_SEPARATOR);
        Some(BaseDirectory(dir))
    }

    /// Build a candidate path by appending an already-mapped relative path.
    pub fn join(&self, relative: &str) -> PathBuf {
        let mut candidate = String::with_capacity(self.0.len() + relative.len());
        candidate.push_str(&self.0);
        candidate.push_str(relative);
        PathBuf::from(candidate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn is_path_separator(c: char) -> bool {
    c == MAIN_SEPARATOR || c == '/'
}

/// Resolver options: how names are split and how units are named on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoloadOptions {
    /// Namespace separator inside fully-qualified names.
    pub separator: char,
    /// Extension appended to every mapped path, including the leading dot.
    pub extension: String,
}

impl AutoloadOptions {
    pub fn new() -> Self {
        AutoloadOptions {
            separator: DEFAULT_SEPARATOR,
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

impl Default for AutoloadOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a loaded source unit.
///
/// Every load gets a fresh id, so loading the same file twice yields two
/// distinguishable handles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitHandle {
    id: Uuid,
    path: PathBuf,
}

impl UnitHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        UnitHandle {
            id: Uuid::new_v4(),
            path: path.into(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for UnitHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}]",
            self.path.display(),
            self.id.to_hyphenated()
        )
    }
}

/// Outcome of a resolution attempt that did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A unit was found and loaded.
    Loaded(UnitHandle),
    /// Nothing matched; the host decides what to do next.
    NotFound,
}

impl Resolution {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Resolution::Loaded(_))
    }

    pub fn unit(&self) -> Option<&UnitHandle> {
        match self {
            Resolution::Loaded(unit) => Some(unit),
            Resolution::NotFound => None,
        }
    }

    pub fn into_unit(self) -> Option<UnitHandle> {
        match self {
            Resolution::Loaded(unit) => Some(unit),
            Resolution::NotFound => None,
        }
    }
}
