//! Error types for nsload.

use std::path::PathBuf;

use thiserror::Error;

use crate::manifest::Rule;

/// Rejected registration input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Prefix was empty or made only of namespace separators
    #[error("namespace prefix {0:?} is empty after normalization")]
    EmptyPrefix(String),

    /// Base directory was empty
    #[error("base directory for prefix {0:?} is empty")]
    EmptyDirectory(String),
}

/// A candidate source unit existed but could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading the unit failed
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The unit was read but its contents were rejected
    #[error("malformed source unit {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },
}

impl LoadError {
    /// Path of the unit that failed to load.
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } => path,
            LoadError::Malformed { path, .. } => path,
        }
    }
}

/// Manifest reading or interpretation failure.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// IO error while reading the manifest
    #[error("failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Manifest text does not match the grammar
    #[error("manifest syntax error:\n{0}")]
    Syntax(#[from] Box<pest::error::Error<Rule>>),

    /// Top-level key that is not an option
    #[error("unknown option '{key}' on line {line}")]
    UnknownKey { key: String, line: usize },

    /// Section header that is not recognised
    #[error("unknown section [{section}] on line {line}")]
    UnknownSection { section: String, line: usize },

    /// Separator must be a single character
    #[error("separator must be exactly one character, got {value:?} on line {line}")]
    InvalidSeparator { value: String, line: usize },

    /// Value has the wrong shape: a list for a single-string option, or an empty directory list
    #[error("'{key}' on line {line} expects {expected}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        line: usize,
    },

    /// Registration rejected by the registry
    #[error("invalid registration: {0}")]
    Registry(#[from] RegistryError),
}

/// nsload error type.
#[derive(Error, Debug)]
pub enum Error {
    /// No handler could resolve the symbol
    #[error("unresolved symbol '{0}'")]
    UnresolvedSymbol(String),

    /// Registration error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Load error
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Manifest error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),
}

/// Result type alias for nsload operations.
pub type Result<T> = std::result::Result<T, Error>;
