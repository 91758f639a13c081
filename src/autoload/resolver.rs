//! Symbol resolver: longest-prefix-first search over the registry.
//!
//! For `Acme.Http.Client` with separator `.` the candidates are tried in this
//! order, each against every base directory of its prefix:
//!
//! ```text
//! prefix "Acme.Http."  relative "Client"       -> client.src
//! prefix "Acme."       relative "Http.Client"  -> http/client.src
//! root                 relative "Acme.Http.Client" -> acme/http/client.src
//! ```
//!
//! The first existing file is loaded and the search stops.

use std::path::Path;
use std::sync::Arc;

use super::chain::Autoloader;
use super::loader::SourceLoader;
use super::path_map::map_to_relative_path;
use super::registry::NamespaceRegistry;
use super::types::{AutoloadOptions, NamespacePrefix, Resolution, UnitHandle};
use crate::error::LoadError;

/// Resolves fully-qualified names to source units and loads them.
///
/// Holds no state between calls apart from whatever the loader keeps.
pub struct SymbolResolver<L> {
    registry: Arc<NamespaceRegistry>,
    options: AutoloadOptions,
    loader: L,
}

impl<L: SourceLoader> SymbolResolver<L> {
    /// Create a resolver splitting names on the registry's separator and
    /// using the default extension.
    pub fn new(registry: Arc<NamespaceRegistry>, loader: L) -> Self {
        let options = AutoloadOptions::new().with_separator(registry.separator());
        SymbolResolver {
            registry,
            options,
            loader,
        }
    }

    /// Set the source-unit extension, including its leading dot.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.options.extension = extension.into();
        self
    }

    pub fn options(&self) -> &AutoloadOptions {
        &self.options
    }

    pub fn registry(&self) -> &NamespaceRegistry {
        &self.registry
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn into_loader(self) -> L {
        self.loader
    }

    /// Resolve `name` and load the first matching unit.
    ///
    /// Returns `Resolution::NotFound` when no registered prefix has a matching
    /// file. A loader failure is returned as an error and ends the search.
    pub fn resolve(&mut self, name: &str) -> Result<Resolution, LoadError> {
        let candidates = self.candidates(name);
        if candidates.is_empty() {
            log::debug!("'{}' is not a resolvable name", name);
            return Ok(Resolution::NotFound);
        }

        for (prefix, relative_name) in candidates {
            log::debug!("trying {} for '{}'", prefix, relative_name);
            if let Resolution::Loaded(unit) = self.try_load(&prefix, relative_name)? {
                return Ok(Resolution::Loaded(unit));
            }
        }

        log::debug!("no source unit found for '{}'", name);
        Ok(Resolution::NotFound)
    }

    /// Probe every base directory of `prefix` for `relative_name`, loading the
    /// first file that exists.
    ///
    /// An unregistered prefix is a miss without touching the filesystem.
    pub fn try_load(
        &mut self,
        prefix: &NamespacePrefix,
        relative_name: &str,
    ) -> Result<Resolution, LoadError> {
        let dirs = self.registry.lookup_prefix(prefix);
        if dirs.is_empty() {
            return Ok(Resolution::NotFound);
        }

        let relative_path = map_to_relative_path(relative_name, &self.options);
        for dir in dirs {
            let candidate = dir.join(&relative_path);
            if !candidate.is_file() {
                log::debug!("no unit at {}", candidate.display());
                continue;
            }
            return self.load(&candidate).map(Resolution::Loaded);
        }

        Ok(Resolution::NotFound)
    }

    fn load(&mut self, path: &Path) -> Result<UnitHandle, LoadError> {
        match self.loader.load(path) {
            Ok(unit) => {
                log::info!("loaded {} via {} loader", path.display(), self.loader.name());
                Ok(unit)
            }
            Err(e) => {
                log::warn!("{}", e);
                Err(e)
            }
        }
    }

    /// The ordered `(prefix, relative name)` pairs `resolve` would try.
    ///
    /// Most specific prefix first, the root prefix last. Leading separators
    /// are ignored; an empty name or one ending in a separator has no
    /// candidates.
    pub fn candidates<'n>(&self, name: &'n str) -> Vec<(NamespacePrefix, &'n str)> {
        let separator = self.options.separator;
        let name = name.trim_start_matches(separator);
        if name.is_empty() || name.ends_with(separator) {
            return Vec::new();
        }

        let width = separator.len_utf8();
        let mut candidates = Vec::new();
        let mut remaining = name;
        while let Some(pos) = remaining.rfind(separator) {
            let relative_name = &name[pos + width..];
            if let Some(prefix) = NamespacePrefix::normalize(&name[..pos + width], separator) {
                candidates.push((prefix, relative_name));
            }
            remaining = &name[..pos];
        }
        candidates.push((NamespacePrefix::root(), name));
        candidates
    }
}

impl<L: SourceLoader> Autoloader for SymbolResolver<L> {
    fn autoload(&mut self, symbol: &str) -> Result<Resolution, LoadError> {
        self.resolve(symbol)
    }

    fn name(&self) -> &str {
        "namespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type NoLoad = fn(&Path) -> Result<UnitHandle, LoadError>;

    fn never_load(path: &Path) -> Result<UnitHandle, LoadError> {
        panic!("unexpected load of {}", path.display())
    }

    fn resolver() -> SymbolResolver<NoLoad> {
        SymbolResolver::new(Arc::new(NamespaceRegistry::new()), never_load as NoLoad)
    }

    fn plan(name: &str) -> Vec<(String, String)> {
        resolver()
            .candidates(name)
            .into_iter()
            .map(|(p, r)| (p.as_str().to_string(), r.to_string()))
            .collect()
    }

    fn pair(prefix: &str, relative: &str) -> (String, String) {
        (prefix.to_string(), relative.to_string())
    }

    #[test]
    fn test_candidates_most_specific_first() {
        assert_eq!(
            plan("A.B.C"),
            vec![pair("A.B.", "C"), pair("A.", "B.C"), pair("", "A.B.C")]
        );
    }

    #[test]
    fn test_candidates_single_segment_only_root() {
        assert_eq!(plan("Widget"), vec![pair("", "Widget")]);
    }

    #[test]
    fn test_candidates_strip_leading_separator() {
        assert_eq!(plan(".A.B"), vec![pair("A.", "B"), pair("", "A.B")]);
    }

    #[test]
    fn test_candidates_reject_malformed_names() {
        assert!(plan("").is_empty());
        assert!(plan("...").is_empty());
        assert!(plan("A.B.").is_empty());
    }

    #[test]
    fn test_candidates_multibyte_separator() {
        let mut registry = NamespaceRegistry::with_separator('·');
        registry.add_base_directory("α", "x", false).unwrap();
        let resolver = SymbolResolver::new(Arc::new(registry), never_load as NoLoad);
        let names: Vec<_> = resolver
            .candidates("α·β")
            .into_iter()
            .map(|(p, r)| (p.as_str().to_string(), r.to_string()))
            .collect();
        assert_eq!(names, vec![pair("α·", "β"), pair("", "α·β")]);
    }

    #[test]
    fn test_unregistered_prefix_skips_filesystem() {
        let mut resolver = resolver();
        assert_eq!(resolver.resolve("A.B.C").unwrap(), Resolution::NotFound);
    }

    #[test]
    fn test_resolver_takes_separator_from_registry() {
        let registry = NamespaceRegistry::with_separator('\\');
        let resolver =
            SymbolResolver::new(Arc::new(registry), never_load as NoLoad).with_extension(".inc");
        assert_eq!(resolver.options().separator, '\\');
        assert_eq!(resolver.options().extension, ".inc");
    }
}
