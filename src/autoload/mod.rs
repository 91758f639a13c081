//! Deferred, on-demand loading of source units by namespace.
//!
//! When the host meets a symbol it has not seen, it asks the autoload
//! subsystem to find the source unit that defines it:
//!
//! ```text
//! Symbol lookup order:
//! 1. Host symbol table        (already defined)
//! 2. Autoload chain handlers  (registration order)
//!    └─ SymbolResolver        ← namespace registry lives here
//! 3. Host raises "unknown symbol"
//! ```
//!
//! ### Key Components
//!
//! - **[`NamespaceRegistry`]**: normalized prefix → ordered base directories
//! - **[`SymbolResolver`]**: longest-prefix-first search, first existing file wins
//! - **[`map_to_relative_path`]**: lexical name → file path rule
//! - **[`SourceLoader`]**: the capability that actually loads a unit
//! - **[`AutoloadChain`]**: the host hook with "already loaded" bookkeeping
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use nsload::autoload::{FileLoader, NamespaceRegistry, Resolution, SymbolResolver};
//!
//! let mut registry = NamespaceRegistry::new();
//! registry.add_base_directory("Acme.Widgets", "src/widgets", false).unwrap();
//! registry.add_base_directory("Acme", "src", false).unwrap();
//!
//! let mut resolver = SymbolResolver::new(Arc::new(registry), FileLoader::new());
//!
//! // Nothing on disk here, so the search ends empty-handed.
//! assert_eq!(resolver.resolve("Acme.Widgets.Button").unwrap(), Resolution::NotFound);
//! ```
//!
//! The registry is mutated only while it is owned by the bootstrap code;
//! once wrapped in an `Arc` it can be shared by any number of resolvers.

pub mod types;
pub mod path_map;
pub mod registry;
pub mod loader;
pub mod resolver;
pub mod chain;

pub use types::{AutoloadOptions, BaseDirectory, NamespacePrefix, Resolution, UnitHandle};
pub use path_map::map_to_relative_path;
pub use registry::NamespaceRegistry;
pub use loader::{FileLoader, SourceLoader};
pub use resolver::SymbolResolver;
pub use chain::{AutoloadChain, Autoloader};
