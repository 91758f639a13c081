//! # nsload - on-demand source-unit loading by namespace
//!
//! Maps a fully-qualified symbol name such as `Acme.Http.Client` to a file on
//! disk and loads it the first time the host needs the symbol:
//! - namespace registry with ordered, prependable search roots per prefix
//! - longest-prefix-first resolution, first existing file wins
//! - lexical name → path mapping (`Http.Client_Pool` → `http/client-pool.src`)
//! - pluggable loaders and a host-side autoload chain
//! - manifest files for bootstrap configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use nsload::autoload::{AutoloadChain, FileLoader, NamespaceRegistry, SymbolResolver};
//!
//! let mut registry = NamespaceRegistry::new();
//! registry.add_base_directory("Acme", "lib/acme", false).unwrap();
//!
//! let resolver = SymbolResolver::new(Arc::new(registry), FileLoader::new());
//!
//! let mut chain = AutoloadChain::new();
//! chain.register(Box::new(resolver));
//!
//! // Loads lib/acme/http/client.src
//! let unit = chain.require("Acme.Http.Client").unwrap();
//! println!("loaded {}", unit);
//! ```
//!
//! ### From a manifest
//!
//! ```no_run
//! use std::path::Path;
//! use nsload::autoload::FileLoader;
//! use nsload::manifest::Manifest;
//!
//! let manifest = Manifest::load(Path::new("nsload.manifest")).unwrap();
//! let mut resolver = manifest.build_resolver(FileLoader::new()).unwrap();
//! let resolution = resolver.resolve("Acme.Http.Client").unwrap();
//! println!("{:?}", resolution);
//! ```
//!
//! ## Architecture
//!
//! - **[`autoload`]** - registry, resolver, path mapping, loaders, chain
//! - **[`manifest`]** - manifest grammar and registry bootstrap
//! - **[`error`]** - error types

pub mod autoload;
pub mod error;
pub mod manifest;

pub use error::{Error, LoadError, ManifestError, RegistryError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
