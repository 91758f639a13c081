//! Autoload chain: the host's hook for unresolved symbols.
//!
//! The chain keeps the host-side "already loaded" bookkeeping and a list of
//! handlers. When a symbol is first required:
//!
//! ```text
//! require("Acme.Http.Client")
//!      ↓
//! 1. Already defined?        → return the recorded unit, no handler runs
//! 2. Ask handlers in order   → first `Loaded` wins
//! 3. Record the symbol       → later requires hit step 1
//! 4. Nobody loaded it        → Error::UnresolvedSymbol
//! ```
//!
//! A handler's load error stops the chain and is returned as-is.

use std::collections::HashMap;

use super::types::{Resolution, UnitHandle};
use crate::error::{Error, LoadError, Result};

/// A handler the host can invoke for an unresolved symbol.
pub trait Autoloader {
    /// Try to make `symbol` available. `NotFound` defers to the next handler.
    fn autoload(&mut self, symbol: &str) -> std::result::Result<Resolution, LoadError>;

    /// Name used to unregister the handler and in logs.
    fn name(&self) -> &str;
}

/// Ordered autoload handlers plus the table of symbols already defined.
pub struct AutoloadChain {
    /// Registered handlers, queried in order.
    handlers: Vec<Box<dyn Autoloader>>,
    /// Defined symbols and the unit that defined them.
    defined: HashMap<String, UnitHandle>,
}

impl AutoloadChain {
    pub fn new() -> Self {
        AutoloadChain {
            handlers: Vec::new(),
            defined: HashMap::new(),
        }
    }

    /// Register a handler after those already present.
    pub fn register(&mut self, handler: Box<dyn Autoloader>) {
        self.handlers.push(handler);
    }

    /// Register a handler ahead of those already present.
    pub fn register_first(&mut self, handler: Box<dyn Autoloader>) {
        self.handlers.insert(0, handler);
    }

    /// Remove the first handler called `name`. Returns whether one was removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        match self.handlers.iter().position(|h| h.name() == name) {
            Some(idx) => {
                self.handlers.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Record `symbol` as defined by `unit` without invoking any handler.
    pub fn define(&mut self, symbol: impl Into<String>, unit: UnitHandle) {
        self.defined.insert(symbol.into(), unit);
    }

    pub fn is_defined(&self, symbol: &str) -> bool {
        self.defined.contains_key(symbol)
    }

    /// Unit that defined `symbol`, if any.
    pub fn unit_for(&self, symbol: &str) -> Option<&UnitHandle> {
        self.defined.get(symbol)
    }

    /// Make `symbol` available, invoking handlers only if it is not defined yet.
    pub fn require(&mut self, symbol: &str) -> Result<UnitHandle> {
        if let Some(unit) = self.defined.get(symbol) {
            return Ok(unit.clone());
        }

        for handler in self.handlers.iter_mut() {
            match handler.autoload(symbol)? {
                Resolution::Loaded(unit) => {
                    log::debug!("'{}' loaded by {} handler", symbol, handler.name());
                    self.defined.insert(symbol.to_string(), unit.clone());
                    return Ok(unit);
                }
                Resolution::NotFound => continue,
            }
        }

        Err(Error::UnresolvedSymbol(symbol.to_string()))
    }

    /// Get a reference to the handlers (for inspection/testing).
    pub fn handlers(&self) -> &[Box<dyn Autoloader>] {
        &self.handlers
    }
}

impl Default for AutoloadChain {
    fn default() -> Self {
        Self::new()
    }
}
