//! Catalog of standard library symbols.
//!
//! The embedded table covers the commonly referenced packages, not the whole
//! standard library. Callers with a complete table, or with packages of their
//! own, load it with [`Catalog::from_json`] and either use it as is or
//! [`extend`](Catalog::extend) the embedded one.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static STDLIB_JSON: &str = include_str!("stdlib.json");

/// Kind of an exported standard library symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// Type declaration.
    Type,
    /// Method of an exported type.
    Method,
    /// Package-level function.
    Func,
    /// Constant.
    Const,
    /// Variable.
    Var,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Type => "type",
            Self::Method => "method",
            Self::Func => "function",
            Self::Const => "constant",
            Self::Var => "variable",
        };
        f.write_str(s)
    }
}

/// One standard library package.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StdlibPackage {
    /// Package name, e.g. `json` for `encoding/json`.
    pub name: String,
    /// Symbol key (`Name` or `Type.Method`) to kind.
    pub symbols: HashMap<String, SymbolKind>,
}

/// Import path to package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    packages: HashMap<String, StdlibPackage>,
}

impl Catalog {
    /// Parses a catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `json` is not a valid catalog.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The embedded catalog, parsed on first use and shared afterwards.
    ///
    /// # Panics
    ///
    /// Panics if the embedded data is malformed.
    #[must_use]
    pub fn stdlib() -> Arc<Self> {
        static CATALOG: OnceLock<Arc<Catalog>> = OnceLock::new();
        CATALOG
            .get_or_init(|| match Self::from_json(STDLIB_JSON) {
                Ok(catalog) => Arc::new(catalog),
                Err(e) => panic!("embedded stdlib catalog is malformed: {e}"),
            })
            .clone()
    }

    /// Adds the packages of `other`. Symbols of a package already present
    /// are merged into it, and `other` wins on conflicting kinds or names.
    pub fn extend(&mut self, other: Catalog) {
        for (path, package) in other.packages {
            match self.packages.get_mut(&path) {
                Some(existing) => {
                    existing.name = package.name;
                    existing.symbols.extend(package.symbols);
                }
                None => {
                    self.packages.insert(path, package);
                }
            }
        }
    }

    /// Looks up a package by import path.
    #[must_use]
    pub fn package(&self, path: &str) -> Option<&StdlibPackage> {
        self.packages.get(path)
    }

    /// Looks up the kind of `key` in the package at `path`.
    #[must_use]
    pub fn symbol(&self, path: &str, key: &str) -> Option<SymbolKind> {
        self.package(path).and_then(|p| p.symbols.get(key)).copied()
    }

    /// Number of packages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns true if the catalog has no packages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
