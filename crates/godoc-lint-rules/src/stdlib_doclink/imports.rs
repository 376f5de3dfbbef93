//! Package-wide import alias table.

use godoc_lint_core::ast::ImportSpec;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use super::catalog::Catalog;

/// Result of resolving a local name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding<'a> {
    /// No import uses the name.
    Unbound,
    /// The name is bound to several paths.
    Ambiguous,
    /// The import path the name is bound to.
    Path(&'a str),
}

/// Maps local import names to import paths.
///
/// A name bound to different paths in different files of the package is
/// ambiguous and never resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    aliases: HashMap<String, String>,
    ambiguous: HashSet<String>,
}

impl ImportTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from import specs.
    ///
    /// Unaliased imports are named after the catalog's package name, or the
    /// last path segment for packages outside the catalog. Blank and dot
    /// imports bind no name.
    #[must_use]
    pub fn from_specs<'a>(
        specs: impl IntoIterator<Item = &'a ImportSpec>,
        catalog: &Catalog,
    ) -> Self {
        let mut table = Self::new();
        for spec in specs {
            let name = match &spec.name {
                Some(ident) if ident.name == "_" || ident.name == "." => continue,
                Some(ident) => ident.name.clone(),
                None => catalog.package(&spec.path).map_or_else(
                    || spec.path.rsplit('/').next().unwrap_or_default().to_string(),
                    |p| p.name.clone(),
                ),
            };
            table.bind(name, &spec.path);
        }
        table
    }

    /// Binds `name` to `path`, marking the name ambiguous on a conflict.
    pub fn bind(&mut self, name: impl Into<String>, path: &str) {
        let name = name.into();
        match self.aliases.get(&name) {
            Some(existing) if existing != path => {
                debug!("Import name {} is bound to both {} and {}", name, existing, path);
                self.ambiguous.insert(name);
            }
            Some(_) => {}
            None => {
                self.aliases.insert(name, path.to_string());
            }
        }
    }

    /// Resolves a local name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Binding<'_> {
        if self.ambiguous.contains(name) {
            return Binding::Ambiguous;
        }
        self.aliases
            .get(name)
            .map_or(Binding::Unbound, |path| Binding::Path(path))
    }

    /// Returns true if `name` is bound to more than one path.
    #[must_use]
    pub fn is_ambiguous(&self, name: &str) -> bool {
        self.ambiguous.contains(name)
    }
}
