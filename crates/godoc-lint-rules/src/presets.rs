//! Rule sets shipped with the crate.

use crate::stdlib_doclink::Catalog;
use crate::{
    Deprecated, MaxLen, NoUnusedLink, PkgDoc, RequireDoc, RequireStdlibDoclink, StartWithName,
};
use godoc_lint_core::{Registry, RuleBox};
use std::sync::Arc;

/// Returns every built-in rule unit with default settings.
///
/// Includes:
/// - `pkg-doc` (GL001-GL003) - package doc prefix, uniqueness and presence
/// - `start-with-name` (GL004)
/// - `require-doc` (GL005)
/// - `deprecated` (GL006)
/// - `max-len` (GL007)
/// - `no-unused-link` (GL008)
/// - `require-stdlib-doclink` (GL009)
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    all_rules_with_catalog(Catalog::stdlib())
}

/// Like [`all_rules`], with `require-stdlib-doclink` looking symbols up in
/// `catalog` instead of the embedded one.
#[must_use]
pub fn all_rules_with_catalog(catalog: Arc<Catalog>) -> Vec<RuleBox> {
    vec![
        Box::new(PkgDoc::new()),
        Box::new(StartWithName::new()),
        Box::new(RequireDoc::new()),
        Box::new(Deprecated::new()),
        Box::new(MaxLen::new()),
        Box::new(NoUnusedLink::new()),
        Box::new(RequireStdlibDoclink::new().catalog(catalog)),
    ]
}

/// Returns a registry holding [`all_rules`].
///
/// Which of them actually run is decided per directory by the resolved
/// configuration.
#[must_use]
pub fn default_registry() -> Registry {
    registry_with_catalog(Catalog::stdlib())
}

/// Returns a registry holding [`all_rules_with_catalog`].
#[must_use]
pub fn registry_with_catalog(catalog: Arc<Catalog>) -> Registry {
    let mut registry = Registry::new();
    for rule in all_rules_with_catalog(catalog) {
        registry.add(rule);
    }
    registry
}
