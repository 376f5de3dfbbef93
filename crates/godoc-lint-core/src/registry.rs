//! Explicit registry of rule units.

use crate::rule::{Rule, RuleBox};
use crate::ruleset::RuleSet;

/// Owns the rule units of one analyzer.
///
/// Rule names and covered identifiers are unique across the registry.
#[derive(Default)]
pub struct Registry {
    rules: Vec<RuleBox>,
    covered: RuleSet,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("rules", &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>())
            .field("covered", &self.covered)
            .finish()
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule unit.
    ///
    /// # Panics
    ///
    /// Panics if a unit with the same name is registered, or if the unit
    /// covers an identifier another unit already covers.
    pub fn add(&mut self, rule: RuleBox) {
        assert!(
            !self.rules.iter().any(|r| r.name() == rule.name()),
            "rule {:?} is already registered",
            rule.name()
        );
        let covered = rule.covered_rules();
        let overlap = self.covered.intersection(&covered);
        assert!(
            overlap.is_empty(),
            "rule {:?} covers already registered rule(s) {:?}",
            rule.name(),
            overlap.list()
        );
        self.covered = std::mem::take(&mut self.covered).merge(&covered);
        self.rules.push(rule);
    }

    /// Adds a rule unit, builder style.
    #[must_use]
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.add(Box::new(rule));
        self
    }

    /// Returns every identifier covered by registered units.
    #[must_use]
    pub fn covered(&self) -> &RuleSet {
        &self.covered
    }

    /// Iterates over registered units in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(AsRef::as_ref)
    }

    /// Looks up a unit by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.iter().find(|r| r.name() == name)
    }

    /// Returns the number of registered units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no unit is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
