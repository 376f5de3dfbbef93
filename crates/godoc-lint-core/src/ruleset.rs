//! Sets of rule identifiers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An ordered set of rule identifiers (e.g. `"max-len"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet(BTreeSet<String>);

impl RuleSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this set with the given rules added.
    #[must_use]
    pub fn add<I, S>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.extend(rules.into_iter().map(Into::into));
        self
    }

    /// Inserts a single rule.
    pub fn insert(&mut self, rule: impl Into<String>) {
        self.0.insert(rule.into());
    }

    /// Returns true if the rule is in the set.
    #[must_use]
    pub fn has(&self, rule: &str) -> bool {
        self.0.contains(rule)
    }

    /// Returns the union of both sets.
    #[must_use]
    pub fn merge(mut self, other: &Self) -> Self {
        self.0.extend(other.0.iter().cloned());
        self
    }

    /// Returns the rules in ascending order.
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Iterates over the rules in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if every rule of `other` is in this set.
    ///
    /// Any set, including the empty one, is a superset of the empty set.
    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.0.is_superset(&other.0)
    }

    /// Returns true if both sets share at least one rule.
    #[must_use]
    pub fn has_commons_with(&self, other: &Self) -> bool {
        !self.0.is_disjoint(&other.0)
    }

    /// Returns the rules present in both sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).cloned().collect())
    }
}

impl<S: Into<String>> FromIterator<S> for RuleSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new().add(iter)
    }
}
