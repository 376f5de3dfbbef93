//! Parsing of `//godoclint:disable` directives.
//!
//! A bare `//godoclint:disable` disables every rule for its scope; with a
//! space-separated argument list only the named rules are disabled:
//!
//! ```text
//! //godoclint:disable
//! //godoclint:disable max-len require-doc
//! ```

use crate::ruleset::RuleSet;
use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static DISABLE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)//godoclint:disable(?: *(.+))?$").expect("valid directive pattern")
});

/// Rules disabled for one scope (file, orphan block, declaration or doc block).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledRules {
    /// Whether every rule is disabled.
    pub all: bool,
    /// Individually disabled rules.
    pub rules: RuleSet,
}

impl DisabledRules {
    /// Returns true if nothing is disabled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.all && self.rules.is_empty()
    }

    /// Returns true if `rule` is disabled in this scope.
    #[must_use]
    pub fn is_disabled(&self, rule: &str) -> bool {
        self.all || self.rules.has(rule)
    }

    /// Returns true if every rule of `set` is disabled in this scope.
    #[must_use]
    pub fn covers(&self, set: &RuleSet) -> bool {
        self.all || self.rules.is_superset_of(set)
    }

    /// Folds another scope's directives into this one.
    pub fn absorb(&mut self, other: &Self) {
        self.all |= other.all;
        self.rules = std::mem::take(&mut self.rules).merge(&other.rules);
    }
}

/// Extracts disable directives from raw comment text.
///
/// The input is raw source text, comment markers included. Every directive
/// found is folded into the result.
#[must_use]
pub fn parse_directives(text: &str) -> DisabledRules {
    let mut result = DisabledRules::default();
    for caps in DISABLE_DIRECTIVE.captures_iter(text) {
        let names: Vec<&str> = caps
            .get(1)
            .map(|m| m.as_str().split_whitespace().collect())
            .unwrap_or_default();
        if names.is_empty() {
            result.all = true;
            continue;
        }
        for name in names {
            result.rules.insert(name);
        }
    }
    result
}
