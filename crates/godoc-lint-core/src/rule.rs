//! Rule trait for defining documentation checks.

use crate::context::AnalysisContext;
use crate::ruleset::RuleSet;
use crate::types::{Severity, Violation};
use thiserror::Error;

/// Errors a rule can raise while being applied.
///
/// These abort only the failing rule; the analyzer wraps them with the
/// rule name.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A configured pattern does not compile.
    #[error("invalid start pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern as configured.
        pattern: String,
        /// Compilation error.
        source: regex::Error,
    },

    /// A configured pattern lacks a required named group.
    #[error("cannot find named group {group:?} in pattern {pattern:?}")]
    MissingGroup {
        /// The compiled pattern.
        pattern: String,
        /// Name of the missing group.
        group: &'static str,
    },

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

/// A documentation rule applied to one package at a time.
///
/// A rule unit may cover several rule identifiers (for instance the package
/// doc checks), each of which can be enabled or disabled on its own.
///
/// # Example
///
/// ```ignore
/// use godoc_lint_core::{AnalysisContext, Rule, RuleError, RuleSet, Violation};
///
/// pub struct NoTodo;
///
/// impl Rule for NoTodo {
///     fn name(&self) -> &'static str { "no-todo" }
///     fn code(&self) -> &'static str { "GL100" }
///     fn covered_rules(&self) -> RuleSet { RuleSet::new().add(["no-todo"]) }
///
///     fn apply(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Violation>, RuleError> {
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule unit (e.g., "max-len").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "GL007").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Returns every rule identifier this unit reports under.
    fn covered_rules(&self) -> RuleSet;

    /// Checks one package and returns any violations found.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot run, e.g. on an invalid pattern
    /// option.
    fn apply(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Violation>, RuleError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
