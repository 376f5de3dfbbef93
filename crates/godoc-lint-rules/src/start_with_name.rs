//! Rule requiring symbol docs to start with the symbol name.
//!
//! # Rationale
//!
//! Go doc tooling and readers expect `// Foo does X.` above `func Foo`. The
//! first sentence becomes the symbol synopsis.
//!
//! # Detected Patterns
//!
//! ```text
//! // Returns a new server.        <- should start with "NewServer"
//! func NewServer() *Server
//! ```
//!
//! # Good Patterns
//!
//! ```text
//! // NewServer returns a new server.
//! func NewServer() *Server
//!
//! // A Server handles requests.   <- article allowed by the default pattern
//! type Server struct{}
//! ```
//!
//! Docs containing a paragraph that starts with `Deprecated:` are skipped
//! entirely, and so are declarations of several names at once.

use godoc_lint_core::inspect::DeclKind;
use godoc_lint_core::{AnalysisContext, Rule, RuleError, RuleSet, Severity, Violation};
use regex::Regex;

use crate::shared::{doc_location, has_deprecated_paragraph};

/// Rule code for start-with-name.
pub const CODE: &str = "GL004";

/// Rule name for start-with-name.
pub const NAME: &str = "start-with-name";

const SYMBOL_NAME_GROUP: &str = "symbol_name";

/// Checks that symbol docs start with the symbol name.
#[derive(Debug, Clone)]
pub struct StartWithName {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for StartWithName {
    fn default() -> Self {
        Self::new()
    }
}

impl StartWithName {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// Extracts the symbol name a doc claims to describe.
#[derive(Debug, Clone)]
pub struct StartMatcher {
    re: Regex,
}

impl StartMatcher {
    /// Compiles a start pattern.
    ///
    /// Every `%` is replaced with the symbol name group. A pattern without
    /// `%` gets the group appended, separated by a space unless the pattern
    /// is empty or already ends with one. The result is anchored at the
    /// start of the text.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::InvalidPattern`] if the result does not compile,
    /// and [`RuleError::MissingGroup`] if it lost the symbol name group.
    pub fn new(pattern: &str) -> Result<Self, RuleError> {
        let group = format!(r"(?P<{SYMBOL_NAME_GROUP}>.+?)\b");
        let mut replaced = if pattern.contains('%') {
            pattern.replace('%', &group)
        } else if pattern.is_empty() || pattern.ends_with(' ') {
            format!("{pattern}{group}")
        } else {
            format!("{pattern} {group}")
        };
        if !replaced.starts_with('^') {
            replaced.insert(0, '^');
        }

        let re = Regex::new(&replaced).map_err(|source| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if !re.capture_names().any(|n| n == Some(SYMBOL_NAME_GROUP)) {
            return Err(RuleError::MissingGroup {
                pattern: replaced,
                group: SYMBOL_NAME_GROUP,
            });
        }
        Ok(Self { re })
    }

    /// Returns the claimed symbol name, or `None` if the text does not match.
    #[must_use]
    pub fn claimed_name<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.re
            .captures(text)
            .and_then(|c| c.name(SYMBOL_NAME_GROUP))
            .map(|m| m.as_str())
    }
}

impl Rule for StartWithName {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires symbol docs to start with the symbol name"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn covered_rules(&self) -> RuleSet {
        RuleSet::new().add([NAME])
    }

    fn apply(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let opts = ctx.options();
        let matcher = StartMatcher::new(&opts.start_with_name_pattern)?;
        let rules = self.covered_rules();
        let mut violations = Vec::new();

        for file in ctx.applicable_files(opts.start_with_name_include_tests, &rules) {
            for decl in &file.inspection.declarations {
                if decl.kind == DeclKind::Bad || decl.multi_name {
                    continue;
                }
                if !decl.is_exported() && !opts.start_with_name_include_unexported {
                    continue;
                }
                let Some(doc) = decl.doc.as_ref().filter(|d| !d.is_empty()) else {
                    continue;
                };
                if decl.is_disabled(NAME) || doc.disabled.is_disabled(NAME) {
                    continue;
                }
                if has_deprecated_paragraph(doc) {
                    continue;
                }
                if matcher.claimed_name(&doc.text) == Some(decl.name.as_str()) {
                    continue;
                }
                violations.push(Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    doc_location(file, doc),
                    format!("godoc should start with symbol name ({:?})", decl.name),
                ));
            }
        }
        Ok(violations)
    }
}
