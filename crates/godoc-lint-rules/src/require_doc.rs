//! Rule to require docs on symbols.
//!
//! # Detected Patterns
//!
//! - Functions and methods without a doc comment
//! - Types, constants and variables without an own doc, a trailing comment,
//!   or a doc on their enclosing group
//!
//! Whether exported and unexported symbols are checked is controlled by the
//! `require-doc/ignore-exported` and `require-doc/ignore-unexported` options.

use godoc_lint_core::ast::is_exported;
use godoc_lint_core::inspect::{DeclKind, Declaration, DocBlock, FileInspection};
use godoc_lint_core::{
    is_doc_disabled, AnalysisContext, Location, Rule, RuleError, RuleSet, Severity, Violation,
};

/// Rule code for require-doc.
pub const CODE: &str = "GL005";

/// Rule name for require-doc.
pub const NAME: &str = "require-doc";

/// Requires a doc on every checked symbol.
#[derive(Debug, Clone)]
pub struct RequireDoc {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for RequireDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireDoc {
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

/// Returns true if the declaration is documented.
///
/// Functions and methods only count their own doc. Other symbols fall back
/// to the trailing comment, then to the group doc.
fn is_documented(inspection: &FileInspection, decl: &Declaration) -> bool {
    let has_text = |doc: Option<&DocBlock>| doc.is_some_and(|d| !d.is_empty());

    if has_text(decl.doc.as_ref()) {
        return true;
    }
    if matches!(decl.kind, DeclKind::Func | DeclKind::Method) {
        return false;
    }
    has_text(decl.trailing_doc.as_ref()) || has_text(inspection.parent_doc(decl))
}

impl Rule for RequireDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Requires docs on symbols"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn covered_rules(&self) -> RuleSet {
        RuleSet::new().add([NAME])
    }

    fn apply(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let opts = ctx.options();
        let require_exported = !opts.require_doc_ignore_exported;
        let require_unexported = !opts.require_doc_ignore_unexported;
        if !require_exported && !require_unexported {
            return Ok(Vec::new());
        }

        let rules = self.covered_rules();
        let mut violations = Vec::new();

        for file in ctx.applicable_files(opts.require_doc_include_tests, &rules) {
            let inspection = &file.inspection;
            for decl in &inspection.declarations {
                if decl.kind == DeclKind::Bad {
                    continue;
                }
                let exported = is_exported(&decl.name);
                if (exported && !require_exported) || (!exported && !require_unexported) {
                    continue;
                }
                if decl.is_disabled(NAME) || is_doc_disabled(decl.doc.as_ref(), NAME) {
                    continue;
                }
                if is_documented(inspection, decl) {
                    continue;
                }
                violations.push(Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    Location::from_pos(file.path().to_path_buf(), decl.pos, decl.name.len()),
                    format!("symbol should have a godoc ({:?})", decl.name),
                ));
            }
        }
        Ok(violations)
    }
}
