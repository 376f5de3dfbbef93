//! Rule to check the format of deprecation notes.
//!
//! # Rationale
//!
//! Go tooling only recognizes a paragraph starting with exactly
//! `Deprecated: ` as a deprecation note. Variants like `DEPRECATED:` or
//! `Deprecated:foo` are silently ignored by editors and doc sites.
//!
//! # Detected Patterns
//!
//! ```text
//! // Foo does X.
//! //
//! // deprecated: use Bar.         <- should be "Deprecated: "
//! func Foo()
//! ```

use godoc_lint_core::inspect::DocBlock;
use godoc_lint_core::{
    is_doc_disabled, AnalysisContext, Rule, RuleError, RuleSet, Severity, Violation,
};
use std::collections::HashSet;

use crate::shared::doc_location;

/// Rule code for deprecated.
pub const CODE: &str = "GL006";

/// Rule name for deprecated.
pub const NAME: &str = "deprecated";

/// The only marker Go tooling recognizes.
const NOTE_MARKER: &str = "Deprecated: ";

/// Checks that deprecation notes use the recognized marker.
#[derive(Debug, Clone)]
pub struct Deprecated {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for Deprecated {
    fn default() -> Self {
        Self::new()
    }
}

impl Deprecated {
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

/// Returns true if a paragraph looks like a deprecation note but does not
/// use the exact marker.
fn has_malformed_note(doc: &DocBlock) -> bool {
    doc.parsed.paragraph_leads().any(|lead| {
        lead.to_lowercase().starts_with("deprecated:") && !lead.starts_with(NOTE_MARKER)
    })
}

impl Rule for Deprecated {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks the format of deprecation notes"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn covered_rules(&self) -> RuleSet {
        RuleSet::new().add([NAME])
    }

    fn apply(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let rules = self.covered_rules();
        let mut violations = Vec::new();

        for file in ctx.applicable_files(ctx.options().deprecated_include_tests, &rules) {
            let inspection = &file.inspection;
            let mut seen_parents = HashSet::new();

            for decl in &inspection.declarations {
                if !decl.is_exported() || decl.is_disabled(NAME) {
                    continue;
                }

                let parent = decl
                    .parent_doc
                    .filter(|ix| seen_parents.insert(*ix))
                    .and_then(|ix| inspection.parent_docs.get(ix));

                for doc in [parent, decl.doc.as_ref()].into_iter().flatten() {
                    if is_doc_disabled(Some(doc), NAME) || !has_malformed_note(doc) {
                        continue;
                    }
                    violations.push(Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        doc_location(file, doc),
                        "deprecation note should be formatted as \"Deprecated: \"",
                    ));
                }
            }
        }
        Ok(violations)
    }
}
