//! Rule to detect link definitions that are never referenced.
//!
//! # Detected Patterns
//!
//! ```text
//! // Foo talks to the server.
//! //
//! // [RFC 7230]: https://www.rfc-editor.org/rfc/rfc7230   <- no "[RFC 7230]" above
//! func Foo()
//! ```
//!
//! References inside code blocks do not count.

use godoc_lint_core::inspect::DocBlock;
use godoc_lint_core::{AnalysisContext, Rule, RuleError, RuleSet, Severity, Violation};

use crate::shared::{doc_location, scoped_docs};

/// Rule code for no-unused-link.
pub const CODE: &str = "GL008";

/// Rule name for no-unused-link.
pub const NAME: &str = "no-unused-link";

/// Flags link definitions with no matching `[text]` reference.
#[derive(Debug, Clone)]
pub struct NoUnusedLink {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for NoUnusedLink {
    fn default() -> Self {
        Self::new()
    }
}

impl NoUnusedLink {
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

/// Returns the text of every link definition not referenced in the prose.
fn unused_links(doc: &DocBlock) -> Vec<&str> {
    let prose: Vec<String> = doc.parsed.prose().map(|b| b.text()).collect();
    doc.parsed
        .links
        .iter()
        .map(|link| link.text.as_str())
        .filter(|text| {
            let reference = format!("[{text}]");
            !prose.iter().any(|p| p.contains(&reference))
        })
        .collect()
}

impl Rule for NoUnusedLink {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Detects unused link definitions in docs"
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

        for file in ctx.applicable_files(ctx.options().no_unused_link_include_tests, &rules) {
            for doc in scoped_docs(file, NAME) {
                for text in unused_links(doc) {
                    violations.push(Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        doc_location(file, doc),
                        format!("godoc has unused link ({text:?})"),
                    ));
                }
            }
        }
        Ok(violations)
    }
}
