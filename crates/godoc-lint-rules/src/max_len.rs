//! Rule to limit the line length of docs.
//!
//! Each doc block is rendered back to plain text without its code blocks
//! and link definitions. The block is reported once, with the first line
//! longer than `max-len/length` characters. Lines matching any of
//! `max-len/ignore-patterns` are not measured.

use godoc_lint_core::doc::render_plain;
use godoc_lint_core::inspect::DocBlock;
use godoc_lint_core::{AnalysisContext, Rule, RuleError, RuleSet, Severity, Violation};
use regex::Regex;

use crate::shared::{doc_location, scoped_docs};

/// Rule code for max-len.
pub const CODE: &str = "GL007";

/// Rule name for max-len.
pub const NAME: &str = "max-len";

/// Limits the rendered line length of docs.
#[derive(Debug, Clone)]
pub struct MaxLen {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for MaxLen {
    fn default() -> Self {
        Self::new()
    }
}

impl MaxLen {
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

/// Returns the length of the first rendered line exceeding `limit`.
fn first_long_line(doc: &DocBlock, limit: usize, ignore: &[Regex]) -> Option<usize> {
    let text = render_plain(doc.parsed.prose()).replace('\r', "");
    text.split('\n')
        .filter(|line| !ignore.iter().any(|re| re.is_match(line)))
        .map(|line| line.chars().count())
        .find(|&len| len > limit)
}

impl Rule for MaxLen {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the line length of docs"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn covered_rules(&self) -> RuleSet {
        RuleSet::new().add([NAME])
    }

    fn apply(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let opts = ctx.options();
        let limit = opts.max_len_length;
        let ignore = ctx.config.max_len_ignore_patterns();
        let rules = self.covered_rules();
        let mut violations = Vec::new();

        for file in ctx.applicable_files(opts.max_len_include_tests, &rules) {
            for doc in scoped_docs(file, NAME) {
                if let Some(len) = first_long_line(doc, limit, ignore) {
                    violations.push(Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        doc_location(file, doc),
                        format!("godoc line is too long ({len} > {limit})"),
                    ));
                }
            }
        }
        Ok(violations)
    }
}
