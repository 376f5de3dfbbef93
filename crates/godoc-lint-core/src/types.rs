//! Findings, their positions and the aggregated outcome of a run.

use crate::ast::Pos;
use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::path::PathBuf;

/// How serious a finding is. Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported but never fails a check.
    Info,
    /// The default for every built-in rule.
    Warning,
    /// Fails a check at any threshold.
    Error,
}

impl Severity {
    /// Lowercase name, as used in reports and config files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a finding points to.
///
/// `line` and `column` are 1-based. `offset` and `length` describe a byte
/// span used when rendering through miette; both are zero when unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// File path as handed over by the harness.
    pub file: PathBuf,
    /// Line of the reported position.
    pub line: usize,
    /// Column of the reported position.
    pub column: usize,
    /// Byte offset of the span.
    pub offset: usize,
    /// Byte length of the span.
    pub length: usize,
}

impl Location {
    /// A position without a byte span.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self::from_pos(file, Pos::new(0, line, column), 0)
    }

    /// A span of `length` bytes starting at `pos`.
    #[must_use]
    pub fn from_pos(file: PathBuf, pos: Pos, length: usize) -> Self {
        Self {
            file,
            line: pos.line,
            column: pos.column,
            offset: pos.offset,
            length,
        }
    }

    fn cmp_position(&self, other: &Self) -> Ordering {
        (&self.file, self.line, self.column).cmp(&(&other.file, other.line, other.column))
    }
}

/// A hint attached to a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Text shown after `= help:`.
    pub message: String,
}

impl Suggestion {
    /// Wraps a hint text.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One documentation problem reported by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Stable code such as `GL007`.
    pub code: String,
    /// Rule name such as `max-len`.
    pub rule: String,
    /// Severity configured for the rule.
    pub severity: Severity,
    /// Reported position.
    pub location: Location,
    /// Diagnostic text.
    pub message: String,
    /// Optional hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<Suggestion>,
}

impl Violation {
    /// Builds a finding without a hint.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attaches a hint.
    #[must_use]
    pub fn with_suggestion(self, suggestion: Suggestion) -> Self {
        Self {
            suggestion: Some(suggestion),
            ..self
        }
    }

    /// Multi-line rendering used by [`LintResult::format_report`]:
    ///
    /// ```text
    /// GL005 require-doc at foo/foo.go:42:6
    ///   warning: symbol should have a godoc ("Foo")
    ///   = help: add a doc
    /// ```
    #[must_use]
    pub fn format(&self) -> String {
        let Location {
            file, line, column, ..
        } = &self.location;
        let (code, rule) = (&self.code, &self.rule);
        let mut out = format!("{code} {rule} at {}:{line}:{column}\n", file.display());
        out.push_str(&format!("  {}: {}\n", self.severity, self.message));
        if let Some(hint) = &self.suggestion {
            out.push_str(&format!("  = help: {}\n", hint.message));
        }
        out
    }
}

/// Single-line `file:line:col: severity [code] message` form.
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc = &self.location;
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            loc.file.display(),
            loc.line,
            loc.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// A [`Violation`] shaped for miette's graphical handler. Pair it with the
/// file contents as source code to get a labelled snippet.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{headline}")]
pub struct ViolationDiagnostic {
    headline: String,
    #[help]
    help: Option<String>,
    #[label("{rule}")]
    span: SourceSpan,
    rule: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(violation: &Violation) -> Self {
        let Location { offset, length, .. } = violation.location;
        Self {
            headline: format!("[{}] {}", violation.code, violation.message),
            help: violation.suggestion.as_ref().map(|hint| hint.message.clone()),
            span: (offset, length).into(),
            rule: violation.rule.clone(),
        }
    }
}

/// A rule that failed to run while the analyzer kept going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    /// Name of the failing rule unit.
    pub rule: String,
    /// Error message.
    pub message: String,
}

/// Everything one analyzer run produced.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Findings, sorted once the run completes.
    pub violations: Vec<Violation>,
    /// Files left after include/exclude filtering.
    pub files_checked: usize,
    /// Rule failures collected when the analyzer does not fail fast.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<RuleFailure>,
}

impl LintResult {
    /// An empty outcome.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn at_least(&self, threshold: Severity) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.severity >= threshold)
    }

    /// Whether any finding has [`Severity::Error`].
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.has_violations_at(Severity::Error)
    }

    /// Whether any finding is at or above `severity`.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.at_least(severity).next().is_some()
    }

    /// Findings reported by one rule.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule == rule).collect()
    }

    /// `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        self.violations
            .iter()
            .fold((0, 0, 0), |(e, w, i), v| match v.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }

    /// Plain-text report listing the findings at or above `fail_on` and any
    /// rule failures. The closing totals line counts every finding.
    #[must_use]
    pub fn format_report(&self, fail_on: Severity) -> String {
        let listed: Vec<&Violation> = self.at_least(fail_on).collect();
        let mut report = format!("=== godoc-lint: {} violation(s) ===\n\n", listed.len());

        for violation in listed {
            report.push_str(&violation.format());
            report.push('\n');
        }
        for failure in &self.failures {
            let _ = writeln!(report, "rule {} failed: {}\n", failure.rule, failure.message);
        }

        let (errors, warnings, infos) = self.count_by_severity();
        let _ = writeln!(
            report,
            "Total: {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)",
            self.files_checked
        );
        report
    }

    /// Merges another run's outcome into this one.
    pub fn extend(&mut self, other: Self) {
        let Self {
            violations,
            files_checked,
            failures,
        } = other;
        self.violations.extend(violations);
        self.failures.extend(failures);
        self.files_checked += files_checked;
    }

    /// Orders findings by file, line, column, then code. Stable.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .cmp_position(&b.location)
                .then_with(|| a.code.cmp(&b.code))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo_undocumented(severity: Severity) -> Violation {
        Violation::new(
            "GL005",
            "require-doc",
            severity,
            Location::new(PathBuf::from("foo/foo.go"), 42, 6),
            "symbol should have a godoc (\"Foo\")",
        )
    }

    #[test]
    fn display_is_single_line() {
        assert_eq!(
            foo_undocumented(Severity::Warning).to_string(),
            "foo/foo.go:42:6: warning [GL005] symbol should have a godoc (\"Foo\")"
        );
    }

    #[test]
    fn help_line_only_with_suggestion() {
        let hint = Suggestion::new("Use [fmt.Println]");
        let hinted = foo_undocumented(Severity::Warning).with_suggestion(hint);
        assert!(hinted.format().contains("= help: Use [fmt.Println]"));
        assert!(!foo_undocumented(Severity::Warning).format().contains("help:"));
    }

    #[test]
    fn violation_format_layout() {
        let v = foo_undocumented(Severity::Error).with_suggestion(Suggestion::new("add a doc"));
        insta::assert_snapshot!(v.format(), @r#"
GL005 require-doc at foo/foo.go:42:6
  error: symbol should have a godoc ("Foo")
  = help: add a doc
"#);
    }

    #[test]
    fn location_from_pos() {
        let loc = Location::from_pos(PathBuf::from("a.go"), Pos::new(120, 7, 3), 5);
        assert_eq!((loc.line, loc.column, loc.offset, loc.length), (7, 3, 120, 5));
        assert_eq!(Location::new("a.go".into(), 7, 3).length, 0);
    }

    #[test]
    fn miette_diagnostic_carries_code_and_help() {
        let v = foo_undocumented(Severity::Error).with_suggestion(Suggestion::new("add a doc"));
        let d = ViolationDiagnostic::from(&v);
        assert_eq!(d.to_string(), "[GL005] symbol should have a godoc (\"Foo\")");
        assert_eq!(d.help.as_deref(), Some("add a doc"));
    }

    #[test]
    fn threshold_checks() {
        let mut result = LintResult::new();
        result.violations.push(foo_undocumented(Severity::Warning));
        assert!(result.has_violations_at(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
        assert!(!result.has_errors());
    }

    #[test]
    fn report_lists_only_failing_but_totals_all() {
        let mut result = LintResult::new();
        result.files_checked = 5;
        result.violations.push(foo_undocumented(Severity::Warning));
        result.violations.push(foo_undocumented(Severity::Error));

        let report = result.format_report(Severity::Error);
        assert!(report.starts_with("=== godoc-lint: 1 violation(s) ===\n\n"));
        assert!(report.ends_with("Total: 1 error(s), 1 warning(s), 0 info(s) in 5 file(s)\n"));
        assert_eq!(report.matches("require-doc at").count(), 1);
    }

    #[test]
    fn report_mentions_rule_failures() {
        let mut result = LintResult::new();
        result.failures.push(RuleFailure {
            rule: "start-with-name".into(),
            message: "invalid start pattern".into(),
        });
        assert!(result
            .format_report(Severity::Info)
            .contains("rule start-with-name failed: invalid start pattern"));
    }

    #[test]
    fn sort_orders_by_position_then_code() {
        let mut result = LintResult::new();
        let at = |file: &str, line, code: &str| {
            Violation::new(code, "r", Severity::Warning, Location::new(file.into(), line, 1), "m")
        };
        result.violations = vec![
            at("b.go", 1, "GL001"),
            at("a.go", 9, "GL007"),
            at("a.go", 9, "GL004"),
        ];
        result.sort();
        let order: Vec<_> = result
            .violations
            .iter()
            .map(|v| format!("{}:{}:{}", v.location.file.display(), v.location.line, v.code))
            .collect();
        assert_eq!(order, vec!["a.go:9:GL004", "a.go:9:GL007", "b.go:1:GL001"]);
    }

    #[test]
    fn extend_accumulates() {
        let mut a = LintResult::new();
        a.files_checked = 1;
        let mut b = LintResult::new();
        b.files_checked = 2;
        b.violations.push(foo_undocumented(Severity::Info));
        a.extend(b);
        assert_eq!(a.files_checked, 3);
        assert_eq!(a.count_by_severity(), (0, 0, 1));
    }
}
