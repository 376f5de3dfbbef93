//! Package doc rules: prefix, uniqueness and presence.
//!
//! # Rationale
//!
//! The package doc is the first thing readers see on the package page. It
//! should exist, be written once, and start with `Package <name>` so the
//! rendered synopsis reads naturally.
//!
//! # Detected Patterns
//!
//! ```text
//! // foo implements things.      <- pkg-doc: should start with "Package foo "
//! package foo
//! ```
//!
//! Two files of the same package that both carry a package doc trigger
//! `single-pkg-doc` on each of them. A package where no file carries one
//! triggers `require-pkg-doc` on the package clause of its first file.

use godoc_lint_core::{
    is_doc_disabled, AnalysisContext, AnalyzedFile, Location, Rule, RuleError, RuleSet, Severity,
    Violation,
};
use std::collections::BTreeMap;

use crate::shared::doc_location;

/// Rule code for the package doc unit.
pub const CODE: &str = "GL001";

/// Name of the rule unit.
pub const NAME: &str = "pkg-doc";

/// Prefix facet.
pub const PKG_DOC: &str = "pkg-doc";
/// Uniqueness facet.
pub const SINGLE_PKG_DOC: &str = "single-pkg-doc";
/// Presence facet.
pub const REQUIRE_PKG_DOC: &str = "require-pkg-doc";

/// Code reported by the uniqueness facet.
pub const SINGLE_PKG_DOC_CODE: &str = "GL002";
/// Code reported by the presence facet.
pub const REQUIRE_PKG_DOC_CODE: &str = "GL003";

const COMMAND_PACKAGES: [&str; 2] = ["main", "main_test"];

/// Checks package docs for the prefix convention, a single occurrence per
/// package, and presence.
#[derive(Debug, Clone)]
pub struct PkgDoc {
    /// Custom severity.
    pub severity: Severity,
}

impl Default for PkgDoc {
    fn default() -> Self {
        Self::new()
    }
}

impl PkgDoc {
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

    fn check_prefix(&self, ctx: &AnalysisContext<'_>, out: &mut Vec<Violation>) {
        let opts = ctx.options();
        let start_with = opts.pkg_doc_start_with.trim();
        let rules = RuleSet::new().add([PKG_DOC]);

        for file in ctx.applicable_files(opts.pkg_doc_include_tests, &rules) {
            let Some(doc) = &file.inspection.package_doc else {
                continue;
            };
            if is_doc_disabled(Some(doc), PKG_DOC) {
                continue;
            }
            let package = file.inspection.package.name.as_str();
            if COMMAND_PACKAGES.contains(&package) {
                continue;
            }
            if let Err(expected) = check_prefix(&doc.text, start_with, package) {
                out.push(Violation::new(
                    CODE,
                    PKG_DOC,
                    self.severity,
                    doc_location(file, doc),
                    format!("package godoc should start with \"{expected} \""),
                ));
            }
        }
    }

    fn check_single(&self, ctx: &AnalysisContext<'_>, out: &mut Vec<Violation>) {
        let rules = RuleSet::new().add([SINGLE_PKG_DOC]);
        let mut documented: BTreeMap<&str, Vec<&AnalyzedFile>> = BTreeMap::new();

        for file in ctx.applicable_files(ctx.options().single_pkg_doc_include_tests, &rules) {
            let Some(doc) = &file.inspection.package_doc else {
                continue;
            };
            if doc.is_empty() || is_doc_disabled(Some(doc), SINGLE_PKG_DOC) {
                continue;
            }
            documented
                .entry(file.inspection.package.name.as_str())
                .or_default()
                .push(file);
        }

        for files in documented.values().filter(|fs| fs.len() > 1) {
            for file in files {
                let Some(doc) = &file.inspection.package_doc else {
                    continue;
                };
                out.push(Violation::new(
                    SINGLE_PKG_DOC_CODE,
                    SINGLE_PKG_DOC,
                    self.severity,
                    doc_location(file, doc),
                    format!("package should have a single godoc ({} found)", files.len()),
                ));
            }
        }
    }

    fn check_required(&self, ctx: &AnalysisContext<'_>, out: &mut Vec<Violation>) {
        let rules = RuleSet::new().add([REQUIRE_PKG_DOC]);
        let mut packages: BTreeMap<&str, Vec<&AnalyzedFile>> = BTreeMap::new();

        for file in ctx.applicable_files(ctx.options().require_pkg_doc_include_tests, &rules) {
            packages
                .entry(file.inspection.package.name.as_str())
                .or_default()
                .push(file);
        }

        for files in packages.values() {
            let documented = files.iter().any(|f| {
                f.inspection
                    .package_doc
                    .as_ref()
                    .is_some_and(|d| !d.is_empty() && !is_doc_disabled(Some(d), REQUIRE_PKG_DOC))
            });
            if documented {
                continue;
            }
            let Some(first) = files.first() else {
                continue;
            };
            let package = &first.inspection.package;
            out.push(Violation::new(
                REQUIRE_PKG_DOC_CODE,
                REQUIRE_PKG_DOC,
                self.severity,
                Location::from_pos(first.path().to_path_buf(), package.pos, package.name.len()),
                "package should have a godoc",
            ));
        }
    }
}

/// Checks that `text` starts with `<start_with> <package>` followed by
/// whitespace or nothing. Returns the expected prefix on failure.
///
/// An empty text passes; presence is a separate facet.
pub(crate) fn check_prefix(text: &str, start_with: &str, package: &str) -> Result<(), String> {
    if text.is_empty() {
        return Ok(());
    }
    let expected = if start_with.is_empty() {
        package.to_string()
    } else {
        format!("{start_with} {package}")
    };
    match text.strip_prefix(&expected) {
        Some(rest) if rest.is_empty() || rest.starts_with([' ', '\t', '\r', '\n']) => Ok(()),
        _ => Err(expected),
    }
}

impl Rule for PkgDoc {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Checks package docs for prefix, uniqueness and presence"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn covered_rules(&self) -> RuleSet {
        RuleSet::new().add([PKG_DOC, SINGLE_PKG_DOC, REQUIRE_PKG_DOC])
    }

    fn apply(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let mut violations = Vec::new();
        if ctx.config.is_rule_enabled(PKG_DOC) {
            self.check_prefix(ctx, &mut violations);
        }
        if ctx.config.is_rule_enabled(SINGLE_PKG_DOC) {
            self.check_single(ctx, &mut violations);
        }
        if ctx.config.is_rule_enabled(REQUIRE_PKG_DOC) {
            self.check_required(ctx, &mut violations);
        }
        Ok(violations)
    }
}
