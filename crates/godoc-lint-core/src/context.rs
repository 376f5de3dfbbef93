//! Context types for rule execution.

use crate::ast::SourceFile;
use crate::config::{Config, RuleOptions};
use crate::inspect::{self, DocBlock, FileInspection};
use crate::ruleset::RuleSet;
use std::path::Path;

/// One file ready for rule evaluation.
#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    /// The parsed file.
    pub source: SourceFile,
    /// Raw file content.
    pub content: String,
    /// Extraction result.
    pub inspection: FileInspection,
    /// Whether the file is a `_test.go` file.
    pub is_test: bool,
}

impl AnalyzedFile {
    /// Extracts `source` and bundles the result.
    #[must_use]
    pub fn new(source: SourceFile, content: String) -> Self {
        let inspection = inspect::extract(&source, &content);
        let is_test = inspect::is_test_file(&source.path);
        Self {
            source,
            content,
            inspection,
            is_test,
        }
    }

    /// Path of the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.source.path
    }

    /// Returns true if `rule` is disabled for the whole file.
    #[must_use]
    pub fn is_disabled(&self, rule: &str) -> bool {
        self.inspection.disabled.is_disabled(rule)
    }
}

/// Context provided to rules: the files of one package and their config.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    /// Configuration resolved for the package directory.
    pub config: &'a Config,
    /// Files of the package, already filtered by path applicability.
    pub files: &'a [AnalyzedFile],
}

impl<'a> AnalysisContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(config: &'a Config, files: &'a [AnalyzedFile]) -> Self {
        Self { config, files }
    }

    /// Resolved rule options.
    #[must_use]
    pub fn options(&self) -> &'a RuleOptions {
        self.config.rule_options()
    }

    /// Iterates over files a rule should look at.
    ///
    /// Test files are skipped unless `include_tests` is set, and so are files
    /// whose file-level directives disable every rule in `rules`.
    pub fn applicable_files(
        &self,
        include_tests: bool,
        rules: &'a RuleSet,
    ) -> impl Iterator<Item = &'a AnalyzedFile> + 'a {
        let config = self.config;
        self.files.iter().filter(move |f| {
            (include_tests || !f.is_test)
                && !f.inspection.disabled.covers(rules)
                && config.is_path_applicable(f.path())
        })
    }
}

/// Returns true if `rule` is disabled inside the given doc block.
#[must_use]
pub fn is_doc_disabled(doc: Option<&DocBlock>, rule: &str) -> bool {
    doc.is_some_and(|d| d.disabled.is_disabled(rule))
}
