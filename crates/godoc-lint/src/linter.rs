//! Composition root: built-in rules, per-directory config and the analyzer.

use godoc_lint_core::ast::SourceFile;
use godoc_lint_core::{
    Analyzer, AnalyzerBuilder, AnalyzerError, ConfigBuilder, ConfigOverride, LintResult,
    PlainConfig, Registry, Severity, SourceReader,
};
use godoc_lint_rules::registry_with_catalog;
use godoc_lint_rules::stdlib_doclink::Catalog;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Builder for a [`Linter`].
pub struct LinterBuilder {
    base: PathBuf,
    registry: Option<Registry>,
    catalog: Option<Catalog>,
    base_config: Option<PlainConfig>,
    overrides: Option<ConfigOverride>,
    analyzer: AnalyzerBuilder,
}

impl LinterBuilder {
    /// Replaces the built-in rules.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Looks stdlib references up in `catalog` instead of the embedded table,
    /// which only covers commonly referenced packages. Ignored when
    /// [`registry`](Self::registry) replaces the built-in rules.
    #[must_use]
    pub fn stdlib_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Uses `config` for the base directory when it has no config file.
    #[must_use]
    pub fn base_config(mut self, config: PlainConfig) -> Self {
        self.base_config = Some(config);
        self
    }

    /// Applies caller overrides on top of every resolved config.
    #[must_use]
    pub fn overrides(mut self, overrides: ConfigOverride) -> Self {
        self.overrides = Some(overrides);
        self
    }

    /// Reads file contents through `reader` instead of the filesystem.
    #[must_use]
    pub fn reader<R: SourceReader + 'static>(mut self, reader: R) -> Self {
        self.analyzer = self.analyzer.reader(reader);
        self
    }

    /// Sets whether the first rule failure aborts the run (default: true).
    #[must_use]
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.analyzer = self.analyzer.fail_fast(fail_fast);
        self
    }

    /// Builds the linter.
    ///
    /// # Errors
    ///
    /// Returns an error if the analyzer cannot be assembled.
    pub fn build(self) -> Result<Linter, AnalyzerError> {
        let registry = match (self.registry, self.catalog) {
            (Some(registry), _) => registry,
            (None, Some(catalog)) => registry_with_catalog(Arc::new(catalog)),
            (None, None) => registry_with_catalog(Catalog::stdlib()),
        };
        let mut config = ConfigBuilder::new(self.base, registry.covered().clone());
        if let Some(plain) = self.base_config {
            config = config.with_base_plain_config(plain);
        }
        if let Some(overrides) = self.overrides {
            config.set_override(overrides);
        }
        debug!(
            "Linter rooted at {} with {} rule unit(s)",
            config.base_dir().display(),
            registry.len()
        );

        let analyzer = self
            .analyzer
            .config(Arc::new(config))
            .registry(registry)
            .build()?;
        Ok(Linter { analyzer })
    }
}

/// Checks Go packages against the documentation rules.
pub struct Linter {
    analyzer: Analyzer,
}

impl Linter {
    /// Starts a linter rooted at `base`, the directory config files and
    /// include/exclude patterns are resolved against.
    #[must_use]
    pub fn builder(base: impl Into<PathBuf>) -> LinterBuilder {
        LinterBuilder {
            base: base.into(),
            registry: None,
            catalog: None,
            base_config: None,
            overrides: None,
            analyzer: Analyzer::builder(),
        }
    }

    /// Creates a linter with the built-in rules reading from the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if the analyzer cannot be assembled.
    pub fn new(base: impl Into<PathBuf>) -> Result<Self, AnalyzerError> {
        Self::builder(base).build()
    }

    /// Returns the underlying analyzer.
    #[must_use]
    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    /// Lints parsed files.
    ///
    /// # Errors
    ///
    /// See [`Analyzer::analyze`].
    pub fn lint(&self, files: Vec<SourceFile>) -> Result<LintResult, AnalyzerError> {
        self.analyzer.analyze(files)
    }

    /// Lints parsed files and panics with a report if anything at or above
    /// `fail_on` is found. Meant for test suites.
    ///
    /// # Panics
    ///
    /// Panics if the analysis fails or reports violations at `fail_on` or above.
    pub fn assert_clean(&self, files: Vec<SourceFile>, fail_on: Severity) {
        let result = self
            .lint(files)
            .unwrap_or_else(|e| panic!("godoc-lint: analysis failed: {e}"));
        if result.has_violations_at(fail_on) {
            panic!("{}", result.format_report(fail_on));
        }
    }
}
