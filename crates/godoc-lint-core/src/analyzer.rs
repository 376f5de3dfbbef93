//! Core analyzer for orchestrating lint execution.

use crate::ast::SourceFile;
use crate::config::{ConfigBuilder, ConfigError};
use crate::context::{AnalysisContext, AnalyzedFile};
use crate::registry::Registry;
use crate::rule::RuleError;
use crate::source::{FsReader, SourceReader};
use crate::types::{LintResult, RuleFailure};

use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// IO error reading a source file.
    #[error("cannot read file {path}: {source}")]
    Io {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A rule failed to run.
    #[error("rule {rule} failed: {source}")]
    Rule {
        /// Name of the failing rule unit.
        rule: String,
        /// The rule's error.
        source: RuleError,
    },

    /// The builder was not given what it needs.
    #[error("analyzer misconfigured: {0}")]
    Builder(&'static str),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    config: Option<Arc<ConfigBuilder>>,
    registry: Option<Registry>,
    reader: Option<Box<dyn SourceReader>>,
    fail_fast: Option<bool>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration builder.
    #[must_use]
    pub fn config(mut self, config: Arc<ConfigBuilder>) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the rule registry.
    #[must_use]
    pub fn registry(mut self, registry: Registry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Sets the source reader (default: [`FsReader`]).
    #[must_use]
    pub fn reader<R: SourceReader + 'static>(mut self, reader: R) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Sets whether the first rule failure aborts the analysis (default: true).
    #[must_use]
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = Some(fail_fast);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration builder or registry was given.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self
            .config
            .ok_or(AnalyzerError::Builder("a config builder is required"))?;
        let registry = self
            .registry
            .ok_or(AnalyzerError::Builder("a rule registry is required"))?;

        Ok(Analyzer {
            config,
            registry,
            reader: self.reader.unwrap_or_else(|| Box::new(FsReader)),
            fail_fast: self.fail_fast.unwrap_or(true),
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    config: Arc<ConfigBuilder>,
    registry: Registry,
    reader: Box<dyn SourceReader>,
    fail_fast: bool,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the rule registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the configuration builder.
    #[must_use]
    pub fn config_builder(&self) -> &ConfigBuilder {
        &self.config
    }

    /// Returns the number of registered rule units.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.registry.len()
    }

    /// Analyzes parsed files and returns the results.
    ///
    /// Files are grouped into packages by parent directory. Each package is
    /// checked against the configuration resolved for its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read, a configuration cannot be
    /// resolved, or (when failing fast) a rule fails.
    pub fn analyze(&self, files: Vec<SourceFile>) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis of {} file(s)", files.len());

        let mut packages: BTreeMap<PathBuf, Vec<SourceFile>> = BTreeMap::new();
        for file in files {
            let dir = file.path.parent().map_or_else(PathBuf::new, Path::to_path_buf);
            packages.entry(dir).or_default().push(file);
        }

        let per_package = packages
            .into_par_iter()
            .map(|(dir, files)| self.analyze_package(&dir, files))
            .collect::<Result<Vec<_>, AnalyzerError>>()?;

        let mut result = LintResult::new();
        for package in per_package {
            result.extend(package);
        }
        result.sort();

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );
        Ok(result)
    }

    fn analyze_package(
        &self,
        dir: &Path,
        files: Vec<SourceFile>,
    ) -> Result<LintResult, AnalyzerError> {
        let config = self.config.get_config(dir)?;
        debug!(
            "Package {} uses config from {}",
            dir.display(),
            config.config_dir().display()
        );

        let files: Vec<SourceFile> = files
            .into_iter()
            .filter(|f| {
                let applicable = config.is_path_applicable(&f.path);
                if !applicable {
                    debug!("Excluding: {}", f.path.display());
                }
                applicable
            })
            .collect();

        let analyzed = files
            .into_par_iter()
            .map(|source| {
                let content = self
                    .reader
                    .read_to_string(&source.path)
                    .map_err(|e| AnalyzerError::Io {
                        path: source.path.clone(),
                        source: e,
                    })?;
                Ok(AnalyzedFile::new(source, content))
            })
            .collect::<Result<Vec<_>, AnalyzerError>>()?;

        let mut result = LintResult::new();
        result.files_checked = analyzed.len();
        let ctx = AnalysisContext::new(&config, &analyzed);

        for rule in self.registry.iter() {
            if !config.is_any_rule_applicable(&rule.covered_rules()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }
            match rule.apply(&ctx) {
                Ok(violations) => result.violations.extend(violations),
                Err(source) if self.fail_fast => {
                    return Err(AnalyzerError::Rule {
                        rule: rule.name().to_string(),
                        source,
                    });
                }
                Err(e) => {
                    warn!("Rule {} failed: {}", rule.name(), e);
                    result.failures.push(RuleFailure {
                        rule: rule.name().to_string(),
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(result)
    }
}
