//! Configuration model, resolution and validation.
//!
//! Configuration comes in layers: built-in defaults, then a config file (or a
//! caller-supplied default for the base directory), then an override set by
//! the caller. [`ConfigBuilder`] finds the right file for a directory and
//! [`Config::resolve`] merges the layers and validates the result.

mod builder;
mod options;
mod plain;

pub use builder::ConfigBuilder;
pub use options::{PlainRuleOptions, RuleOptions};
pub use plain::{find_config_file, DefaultSet, PlainConfig, BASIC_RULES, CONFIG_FILE_NAMES};

use crate::ruleset::RuleSet;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Configuration errors.
///
/// Errors are cloneable so that a cached failed resolution can be handed out
/// on every lookup.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// IO error reading a config file.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: Arc<std::io::Error>,
    },

    /// Malformed config file.
    #[error("malformed configuration file ({path}): {message}")]
    Parse {
        /// Path to the malformed file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Config file declares a version this build does not understand.
    #[error("unsupported configuration version {version:?} in {path} (expected 1.x)")]
    UnsupportedVersion {
        /// Path to the config file.
        path: PathBuf,
        /// Declared version.
        version: String,
    },

    /// One or more invalid entries.
    #[error("configuration validation errors:\n{}", format_errors(.0))]
    Invalid(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// A single invalid configuration entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `enable` names rules that do not exist.
    #[error("invalid rule(s) name to enable: {0:?}")]
    UnknownEnable(Vec<String>),
    /// `disable` names rules that do not exist.
    #[error("invalid rule(s) to disable: {0:?}")]
    UnknownDisable(Vec<String>),
    /// `include` has patterns that do not compile.
    #[error("invalid path pattern(s) to include: {0:?}")]
    InvalidInclude(Vec<String>),
    /// `exclude` has patterns that do not compile.
    #[error("invalid path pattern(s) to exclude: {0:?}")]
    InvalidExclude(Vec<String>),
    /// `max-len/ignore-patterns` has patterns that do not compile.
    #[error("invalid max-len ignore pattern(s): {0:?}")]
    InvalidIgnorePattern(Vec<String>),
    /// Rules listed in both `enable` and `disable`.
    #[error("rule(s) both enabled and disabled: {0:?}")]
    EnableDisableConflict(Vec<String>),
}

/// Values set by the caller, taking precedence over config files.
///
/// A field that is `Some` is defined even when it holds an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverride {
    /// Config file to use for the base directory instead of discovery.
    pub config_file: Option<PathBuf>,
    /// Replaces `include`.
    pub include: Option<Vec<String>>,
    /// Replaces `exclude`.
    pub exclude: Option<Vec<String>>,
    /// Replaces `enable`.
    pub enable: Option<Vec<String>>,
    /// Replaces `disable`.
    pub disable: Option<Vec<String>>,
}

/// Resolved configuration for one directory subtree.
#[derive(Debug, Clone)]
pub struct Config {
    dir: PathBuf,
    file: Option<PathBuf>,
    enabled: Option<RuleSet>,
    disabled: RuleSet,
    include: Option<Vec<Regex>>,
    exclude: Vec<Regex>,
    ignore_patterns: Vec<Regex>,
    options: RuleOptions,
}

impl Config {
    /// Merges `layer` over the built-in defaults, applies `overrides`, and
    /// validates rule names against `catalog`.
    ///
    /// `dir` becomes the configuration directory that include and exclude
    /// patterns are relative to; `file` is recorded for reporting.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] with every invalid entry found.
    pub fn resolve(
        dir: impl Into<PathBuf>,
        file: Option<PathBuf>,
        layer: &PlainConfig,
        overrides: Option<&ConfigOverride>,
        catalog: &RuleSet,
    ) -> Result<Self, ConfigError> {
        let builtin = PlainConfig::builtin();

        // override > layer > built-in, per field
        let pick = |from_override: Option<&Option<Vec<String>>>,
                    from_layer: &Option<Vec<String>>,
                    from_builtin: &Option<Vec<String>>| {
            from_override
                .and_then(Option::as_ref)
                .or(from_layer.as_ref())
                .or(from_builtin.as_ref())
                .cloned()
        };
        let enable = pick(overrides.map(|o| &o.enable), &layer.enable, &builtin.enable);
        let disable = pick(overrides.map(|o| &o.disable), &layer.disable, &builtin.disable);
        let include = pick(overrides.map(|o| &o.include), &layer.include, &builtin.include);
        let exclude = pick(overrides.map(|o| &o.exclude), &layer.exclude, &builtin.exclude);
        let default_set = layer.default.or(builtin.default);

        let mut options = RuleOptions::default();
        if let Some(opts) = &builtin.options {
            options.transfer(opts);
        }
        if let Some(opts) = &layer.options {
            options.transfer(opts);
        }

        let mut errors = Vec::new();

        let unknown = |names: &Option<Vec<String>>| -> Vec<String> {
            names
                .iter()
                .flatten()
                .filter(|n| !catalog.has(n))
                .cloned()
                .collect()
        };
        let invalid = unknown(&enable);
        if !invalid.is_empty() {
            errors.push(ValidationError::UnknownEnable(invalid));
        }
        let invalid = unknown(&disable);
        if !invalid.is_empty() {
            errors.push(ValidationError::UnknownDisable(invalid));
        }

        let enable_set: Option<RuleSet> = enable.map(RuleSet::from_iter);
        let disabled: RuleSet = disable.into_iter().flatten().collect();
        if let Some(enable_set) = &enable_set {
            let conflict = enable_set.intersection(&disabled);
            if !conflict.is_empty() {
                errors.push(ValidationError::EnableDisableConflict(conflict.list()));
            }
        }

        let (include, invalid) = compile_all(include.as_deref());
        if !invalid.is_empty() {
            errors.push(ValidationError::InvalidInclude(invalid));
        }
        let (exclude, invalid) = compile_all(exclude.as_deref());
        if !invalid.is_empty() {
            errors.push(ValidationError::InvalidExclude(invalid));
        }
        let (ignore_patterns, invalid) = compile_all(Some(&options.max_len_ignore_patterns));
        if !invalid.is_empty() {
            errors.push(ValidationError::InvalidIgnorePattern(invalid));
        }

        if !errors.is_empty() {
            return Err(ConfigError::Invalid(errors));
        }

        let enabled = match (default_set, enable_set) {
            (None, None) | (Some(DefaultSet::All), _) => None,
            (None, Some(set)) => Some(set),
            (Some(DefaultSet::Basic), extra) => Some(
                RuleSet::new()
                    .add(BASIC_RULES.iter().copied())
                    .merge(&extra.unwrap_or_default()),
            ),
            (Some(DefaultSet::None), extra) => Some(extra.unwrap_or_default()),
        };

        Ok(Self {
            dir: dir.into(),
            file,
            enabled,
            disabled,
            include,
            exclude: exclude.unwrap_or_default(),
            ignore_patterns: ignore_patterns.unwrap_or_default(),
            options,
        })
    }

    /// Returns the built-in configuration scoped to `dir`.
    ///
    /// # Panics
    ///
    /// Panics if the built-in defaults do not validate, which is a build defect.
    #[must_use]
    pub fn builtin(dir: impl Into<PathBuf>) -> Self {
        match Self::resolve(dir, None, &PlainConfig::default(), None, &RuleSet::new()) {
            Ok(cfg) => cfg,
            Err(e) => panic!("built-in configuration is invalid: {e}"),
        }
    }

    /// Directory include and exclude patterns are relative to.
    #[must_use]
    pub fn config_dir(&self) -> &Path {
        &self.dir
    }

    /// Config file this configuration was read from, if any.
    #[must_use]
    pub fn config_file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Enabled rules; `None` means every rule not disabled.
    #[must_use]
    pub fn enabled_rules(&self) -> Option<&RuleSet> {
        self.enabled.as_ref()
    }

    /// Disabled rules.
    #[must_use]
    pub fn disabled_rules(&self) -> &RuleSet {
        &self.disabled
    }

    /// Returns true unless every rule of `rules` is disabled or none of them
    /// is enabled.
    #[must_use]
    pub fn is_any_rule_applicable(&self, rules: &RuleSet) -> bool {
        if self.disabled.is_superset_of(rules) {
            return false;
        }
        self.enabled.as_ref().map_or(true, |e| e.has_commons_with(rules))
    }

    /// Returns true if the single rule `rule` is applicable.
    #[must_use]
    pub fn is_rule_enabled(&self, rule: &str) -> bool {
        self.is_any_rule_applicable(&RuleSet::new().add([rule]))
    }

    /// Returns true if `path` passes the exclude and include patterns.
    ///
    /// Patterns are matched against the path relative to [`Self::config_dir`]
    /// with `/` separators; paths outside it are matched as given.
    #[must_use]
    pub fn is_path_applicable(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.dir).unwrap_or(path);
        let rel = rel.to_string_lossy().replace('\\', "/");

        if self.exclude.iter().any(|re| re.is_match(&rel)) {
            return false;
        }
        match &self.include {
            None => true,
            Some(include) => include.iter().any(|re| re.is_match(&rel)),
        }
    }

    /// Resolved rule options.
    #[must_use]
    pub fn rule_options(&self) -> &RuleOptions {
        &self.options
    }

    /// Compiled `max-len/ignore-patterns`.
    #[must_use]
    pub fn max_len_ignore_patterns(&self) -> &[Regex] {
        &self.ignore_patterns
    }
}

fn compile_all(patterns: Option<&[String]>) -> (Option<Vec<Regex>>, Vec<String>) {
    let Some(patterns) = patterns else {
        return (None, Vec::new());
    };
    let mut compiled = Vec::with_capacity(patterns.len());
    let mut invalid = Vec::new();
    for p in patterns {
        match Regex::new(p) {
            Ok(re) => compiled.push(re),
            Err(_) => invalid.push(p.clone()),
        }
    }
    (Some(compiled), invalid)
}
