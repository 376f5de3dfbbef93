//! Configuration as users write it.
//!
//! A [`PlainConfig`] is one layer of configuration: the built-in defaults,
//! a config file, or a caller-supplied default. Absent fields fall through
//! to the layer below during resolution.

use super::options::PlainRuleOptions;
use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

/// Conventional config file names, checked in order in every directory.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".godoc-lint.toml",
    ".godoc-lint.json",
    ".godoclint.toml",
    ".godoclint.json",
];

/// Rules enabled by the `basic` default set.
pub const BASIC_RULES: &[&str] = &["pkg-doc", "single-pkg-doc", "start-with-name", "deprecated"];

const BUILTIN_TOML: &str = include_str!("default.toml");

/// Seed for the enabled-rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultSet {
    /// Every rule.
    All,
    /// [`BASIC_RULES`].
    Basic,
    /// No rule; only `enable` counts.
    None,
}

/// One layer of user-facing configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlainConfig {
    /// Config format version; must be `1.x` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Default rule set the `enable` list adds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultSet>,
    /// Path patterns (regex) to exclude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
    /// Path patterns (regex) to include.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Rules to enable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<Vec<String>>,
    /// Rules to disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable: Option<Vec<String>>,
    /// Rule options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<PlainRuleOptions>,
}

impl PlainConfig {
    /// Returns the built-in defaults.
    ///
    /// # Panics
    ///
    /// Panics if the embedded defaults do not parse, which is a build defect.
    #[must_use]
    pub fn builtin() -> Arc<Self> {
        static BUILTIN: OnceLock<Arc<PlainConfig>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| match toml::from_str::<PlainConfig>(BUILTIN_TOML) {
                Ok(cfg) => Arc::new(cfg),
                Err(e) => panic!("built-in configuration does not parse: {e}"),
            })
            .clone()
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not a valid config.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parses a JSON document. Blank input is an empty config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is not a valid config.
    pub fn from_json(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reads a config file; `.json` files are JSON, anything else TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if it
    /// declares an unsupported version.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: Arc::new(e),
        })?;
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        let cfg = if is_json {
            Self::from_json(&content, path)?
        } else {
            Self::from_toml(&content, path)?
        };
        cfg.check_version(path)?;
        Ok(cfg)
    }

    fn check_version(&self, path: &Path) -> Result<(), ConfigError> {
        match &self.version {
            Some(v) if !v.starts_with("1.") => Err(ConfigError::UnsupportedVersion {
                path: path.to_path_buf(),
                version: v.clone(),
            }),
            _ => Ok(()),
        }
    }
}

/// Returns the first conventional config file in `dir`.
#[must_use]
pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.is_file())
}
