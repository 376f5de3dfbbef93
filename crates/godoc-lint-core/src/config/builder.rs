//! Per-directory configuration resolution with a one-shot override.
//!
//! Resolution order for a queried directory under the base directory:
//!
//! 1. the nearest conventional config file strictly below the base directory
//! 2. at the base directory: the override config file, then a conventional
//!    config file, then the caller-supplied base config, then built-ins
//!
//! Directories outside the base directory get the built-in defaults, still
//! under the caller override, scoped to the base directory.

use super::plain::{find_config_file, PlainConfig};
use super::{Config, ConfigError, ConfigOverride};
use crate::ruleset::RuleSet;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Unbuilt,
    Sealed,
}

type Resolved = Result<Arc<Config>, ConfigError>;

#[derive(Debug)]
struct State {
    phase: Phase,
    overrides: Option<ConfigOverride>,
    cache: HashMap<PathBuf, Resolved>,
    outside: Option<Resolved>,
}

/// Resolves and caches [`Config`] values per directory.
///
/// The builder is shared across worker threads. Every resolution runs under
/// one lock, so concurrent callers asking for the same directory wait for a
/// single build and observe the same result.
#[derive(Debug)]
pub struct ConfigBuilder {
    base: PathBuf,
    catalog: RuleSet,
    base_plain: Option<PlainConfig>,
    state: Mutex<State>,
}

impl ConfigBuilder {
    /// Creates a builder rooted at `base`. Rule names in config files are
    /// validated against `catalog`.
    #[must_use]
    pub fn new(base: impl Into<PathBuf>, catalog: RuleSet) -> Self {
        Self {
            base: normalize(&base.into()),
            catalog,
            base_plain: None,
            state: Mutex::new(State {
                phase: Phase::Unbuilt,
                overrides: None,
                cache: HashMap::new(),
                outside: None,
            }),
        }
    }

    /// Uses `plain` for the base directory when it has no config file.
    #[must_use]
    pub fn with_base_plain_config(mut self, plain: PlainConfig) -> Self {
        self.base_plain = Some(plain);
        self
    }

    /// Returns the base directory.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Returns the rule catalog used for validation.
    #[must_use]
    pub fn catalog(&self) -> &RuleSet {
        &self.catalog
    }

    /// Sets the caller override.
    ///
    /// # Panics
    ///
    /// Panics if any configuration has already been resolved.
    pub fn set_override(&self, overrides: ConfigOverride) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(
            state.phase == Phase::Unbuilt,
            "config override must be set before the first resolution"
        );
        state.overrides = Some(overrides);
    }

    /// Returns the configuration that applies to `dir`.
    ///
    /// Results, failures included, are cached per directory; repeated calls
    /// return the same value.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file cannot be read or parsed, or if the
    /// merged configuration does not validate.
    pub fn get_config(&self, dir: &Path) -> Result<Arc<Config>, ConfigError> {
        let dir = normalize(dir);
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = state.cache.get(&dir) {
            return cached.clone();
        }

        state.phase = Phase::Sealed;

        let result = if dir.starts_with(&self.base) {
            let (config_dir, file) = self.locate(&dir, state.overrides.as_ref());
            match state.cache.get(&config_dir) {
                Some(cached) => cached.clone(),
                None => {
                    let built = self.build(&config_dir, file, state.overrides.as_ref());
                    state.cache.insert(config_dir, built.clone());
                    built
                }
            }
        } else {
            debug!("{} is outside {}, using defaults", dir.display(), self.base.display());
            match &state.outside {
                Some(cached) => cached.clone(),
                None => {
                    let built = Config::resolve(
                        &self.base,
                        None,
                        &PlainConfig::default(),
                        state.overrides.as_ref(),
                        &self.catalog,
                    )
                    .map(Arc::new);
                    state.outside = Some(built.clone());
                    built
                }
            }
        };
        state.cache.insert(dir, result.clone());
        result
    }

    /// Finds the effective config directory and file for `dir`, which lies
    /// under the base directory.
    fn locate(&self, dir: &Path, overrides: Option<&ConfigOverride>) -> (PathBuf, Option<PathBuf>) {
        let mut current = dir;
        while current != self.base {
            if let Some(file) = find_config_file(current) {
                return (current.to_path_buf(), Some(file));
            }
            match current.parent() {
                Some(parent) => current = parent,
                None => break,
            }
        }

        let file = overrides
            .and_then(|o| o.config_file.clone())
            .or_else(|| find_config_file(&self.base));
        (self.base.clone(), file)
    }

    fn build(
        &self,
        config_dir: &Path,
        file: Option<PathBuf>,
        overrides: Option<&ConfigOverride>,
    ) -> Result<Arc<Config>, ConfigError> {
        let layer = match &file {
            Some(path) => {
                info!("Using config file {}", path.display());
                PlainConfig::from_file(path)?
            }
            None if config_dir == self.base => self.base_plain.clone().unwrap_or_default(),
            None => PlainConfig::default(),
        };
        debug!("Resolving config for {}", config_dir.display());
        Config::resolve(config_dir, file, &layer, overrides, &self.catalog).map(Arc::new)
    }
}

/// Lexically removes `.` and `..` components.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}
