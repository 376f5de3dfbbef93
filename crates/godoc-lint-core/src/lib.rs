//! # godoc-lint-core
//!
//! Core framework for checking Go documentation conventions.
//!
//! This crate provides the building blocks for godoc linting:
//!
//! - [`ast`]: the parsed-file model handed over by the harness
//! - [`inspect`]: declaration, doc block and directive extraction
//! - [`doc`]: doc comment parsing and plain-text rendering
//! - [`config`]: layered, per-directory configuration
//! - [`Rule`] and [`Registry`] for pluggable checks
//! - [`Analyzer`] for orchestrating lint execution
//!
//! ## Example
//!
//! ```ignore
//! use godoc_lint_core::{Analyzer, ConfigBuilder, Registry};
//! use std::sync::Arc;
//!
//! let registry = Registry::new().with(MyRule);
//! let config = Arc::new(ConfigBuilder::new("./", registry.covered().clone()));
//! let analyzer = Analyzer::builder()
//!     .config(config)
//!     .registry(registry)
//!     .build()?;
//!
//! let result = analyzer.analyze(files)?;
//! print!("{}", result.format_report(Severity::Warning));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ast;
pub mod config;
pub mod doc;
pub mod inspect;

mod analyzer;
mod context;
mod registry;
mod rule;
mod ruleset;
mod source;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{Config, ConfigBuilder, ConfigError, ConfigOverride, PlainConfig, RuleOptions};
pub use context::{is_doc_disabled, AnalysisContext, AnalyzedFile};
pub use registry::Registry;
pub use rule::{Rule, RuleBox, RuleError};
pub use ruleset::RuleSet;
pub use source::{FsReader, MemoryReader, SourceReader};
pub use types::{
    LintResult, Location, RuleFailure, Severity, Suggestion, Violation, ViolationDiagnostic,
};
