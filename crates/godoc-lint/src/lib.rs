//! # godoc-lint
//!
//! Documentation-convention linter for Go source trees.
//!
//! This is the facade crate: it re-exports the core framework and the
//! built-in rules, and wires them together in [`Linter`].
//!
//! ## Input
//!
//! Parsing Go is left to the caller. Each file is handed over as a parsed
//! [`ast::SourceFile`] (serde-deserializable, so a harness can pass JSON);
//! the raw content is read through a [`SourceReader`], the filesystem by
//! default.
//!
//! ## Configuration
//!
//! Every package directory is checked against the nearest config file at
//! or below the base directory, one of `.godoc-lint.toml`,
//! `.godoc-lint.json`, `.godoclint.toml` or `.godoclint.json`:
//!
//! ```toml
//! default = "basic"
//! enable = ["require-doc"]
//! exclude = ["^internal/gen/"]
//!
//! [options]
//! "max-len/length" = 100
//! ```
//!
//! Rules can also be silenced in the source with `//godoclint:disable`
//! directives.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use godoc_lint::{Linter, Severity};
//!
//! godoc_lint::init_logging(false);
//! let linter = Linter::builder("./").fail_fast(false).build()?;
//! let result = linter.lint(files)?;
//! print!("{}", result.format_report(Severity::Warning));
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use godoc_lint_core::*;

/// Built-in rules and rule sets.
pub mod rules {
    pub use godoc_lint_rules::*;
}

mod linter;
mod logging;

pub use linter::{Linter, LinterBuilder};
pub use logging::init_logging;
