//! # godoc-lint-rules
//!
//! Built-in documentation rules for godoc-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | GL001 | `pkg-doc` | Package doc starts with `Package <name>` |
//! | GL002 | `single-pkg-doc` | At most one package doc per package |
//! | GL003 | `require-pkg-doc` | Every package has a doc |
//! | GL004 | `start-with-name` | Symbol docs start with the symbol name |
//! | GL005 | `require-doc` | Symbols have docs |
//! | GL006 | `deprecated` | Deprecation notes use `Deprecated: ` |
//! | GL007 | `max-len` | Doc lines stay within a length limit |
//! | GL008 | `no-unused-link` | Link definitions are referenced |
//! | GL009 | `require-stdlib-doclink` | Stdlib references are doc links |
//!
//! GL001 to GL003 are facets of one rule unit, [`PkgDoc`], and can be
//! enabled or disabled independently.
//!
//! ## Usage
//!
//! ```ignore
//! use godoc_lint_core::{Analyzer, ConfigBuilder};
//! use godoc_lint_rules::default_registry;
//! use std::sync::Arc;
//!
//! let registry = default_registry();
//! let config = Arc::new(ConfigBuilder::new("./", registry.covered().clone()));
//! let analyzer = Analyzer::builder()
//!     .config(config)
//!     .registry(registry)
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod deprecated;
mod max_len;
mod no_unused_link;
mod pkg_doc;
mod presets;
mod require_doc;
mod shared;
mod start_with_name;
pub mod stdlib_doclink;

pub use deprecated::Deprecated;
pub use max_len::MaxLen;
pub use no_unused_link::NoUnusedLink;
pub use pkg_doc::PkgDoc;
pub use presets::{all_rules, all_rules_with_catalog, default_registry, registry_with_catalog};
pub use require_doc::RequireDoc;
pub use start_with_name::{StartMatcher, StartWithName};
pub use stdlib_doclink::RequireStdlibDoclink;

/// Re-export core types for convenience.
pub use godoc_lint_core::{Rule, Severity, Violation};
