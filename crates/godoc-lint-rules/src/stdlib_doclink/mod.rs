//! Rule suggesting doc links for standard library references.
//!
//! # Rationale
//!
//! Writing `[json.Encoder]` instead of `json.Encoder` turns the reference
//! into a link on doc sites and in editors.
//!
//! # Detected Patterns
//!
//! ```text
//! // Encode writes v with a json.Encoder.   <- should be "[json.Encoder]"
//! func Encode(v any) error
//! ```
//!
//! Package names are resolved through the imports of the whole package, so
//! aliased imports are followed and a name bound to two different paths is
//! never reported.

mod catalog;
mod detect;
mod imports;

pub use catalog::{Catalog, StdlibPackage, SymbolKind};
pub use detect::{find_potential_doclinks, PotentialDoclink};
pub use imports::{Binding, ImportTable};

use godoc_lint_core::doc::Block;
use godoc_lint_core::{AnalysisContext, Rule, RuleError, RuleSet, Severity, Suggestion, Violation};
use std::sync::Arc;
use tracing::debug;

use crate::shared::{doc_location, scoped_docs};

/// Rule code for require-stdlib-doclink.
pub const CODE: &str = "GL009";

/// Rule name for require-stdlib-doclink.
pub const NAME: &str = "require-stdlib-doclink";

/// Suggests doc links for references to standard library symbols.
#[derive(Debug, Clone)]
pub struct RequireStdlibDoclink {
    /// Custom severity.
    pub severity: Severity,
    catalog: Arc<Catalog>,
}

impl Default for RequireStdlibDoclink {
    fn default() -> Self {
        Self::new()
    }
}

impl RequireStdlibDoclink {
    /// Creates a new rule backed by the embedded catalog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Warning,
            catalog: Catalog::stdlib(),
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Uses another catalog, e.g. a complete generated table.
    #[must_use]
    pub fn catalog(mut self, catalog: Arc<Catalog>) -> Self {
        self.catalog = catalog;
        self
    }
}

fn message(link: &PotentialDoclink) -> String {
    let mut msg = format!(
        "text {:?} should be replaced with {:?} to link to stdlib {}",
        link.original, link.doclink, link.kind
    );
    if link.count > 1 {
        msg.push_str(&format!(" ({} instances)", link.count));
    }
    msg
}

impl Rule for RequireStdlibDoclink {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Suggests doc links for standard library references"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn covered_rules(&self) -> RuleSet {
        RuleSet::new().add([NAME])
    }

    fn apply(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Violation>, RuleError> {
        let imports = ImportTable::from_specs(
            ctx.files.iter().flat_map(|f| f.inspection.imports.iter()),
            &self.catalog,
        );
        let rules = self.covered_rules();
        let mut violations = Vec::new();

        let include_tests = ctx.options().require_stdlib_doclink_include_tests;
        for file in ctx.applicable_files(include_tests, &rules) {
            for doc in scoped_docs(file, NAME) {
                let text = doc
                    .parsed
                    .prose()
                    .map(Block::text)
                    .collect::<Vec<_>>()
                    .join("\n");
                for link in find_potential_doclinks(&imports, &self.catalog, &text) {
                    let hint = format!("replace {} with {}", link.original, link.doclink);
                    let location = doc_location(file, doc);
                    violations.push(
                        Violation::new(CODE, NAME, self.severity, location, message(&link))
                            .with_suggestion(Suggestion::new(hint)),
                    );
                }
            }
        }

        debug!("{} stdlib doclink candidate(s) found", violations.len());
        Ok(violations)
    }
}
