//! Helpers shared by the built-in rules.

use godoc_lint_core::inspect::DocBlock;
use godoc_lint_core::{is_doc_disabled, AnalyzedFile, Location};
use std::collections::HashSet;

/// Prefix of a paragraph that marks the symbol as deprecated.
const DEPRECATED_PREFIX: &str = "Deprecated:";

/// Location spanning a whole doc block.
pub(crate) fn doc_location(file: &AnalyzedFile, doc: &DocBlock) -> Location {
    Location::from_pos(file.path().to_path_buf(), doc.pos(), doc.len())
}

/// Returns true if some paragraph of the block starts with `Deprecated:`.
///
/// Only the prefix counts here, whatever follows it. Whether the note is
/// well formed is the `deprecated` rule's concern.
pub(crate) fn has_deprecated_paragraph(doc: &DocBlock) -> bool {
    doc.parsed
        .paragraph_leads()
        .any(|lead| lead.starts_with(DEPRECATED_PREFIX))
}

/// Collects the doc blocks of a file that `rule` should look at.
///
/// The package doc comes first, then for each declaration not disabled for
/// `rule` its group doc (once per group) and its own doc. Blocks whose own
/// directives disable `rule` are left out.
pub(crate) fn scoped_docs<'a>(file: &'a AnalyzedFile, rule: &str) -> Vec<&'a DocBlock> {
    let inspection = &file.inspection;
    let mut docs = Vec::new();

    if let Some(doc) = &inspection.package_doc {
        if !is_doc_disabled(Some(doc), rule) {
            docs.push(doc);
        }
    }

    let mut seen_parents = HashSet::new();
    for decl in &inspection.declarations {
        if decl.is_disabled(rule) {
            continue;
        }
        if let Some(ix) = decl.parent_doc {
            if seen_parents.insert(ix) {
                if let Some(parent) = inspection.parent_docs.get(ix) {
                    if !is_doc_disabled(Some(parent), rule) {
                        docs.push(parent);
                    }
                }
            }
        }
        if let Some(doc) = &decl.doc {
            if !is_doc_disabled(Some(doc), rule) {
                docs.push(doc);
            }
        }
    }
    docs
}
