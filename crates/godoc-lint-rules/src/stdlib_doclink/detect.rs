//! Detection of unlinked references to standard library symbols.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::catalog::{Catalog, SymbolKind};
use super::imports::{Binding, ImportTable};

/// Already formatted doc links, `[...]`.
#[allow(clippy::expect_used)]
static DOC_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\[\]]*\]").expect("valid doc link pattern"));

/// `pkg.Name`, `path/to/pkg.Name` and `pkg.Recv.Method`, optionally starred.
#[allow(clippy::expect_used)]
static CANDIDATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(\*?)((?:[a-z0-9_]+/)*[A-Za-z_][A-Za-z0-9_]*)",
        r"\.([A-Za-z_][A-Za-z0-9_]*)",
        r"(?:\.([A-Za-z_][A-Za-z0-9_]*))?",
    ))
    .expect("valid doclink candidate pattern")
});

/// A reference that could be written as a doc link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotentialDoclink {
    /// The reference as written, without a leading `*`.
    pub original: String,
    /// The suggested doc link, e.g. `[json.Encoder]`.
    pub doclink: String,
    /// Kind of the referenced symbol.
    pub kind: SymbolKind,
    /// Number of occurrences in the text.
    pub count: usize,
}

/// Finds references to catalog symbols that are not yet doc links.
///
/// The package part is resolved through `imports` first. Names not bound by
/// any import are taken as literal import paths; ambiguous names never
/// resolve. Results are deduplicated and sorted by [`PotentialDoclink::original`].
#[must_use]
pub fn find_potential_doclinks(
    imports: &ImportTable,
    catalog: &Catalog,
    text: &str,
) -> Vec<PotentialDoclink> {
    let text = DOC_LINK.replace_all(text, |c: &Captures<'_>| " ".repeat(c[0].len()));

    let mut found: BTreeMap<String, (SymbolKind, usize)> = BTreeMap::new();
    for caps in CANDIDATE.captures_iter(&text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let preceded_by_word = text[..whole.start()]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '/' || c == '.');
        if preceded_by_word {
            continue;
        }

        let pkg = &caps[2];
        let Some(path) = resolve_package(imports, catalog, pkg) else {
            continue;
        };

        let name = &caps[3];
        let method = caps.get(4).map(|m| m.as_str());
        let resolved = method
            .and_then(|m| {
                let key = format!("{name}.{m}");
                catalog
                    .symbol(path, &key)
                    .map(|kind| (format!("{pkg}.{key}"), kind))
            })
            .or_else(|| catalog.symbol(path, name).map(|kind| (format!("{pkg}.{name}"), kind)));

        if let Some((original, kind)) = resolved {
            found.entry(original).or_insert((kind, 0)).1 += 1;
        }
    }

    found
        .into_iter()
        .map(|(original, (kind, count))| PotentialDoclink {
            doclink: format!("[{original}]"),
            original,
            kind,
            count,
        })
        .collect()
}

fn resolve_package<'a>(
    imports: &'a ImportTable,
    catalog: &Catalog,
    pkg: &'a str,
) -> Option<&'a str> {
    match imports.resolve(pkg) {
        Binding::Path(path) => Some(path),
        Binding::Ambiguous => None,
        Binding::Unbound => catalog.package(pkg).map(|_| pkg),
    }
}
