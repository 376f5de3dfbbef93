//! Declaration and directive extraction.
//!
//! [`extract`] turns one parsed [`SourceFile`] plus its raw content into a
//! [`FileInspection`]: a flat list of [`Declaration`] records with their
//! documentation blocks, the package doc, the import table and the
//! file-level disable directives.

mod directive;

pub use directive::{parse_directives, DisabledRules};

use crate::ast::{CommentGroup, Decl, DeclToken, GenDecl, Ident, ImportSpec, Pos, SourceFile, Spec};
use crate::doc::{self, ParsedDoc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

/// Runs of line comments followed by a blank line or the end of the file.
///
/// Doc comments are directly followed by their declaration (or the package
/// clause) and never match.
#[allow(clippy::expect_used)]
static ORPHAN_COMMENT_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^//.*\r?\n)+(?:\r?\n|\z)").expect("valid orphan comment pattern")
});

/// Suffix that marks test files.
pub const TEST_FILE_SUFFIX: &str = "_test.go";

/// Kind of an extracted declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Plain function.
    Func,
    /// Function with a receiver.
    Method,
    /// Type (defined or alias).
    Type,
    /// Constant.
    Const,
    /// Variable.
    Var,
    /// Malformed declaration.
    Bad,
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Func => "func",
            Self::Method => "method",
            Self::Type => "type",
            Self::Const => "const",
            Self::Var => "var",
            Self::Bad => "bad",
        };
        f.write_str(s)
    }
}

/// A documentation comment with its derived data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocBlock {
    /// The comment group as written.
    pub group: CommentGroup,
    /// Normalized doc text (see [`CommentGroup::text`]).
    pub text: String,
    /// Parsed block structure of `text`.
    pub parsed: ParsedDoc,
    /// Directives found inside this block.
    pub disabled: DisabledRules,
}

impl DocBlock {
    /// Builds a doc block from a comment group.
    #[must_use]
    pub fn new(group: &CommentGroup) -> Self {
        let text = group.text();
        let parsed = doc::parse(&text);
        Self {
            group: group.clone(),
            disabled: parse_directives(&group.raw()),
            text,
            parsed,
        }
    }

    /// Position of the first comment.
    #[must_use]
    pub fn pos(&self) -> Pos {
        self.group.pos()
    }

    /// Byte length of the block in the source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.group.end().saturating_sub(self.pos().offset)
    }

    /// Returns true if the block carries no doc text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// One named top-level symbol, or a malformed declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Declaration kind.
    pub kind: DeclKind,
    /// Symbol name; empty for [`DeclKind::Bad`].
    pub name: String,
    /// Position of the name (or of the malformed region).
    pub pos: Pos,
    /// Own doc comment.
    pub doc: Option<DocBlock>,
    /// Index into [`FileInspection::parent_docs`] for grouped declarations.
    pub parent_doc: Option<usize>,
    /// Same-line trailing comment.
    pub trailing_doc: Option<DocBlock>,
    /// `type T = U`.
    pub is_type_alias: bool,
    /// Part of a spec declaring several names, e.g. `a, b = 1, 2`.
    pub multi_name: bool,
    /// Method whose receiver base type is unexported.
    pub on_unexported_receiver: bool,
    /// Directives from own and parent doc comments.
    pub disabled: DisabledRules,
}

impl Declaration {
    /// Returns true if the name is exported and, for methods, the receiver
    /// type is exported too.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        crate::ast::is_exported(&self.name) && !self.on_unexported_receiver
    }

    /// Returns true if `rule` is disabled by a declaration-scope directive.
    #[must_use]
    pub fn is_disabled(&self, rule: &str) -> bool {
        self.disabled.is_disabled(rule)
    }
}

/// Extraction result for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInspection {
    /// Package name from the package clause.
    pub package: Ident,
    /// Package doc comment.
    pub package_doc: Option<DocBlock>,
    /// Directives from orphan comment blocks.
    pub disabled: DisabledRules,
    /// Declarations in source order.
    pub declarations: Vec<Declaration>,
    /// Doc comments of grouped declarations, shared by their members.
    pub parent_docs: Vec<DocBlock>,
    /// Import specs of the file.
    pub imports: Vec<ImportSpec>,
}

impl FileInspection {
    /// Returns the parent doc of a declaration.
    #[must_use]
    pub fn parent_doc(&self, decl: &Declaration) -> Option<&DocBlock> {
        decl.parent_doc.and_then(|ix| self.parent_docs.get(ix))
    }
}

/// Returns true if the path names a test file.
#[must_use]
pub fn is_test_file(path: &std::path::Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(TEST_FILE_SUFFIX))
}

/// Extracts declarations, docs and directives from a parsed file.
///
/// `content` is the raw file content; orphan comment blocks are found by
/// scanning it directly.
#[must_use]
pub fn extract(file: &SourceFile, content: &str) -> FileInspection {
    let mut disabled = DisabledRules::default();
    for block in ORPHAN_COMMENT_BLOCK.find_iter(content) {
        disabled.absorb(&parse_directives(block.as_str()));
    }

    let mut builder = DeclCollector::default();
    for decl in &file.decls {
        builder.collect(decl);
    }
    let DeclCollector {
        mut declarations,
        parent_docs,
    } = builder;

    for decl in &mut declarations {
        let mut raw = decl.doc.as_ref().map(|d| d.group.raw()).unwrap_or_default();
        if let Some(parent) = decl.parent_doc.and_then(|ix| parent_docs.get(ix)) {
            raw.push('\n');
            raw.push_str(&parent.group.raw());
        }
        decl.disabled = parse_directives(&raw);
    }

    debug!(
        "Extracted {} declaration(s) from {}",
        declarations.len(),
        file.path.display()
    );

    FileInspection {
        package: file.package.clone(),
        package_doc: file.doc.as_ref().map(DocBlock::new),
        disabled,
        declarations,
        parent_docs,
        imports: file.imports().cloned().collect(),
    }
}

#[derive(Default)]
struct DeclCollector {
    declarations: Vec<Declaration>,
    parent_docs: Vec<DocBlock>,
}

impl DeclCollector {
    fn collect(&mut self, decl: &Decl) {
        match decl {
            Decl::Func(func) => {
                let on_unexported_receiver = func
                    .recv
                    .as_ref()
                    .and_then(|r| r.base_ident())
                    .is_some_and(|ident| !ident.is_exported());
                let kind = if func.recv.is_some() {
                    DeclKind::Method
                } else {
                    DeclKind::Func
                };
                let mut record = Self::record(kind, &func.name, func.doc.as_ref());
                record.on_unexported_receiver = on_unexported_receiver;
                self.push(record);
            }
            Decl::Bad(bad) => self.declarations.push(Declaration {
                kind: DeclKind::Bad,
                name: String::new(),
                pos: bad.pos,
                doc: None,
                parent_doc: None,
                trailing_doc: None,
                is_type_alias: false,
                multi_name: false,
                on_unexported_receiver: false,
                disabled: DisabledRules::default(),
            }),
            Decl::Gen(gen) => self.collect_gen(gen),
        }
    }

    fn collect_gen(&mut self, gen: &GenDecl) {
        let kind = match gen.token {
            DeclToken::Const => DeclKind::Const,
            DeclToken::Var => DeclKind::Var,
            DeclToken::Type => DeclKind::Type,
            DeclToken::Import => return,
        };

        // Ungrouped declarations carry their doc on the declaration itself;
        // grouped ones share it as the parent doc of every member.
        let parent_doc = if gen.is_grouped() {
            gen.doc.as_ref().map(|g| {
                self.parent_docs.push(DocBlock::new(g));
                self.parent_docs.len() - 1
            })
        } else {
            None
        };

        for spec in &gen.specs {
            match spec {
                Spec::Value(value) => {
                    let own_doc = if gen.is_grouped() {
                        value.doc.as_ref()
                    } else {
                        gen.doc.as_ref()
                    };
                    let multi_name = value.names.len() > 1;
                    for name in &value.names {
                        let mut record = Self::record(kind, name, own_doc);
                        record.parent_doc = parent_doc;
                        record.multi_name = multi_name;
                        record.trailing_doc = value.comment.as_ref().map(DocBlock::new);
                        self.push(record);
                    }
                }
                Spec::Type(ty) => {
                    let own_doc = if gen.is_grouped() {
                        ty.doc.as_ref()
                    } else {
                        gen.doc.as_ref()
                    };
                    let mut record = Self::record(kind, &ty.name, own_doc);
                    record.parent_doc = parent_doc;
                    record.is_type_alias = ty.assign.is_some();
                    record.trailing_doc = ty.comment.as_ref().map(DocBlock::new);
                    self.push(record);
                }
                Spec::Import(_) => {}
            }
        }
    }

    fn record(kind: DeclKind, name: &Ident, doc: Option<&CommentGroup>) -> Declaration {
        Declaration {
            kind,
            name: name.name.clone(),
            pos: name.pos,
            doc: doc.map(DocBlock::new),
            parent_doc: None,
            trailing_doc: None,
            is_type_alias: false,
            multi_name: false,
            on_unexported_receiver: false,
            disabled: DisabledRules::default(),
        }
    }

    fn push(&mut self, record: Declaration) {
        if record.name == "_" {
            return;
        }
        self.declarations.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BadDecl, Comment, Expr, FuncDecl, TypeSpec, ValueSpec};

    fn ident(name: &str) -> Ident {
        Ident::new(name, Pos::default())
    }

    fn doc(lines: &[&str]) -> Option<CommentGroup> {
        Some(CommentGroup::new(
            lines.iter().map(|l| Comment::new(*l, Pos::default())).collect(),
        ))
    }

    fn file(decls: Vec<Decl>) -> SourceFile {
        let mut f = SourceFile::new("foo/foo.go", ident("foo"));
        f.decls = decls;
        f
    }

    fn value_decl(
        token: DeclToken,
        grouped: bool,
        doc_lines: Option<&[&str]>,
        specs: Vec<ValueSpec>,
    ) -> Decl {
        Decl::Gen(GenDecl {
            doc: doc_lines.and_then(doc),
            token,
            lparen: grouped.then(Pos::default),
            specs: specs.into_iter().map(Spec::Value).collect(),
            pos: Pos::default(),
        })
    }

    fn value(names: &[&str], doc_lines: Option<&[&str]>, comment: Option<&[&str]>) -> ValueSpec {
        ValueSpec {
            doc: doc_lines.and_then(doc),
            names: names.iter().map(|n| ident(n)).collect(),
            comment: comment.and_then(doc),
        }
    }

    fn names(fi: &FileInspection) -> Vec<&str> {
        fi.declarations.iter().map(|d| d.name.as_str()).collect()
    }

    // --- const/var ---

    #[test]
    fn single_name_value_uses_decl_doc() {
        let f = file(vec![value_decl(
            DeclToken::Const,
            false,
            Some(&["// Foo is a constant."]),
            vec![value(&["Foo"], None, Some(&["// trailing"]))],
        )]);
        let fi = extract(&f, "");
        let d = &fi.declarations[0];
        assert_eq!(d.kind, DeclKind::Const);
        assert!(!d.multi_name);
        assert_eq!(d.doc.as_ref().map(|b| b.text.as_str()), Some("Foo is a constant.\n"));
        assert_eq!(d.trailing_doc.as_ref().map(|b| b.text.as_str()), Some("trailing\n"));
        assert!(d.parent_doc.is_none());
    }

    #[test]
    fn multi_name_value_is_replicated() {
        let f = file(vec![value_decl(
            DeclToken::Var,
            false,
            Some(&["// Pair."]),
            vec![value(&["A", "B"], None, None)],
        )]);
        let fi = extract(&f, "");
        assert_eq!(names(&fi), vec!["A", "B"]);
        assert!(fi.declarations.iter().all(|d| d.multi_name && d.kind == DeclKind::Var));
        assert!(fi.declarations.iter().all(|d| d.doc.is_some()));
    }

    #[test]
    fn grouped_values_share_parent_doc() {
        let f = file(vec![value_decl(
            DeclToken::Const,
            true,
            Some(&["// Group doc."]),
            vec![
                value(&["A"], Some(&["// A doc."]), None),
                value(&["b", "c"], None, None),
            ],
        )]);
        let fi = extract(&f, "");
        assert_eq!(names(&fi), vec!["A", "b", "c"]);
        assert_eq!(fi.parent_docs.len(), 1);
        assert!(fi.declarations.iter().all(|d| d.parent_doc == Some(0)));
        assert!(!fi.declarations[0].multi_name);
        assert!(fi.declarations[1].multi_name);
        assert!(fi.declarations[1].doc.is_none());
        assert_eq!(
            fi.parent_doc(&fi.declarations[2]).map(|b| b.text.as_str()),
            Some("Group doc.\n")
        );
    }

    #[test]
    fn blank_identifier_is_skipped() {
        let f = file(vec![value_decl(
            DeclToken::Var,
            false,
            None,
            vec![value(&["_"], None, None)],
        )]);
        assert!(extract(&f, "").declarations.is_empty());
    }

    // --- types ---

    #[test]
    fn type_alias_detection() {
        let f = file(vec![Decl::Gen(GenDecl {
            doc: None,
            token: DeclToken::Type,
            lparen: Some(Pos::default()),
            specs: vec![
                Spec::Type(TypeSpec {
                    doc: doc(&["// T is defined."]),
                    name: ident("T"),
                    assign: None,
                    comment: None,
                }),
                Spec::Type(TypeSpec {
                    doc: None,
                    name: ident("U"),
                    assign: Some(Pos::default()),
                    comment: None,
                }),
            ],
            pos: Pos::default(),
        })]);
        let fi = extract(&f, "");
        assert!(!fi.declarations[0].is_type_alias);
        assert!(fi.declarations[1].is_type_alias);
        assert!(fi.parent_docs.is_empty());
    }

    // --- funcs ---

    #[test]
    fn methods_on_unexported_receivers() {
        let f = file(vec![
            Decl::Func(FuncDecl {
                doc: None,
                recv: Some(Expr::Star {
                    x: Box::new(Expr::Ident(ident("server"))),
                }),
                name: ident("Run"),
            }),
            Decl::Func(FuncDecl {
                doc: None,
                recv: Some(Expr::Ident(ident("Server"))),
                name: ident("Stop"),
            }),
            Decl::Func(FuncDecl {
                doc: None,
                recv: None,
                name: ident("New"),
            }),
        ]);
        let fi = extract(&f, "");
        assert_eq!(fi.declarations[0].kind, DeclKind::Method);
        assert!(!fi.declarations[0].is_exported());
        assert!(fi.declarations[1].is_exported());
        assert_eq!(fi.declarations[2].kind, DeclKind::Func);
    }

    #[test]
    fn bad_declarations_are_recorded() {
        let f = file(vec![Decl::Bad(BadDecl { pos: Pos::new(3, 1, 4) })]);
        let fi = extract(&f, "");
        assert_eq!(fi.declarations[0].kind, DeclKind::Bad);
        assert!(fi.declarations[0].name.is_empty());
    }

    // --- directives ---

    #[test]
    fn declaration_directives_merge_own_and_parent() {
        let f = file(vec![value_decl(
            DeclToken::Const,
            true,
            Some(&["// Group.", "//godoclint:disable max-len"]),
            vec![value(&["A"], Some(&["// A.", "//godoclint:disable require-doc"]), None)],
        )]);
        let fi = extract(&f, "");
        let d = &fi.declarations[0];
        assert!(d.is_disabled("max-len"));
        assert!(d.is_disabled("require-doc"));
        assert!(!d.is_disabled("pkg-doc"));
        assert!(d.doc.as_ref().is_some_and(|b| b.disabled.is_disabled("require-doc")));
        assert!(d.doc.as_ref().is_some_and(|b| !b.disabled.is_disabled("max-len")));
    }

    #[test]
    fn file_directives_come_from_orphan_blocks() {
        let content = concat!(
            "// Package foo.\npackage foo\n\n//godoclint:disable max-len\n\n",
            "// Foo.\n//godoclint:disable require-doc\nfunc Foo() {}\n",
        );
        let fi = extract(&file(vec![]), content);
        assert!(fi.disabled.is_disabled("max-len"));
        assert!(!fi.disabled.is_disabled("require-doc"));

        let fi = extract(&file(vec![]), "package foo\n\n//godoclint:disable\n");
        assert!(fi.disabled.all);
    }

    #[test]
    fn test_file_detection() {
        assert!(is_test_file(std::path::Path::new("foo/foo_test.go")));
        assert!(!is_test_file(std::path::Path::new("foo/foo.go")));
        assert!(!is_test_file(std::path::Path::new("foo/test.go")));
    }
}
