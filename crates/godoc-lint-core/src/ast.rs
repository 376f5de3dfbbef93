//! Input model for parsed Go source files.
//!
//! Parsing is owned by the harness; it hands over one [`SourceFile`] per
//! compilation unit. The model mirrors the subset of the Go syntax tree that
//! documentation checks need and deserializes from JSON via `serde`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A position in a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    /// Byte offset from the start of the file.
    pub offset: usize,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, in bytes).
    pub column: usize,
}

impl Pos {
    /// Creates a new position.
    #[must_use]
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

/// An identifier with its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ident {
    /// Identifier text.
    pub name: String,
    /// Position of the first character.
    #[serde(default)]
    pub pos: Pos,
}

impl Ident {
    /// Creates a new identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, pos: Pos) -> Self {
        Self {
            name: name.into(),
            pos,
        }
    }

    /// Returns true if the identifier starts with an upper-case letter.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }

    /// Returns true for the blank identifier `_`.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// Returns true if `name` is exported under Go's casing convention.
#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// A single `//` or `/* */` comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Raw comment text, including the comment markers.
    pub text: String,
    /// Position of the comment start.
    #[serde(default)]
    pub pos: Pos,
}

impl Comment {
    /// Creates a new comment.
    #[must_use]
    pub fn new(text: impl Into<String>, pos: Pos) -> Self {
        Self {
            text: text.into(),
            pos,
        }
    }
}

/// A run of comments with no blank line or other token in between.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentGroup {
    /// Comments in source order.
    pub list: Vec<Comment>,
}

impl CommentGroup {
    /// Creates a comment group from its comments.
    #[must_use]
    pub fn new(list: Vec<Comment>) -> Self {
        Self { list }
    }

    /// Position of the first comment.
    #[must_use]
    pub fn pos(&self) -> Pos {
        self.list.first().map(|c| c.pos).unwrap_or_default()
    }

    /// Byte offset just past the last comment.
    #[must_use]
    pub fn end(&self) -> usize {
        self.list
            .last()
            .map_or(0, |c| c.pos.offset + c.text.len())
    }

    /// Raw comment lines joined with `\n`, markers included.
    #[must_use]
    pub fn raw(&self) -> String {
        self.list
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns the documentation text of the group.
    ///
    /// Comment markers are removed, along with one leading space per `//` line.
    /// Tool directives (`//go:generate`, `//godoclint:disable`, `//line ...`)
    /// are dropped. Leading and trailing blank lines are removed and runs of
    /// blank lines collapse into one. A non-empty result ends with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        let mut lines: Vec<String> = Vec::with_capacity(self.list.len());
        for comment in &self.list {
            let raw = comment.text.as_str();
            let body = if let Some(rest) = raw.strip_prefix("//") {
                if let Some(spaced) = rest.strip_prefix(' ') {
                    spaced
                } else if is_directive(rest) {
                    continue;
                } else {
                    rest
                }
            } else if let Some(rest) = raw.strip_prefix("/*") {
                rest.strip_suffix("*/").unwrap_or(rest)
            } else {
                raw
            };
            lines.extend(body.split('\n').map(|l| l.trim_end().to_string()));
        }

        let mut kept: Vec<String> = Vec::with_capacity(lines.len());
        for line in lines {
            if !line.is_empty() || kept.last().is_some_and(|prev| !prev.is_empty()) {
                kept.push(line);
            }
        }
        if kept.last().is_some_and(|last| !last.is_empty()) {
            kept.push(String::new());
        }
        kept.join("\n")
    }
}

/// Reports whether a `//` comment body (markers stripped) is a tool directive.
fn is_directive(body: &str) -> bool {
    if body.starts_with("line ") || body.starts_with("extern ") || body.starts_with("export ") {
        return true;
    }
    let Some(colon) = body.find(':') else {
        return false;
    };
    if colon == 0 || colon + 1 >= body.len() {
        return false;
    }
    body.bytes()
        .take(colon + 2)
        .enumerate()
        .all(|(i, b)| i == colon || b.is_ascii_lowercase() || b.is_ascii_digit())
}

/// A parsed Go source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path of the file as known to the harness.
    pub path: PathBuf,
    /// Package clause name.
    pub package: Ident,
    /// Package documentation comment, if any.
    #[serde(default)]
    pub doc: Option<CommentGroup>,
    /// Top-level declarations in source order.
    #[serde(default)]
    pub decls: Vec<Decl>,
}

impl SourceFile {
    /// Creates an empty source file for the given package.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, package: Ident) -> Self {
        Self {
            path: path.into(),
            package,
            doc: None,
            decls: Vec::new(),
        }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Iterates over all import specs of the file.
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls.iter().flat_map(|d| match d {
            Decl::Gen(gen) if gen.token == DeclToken::Import => gen.specs.as_slice(),
            _ => &[],
        })
        .filter_map(|s| match s {
            Spec::Import(spec) => Some(spec),
            _ => None,
        })
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Decl {
    /// Function or method declaration.
    Func(FuncDecl),
    /// `import`, `const`, `var` or `type` declaration.
    Gen(GenDecl),
    /// Declaration the parser could not make sense of.
    Bad(BadDecl),
}

/// A function or method declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuncDecl {
    /// Doc comment.
    #[serde(default)]
    pub doc: Option<CommentGroup>,
    /// Receiver type for methods.
    #[serde(default)]
    pub recv: Option<Expr>,
    /// Function name.
    pub name: Ident,
}

/// Keyword introducing a generic declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclToken {
    /// `import`
    Import,
    /// `const`
    Const,
    /// `var`
    Var,
    /// `type`
    Type,
}

/// An `import`, `const`, `var` or `type` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenDecl {
    /// Doc comment of the whole declaration.
    #[serde(default)]
    pub doc: Option<CommentGroup>,
    /// Declaration keyword.
    pub token: DeclToken,
    /// Position of `(` for grouped declarations.
    #[serde(default)]
    pub lparen: Option<Pos>,
    /// Specs in source order.
    #[serde(default)]
    pub specs: Vec<Spec>,
    /// Position of the keyword.
    #[serde(default)]
    pub pos: Pos,
}

impl GenDecl {
    /// Returns true for parenthesized declarations.
    #[must_use]
    pub fn is_grouped(&self) -> bool {
        self.lparen.is_some()
    }
}

/// A single spec inside a generic declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Spec {
    /// Constant or variable spec.
    Value(ValueSpec),
    /// Type spec.
    Type(TypeSpec),
    /// Import spec.
    Import(ImportSpec),
}

/// A `const` or `var` spec, e.g. `a, b = 1, 2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueSpec {
    /// Doc comment of the spec (grouped form only).
    #[serde(default)]
    pub doc: Option<CommentGroup>,
    /// Declared names.
    pub names: Vec<Ident>,
    /// Trailing same-line comment.
    #[serde(default)]
    pub comment: Option<CommentGroup>,
}

/// A type spec, e.g. `T U` or `T = U`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    /// Doc comment of the spec (grouped form only).
    #[serde(default)]
    pub doc: Option<CommentGroup>,
    /// Declared type name.
    pub name: Ident,
    /// Position of `=` for alias declarations.
    #[serde(default)]
    pub assign: Option<Pos>,
    /// Trailing same-line comment.
    #[serde(default)]
    pub comment: Option<CommentGroup>,
}

/// An import spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSpec {
    /// Local alias, if one is written.
    #[serde(default)]
    pub name: Option<Ident>,
    /// Unquoted import path.
    pub path: String,
}

/// A malformed declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadDecl {
    /// Start of the malformed region.
    #[serde(default)]
    pub pos: Pos,
}

/// Receiver type expression.
///
/// Only the shapes needed to find a receiver's base type name are modelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Expr {
    /// Plain type name, `T`.
    Ident(Ident),
    /// Pointer type, `*T`.
    Star {
        /// Pointee.
        x: Box<Expr>,
    },
    /// Instantiated generic type, `T[A]` or `T[A, B]`.
    Index {
        /// Generic type.
        x: Box<Expr>,
        /// Type arguments.
        #[serde(default)]
        indices: Vec<Expr>,
    },
    /// Anything else.
    #[serde(other)]
    Other,
}

impl Expr {
    /// Returns the base type identifier of a receiver expression.
    ///
    /// Handles `T`, `*T`, `T[A]`, `*T[A, B]` and their combinations.
    #[must_use]
    pub fn base_ident(&self) -> Option<&Ident> {
        match self {
            Self::Ident(ident) => Some(ident),
            Self::Star { x } | Self::Index { x, .. } => x.base_ident(),
            Self::Other => None,
        }
    }
}
