//! Builds parsed files from Go source text for rule tests.
//!
//! The parser is not part of the linter, so tests describe the declarations
//! by line number and the builder picks up names, doc comments and trailing
//! comments, with their positions, from the text.

#![allow(dead_code)]

use godoc_lint_core::ast::{
    BadDecl, Comment, CommentGroup, Decl, DeclToken, Expr, FuncDecl, GenDecl, Ident, ImportSpec,
    Pos, SourceFile, Spec, TypeSpec, ValueSpec,
};
use godoc_lint_core::{
    Analyzer, AnalyzerError, ConfigBuilder, LintResult, MemoryReader, PlainConfig, Registry,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const BASE: &str = "/repo";

pub struct GoFile {
    path: PathBuf,
    content: String,
    decls: Vec<Decl>,
}

impl GoFile {
    pub fn new(path: &str, content: &str) -> Self {
        Self {
            path: Path::new(BASE).join(path),
            content: content.to_string(),
            decls: Vec::new(),
        }
    }

    fn line(&self, n: usize) -> &str {
        self.content.lines().nth(n - 1).unwrap_or_else(|| panic!("no line {n}"))
    }

    fn pos(&self, line: usize, column: usize) -> Pos {
        let offset: usize = self.content.split_inclusive('\n').take(line - 1).map(str::len).sum();
        Pos::new(offset + column - 1, line, column)
    }

    fn ident(&self, line: usize, name: &str) -> Ident {
        let text = self.line(line);
        let col = find_word(text, name)
            .unwrap_or_else(|| panic!("{name:?} not on line {line}: {text:?}"));
        Ident::new(name, self.pos(line, col + 1))
    }

    fn doc_above(&self, line: usize) -> Option<CommentGroup> {
        let mut comments = Vec::new();
        let mut n = line;
        while n > 1 {
            n -= 1;
            let text = self.line(n);
            let trimmed = text.trim_start();
            if !trimmed.starts_with("//") {
                break;
            }
            let col = text.len() - trimmed.len() + 1;
            comments.push(Comment::new(trimmed, self.pos(n, col)));
        }
        comments.reverse();
        (!comments.is_empty()).then(|| CommentGroup::new(comments))
    }

    fn trailing(&self, line: usize) -> Option<CommentGroup> {
        let text = self.line(line);
        if text.trim_start().starts_with("//") {
            return None;
        }
        text.find("//")
            .map(|col| CommentGroup::new(vec![Comment::new(&text[col..], self.pos(line, col + 1))]))
    }

    /// `func Name(...)` on `line`.
    pub fn func(mut self, line: usize, name: &str) -> Self {
        self.decls.push(Decl::Func(FuncDecl {
            doc: self.doc_above(line),
            recv: None,
            name: self.ident(line, name),
        }));
        self
    }

    /// `func (r *Recv) Name(...)` on `line`.
    pub fn method(mut self, line: usize, recv: &str, name: &str) -> Self {
        let base = Expr::Ident(self.ident(line, recv));
        let recv = if self.line(line).contains(&format!("*{recv}")) {
            Expr::Star { x: Box::new(base) }
        } else {
            base
        };
        self.decls.push(Decl::Func(FuncDecl {
            doc: self.doc_above(line),
            recv: Some(recv),
            name: self.ident(line, name),
        }));
        self
    }

    /// Ungrouped `const`/`var` declaring `names` on `line`.
    pub fn value(mut self, token: DeclToken, line: usize, names: &[&str]) -> Self {
        let spec = self.value_spec(line, names, None);
        self.decls.push(Decl::Gen(GenDecl {
            doc: self.doc_above(line),
            token,
            lparen: None,
            specs: vec![spec],
            pos: self.pos(line, 1),
        }));
        self
    }

    /// Ungrouped `type` declaration on `line`.
    pub fn typ(mut self, line: usize, name: &str) -> Self {
        let spec = self.type_spec(line, name, None);
        self.decls.push(Decl::Gen(GenDecl {
            doc: self.doc_above(line),
            token: DeclToken::Type,
            lparen: None,
            specs: vec![spec],
            pos: self.pos(line, 1),
        }));
        self
    }

    /// Parenthesized declaration opening on `open` with one spec per member.
    pub fn group(mut self, token: DeclToken, open: usize, members: &[(usize, &[&str])]) -> Self {
        let specs = members
            .iter()
            .map(|(line, names)| {
                let doc = self.doc_above(*line);
                match token {
                    DeclToken::Type => self.type_spec(*line, names[0], doc),
                    _ => self.value_spec(*line, names, doc),
                }
            })
            .collect();
        self.decls.push(Decl::Gen(GenDecl {
            doc: self.doc_above(open),
            token,
            lparen: Some(self.pos(open, self.line(open).find('(').map_or(1, |c| c + 1))),
            specs,
            pos: self.pos(open, 1),
        }));
        self
    }

    /// `import alias "path"` on `line`.
    pub fn import(mut self, line: usize, alias: Option<&str>, path: &str) -> Self {
        let name = alias.map(|a| self.ident(line, a));
        self.decls.push(Decl::Gen(GenDecl {
            doc: None,
            token: DeclToken::Import,
            lparen: None,
            specs: vec![Spec::Import(ImportSpec {
                name,
                path: path.to_string(),
            })],
            pos: self.pos(line, 1),
        }));
        self
    }

    /// Malformed declaration starting on `line`.
    pub fn bad(mut self, line: usize) -> Self {
        self.decls.push(Decl::Bad(BadDecl { pos: self.pos(line, 1) }));
        self
    }

    fn value_spec(&self, line: usize, names: &[&str], doc: Option<CommentGroup>) -> Spec {
        Spec::Value(ValueSpec {
            doc,
            names: names.iter().map(|n| self.ident(line, n)).collect(),
            comment: self.trailing(line),
        })
    }

    fn type_spec(&self, line: usize, name: &str, doc: Option<CommentGroup>) -> Spec {
        let text = self.line(line);
        let assign = find_word(text, name).and_then(|col| {
            text[col + name.len()..]
                .trim_start()
                .starts_with('=')
                .then(|| self.pos(line, 1))
        });
        Spec::Type(TypeSpec {
            doc,
            name: self.ident(line, name),
            assign,
            comment: self.trailing(line),
        })
    }

    pub fn build(self) -> (SourceFile, String) {
        let line = self
            .content
            .lines()
            .position(|l| l.starts_with("package "))
            .map(|i| i + 1)
            .unwrap_or_else(|| panic!("no package clause in {}", self.path.display()));
        let name = self.line(line)["package ".len()..].trim().to_string();
        let mut file = SourceFile::new(&self.path, Ident::new(name, self.pos(line, 9)));
        file.doc = self.doc_above(line);
        file.decls = self.decls;
        (file, self.content)
    }
}

fn find_word(text: &str, word: &str) -> Option<usize> {
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    text.match_indices(word).map(|(i, _)| i).find(|&i| {
        let before = text[..i].chars().next_back();
        let after = text[i + word.len()..].chars().next();
        !before.is_some_and(is_ident) && !after.is_some_and(is_ident)
    })
}

/// Runs the built-in rules over `files` with an optional TOML config at the
/// repository root.
pub fn lint(files: Vec<GoFile>, config: Option<&str>) -> LintResult {
    lint_with(godoc_lint_rules::default_registry(), files, config)
}

pub fn lint_with(registry: Registry, files: Vec<GoFile>, config: Option<&str>) -> LintResult {
    try_lint(registry, files, config, true).expect("analysis succeeds")
}

pub fn try_lint(
    registry: Registry,
    files: Vec<GoFile>,
    config: Option<&str>,
    fail_fast: bool,
) -> Result<LintResult, AnalyzerError> {
    let mut reader = MemoryReader::new();
    let mut sources = Vec::new();
    for file in files {
        let (source, content) = file.build();
        reader.insert(source.path.clone(), content);
        sources.push(source);
    }

    let mut builder = ConfigBuilder::new(BASE, registry.covered().clone());
    if let Some(toml) = config {
        let plain =
            PlainConfig::from_toml(toml, Path::new("test.toml")).expect("test config parses");
        builder = builder.with_base_plain_config(plain);
    }

    Analyzer::builder()
        .config(Arc::new(builder))
        .registry(registry)
        .reader(reader)
        .fail_fast(fail_fast)
        .build()?
        .analyze(sources)
}

/// `file:line: [code] message` for every violation, file names relative to
/// the repository root.
pub fn summary(result: &LintResult) -> Vec<String> {
    result
        .violations
        .iter()
        .map(|v| {
            let file = v.location.file.strip_prefix(BASE).unwrap_or(&v.location.file);
            format!("{}:{}: [{}] {}", file.display(), v.location.line, v.code, v.message)
        })
        .collect()
}
