//! End-to-end tests running the built-in rules over small Go packages.

mod support;

use godoc_lint_core::ast::DeclToken;
use godoc_lint_core::AnalyzerError;
use godoc_lint_rules::default_registry;
use support::{lint, summary, try_lint, GoFile};

/// Config enabling only `rules`, followed by `options` lines.
fn only(rules: &[&str], options: &[&str]) -> String {
    let enable: Vec<String> = rules.iter().map(|r| format!("{r:?}")).collect();
    let mut toml = format!("default = \"none\"\nenable = [{}]\n", enable.join(", "));
    if !options.is_empty() {
        toml.push_str("\n[options]\n");
        toml.push_str(&options.join("\n"));
        toml.push('\n');
    }
    toml
}

// --- pkg-doc ---

#[test]
fn pkg_doc_prefix() {
    let files = vec![
        GoFile::new("foo/foo.go", "// foo does things.\npackage foo\n"),
        GoFile::new("bar/bar.go", "// Package bar does things.\npackage bar\n"),
        GoFile::new("baz/baz.go", "// Package bazooka does things.\npackage baz\n"),
        GoFile::new("cmd/tool/main.go", "// Tool does things.\npackage main\n"),
    ];
    let result = lint(files, Some(&only(&["pkg-doc"], &[])));
    assert_eq!(
        summary(&result),
        vec![
            "baz/baz.go:1: [GL001] package godoc should start with \"Package baz \"",
            "foo/foo.go:1: [GL001] package godoc should start with \"Package foo \"",
        ]
    );
}

#[test]
fn pkg_doc_custom_prefix() {
    let files = vec![GoFile::new("foo/foo.go", "// Package foo does things.\npackage foo\n")];
    let config = only(&["pkg-doc"], &["\"pkg-doc/start-with\" = \"The package\""]);
    assert_eq!(
        summary(&lint(files, Some(&config))),
        vec!["foo/foo.go:1: [GL001] package godoc should start with \"The package foo \""]
    );
}

#[test]
fn single_pkg_doc() {
    let files = vec![
        GoFile::new("foo/a.go", "// Package foo is one.\npackage foo\n"),
        GoFile::new("foo/b.go", "// Package foo is two.\npackage foo\n"),
        GoFile::new("foo/c.go", "package foo\n"),
        GoFile::new("foo/a_test.go", "// Package foo is tested.\npackage foo\n"),
        GoFile::new("bar/bar.go", "// Package bar is alone.\npackage bar\n"),
    ];
    let result = lint(files, Some(&only(&["single-pkg-doc"], &[])));
    assert_eq!(
        summary(&result),
        vec![
            "foo/a.go:1: [GL002] package should have a single godoc (2 found)",
            "foo/b.go:1: [GL002] package should have a single godoc (2 found)",
        ]
    );
}

#[test]
fn require_pkg_doc() {
    let files = || {
        vec![
            GoFile::new("foo/a.go", "package foo\n"),
            GoFile::new("foo/b.go", "package foo\n"),
            GoFile::new("bar/bar.go", "package bar\n"),
            GoFile::new("bar/bar_test.go", "// Package bar is tested.\npackage bar\n"),
            GoFile::new("baz/baz.go", "// Package baz is fine.\npackage baz\n"),
        ]
    };

    let result = lint(files(), Some(&only(&["require-pkg-doc"], &[])));
    assert_eq!(
        summary(&result),
        vec![
            "bar/bar.go:1: [GL003] package should have a godoc",
            "foo/a.go:1: [GL003] package should have a godoc",
        ]
    );
    assert_eq!(result.violations[1].location.column, 9);

    let config = only(&["require-pkg-doc"], &["\"require-pkg-doc/include-tests\" = true"]);
    assert_eq!(
        summary(&lint(files(), Some(&config))),
        vec!["foo/a.go:1: [GL003] package should have a godoc"]
    );
}

// --- start-with-name ---

const START_WITH_NAME_SRC: &str = "\
package foo

// Returns a thing.
func NewThing() {}

// A Thing is a thing.
type Thing struct{}

// Deprecated: use NewThing.
func Old() {}

// Helps out.
func helper() {}

// Pair of values.
var A, B = 1, 2

// the Reset method resets.
func (t *Thing) Reset() {}
";

fn start_with_name_file() -> GoFile {
    GoFile::new("foo/foo.go", START_WITH_NAME_SRC)
        .func(4, "NewThing")
        .typ(7, "Thing")
        .func(10, "Old")
        .func(13, "helper")
        .value(DeclToken::Var, 16, &["A", "B"])
        .method(19, "Thing", "Reset")
}

#[test]
fn start_with_name() {
    let result = lint(vec![start_with_name_file()], Some(&only(&["start-with-name"], &[])));
    assert_eq!(
        summary(&result),
        vec!["foo/foo.go:3: [GL004] godoc should start with symbol name (\"NewThing\")"]
    );
}

#[test]
fn start_with_name_include_unexported() {
    let config = only(&["start-with-name"], &["\"start-with-name/include-unexported\" = true"]);
    let result = lint(vec![start_with_name_file()], Some(&config));
    assert_eq!(
        summary(&result),
        vec![
            "foo/foo.go:3: [GL004] godoc should start with symbol name (\"NewThing\")",
            "foo/foo.go:12: [GL004] godoc should start with symbol name (\"helper\")",
        ]
    );
}

#[test]
fn start_with_name_invalid_pattern() {
    let config = only(&["start-with-name"], &["\"start-with-name/pattern\" = \"(unclosed %\""]);

    let err = try_lint(default_registry(), vec![start_with_name_file()], Some(&config), true)
        .unwrap_err();
    assert!(matches!(err, AnalyzerError::Rule { ref rule, .. } if rule == "start-with-name"));

    let result = try_lint(default_registry(), vec![start_with_name_file()], Some(&config), false)
        .unwrap();
    assert!(result.violations.is_empty());
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].rule, "start-with-name");
}

const DEPRECATED_LEAD_SRC: &str = "\
package foo

// Kept for compatibility.
//
// Deprecated:
// use NewThing instead.
func Old() {}

// Deprecated:use NewThing.
func Older() {}
";

#[test]
fn start_with_name_skips_any_deprecated_paragraph() {
    let file = GoFile::new("foo/foo.go", DEPRECATED_LEAD_SRC)
        .func(7, "Old")
        .func(10, "Older");
    let result = lint(vec![file], Some(&only(&["start-with-name"], &[])));
    assert!(result.violations.is_empty(), "{:?}", summary(&result));

    // The note format is still flagged by its own rule.
    let file = GoFile::new("foo/foo.go", DEPRECATED_LEAD_SRC)
        .func(7, "Old")
        .func(10, "Older");
    let result = lint(vec![file], Some(&only(&["deprecated"], &[])));
    assert_eq!(result.violations.len(), 2);
}

// --- require-doc ---

const REQUIRE_DOC_SRC: &str = "\
package foo

func Exported() {}

func unexported() {}

const (
\tA = 1 // A is one.
\tB = 2
)

// Group doc.
var (
\tC = 1
)

// Server serves.
type Server struct{}

//godoclint:disable require-doc
func Quiet() {}

// Run runs.
func (s *Server) Run() {}

type (
\t// Alias is documented.
\tAlias = Server
)

func (
";

fn require_doc_file() -> GoFile {
    GoFile::new("foo/foo.go", REQUIRE_DOC_SRC)
        .func(3, "Exported")
        .func(5, "unexported")
        .group(DeclToken::Const, 7, &[(8, &["A"]), (9, &["B"])])
        .group(DeclToken::Var, 13, &[(14, &["C"])])
        .typ(18, "Server")
        .func(21, "Quiet")
        .method(24, "Server", "Run")
        .group(DeclToken::Type, 26, &[(28, &["Alias"])])
        .bad(31)
}

#[test]
fn require_doc() {
    let result = lint(vec![require_doc_file()], Some(&only(&["require-doc"], &[])));
    assert_eq!(
        summary(&result),
        vec![
            "foo/foo.go:3: [GL005] symbol should have a godoc (\"Exported\")",
            "foo/foo.go:9: [GL005] symbol should have a godoc (\"B\")",
        ]
    );
    assert_eq!(result.violations[1].location.column, 2);
    assert_eq!(result.violations[1].location.length, 1);
}

#[test]
fn require_doc_unexported() {
    let config = only(&["require-doc"], &["\"require-doc/ignore-unexported\" = false"]);
    assert_eq!(
        summary(&lint(vec![require_doc_file()], Some(&config))),
        vec![
            "foo/foo.go:3: [GL005] symbol should have a godoc (\"Exported\")",
            "foo/foo.go:5: [GL005] symbol should have a godoc (\"unexported\")",
            "foo/foo.go:9: [GL005] symbol should have a godoc (\"B\")",
        ]
    );

    let config = only(&["require-doc"], &["\"require-doc/ignore-exported\" = true"]);
    assert!(lint(vec![require_doc_file()], Some(&config)).violations.is_empty());
}

#[test]
fn require_doc_skips_tests_by_default() {
    let files = || {
        vec![
            GoFile::new("foo/foo.go", "// Package foo is fine.\npackage foo\n"),
            GoFile::new(
                "foo/foo_test.go",
                "// Package foo is tested.\npackage foo\n\nfunc TestThing() {}\n",
            )
            .func(4, "TestThing"),
        ]
    };
    assert!(lint(files(), None).violations.is_empty());

    let config = "[options]\n\"require-doc/include-tests\" = true\n";
    assert_eq!(
        summary(&lint(files(), Some(config))),
        vec!["foo/foo_test.go:4: [GL005] symbol should have a godoc (\"TestThing\")"]
    );
}

// --- deprecated ---

const DEPRECATED_SRC: &str = "\
package foo

// Foo is old.
//
// deprecated: use Bar.
func Foo() {}

// Bar is new.
//
// Deprecated: use Baz.
func Bar() {}

// baz is old.
//
// DEPRECATED: nope.
func baz() {}

// Limits.
//
// Deprecated - gone.
const (
\t// Max is the max.
\t//
\t// deprecated: too small.
\tMax = 10
)
";

#[test]
fn deprecated() {
    let file = GoFile::new("foo/foo.go", DEPRECATED_SRC)
        .func(6, "Foo")
        .func(11, "Bar")
        .func(16, "baz")
        .group(DeclToken::Const, 21, &[(25, &["Max"])]);
    assert_eq!(
        summary(&lint(vec![file], Some(&only(&["deprecated"], &[])))),
        vec![
            "foo/foo.go:3: [GL006] deprecation note should be formatted as \"Deprecated: \"",
            "foo/foo.go:22: [GL006] deprecation note should be formatted as \"Deprecated: \"",
        ]
    );
}

// --- max-len ---

const MAX_LEN_SRC: &str = "\
// Package foo is a package with long docs.
package foo

// Short is short.
func Short() {}

// Long is a function with a long line.
//
//\tcode lines are never measured at all
func Long() {}
";

const GENERATED_SRC: &str = "\
package foo

//godoclint:disable max-len

// Generated is a generated function with long docs.
func Generated() {}
";

fn max_len_files() -> Vec<GoFile> {
    vec![
        GoFile::new("foo/foo.go", MAX_LEN_SRC).func(5, "Short").func(10, "Long"),
        GoFile::new("foo/gen.go", GENERATED_SRC).func(6, "Generated"),
    ]
}

#[test]
fn max_len() {
    let config = only(&["max-len"], &["\"max-len/length\" = 20"]);
    assert_eq!(
        summary(&lint(max_len_files(), Some(&config))),
        vec![
            "foo/foo.go:1: [GL007] godoc line is too long (40 > 20)",
            "foo/foo.go:7: [GL007] godoc line is too long (36 > 20)",
        ]
    );
}

#[test]
fn max_len_ignore_patterns() {
    let config = only(
        &["max-len"],
        &["\"max-len/length\" = 20", "\"max-len/ignore-patterns\" = [\"^Long \"]"],
    );
    assert_eq!(
        summary(&lint(max_len_files(), Some(&config))),
        vec!["foo/foo.go:1: [GL007] godoc line is too long (40 > 20)"]
    );
}

#[test]
fn max_len_default_limit() {
    assert!(lint(max_len_files(), Some(&only(&["max-len"], &[]))).violations.is_empty());
}

// --- no-unused-link ---

const LINKS_SRC: &str = "\
package foo

// Foo follows [RFC 1].
//
// [RFC 1]: https://rfc.example/1
// [RFC 2]: https://rfc.example/2
func Foo() {}
";

#[test]
fn no_unused_link() {
    let file = GoFile::new("foo/foo.go", LINKS_SRC).func(7, "Foo");
    assert_eq!(
        summary(&lint(vec![file], Some(&only(&["no-unused-link"], &[])))),
        vec!["foo/foo.go:3: [GL008] godoc has unused link (\"RFC 2\")"]
    );
}

// --- require-stdlib-doclink ---

const ENCODE_SRC: &str = "\
package foo

import \"encoding/json\"

// Encode writes v with a json.Encoder and *json.Encoder.
//
// It returns io.EOF at the end, see [json.Decoder].
func Encode() {}
";

#[test]
fn stdlib_doclink() {
    let file = GoFile::new("foo/foo.go", ENCODE_SRC)
        .import(3, None, "encoding/json")
        .func(8, "Encode");
    let result = lint(vec![file], Some(&only(&["require-stdlib-doclink"], &[])));
    assert_eq!(
        summary(&result),
        vec![
            concat!(
                "foo/foo.go:5: [GL009] text \"io.EOF\" should be replaced with \"[io.EOF]\" ",
                "to link to stdlib variable"
            ),
            concat!(
                "foo/foo.go:5: [GL009] text \"json.Encoder\" should be replaced with ",
                "\"[json.Encoder]\" to link to stdlib type (2 instances)"
            ),
        ]
    );
    let suggestion = result.violations[1].suggestion.as_ref().unwrap();
    assert_eq!(suggestion.message, "replace json.Encoder with [json.Encoder]");
}

#[test]
fn stdlib_doclink_ambiguous_alias() {
    let a = GoFile::new(
        "foo/a.go",
        concat!(
            "package foo\n\nimport blah \"encoding/json\"\n\n",
            "// Encode uses a blah.Encoder and bytes.Buffer.\nfunc Encode() {}\n",
        ),
    )
    .import(3, Some("blah"), "encoding/json")
    .func(6, "Encode");
    let b = GoFile::new("foo/b.go", "package foo\n\nimport blah \"fmt\"\n")
        .import(3, Some("blah"), "fmt");

    assert_eq!(
        summary(&lint(vec![a, b], Some(&only(&["require-stdlib-doclink"], &[])))),
        vec![concat!(
            "foo/a.go:5: [GL009] text \"bytes.Buffer\" should be replaced with ",
            "\"[bytes.Buffer]\" to link to stdlib type"
        )]
    );
}

// --- whole rule set ---

const CLEAN_SRC: &str = "\
// Package foo does things.
package foo

import \"encoding/json\"

// Encoder wraps a [json.Encoder].
type Encoder struct{}

// Options for the encoder.
const (
\t// Indent is the default indent.
\tIndent = \"  \"
)

// New returns an [Encoder].
func New() *Encoder { return nil }
";

#[test]
fn clean_package_passes_every_rule() {
    let file = GoFile::new("foo/foo.go", CLEAN_SRC)
        .import(4, None, "encoding/json")
        .typ(7, "Encoder")
        .group(DeclToken::Const, 10, &[(12, &["Indent"])])
        .func(16, "New");
    let result = lint(vec![file], None);
    assert!(result.violations.is_empty(), "{:?}", summary(&result));
    assert_eq!(result.files_checked, 1);
}

#[test]
fn disabled_rules_are_skipped() {
    let files =
        vec![GoFile::new("foo/foo.go", "package foo\n\nfunc Exported() {}\n").func(3, "Exported")];
    assert_eq!(
        summary(&lint(files, Some("disable = [\"require-doc\"]\n"))),
        vec!["foo/foo.go:1: [GL003] package should have a godoc"]
    );
}

#[test]
fn disable_directive_on_declaration() {
    let src = "\
// Package foo is fine.
package foo

// Returns stuff that is not the name.
//godoclint:disable
func Stuff() {}
";
    let file = GoFile::new("foo/foo.go", src).func(6, "Stuff");
    assert!(lint(vec![file], None).violations.is_empty());
}

#[test]
fn excluded_paths_are_skipped() {
    let files = vec![
        GoFile::new("gen/gen.go", "package gen\n\nfunc Generated() {}\n").func(3, "Generated"),
        GoFile::new("foo/foo.go", "// Package foo is fine.\npackage foo\n"),
    ];
    let result = lint(files, Some("exclude = [\"^gen/\"]\n"));
    assert!(result.violations.is_empty(), "{:?}", summary(&result));
}
