//! Per-rule option knobs.
//!
//! Config files carry options as a flat table keyed `"rule/option"`; every
//! key is optional there. [`RuleOptions`] is the resolved, fully populated
//! form handed to rules.

use serde::{Deserialize, Serialize};

/// Options as written in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct PlainRuleOptions {
    #[serde(rename = "max-len/length", default, skip_serializing_if = "Option::is_none")]
    pub max_len_length: Option<usize>,
    #[serde(rename = "max-len/include-tests", default, skip_serializing_if = "Option::is_none")]
    pub max_len_include_tests: Option<bool>,
    #[serde(rename = "max-len/ignore-patterns", default, skip_serializing_if = "Option::is_none")]
    pub max_len_ignore_patterns: Option<Vec<String>>,
    #[serde(rename = "pkg-doc/include-tests", default, skip_serializing_if = "Option::is_none")]
    pub pkg_doc_include_tests: Option<bool>,
    #[serde(rename = "pkg-doc/start-with", default, skip_serializing_if = "Option::is_none")]
    pub pkg_doc_start_with: Option<String>,
    #[serde(
        rename = "single-pkg-doc/include-tests",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub single_pkg_doc_include_tests: Option<bool>,
    #[serde(
        rename = "require-pkg-doc/include-tests",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub require_pkg_doc_include_tests: Option<bool>,
    #[serde(rename = "require-doc/include-tests", default, skip_serializing_if = "Option::is_none")]
    pub require_doc_include_tests: Option<bool>,
    #[serde(
        rename = "require-doc/ignore-exported",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub require_doc_ignore_exported: Option<bool>,
    #[serde(
        rename = "require-doc/ignore-unexported",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub require_doc_ignore_unexported: Option<bool>,
    #[serde(
        rename = "start-with-name/include-tests",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_with_name_include_tests: Option<bool>,
    #[serde(
        rename = "start-with-name/include-unexported",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub start_with_name_include_unexported: Option<bool>,
    #[serde(rename = "start-with-name/pattern", default, skip_serializing_if = "Option::is_none")]
    pub start_with_name_pattern: Option<String>,
    #[serde(
        rename = "require-stdlib-doclink/include-tests",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub require_stdlib_doclink_include_tests: Option<bool>,
    #[serde(
        rename = "no-unused-link/include-tests",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub no_unused_link_include_tests: Option<bool>,
    #[serde(rename = "deprecated/include-tests", default, skip_serializing_if = "Option::is_none")]
    pub deprecated_include_tests: Option<bool>,
}

/// Resolved rule options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[allow(missing_docs, clippy::struct_excessive_bools)]
pub struct RuleOptions {
    pub max_len_length: usize,
    pub max_len_include_tests: bool,
    pub max_len_ignore_patterns: Vec<String>,
    pub pkg_doc_include_tests: bool,
    pub pkg_doc_start_with: String,
    pub single_pkg_doc_include_tests: bool,
    pub require_pkg_doc_include_tests: bool,
    pub require_doc_include_tests: bool,
    pub require_doc_ignore_exported: bool,
    pub require_doc_ignore_unexported: bool,
    pub start_with_name_include_tests: bool,
    pub start_with_name_include_unexported: bool,
    pub start_with_name_pattern: String,
    pub require_stdlib_doclink_include_tests: bool,
    pub no_unused_link_include_tests: bool,
    pub deprecated_include_tests: bool,
}

macro_rules! transfer {
    ($target:expr, $source:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$source.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

impl RuleOptions {
    /// Overwrites every option that `source` defines.
    pub fn transfer(&mut self, source: &PlainRuleOptions) {
        transfer!(
            self,
            source,
            max_len_length,
            max_len_include_tests,
            max_len_ignore_patterns,
            pkg_doc_include_tests,
            pkg_doc_start_with,
            single_pkg_doc_include_tests,
            require_pkg_doc_include_tests,
            require_doc_include_tests,
            require_doc_ignore_exported,
            require_doc_ignore_unexported,
            start_with_name_include_tests,
            start_with_name_include_unexported,
            start_with_name_pattern,
            require_stdlib_doclink_include_tests,
            no_unused_link_include_tests,
            deprecated_include_tests,
        );
    }
}
