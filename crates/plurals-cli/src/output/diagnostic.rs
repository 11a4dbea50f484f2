//! Miette diagnostics for rule files.
//!
//! Fields are read by the miette derive macros, not directly by code.

use std::path::Path;

use miette::{Diagnostic, NamedSource, SourceSpan};
use plurals::{BuildError, ParseError};
use thiserror::Error;

/// A rule that failed to parse, shown against its own text.
#[derive(Debug, Error, Diagnostic)]
#[error("malformed plural rule: {message}")]
#[diagnostic(code(plurals::rule_syntax))]
pub struct RuleDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

/// A rule file that is not valid record JSON.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid rule file: {message}")]
#[diagnostic(code(plurals::rule_file))]
pub struct RuleFileDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,
}

impl RuleDiagnostic {
    /// Create a diagnostic for a rule of `path` that failed to compile.
    ///
    /// Returns `None` for build errors that are not tied to a rule's text.
    pub fn from_build_error(path: &Path, err: &BuildError) -> Option<Self> {
        let BuildError::RuleCompilation {
            locales,
            category,
            source,
            ..
        } = err
        else {
            return None;
        };
        Some(Self::from_parse_error(
            format!("{} [{locales}] {category}", path.display()),
            source,
        ))
    }

    /// Create a diagnostic pointing at the offending token of the rule.
    pub fn from_parse_error(name: String, err: &ParseError) -> Self {
        let rule = err.rule();
        let offset = err.offset().min(rule.len());
        // Highlight the whole token; an error at the end of the rule gets an empty span.
        let length = rule[offset..]
            .find(char::is_whitespace)
            .unwrap_or(rule.len() - offset);
        let help = match err {
            ParseError::UnknownOperand { .. } => None,
            ParseError::Malformed { .. } => Some(
                "rules have the form `operand [% modulus] (= | !=) ranges`, joined by `and`/`or`"
                    .to_string(),
            ),
        };

        RuleDiagnostic {
            src: NamedSource::new(name, rule.to_string()),
            span: (offset, length).into(),
            message: err.message(),
            help,
        }
    }
}

impl RuleFileDiagnostic {
    /// Create a diagnostic from a JSON error with source context.
    pub fn from_json_error(path: &Path, content: &str, err: &serde_json::Error) -> Self {
        // Convert line:column to byte offset.
        let offset = content
            .lines()
            .take(err.line().saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + err.column().saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        RuleFileDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message: err.to_string(),
        }
    }
}
