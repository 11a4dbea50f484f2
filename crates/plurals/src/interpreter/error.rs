//! Error types for building and evaluating plural rule tables.

use strsim::levenshtein;
use thiserror::Error;

use crate::parser::ParseError;
use crate::types::{OperandError, PluralCategory, UnknownCategoryError};

/// Errors that abort building a rule table. No partial table is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A rule failed to parse.
    #[error("failed to compile '{category}' rule for locales [{locales}]: {source}")]
    RuleCompilation {
        locales: String,
        category: PluralCategory,
        rule: String,
        #[source]
        source: ParseError,
    },

    /// A locale code is declared by more than one record, or twice in one record.
    #[error("locale '{locale}' is declared by record {first_record} and record {second_record}")]
    DuplicateLocale {
        locale: String,
        first_record: usize,
        second_record: usize,
    },

    /// A record declares no locales.
    #[error("record {record} declares no locales")]
    EmptyLocales { record: usize },

    /// A record declares the same category twice.
    #[error("category '{category}' is declared twice for locales [{locales}]")]
    DuplicateCategory {
        locales: String,
        category: PluralCategory,
    },

    /// Bundled data named a category outside the six CLDR categories.
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategoryError),
}

impl BuildError {
    /// The parse error behind a rule compilation failure, if any.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            BuildError::RuleCompilation { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Errors returned when selecting a plural category.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The locale has no rules in the table.
    #[error("unknown locale '{locale}'{}", format_suggestions(suggestions))]
    UnknownLocale {
        locale: String,
        suggestions: Vec<String>,
    },

    /// A number given as text is not a valid decimal.
    #[error(transparent)]
    InvalidNumber(#[from] OperandError),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for names <= 3 chars
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first
///
/// # Example
///
/// ```
/// use plurals::compute_suggestions;
///
/// let known = ["en", "en_GB", "de"];
/// assert_eq!(compute_suggestions("en-GB", known), vec!["en_GB"]);
/// assert!(compute_suggestions("fr", known).is_empty());
/// ```
pub fn compute_suggestions<'a>(
    name: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}
