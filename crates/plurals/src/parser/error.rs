//! Parse error types for plural rules.

use thiserror::Error;

/// An error that occurred while parsing a plural rule.
///
/// Offsets are byte offsets into the full rule text, samples included.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The rule text does not match the rule grammar.
    #[error("malformed rule '{rule}' at offset {offset}: {message}")]
    Malformed {
        rule: String,
        offset: usize,
        message: String,
    },

    /// A single-letter operand outside `n i v w f t e`.
    #[error("unknown operand symbol '{symbol}' at offset {offset} in rule '{rule}'")]
    UnknownOperand {
        rule: String,
        offset: usize,
        symbol: char,
    },
}

impl ParseError {
    /// The rule text that failed to parse.
    pub fn rule(&self) -> &str {
        match self {
            ParseError::Malformed { rule, .. } | ParseError::UnknownOperand { rule, .. } => rule,
        }
    }

    /// Byte offset of the offending token.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Malformed { offset, .. } | ParseError::UnknownOperand { offset, .. } => {
                *offset
            }
        }
    }

    /// The message without the rule text, for diagnostics that show the text separately.
    pub fn message(&self) -> String {
        match self {
            ParseError::Malformed { message, .. } => message.clone(),
            ParseError::UnknownOperand { symbol, .. } => {
                format!("unknown operand symbol '{symbol}', expected one of: n, i, v, w, f, t, e")
            }
        }
    }
}
