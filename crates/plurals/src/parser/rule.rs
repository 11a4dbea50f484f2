//! Plural rule parser.
//!
//! Rule text is split into tokens with winnow, then parsed by recursive
//! descent over the token stream:
//!
//! ```text
//! condition     := and_condition ('or' and_condition)*
//! and_condition := relation ('and' relation)*
//! relation      := expr ('=' | '!=') range_list
//! range_list    := range_item (',' range_item)*
//! range_item    := value | value '..' value
//! expr          := operand ('%' value)?
//! operand       := 'n' | 'i' | 'v' | 'w' | 'f' | 't' | 'e'
//! value         := digit+
//! ```
//!
//! Everything from the first `@` on (the `@integer`/`@decimal` samples) is
//! ignored.

use std::fmt::{Display, Formatter, Result as FmtResult};

use winnow::combinator::alt;
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::*;
use super::error::ParseError;

/// Parse a plural rule into its condition tree.
///
/// # Example
///
/// ```
/// use plurals::parser::{OperandSymbol, parse_rule};
///
/// let condition = parse_rule("v = 0 and i % 10 = 1 @integer 1, 21, 31").unwrap();
/// assert_eq!(condition.and_conditions.len(), 1);
/// assert_eq!(condition.to_string(), "v = 0 and i % 10 = 1");
///
/// let relation = &condition.and_conditions[0].relations[1];
/// assert_eq!(relation.expr.operand, OperandSymbol::I);
/// assert_eq!(relation.expr.modulus, Some(10));
/// ```
pub fn parse_rule(rule: &str) -> Result<OrCondition, ParseError> {
    let condition_text = strip_samples(rule);
    let tokens = tokenize(rule, condition_text)?;
    let mut parser = RuleParser {
        rule,
        tokens,
        position: 0,
        end: condition_text.trim_end().len(),
    };

    let condition = parser.condition()?;
    match parser.peek() {
        Some(token) => Err(parser.unexpected(Some(token), "'and' or 'or'")),
        None => Ok(condition),
    }
}

/// The condition part of a rule, before any sample annotation.
fn strip_samples(rule: &str) -> &str {
    rule.split_once('@')
        .map_or(rule, |(condition, _samples)| condition)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind<'r> {
    /// Operand symbols and the `and`/`or` keywords.
    Word(&'r str),
    Number(&'r str),
    Equal,
    NotEqual,
    Modulo,
    Comma,
    Range,
}

#[derive(Debug, Clone, Copy)]
struct Token<'r> {
    kind: TokenKind<'r>,
    offset: usize,
}

impl Display for TokenKind<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TokenKind::Word(text) | TokenKind::Number(text) => write!(f, "'{text}'"),
            TokenKind::Equal => f.write_str("'='"),
            TokenKind::NotEqual => f.write_str("'!='"),
            TokenKind::Modulo => f.write_str("'%'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::Range => f.write_str("'..'"),
        }
    }
}

/// Split the condition text into tokens, recording byte offsets.
fn tokenize<'r>(rule: &str, source: &'r str) -> Result<Vec<Token<'r>>, ParseError> {
    let mut remaining = source;
    let mut tokens = Vec::new();
    loop {
        remaining = remaining.trim_start();
        if remaining.is_empty() {
            return Ok(tokens);
        }

        let offset = source.len() - remaining.len();
        let rest = remaining;
        let kind = token_kind
            .parse_next(&mut remaining)
            .map_err(|_| ParseError::Malformed {
                rule: rule.to_string(),
                offset,
                message: format!(
                    "unexpected character '{}'",
                    rest.chars().next().unwrap_or('?')
                ),
            })?;
        tokens.push(Token { kind, offset });
    }
}

/// Parse a single token.
fn token_kind<'r>(input: &mut &'r str) -> ModalResult<TokenKind<'r>> {
    alt((
        "!=".value(TokenKind::NotEqual),
        '='.value(TokenKind::Equal),
        "..".value(TokenKind::Range),
        '%'.value(TokenKind::Modulo),
        ','.value(TokenKind::Comma),
        take_while(1.., |c: char| c.is_ascii_digit()).map(TokenKind::Number),
        take_while(1.., |c: char| c.is_alphabetic()).map(TokenKind::Word),
    ))
    .parse_next(input)
}

struct RuleParser<'r> {
    rule: &'r str,
    tokens: Vec<Token<'r>>,
    position: usize,
    /// Offset reported for errors at the end of the condition.
    end: usize,
}

impl<'r> RuleParser<'r> {
    fn condition(&mut self) -> Result<OrCondition, ParseError> {
        let mut and_conditions = vec![self.and_condition()?];
        while self.eat(TokenKind::Word("or")) {
            and_conditions.push(self.and_condition()?);
        }
        Ok(OrCondition { and_conditions })
    }

    fn and_condition(&mut self) -> Result<AndCondition, ParseError> {
        let mut relations = vec![self.relation()?];
        while self.eat(TokenKind::Word("and")) {
            relations.push(self.relation()?);
        }
        Ok(AndCondition { relations })
    }

    fn relation(&mut self) -> Result<Relation, ParseError> {
        let expr = self.expr()?;
        let negated = match self.next() {
            Some(Token {
                kind: TokenKind::Equal,
                ..
            }) => false,
            Some(Token {
                kind: TokenKind::NotEqual,
                ..
            }) => true,
            other => return Err(self.unexpected(other, "'=' or '!='")),
        };
        let ranges = self.range_list()?;
        Ok(Relation {
            expr,
            negated,
            ranges,
        })
    }

    fn range_list(&mut self) -> Result<Vec<RangeItem>, ParseError> {
        let mut ranges = vec![self.range_item()?];
        while self.eat(TokenKind::Comma) {
            ranges.push(self.range_item()?);
        }
        Ok(ranges)
    }

    fn range_item(&mut self) -> Result<RangeItem, ParseError> {
        let (low, offset) = self.value()?;
        if !self.eat(TokenKind::Range) {
            return Ok(RangeItem::Value(low));
        }
        let (high, _) = self.value()?;
        if low > high {
            return Err(self.malformed(offset, format!("empty range {low}..{high}")));
        }
        Ok(RangeItem::Range { low, high })
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let operand = self.operand()?;
        let modulus = if self.eat(TokenKind::Modulo) {
            let (value, offset) = self.value()?;
            let modulus = u32::try_from(value)
                .ok()
                .filter(|modulus| *modulus != 0)
                .ok_or_else(|| {
                    self.malformed(
                        offset,
                        format!("modulus must be between 1 and {}, found {value}", u32::MAX),
                    )
                })?;
            Some(modulus)
        } else {
            None
        };
        Ok(Expr { operand, modulus })
    }

    fn operand(&mut self) -> Result<OperandSymbol, ParseError> {
        let token = self.next();
        let Some(Token {
            kind: TokenKind::Word(word),
            offset,
        }) = token
        else {
            return Err(self.unexpected(token, "operand"));
        };

        let mut chars = word.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => {
                OperandSymbol::from_char(symbol).ok_or_else(|| ParseError::UnknownOperand {
                    rule: self.rule.to_string(),
                    offset,
                    symbol,
                })
            }
            _ => Err(self.unexpected(token, "operand")),
        }
    }

    /// Parse a value token, returning it with its offset.
    fn value(&mut self) -> Result<(u64, usize), ParseError> {
        let token = self.next();
        let Some(Token {
            kind: TokenKind::Number(digits),
            offset,
        }) = token
        else {
            return Err(self.unexpected(token, "value"));
        };
        let value = digits.parse::<u64>().map_err(|_| {
            self.malformed(offset, format!("value {digits} does not fit in 64 bits"))
        })?;
        Ok((value, offset))
    }

    fn peek(&self) -> Option<Token<'r>> {
        self.tokens.get(self.position).copied()
    }

    fn next(&mut self) -> Option<Token<'r>> {
        let token = self.peek();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Consume the next token if it is `kind`.
    fn eat(&mut self, kind: TokenKind<'_>) -> bool {
        if self.peek().is_some_and(|token| token.kind == kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self, token: Option<Token<'_>>, expected: &str) -> ParseError {
        match token {
            Some(token) => self.malformed(
                token.offset,
                format!("expected {expected}, found {}", token.kind),
            ),
            None => self.malformed(self.end, format!("expected {expected}, found end of rule")),
        }
    }

    fn malformed(&self, offset: usize, message: String) -> ParseError {
        ParseError::Malformed {
            rule: self.rule.to_string(),
            offset,
            message,
        }
    }
}
