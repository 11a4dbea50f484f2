//! Public AST types for plural rule conditions.
//!
//! These types are public so tooling can inspect parsed rules. `Display`
//! renders a tree back to normalized rule text (single spaces, no samples),
//! and parsing that text yields an equal tree.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// A full rule condition: `and_condition ('or' and_condition)*`.
///
/// An empty condition is always true. It only describes the implicit
/// `other` rule and is never produced by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrCondition {
    pub and_conditions: Vec<AndCondition>,
}

/// `relation ('and' relation)*`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndCondition {
    pub relations: Vec<Relation>,
}

/// A comparison of an operand expression against a range list.
///
/// `negated` is set for `!=`, meaning the value matches none of the ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub expr: Expr,
    pub negated: bool,
    pub ranges: Vec<RangeItem>,
}

/// An operand with an optional modulus: `i % 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expr {
    pub operand: OperandSymbol,
    pub modulus: Option<u32>,
}

/// One of the plural operand symbols of the rule grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandSymbol {
    N,
    I,
    V,
    W,
    F,
    T,
    E,
}

/// An item of a range list: a single value or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeItem {
    Value(u64),
    Range { low: u64, high: u64 },
}

impl OrCondition {
    /// Whether this condition holds for every operand.
    pub fn is_always_true(&self) -> bool {
        self.and_conditions.is_empty()
    }

    /// Iterate all relations of the condition, in source order.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.and_conditions
            .iter()
            .flat_map(|and| and.relations.iter())
    }
}

impl OperandSymbol {
    /// Resolve a grammar symbol character.
    pub fn from_char(symbol: char) -> Option<OperandSymbol> {
        match symbol {
            'n' => Some(OperandSymbol::N),
            'i' => Some(OperandSymbol::I),
            'v' => Some(OperandSymbol::V),
            'w' => Some(OperandSymbol::W),
            'f' => Some(OperandSymbol::F),
            't' => Some(OperandSymbol::T),
            'e' => Some(OperandSymbol::E),
            _ => None,
        }
    }

    /// The grammar character for this symbol.
    pub fn as_char(self) -> char {
        match self {
            OperandSymbol::N => 'n',
            OperandSymbol::I => 'i',
            OperandSymbol::V => 'v',
            OperandSymbol::W => 'w',
            OperandSymbol::F => 'f',
            OperandSymbol::T => 't',
            OperandSymbol::E => 'e',
        }
    }
}

impl Display for OrCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, and) in self.and_conditions.iter().enumerate() {
            if index > 0 {
                f.write_str(" or ")?;
            }
            write!(f, "{and}")?;
        }
        Ok(())
    }
}

impl Display for AndCondition {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (index, relation) in self.relations.iter().enumerate() {
            if index > 0 {
                f.write_str(" and ")?;
            }
            write!(f, "{relation}")?;
        }
        Ok(())
    }
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let operator = if self.negated { "!=" } else { "=" };
        write!(f, "{} {operator} ", self.expr)?;
        for (index, item) in self.ranges.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.operand)?;
        if let Some(modulus) = self.modulus {
            write!(f, " % {modulus}")?;
        }
        Ok(())
    }
}

impl Display for OperandSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_char())
    }
}

impl Display for RangeItem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RangeItem::Value(value) => write!(f, "{value}"),
            RangeItem::Range { low, high } => write!(f, "{low}..{high}"),
        }
    }
}
