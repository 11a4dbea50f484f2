//! Lowering of condition trees into predicates.
//!
//! Each relation becomes a closure that reads one operand field, applies the
//! modulus, and tests the result against its range list. Relations are
//! combined into AND and OR closures, so evaluating a compiled rule never
//! touches rule text again.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use crate::parser::{AndCondition, Expr, OperandSymbol, OrCondition, RangeItem, Relation};
use crate::types::{PluralCategory, PluralOperand};

/// A compiled test over plural operands.
pub type Predicate = Box<dyn Fn(&PluralOperand) -> bool + Send + Sync>;

/// A plural category together with the predicate that selects it.
pub struct CompiledRule {
    category: PluralCategory,
    condition: OrCondition,
    test: Predicate,
}

impl CompiledRule {
    /// Compile `condition` as the test for `category`.
    pub fn new(category: PluralCategory, condition: OrCondition) -> Self {
        let test = compile_condition(&condition);
        CompiledRule {
            category,
            condition,
            test,
        }
    }

    /// The category this rule selects.
    pub fn category(&self) -> PluralCategory {
        self.category
    }

    /// The parsed condition the predicate was compiled from.
    pub fn condition(&self) -> &OrCondition {
        &self.condition
    }

    /// Whether the operand satisfies this rule.
    pub fn matches(&self, operand: &PluralOperand) -> bool {
        (self.test)(operand)
    }
}

impl Debug for CompiledRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CompiledRule")
            .field("category", &self.category)
            .field("condition", &self.condition.to_string())
            .finish_non_exhaustive()
    }
}

/// Compile a condition tree into a predicate.
///
/// An empty condition compiles to a predicate that is always true.
///
/// # Example
///
/// ```
/// use plurals::PluralOperand;
/// use plurals::interpreter::compile_condition;
/// use plurals::parser::parse_rule;
///
/// let condition = parse_rule("i % 10 = 2..4 and i % 100 != 12..14").unwrap();
/// let test = compile_condition(&condition);
/// assert!(test(&PluralOperand::from(22)));
/// assert!(!test(&PluralOperand::from(12)));
/// ```
pub fn compile_condition(condition: &OrCondition) -> Predicate {
    if condition.is_always_true() {
        return Box::new(|_| true);
    }
    let branches: Vec<Predicate> = condition
        .and_conditions
        .iter()
        .map(compile_and_condition)
        .collect();
    Box::new(move |operand| branches.iter().any(|branch| branch(operand)))
}

fn compile_and_condition(condition: &AndCondition) -> Predicate {
    let relations: Vec<Predicate> = condition.relations.iter().map(compile_relation).collect();
    Box::new(move |operand| relations.iter().all(|relation| relation(operand)))
}

/// `!=` negates the whole range-list match: the value matches none of the items.
fn compile_relation(relation: &Relation) -> Predicate {
    let Relation {
        expr,
        negated,
        ranges,
    } = relation.clone();
    Box::new(move |operand| {
        let value = evaluate(expr, operand);
        ranges.iter().any(|item| value.matches(*item)) != negated
    })
}

/// The value of an operand expression. `n` is real only when it has a
/// visible nonzero fraction; the other operands are integers.
#[derive(Debug, Clone, Copy, PartialEq)]
enum OperandValue {
    Real(f64),
    Integer(i64),
}

fn evaluate(expr: Expr, operand: &PluralOperand) -> OperandValue {
    let value = match expr.operand {
        OperandSymbol::N if operand.t() != 0 => return fractional_n(operand, expr.modulus),
        // Integral n is exact even beyond f64 precision.
        OperandSymbol::N | OperandSymbol::I => operand.i(),
        OperandSymbol::V => operand.v().into(),
        OperandSymbol::W => operand.w().into(),
        OperandSymbol::F => operand.f(),
        OperandSymbol::T => operand.t(),
        OperandSymbol::E => operand.e().into(),
    };
    OperandValue::Integer(match expr.modulus {
        Some(modulus) => value.rem_euclid(i64::from(modulus)),
        None => value,
    })
}

/// `n` with a fraction. The modulus applies to the integer digits, which
/// stay exact, and the fraction is added back afterwards.
fn fractional_n(operand: &PluralOperand, modulus: Option<u32>) -> OperandValue {
    match modulus {
        Some(modulus) => {
            let integer = operand.i().rem_euclid(i64::from(modulus));
            let scale = 10_f64.powi(i32::try_from(operand.w()).unwrap_or(i32::MAX));
            let fraction = operand.t() as f64 / scale;
            OperandValue::Real(integer as f64 + fraction)
        }
        None => OperandValue::Real(operand.n()),
    }
}

impl OperandValue {
    fn matches(self, item: RangeItem) -> bool {
        match (self, item) {
            (OperandValue::Integer(value), RangeItem::Value(expected)) => {
                u64::try_from(value).is_ok_and(|value| value == expected)
            }
            (OperandValue::Integer(value), RangeItem::Range { low, high }) => {
                u64::try_from(value).is_ok_and(|value| (low..=high).contains(&value))
            }
            (OperandValue::Real(value), RangeItem::Value(expected)) => value == expected as f64,
            (OperandValue::Real(value), RangeItem::Range { low, high }) => {
                (low as f64..=high as f64).contains(&value)
            }
        }
    }
}
