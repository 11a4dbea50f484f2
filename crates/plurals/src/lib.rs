pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    BuildError, CompiledRule, EvalError, LocaleRuleSet, PluralSelector, RuleEntry, RuleRecord,
    RuleTable, build_table, category_for, compute_suggestions,
};
pub use parser::{ParseError, parse_rule};
pub use types::{OperandError, PluralCategory, PluralOperand, UnknownCategoryError};
