//! Compilation and evaluation of plural rules.
//!
//! Records are parsed and lowered into predicates once, when the
//! [`RuleTable`] is built. Selecting a category afterwards only runs the
//! compiled predicates of the requested locale.

mod compiler;
mod error;
mod record;
mod registry;
mod selector;

pub use compiler::{CompiledRule, Predicate, compile_condition};
pub use error::{BuildError, EvalError, compute_suggestions};
pub use record::{RuleEntry, RuleRecord};
pub use registry::{LocaleRuleSet, RuleTable, build_table, category_for};
pub use selector::PluralSelector;
