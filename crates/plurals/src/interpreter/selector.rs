//! Caller-configured plural category selection.

use std::sync::Arc;

use bon::Builder;

use crate::interpreter::error::EvalError;
use crate::interpreter::registry::RuleTable;
use crate::types::{PluralCategory, PluralOperand};

/// Selects plural categories for one configured locale.
///
/// The selector holds a shared [`RuleTable`] and the locale to evaluate in.
/// A fallback locale is used only when the caller configures one; without it
/// an unknown locale is reported as an error.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use plurals::{PluralCategory, PluralSelector, RuleTable};
///
/// let table = Arc::new(RuleTable::cldr().unwrap());
/// let selector = PluralSelector::builder()
///     .table(table)
///     .locale("ru")
///     .build();
///
/// assert_eq!(selector.category_for_str("21").unwrap(), PluralCategory::One);
/// assert_eq!(selector.category_for_str("22").unwrap(), PluralCategory::Few);
/// assert_eq!(selector.category_for_str("25").unwrap(), PluralCategory::Many);
/// assert_eq!(selector.category_for_str("2.5").unwrap(), PluralCategory::Other);
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct PluralSelector {
    /// Compiled rules, shared with other selectors.
    table: Arc<RuleTable>,

    /// Locale code to evaluate in.
    #[builder(default = "root".to_string())]
    locale: String,

    /// Locale to retry with when `locale` is not in the table.
    fallback_locale: Option<String>,
}

impl PluralSelector {
    /// Create a selector for `locale` without a fallback.
    pub fn new(table: Arc<RuleTable>, locale: impl Into<String>) -> Self {
        PluralSelector::builder()
            .table(table)
            .locale(locale.into())
            .build()
    }

    /// The configured locale code.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Change the locale. The table is not consulted until the next selection.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// The configured fallback locale, if any.
    pub fn fallback_locale(&self) -> Option<&str> {
        self.fallback_locale.as_deref()
    }

    /// The shared rule table.
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Select the category of `operand` in the configured locale.
    pub fn category_for(&self, operand: &PluralOperand) -> Result<PluralCategory, EvalError> {
        let result = self.table.category_for(&self.locale, operand);
        match (&result, &self.fallback_locale) {
            (Err(EvalError::UnknownLocale { .. }), Some(fallback)) => {
                self.table.category_for(fallback, operand)
            }
            _ => result,
        }
    }

    /// Select the category of a number given as a decimal literal.
    pub fn category_for_str(&self, number: &str) -> Result<PluralCategory, EvalError> {
        let operand: PluralOperand = number.parse()?;
        self.category_for(&operand)
    }
}
