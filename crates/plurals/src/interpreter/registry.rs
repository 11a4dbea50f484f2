//! The rule table: compiled rule sets indexed by locale code.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info};

use crate::interpreter::compiler::CompiledRule;
use crate::interpreter::error::{BuildError, EvalError, compute_suggestions};
use crate::interpreter::record::{RuleEntry, RuleRecord};
use crate::parser::parse_rule;
use crate::types::{PluralCategory, PluralOperand};

/// The compiled rules shared by one group of locales.
///
/// Rules are kept in declaration order and the first match wins. When no
/// rule matches, the category is `Other`.
#[derive(Debug)]
pub struct LocaleRuleSet {
    locales: Vec<String>,
    rules: Vec<CompiledRule>,
}

impl LocaleRuleSet {
    /// The locale codes bound to this rule set.
    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    /// The compiled rules, in declaration order. Never contains `Other`.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// The categories this rule set can produce, `Other` last.
    pub fn categories(&self) -> Vec<PluralCategory> {
        self.rules
            .iter()
            .map(CompiledRule::category)
            .chain([PluralCategory::Other])
            .collect()
    }

    /// The category of the first rule matching `operand`, or `Other`.
    pub fn category_for(&self, operand: &PluralOperand) -> PluralCategory {
        self.rules
            .iter()
            .find(|rule| rule.matches(operand))
            .map_or(PluralCategory::Other, CompiledRule::category)
    }
}

/// Compiled plural rules for every known locale.
///
/// A table is built once and never mutated, so it can be shared between
/// threads without locking. Locales declared together share one
/// [`LocaleRuleSet`] instance.
///
/// # Example
///
/// ```
/// use plurals::{PluralCategory, PluralOperand, RuleEntry, RuleRecord, RuleTable};
///
/// let table = RuleTable::build(&[RuleRecord::new(
///     ["en", "en_US"],
///     vec![RuleEntry::new(PluralCategory::One, "i = 1 and v = 0 @integer 1")],
/// )])
/// .unwrap();
///
/// let one = PluralOperand::from(1);
/// let decimal: PluralOperand = "1.0".parse().unwrap();
/// assert_eq!(table.category_for("en", &one).unwrap(), PluralCategory::One);
/// assert_eq!(table.category_for("en_US", &decimal).unwrap(), PluralCategory::Other);
/// assert!(table.category_for("fr", &one).is_err());
/// ```
#[derive(Debug, Default)]
pub struct RuleTable {
    by_locale: BTreeMap<String, Arc<LocaleRuleSet>>,
    /// Distinct rule sets, in record order.
    rule_sets: Vec<Arc<LocaleRuleSet>>,
}

impl RuleTable {
    /// Compile every record into a table.
    ///
    /// Fails on the first rule that does not parse, on a locale declared more
    /// than once, on a record without locales, or on a category declared twice
    /// in one record.
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a RuleRecord>,
    ) -> Result<Self, BuildError> {
        let mut by_locale: BTreeMap<String, Arc<LocaleRuleSet>> = BTreeMap::new();
        let mut owners: BTreeMap<&str, usize> = BTreeMap::new();
        let mut rule_sets = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            if record.locales.is_empty() {
                return Err(BuildError::EmptyLocales { record: index });
            }
            for locale in &record.locales {
                if let Some(&first_record) = owners.get(locale.as_str()) {
                    return Err(BuildError::DuplicateLocale {
                        locale: locale.clone(),
                        first_record,
                        second_record: index,
                    });
                }
                owners.insert(locale, index);
            }

            let rule_set = Arc::new(compile_record(record)?);
            debug!(
                locales = %record.locale_list(),
                rules = rule_set.rules.len(),
                "compiled plural rule set"
            );
            for locale in &record.locales {
                by_locale.insert(locale.clone(), Arc::clone(&rule_set));
            }
            rule_sets.push(rule_set);
        }

        info!(
            locales = by_locale.len(),
            rule_sets = rule_sets.len(),
            "built plural rule table"
        );
        Ok(RuleTable {
            by_locale,
            rule_sets,
        })
    }

    /// Build a table from the bundled CLDR cardinal rules.
    ///
    /// # Example
    ///
    /// ```
    /// use plurals::{PluralCategory, PluralOperand, RuleTable};
    ///
    /// let table = RuleTable::cldr().unwrap();
    /// let category = |locale, n: i64| {
    ///     table.category_for(locale, &PluralOperand::from(n)).unwrap()
    /// };
    /// assert_eq!(category("sl", 1), PluralCategory::One);
    /// assert_eq!(category("sl", 102), PluralCategory::Two);
    /// assert_eq!(category("sl", 3), PluralCategory::Few);
    /// assert_eq!(category("sl", 5), PluralCategory::Other);
    /// ```
    pub fn cldr() -> Result<Self, BuildError> {
        let records = plurals_cldr::CARDINAL_RULES
            .iter()
            .map(|group| {
                let rules = group
                    .rules
                    .iter()
                    .map(|(count, text)| Ok(RuleEntry::new(count.parse()?, *text)))
                    .collect::<Result<Vec<_>, BuildError>>()?;
                Ok(RuleRecord::new(group.locales.iter().copied(), rules))
            })
            .collect::<Result<Vec<_>, BuildError>>()?;
        debug!(cldr_version = plurals_cldr::CLDR_VERSION, "loading bundled CLDR rules");
        RuleTable::build(&records)
    }

    /// The rule set for a locale, if the table knows it.
    pub fn rule_set(&self, locale: &str) -> Option<&Arc<LocaleRuleSet>> {
        self.by_locale.get(locale)
    }

    /// All locale codes, sorted.
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.by_locale.keys().map(String::as_str)
    }

    /// Distinct rule sets, in the order their records were given.
    pub fn rule_sets(&self) -> &[Arc<LocaleRuleSet>] {
        &self.rule_sets
    }

    /// Number of locales in the table.
    pub fn len(&self) -> usize {
        self.by_locale.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_locale.is_empty()
    }

    /// Select the plural category of `operand` in `locale`.
    ///
    /// Unknown locales are an error; the table never substitutes another locale.
    pub fn category_for(
        &self,
        locale: &str,
        operand: &PluralOperand,
    ) -> Result<PluralCategory, EvalError> {
        let rule_set = self
            .rule_set(locale)
            .ok_or_else(|| EvalError::UnknownLocale {
                locale: locale.to_string(),
                suggestions: compute_suggestions(locale, self.locales()),
            })?;
        Ok(rule_set.category_for(operand))
    }
}

/// Parse and compile the rules of one record, skipping `other`.
fn compile_record(record: &RuleRecord) -> Result<LocaleRuleSet, BuildError> {
    let mut seen = BTreeSet::new();
    let mut rules = Vec::with_capacity(record.rules.len());
    for entry in &record.rules {
        if entry.category == PluralCategory::Other {
            debug!(locales = %record.locale_list(), "skipping explicit 'other' rule");
            continue;
        }
        if !seen.insert(entry.category) {
            return Err(BuildError::DuplicateCategory {
                locales: record.locale_list(),
                category: entry.category,
            });
        }
        let condition = parse_rule(&entry.text).map_err(|source| BuildError::RuleCompilation {
            locales: record.locale_list(),
            category: entry.category,
            rule: entry.text.clone(),
            source,
        })?;
        rules.push(CompiledRule::new(entry.category, condition));
    }
    Ok(LocaleRuleSet {
        locales: record.locales.clone(),
        rules,
    })
}

/// Build a rule table from records. See [`RuleTable::build`].
pub fn build_table(records: &[RuleRecord]) -> Result<RuleTable, BuildError> {
    RuleTable::build(records)
}

/// Select the plural category of `operand` in `locale`. See [`RuleTable::category_for`].
pub fn category_for(
    table: &RuleTable,
    locale: &str,
    operand: &PluralOperand,
) -> Result<PluralCategory, EvalError> {
    table.category_for(locale, operand)
}
