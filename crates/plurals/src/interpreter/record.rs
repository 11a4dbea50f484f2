//! Raw plural rule records, as handed over by a data source.

use serde::{Deserialize, Serialize};

use crate::types::PluralCategory;

/// The plural rules shared by a set of locales, before compilation.
///
/// Records deserialize from JSON such as:
///
/// ```json
/// { "locales": ["en", "en_US"],
///   "rules": [{ "category": "one", "rule": "i = 1 and v = 0 @integer 1" }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Locale codes sharing these rules. Must not be empty.
    pub locales: Vec<String>,
    /// Rules in declaration order. `other` entries are ignored.
    pub rules: Vec<RuleEntry>,
}

/// One `(category, rule text)` pair of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub category: PluralCategory,
    /// Rule text in CLDR syntax, optionally followed by samples.
    #[serde(rename = "rule")]
    pub text: String,
}

impl RuleRecord {
    /// Create a record from locale codes and rule entries.
    ///
    /// # Example
    ///
    /// ```
    /// use plurals::{PluralCategory, RuleEntry, RuleRecord};
    ///
    /// let record = RuleRecord::new(
    ///     ["en", "en_US"],
    ///     vec![RuleEntry::new(PluralCategory::One, "i = 1 and v = 0")],
    /// );
    /// assert_eq!(record.locales, vec!["en", "en_US"]);
    /// ```
    pub fn new<L>(locales: impl IntoIterator<Item = L>, rules: Vec<RuleEntry>) -> Self
    where
        L: Into<String>,
    {
        RuleRecord {
            locales: locales.into_iter().map(Into::into).collect(),
            rules,
        }
    }

    /// The locale list as CLDR writes it, space separated.
    pub fn locale_list(&self) -> String {
        self.locales.join(" ")
    }
}

impl RuleEntry {
    pub fn new(category: PluralCategory, text: impl Into<String>) -> Self {
        RuleEntry {
            category,
            text: text.into(),
        }
    }
}
