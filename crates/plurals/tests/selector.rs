use std::ptr;
use std::sync::Arc;

use plurals::{
    EvalError, OperandError, PluralCategory, PluralOperand, PluralSelector, RuleEntry, RuleRecord,
    RuleTable,
};

fn table() -> Arc<RuleTable> {
    Arc::new(
        RuleTable::build(&[
            RuleRecord::new(["root"], vec![]),
            RuleRecord::new(
                ["en"],
                vec![RuleEntry::new(PluralCategory::One, "i = 1 and v = 0")],
            ),
        ])
        .unwrap(),
    )
}

#[test]
fn locale_defaults_to_root() {
    let selector = PluralSelector::builder().table(table()).build();
    assert_eq!(selector.locale(), "root");
    assert_eq!(selector.fallback_locale(), None);
    assert_eq!(selector.category_for_str("1").unwrap(), PluralCategory::Other);
}

#[test]
fn selects_in_configured_locale() {
    let selector = PluralSelector::new(table(), "en");
    assert_eq!(selector.category_for_str("1").unwrap(), PluralCategory::One);
    assert_eq!(selector.category_for(&PluralOperand::from(2)).unwrap(), PluralCategory::Other);
}

#[test]
fn set_locale_switches_rules() {
    let mut selector = PluralSelector::new(table(), "root");
    assert_eq!(selector.category_for_str("1").unwrap(), PluralCategory::Other);
    selector.set_locale("en");
    assert_eq!(selector.category_for_str("1").unwrap(), PluralCategory::One);
}

#[test]
fn unknown_locale_without_fallback_fails() {
    let selector = PluralSelector::new(table(), "de");
    assert!(matches!(
        selector.category_for_str("1"),
        Err(EvalError::UnknownLocale { ref locale, .. }) if locale == "de"
    ));
}

#[test]
fn fallback_applies_to_unknown_locale() {
    let selector = PluralSelector::builder()
        .table(table())
        .locale("en_AU")
        .fallback_locale("en".to_string())
        .build();
    assert_eq!(selector.fallback_locale(), Some("en"));
    assert_eq!(selector.category_for_str("1").unwrap(), PluralCategory::One);
}

#[test]
fn unknown_fallback_reports_fallback_locale() {
    let selector = PluralSelector::builder()
        .table(table())
        .locale("de_AT")
        .fallback_locale("de".to_string())
        .build();
    assert!(matches!(
        selector.category_for_str("1"),
        Err(EvalError::UnknownLocale { ref locale, .. }) if locale == "de"
    ));
}

#[test]
fn invalid_number_is_not_retried() {
    let selector = PluralSelector::builder()
        .table(table())
        .locale("xx")
        .fallback_locale("en".to_string())
        .build();
    assert!(matches!(
        selector.category_for_str("1.2.3"),
        Err(EvalError::InvalidNumber(OperandError::InvalidNumberFormat { .. }))
    ));
}

#[test]
fn selectors_share_one_table() {
    let shared = table();
    let en = PluralSelector::new(Arc::clone(&shared), "en");
    let root = PluralSelector::new(Arc::clone(&shared), "root");
    assert!(ptr::eq(en.table(), root.table()));
    assert_eq!(Arc::strong_count(&shared), 3);
}
