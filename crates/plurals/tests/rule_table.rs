//! Integration tests for building and querying rule tables.

use std::sync::Arc;
use std::thread;

use plurals::{
    BuildError, EvalError, ParseError, PluralCategory, PluralOperand, RuleEntry, RuleRecord,
    RuleTable, build_table, category_for,
};

fn record(locales: &[&str], rules: &[(PluralCategory, &str)]) -> RuleRecord {
    RuleRecord::new(
        locales.iter().copied(),
        rules
            .iter()
            .map(|(category, text)| RuleEntry::new(*category, *text))
            .collect(),
    )
}

fn english() -> RuleTable {
    build_table(&[record(
        &["en", "en_US"],
        &[(PluralCategory::One, "i = 1 and v = 0 @integer 1")],
    )])
    .unwrap()
}

fn select(table: &RuleTable, locale: &str, number: &str) -> PluralCategory {
    let operand: PluralOperand = number.parse().unwrap();
    table.category_for(locale, &operand).unwrap()
}

// =============================================================================
// Building
// =============================================================================

#[test]
fn english_one_requires_integer() {
    let table = english();
    assert_eq!(select(&table, "en", "1"), PluralCategory::One);
    assert_eq!(select(&table, "en", "1.0"), PluralCategory::Other);
    assert_eq!(select(&table, "en", "2"), PluralCategory::Other);
    assert_eq!(select(&table, "en", "0"), PluralCategory::Other);
}

#[test]
fn aliased_locales_share_one_rule_set() {
    let table = english();
    let en = table.rule_set("en").unwrap();
    let en_us = table.rule_set("en_US").unwrap();
    assert!(Arc::ptr_eq(en, en_us));
    assert_eq!(en.locales(), ["en", "en_US"]);
    assert_eq!(table.rule_sets().len(), 1);
    assert_eq!(table.len(), 2);
}

#[test]
fn locales_are_sorted() {
    let table = build_table(&[
        record(&["zh", "ja"], &[]),
        record(&["de", "en"], &[(PluralCategory::One, "i = 1 and v = 0")]),
    ])
    .unwrap();
    assert_eq!(table.locales().collect::<Vec<_>>(), ["de", "en", "ja", "zh"]);
}

#[test]
fn explicit_other_is_dropped() {
    let table = build_table(&[record(
        &["en"],
        &[
            (PluralCategory::One, "i = 1 and v = 0 @integer 1"),
            (PluralCategory::Other, " @integer 0, 2~16"),
        ],
    )])
    .unwrap();
    let rule_set = table.rule_set("en").unwrap();
    assert_eq!(rule_set.rules().len(), 1);
    assert_eq!(
        rule_set.categories(),
        [PluralCategory::One, PluralCategory::Other]
    );
}

#[test]
fn other_rule_text_is_never_parsed() {
    let table = build_table(&[record(&["xx"], &[(PluralCategory::Other, "n ~ 1")])]).unwrap();
    assert_eq!(select(&table, "xx", "1"), PluralCategory::Other);
}

#[test]
fn locale_without_rules_always_selects_other() {
    let table = build_table(&[record(&["ja"], &[])]).unwrap();
    for number in ["0", "1", "2", "1.5", "1000000"] {
        assert_eq!(select(&table, "ja", number), PluralCategory::Other);
    }
}

#[test]
fn first_matching_rule_wins() {
    let table = build_table(&[record(
        &["xx"],
        &[
            (PluralCategory::Few, "n = 1..5"),
            (PluralCategory::One, "n = 1"),
        ],
    )])
    .unwrap();
    assert_eq!(select(&table, "xx", "1"), PluralCategory::Few);
    assert_eq!(select(&table, "xx", "6"), PluralCategory::Other);
}

#[test]
fn empty_record_list_builds_empty_table() {
    let table = build_table(&[]).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.locales().count(), 0);
}

// =============================================================================
// Build errors
// =============================================================================

#[test]
fn malformed_rule_aborts_build() {
    let err = build_table(&[
        record(&["en"], &[(PluralCategory::One, "i = 1 and v = 0")]),
        record(&["xx", "yy"], &[(PluralCategory::One, "n ~ 1")]),
    ])
    .unwrap_err();

    let BuildError::RuleCompilation {
        locales,
        category,
        rule,
        source,
    } = &err
    else {
        panic!("expected rule compilation error, got {err:?}");
    };
    assert_eq!(locales, "xx yy");
    assert_eq!(*category, PluralCategory::One);
    assert_eq!(rule, "n ~ 1");
    assert!(matches!(source, ParseError::Malformed { offset: 2, .. }));
    assert_eq!(err.parse_error(), Some(source));
    assert_eq!(
        err.to_string(),
        "failed to compile 'one' rule for locales [xx yy]: malformed rule 'n ~ 1' at offset 2: unexpected character '~'"
    );
}

#[test]
fn unknown_operand_aborts_build() {
    let err = build_table(&[record(&["xx"], &[(PluralCategory::Two, "x = 2")])]).unwrap_err();
    assert!(matches!(
        err.parse_error(),
        Some(ParseError::UnknownOperand { symbol: 'x', offset: 0, .. })
    ));
}

#[test]
fn empty_condition_aborts_build() {
    let err = build_table(&[record(&["xx"], &[(PluralCategory::One, " @integer 1")])])
        .unwrap_err();
    assert!(matches!(
        err,
        BuildError::RuleCompilation {
            category: PluralCategory::One,
            ..
        }
    ));
}

#[test]
fn duplicate_locale_across_records() {
    let err = build_table(&[record(&["en", "de"], &[]), record(&["fr", "de"], &[])]).unwrap_err();
    assert_eq!(
        err,
        BuildError::DuplicateLocale {
            locale: "de".into(),
            first_record: 0,
            second_record: 1,
        }
    );
}

#[test]
fn duplicate_locale_within_record() {
    let err = build_table(&[record(&["en", "en"], &[])]).unwrap_err();
    assert_eq!(
        err,
        BuildError::DuplicateLocale {
            locale: "en".into(),
            first_record: 0,
            second_record: 0,
        }
    );
}

#[test]
fn record_without_locales() {
    let err = build_table(&[record(&["en"], &[]), record(&[], &[])]).unwrap_err();
    assert_eq!(err, BuildError::EmptyLocales { record: 1 });
    assert_eq!(err.to_string(), "record 1 declares no locales");
}

#[test]
fn duplicate_category() {
    let err = build_table(&[record(
        &["xx"],
        &[(PluralCategory::One, "n = 1"), (PluralCategory::One, "n = 2")],
    )])
    .unwrap_err();
    assert_eq!(
        err,
        BuildError::DuplicateCategory {
            locales: "xx".into(),
            category: PluralCategory::One,
        }
    );
}

// =============================================================================
// Evaluation errors
// =============================================================================

#[test]
fn unknown_locale_is_an_error() {
    let table = english();
    let err = table
        .category_for("fr", &PluralOperand::from(1))
        .unwrap_err();
    assert_eq!(
        err,
        EvalError::UnknownLocale {
            locale: "fr".into(),
            suggestions: vec![],
        }
    );
    assert_eq!(err.to_string(), "unknown locale 'fr'");
}

#[test]
fn unknown_locale_suggests_close_codes() {
    let table = english();
    let err = category_for(&table, "en-US", &PluralOperand::from(1)).unwrap_err();
    assert_eq!(
        err,
        EvalError::UnknownLocale {
            locale: "en-US".into(),
            suggestions: vec!["en_US".into()],
        }
    );
    assert_eq!(
        err.to_string(),
        "unknown locale 'en-US', did you mean: en_US?"
    );
}

#[test]
fn locale_codes_are_case_sensitive() {
    let table = english();
    assert!(table.category_for("EN", &PluralOperand::from(1)).is_err());
}

// =============================================================================
// Records as data
// =============================================================================

#[test]
fn records_deserialize_from_json() {
    let json = r#"[
        { "locales": ["cs", "sk"],
          "rules": [
            { "category": "one", "rule": "i = 1 and v = 0 @integer 1" },
            { "category": "few", "rule": "i = 2..4 and v = 0 @integer 2~4" },
            { "category": "many", "rule": "v != 0   @decimal 0.0~1.5" },
            { "category": "other", "rule": " @integer 0, 5~19" }
          ] }
    ]"#;
    let records: Vec<RuleRecord> = serde_json::from_str(json).unwrap();
    assert_eq!(records[0].locales, ["cs", "sk"]);
    assert_eq!(records[0].rules[1].category, PluralCategory::Few);

    let table = build_table(&records).unwrap();
    assert_eq!(select(&table, "sk", "1"), PluralCategory::One);
    assert_eq!(select(&table, "sk", "3"), PluralCategory::Few);
    assert_eq!(select(&table, "cs", "1.5"), PluralCategory::Many);
    assert_eq!(select(&table, "cs", "7"), PluralCategory::Other);
}

#[test]
fn unknown_category_is_rejected_by_serde() {
    let json = r#"{ "locales": ["en"], "rules": [{ "category": "several", "rule": "n = 3" }] }"#;
    assert!(serde_json::from_str::<RuleRecord>(json).is_err());
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn table_is_shared_across_threads() {
    let table = RuleTable::cldr().unwrap();
    let expected: Vec<PluralCategory> = (0..200)
        .map(|n| table.category_for("ru", &PluralOperand::from(n)).unwrap())
        .collect();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for (n, category) in (0..200).zip(&expected) {
                    let operand = PluralOperand::from(n);
                    assert_eq!(table.category_for("ru", &operand).unwrap(), *category);
                }
            });
        }
    });
}

// =============================================================================
// Bundled CLDR data
// =============================================================================

fn cldr(locale: &str, number: &str) -> PluralCategory {
    select(&RuleTable::cldr().unwrap(), locale, number)
}

#[test]
fn cldr_table_covers_every_bundled_locale() {
    let table = RuleTable::cldr().unwrap();
    assert_eq!(table.len(), plurals_cldr::locales().count());
    assert_eq!(table.rule_sets().len(), plurals_cldr::CARDINAL_RULES.len());
}

#[test]
fn cldr_slovenian() {
    assert_eq!(cldr("sl", "1"), PluralCategory::One);
    assert_eq!(cldr("sl", "101"), PluralCategory::One);
    assert_eq!(cldr("sl", "2"), PluralCategory::Two);
    assert_eq!(cldr("sl", "204"), PluralCategory::Few);
    assert_eq!(cldr("sl", "1.5"), PluralCategory::Few);
    assert_eq!(cldr("sl", "11"), PluralCategory::Other);
}

#[test]
fn cldr_latvian() {
    assert_eq!(cldr("lv", "0"), PluralCategory::Zero);
    assert_eq!(cldr("lv", "15"), PluralCategory::Zero);
    assert_eq!(cldr("lv", "21"), PluralCategory::One);
    assert_eq!(cldr("lv", "0.1"), PluralCategory::One);
    assert_eq!(cldr("lv", "0.11"), PluralCategory::Zero);
    assert_eq!(cldr("lv", "22"), PluralCategory::Other);
}

#[test]
fn cldr_filipino() {
    assert_eq!(cldr("fil", "1"), PluralCategory::One);
    assert_eq!(cldr("fil", "4"), PluralCategory::Other);
    assert_eq!(cldr("fil", "5"), PluralCategory::One);
    assert_eq!(cldr("tl", "26"), PluralCategory::Other);
    assert_eq!(cldr("ceb", "0.5"), PluralCategory::One);
}

#[test]
fn cldr_czech() {
    assert_eq!(cldr("cs", "1"), PluralCategory::One);
    assert_eq!(cldr("cs", "4"), PluralCategory::Few);
    assert_eq!(cldr("cs", "5"), PluralCategory::Other);
    assert_eq!(cldr("cs", "1.0"), PluralCategory::Many);
}

#[test]
fn cldr_polish() {
    assert_eq!(cldr("pl", "1"), PluralCategory::One);
    assert_eq!(cldr("pl", "22"), PluralCategory::Few);
    assert_eq!(cldr("pl", "12"), PluralCategory::Many);
    assert_eq!(cldr("pl", "21"), PluralCategory::Many);
    assert_eq!(cldr("pl", "1.5"), PluralCategory::Other);
}

#[test]
fn cldr_french_millions() {
    assert_eq!(cldr("fr", "0"), PluralCategory::One);
    assert_eq!(cldr("fr", "1.5"), PluralCategory::One);
    assert_eq!(cldr("fr", "1000000"), PluralCategory::Many);
    assert_eq!(cldr("fr", "1000001"), PluralCategory::Other);
}

#[test]
fn cldr_belarusian_large_integers() {
    assert_eq!(cldr("be", "10000000000000001"), PluralCategory::One);
    assert_eq!(cldr("be", "10000000000000003"), PluralCategory::Few);
    assert_eq!(cldr("be", "10000000000000011"), PluralCategory::Many);
    let table = RuleTable::cldr().unwrap();
    assert_eq!(
        table
            .category_for("be", &PluralOperand::from(10_000_000_000_000_001_u64))
            .unwrap(),
        PluralCategory::One
    );
}

#[test]
fn cldr_root_has_no_rules() {
    let table = RuleTable::cldr().unwrap();
    let root = table.rule_set("root").unwrap();
    assert!(root.rules().is_empty());
    assert!(Arc::ptr_eq(root, table.rule_set("ja").unwrap()));
}
