//! Table formatting utilities for CLI output.

use std::sync::Arc;

use comfy_table::{ContentArrangement, Table, presets};
use plurals::LocaleRuleSet;

/// Format rule sets as an ASCII table, one row per rule set.
///
/// With `show_rules`, each row lists its rules in normalized form instead of
/// just the category names.
pub fn format_rule_set_table(rule_sets: &[Arc<LocaleRuleSet>], show_rules: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if show_rules {
        table.set_header(vec!["Locales", "Rules"]);
    } else {
        table.set_header(vec!["Locales", "Categories"]);
    }

    for rule_set in rule_sets {
        let summary = if show_rules {
            rule_set
                .rules()
                .iter()
                .map(|rule| format!("{}: {}", rule.category(), rule.condition()))
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            rule_set
                .categories()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        table.add_row(vec![rule_set.locales().join(" "), summary]);
    }

    table
}
