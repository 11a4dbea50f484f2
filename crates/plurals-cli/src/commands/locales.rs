//! Implementation of the `plurals locales` command.

use std::path::PathBuf;

use miette::IntoDiagnostic;
use plurals::{PluralCategory, RuleTable};
use serde::Serialize;

use super::load_table;
use crate::output::table::format_rule_set_table;

/// Arguments for the locales command.
#[derive(Debug, clap::Args)]
pub struct LocalesArgs {
    /// Rule file (.json) to list instead of the bundled CLDR rules
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Show the normalized rules of each rule set
    #[arg(long)]
    pub show_rules: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one rule set.
#[derive(Debug, Serialize)]
struct RuleSetJson {
    locales: Vec<String>,
    categories: Vec<PluralCategory>,
    rules: Vec<RuleJson>,
}

#[derive(Debug, Serialize)]
struct RuleJson {
    category: PluralCategory,
    rule: String,
}

/// Run the locales command.
pub fn run_locales(args: LocalesArgs) -> miette::Result<i32> {
    let table = load_table(args.rules.as_deref())?;

    if args.json {
        let json = serde_json::to_string_pretty(&rule_sets_json(&table)).into_diagnostic()?;
        println!("{json}");
    } else {
        println!("{}", format_rule_set_table(table.rule_sets(), args.show_rules));
        println!(
            "\n{} locales in {} rule sets",
            table.len(),
            table.rule_sets().len()
        );
    }

    Ok(exitcode::OK)
}

fn rule_sets_json(table: &RuleTable) -> Vec<RuleSetJson> {
    table
        .rule_sets()
        .iter()
        .map(|rule_set| RuleSetJson {
            locales: rule_set.locales().to_vec(),
            categories: rule_set.categories(),
            rules: rule_set
                .rules()
                .iter()
                .map(|rule| RuleJson {
                    category: rule.category(),
                    rule: rule.condition().to_string(),
                })
                .collect(),
        })
        .collect()
}
