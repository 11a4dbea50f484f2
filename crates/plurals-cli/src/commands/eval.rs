//! Implementation of the `plurals eval` command.

use std::path::PathBuf;
use std::sync::Arc;

use miette::{IntoDiagnostic, miette};
use plurals::{EvalError, PluralCategory, PluralOperand, PluralSelector};
use serde::Serialize;

use super::load_table;

/// Arguments for the eval command.
#[derive(Debug, clap::Args)]
pub struct EvalArgs {
    /// Locale code for evaluation (e.g., en, pt_PT, ru)
    #[arg(long, required = true)]
    pub locale: String,

    /// Numbers to categorize, as decimal literals (e.g., 1, 1.0, 21.50)
    #[arg(required = true, allow_hyphen_values = true)]
    pub numbers: Vec<String>,

    /// Rule file (.json) to use instead of the bundled CLDR rules
    #[arg(long)]
    pub rules: Option<PathBuf>,

    /// Locale to use when --locale has no rules
    #[arg(long)]
    pub fallback: Option<String>,

    /// Show the plural operands of each number
    #[arg(long)]
    pub operands: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one evaluated number.
#[derive(Serialize)]
pub struct EvalResult {
    pub number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<PluralCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operands: Option<PluralOperand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Run the eval command.
pub fn run_eval(args: EvalArgs) -> miette::Result<i32> {
    let table = Arc::new(load_table(args.rules.as_deref())?);
    let selector = PluralSelector::builder()
        .table(table)
        .locale(args.locale.clone())
        .maybe_fallback_locale(args.fallback.clone())
        .build();

    let mut results = Vec::with_capacity(args.numbers.len());
    let mut failed = false;
    for number in &args.numbers {
        let evaluated = number
            .parse::<PluralOperand>()
            .map_err(EvalError::from)
            .and_then(|operand| Ok((operand, selector.category_for(&operand)?)));
        let result = match evaluated {
            Ok((operand, category)) => EvalResult {
                number: number.clone(),
                category: Some(category),
                operands: Some(operand),
                error: None,
            },
            // An unknown locale fails every number the same way.
            Err(e @ EvalError::UnknownLocale { .. }) if !args.json => {
                return Err(miette!("{e}"));
            }
            Err(e) => {
                failed = true;
                EvalResult {
                    number: number.clone(),
                    category: None,
                    operands: None,
                    error: Some(e.to_string()),
                }
            }
        };
        results.push(result);
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).into_diagnostic()?
        );
    } else {
        print_results(&results, args.operands);
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn print_results(results: &[EvalResult], show_operands: bool) {
    for result in results {
        match (&result.category, &result.error) {
            (Some(category), _) => {
                match &result.operands {
                    Some(operands) if show_operands => {
                        println!("{}\t{category}\t{operands}", result.number);
                    }
                    _ => println!("{}\t{category}", result.number),
                }
            }
            (None, Some(error)) => eprintln!("{}\terror: {error}", result.number),
            (None, None) => {}
        }
    }
}
