//! Implementation of the `plurals check` command.

use std::path::PathBuf;

use miette::{IntoDiagnostic, Report};
use owo_colors::{OwoColorize, Stream};
use plurals::RuleTable;
use serde::Serialize;

use super::{build_report, load_records};

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Rule files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct CheckResult {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    locales: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rule_sets: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
///
/// Every file is checked even after a failure; the exit code reports whether
/// any of them failed.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut results = Vec::with_capacity(args.files.len());
    let mut failed = false;

    for path in &args.files {
        let outcome = load_records(path).and_then(|records| {
            RuleTable::build(&records).map_err(|e| build_report(path, &e))
        });
        let file = path.display().to_string();
        match outcome {
            Ok(table) => {
                if !args.json {
                    println!(
                        "{} {file}: {} locales, {} rule sets",
                        "ok".if_supports_color(Stream::Stdout, |text| text.green()),
                        table.len(),
                        table.rule_sets().len()
                    );
                }
                results.push(CheckResult {
                    file,
                    ok: true,
                    locales: Some(table.len()),
                    rule_sets: Some(table.rule_sets().len()),
                    error: None,
                });
            }
            Err(report) => {
                failed = true;
                if !args.json {
                    print_failure(&file, &report);
                }
                results.push(CheckResult {
                    file,
                    ok: false,
                    locales: None,
                    rule_sets: None,
                    error: Some(report.to_string()),
                });
            }
        }
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).into_diagnostic()?
        );
    }

    if failed {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn print_failure(file: &str, report: &Report) {
    println!(
        "{} {file}",
        "error".if_supports_color(Stream::Stdout, |text| text.red())
    );
    eprintln!("{report:?}");
}
