//! CLI command implementations.

mod check;
mod eval;
mod locales;

use std::fs::read_to_string;
use std::path::Path;

use miette::{IntoDiagnostic, Report, miette};
use plurals::{BuildError, RuleRecord, RuleTable};

use crate::output::{RuleDiagnostic, RuleFileDiagnostic};

pub use check::{CheckArgs, run_check};
pub use eval::{EvalArgs, run_eval};
pub use locales::{LocalesArgs, run_locales};

/// Read rule records from a JSON file.
pub fn load_records(path: &Path) -> miette::Result<Vec<RuleRecord>> {
    let content = read_to_string(path)
        .into_diagnostic()
        .map_err(|e| miette!("Failed to read rule file {}: {}", path.display(), e))?;
    serde_json::from_str(&content)
        .map_err(|e| RuleFileDiagnostic::from_json_error(path, &content, &e).into())
}

/// Build the table from a rule file, or from the bundled CLDR rules when no
/// file is given.
pub fn load_table(rules: Option<&Path>) -> miette::Result<RuleTable> {
    match rules {
        Some(path) => {
            let records = load_records(path)?;
            RuleTable::build(&records).map_err(|e| build_report(path, &e))
        }
        None => RuleTable::cldr().map_err(|e| miette!("Bundled CLDR rules are invalid: {}", e)),
    }
}

/// Render a build error, pointing into the rule text when there is one.
pub fn build_report(path: &Path, err: &BuildError) -> Report {
    match RuleDiagnostic::from_build_error(path, err) {
        Some(diagnostic) => Report::new(diagnostic).wrap_err(err.to_string()),
        None => miette!("{}: {}", path.display(), err),
    }
}
