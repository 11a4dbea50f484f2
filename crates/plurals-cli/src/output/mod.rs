//! Output formatting for the CLI.

pub mod diagnostic;
pub mod table;

pub use diagnostic::{RuleDiagnostic, RuleFileDiagnostic};
