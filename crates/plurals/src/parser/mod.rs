//! Plural rule parser.
//!
//! This module parses CLDR plural rule text into a condition tree that the
//! interpreter compiles into predicates.

pub mod ast;
pub mod error;
mod rule;

pub use ast::*;
pub use error::ParseError;
pub use rule::parse_rule;
