use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Errors produced while deriving plural operands from a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// The input is not a decimal literal of the form `[+-]digits[.digits]`.
    #[error("invalid number format '{input}': {reason}")]
    InvalidNumberFormat { input: String, reason: &'static str },
}

/// The plural operands of a number, as defined by CLDR (UTS #35).
///
/// | source  | n    | i | v | w | f  | t  |
/// |---------|------|---|---|---|----|----|
/// | 1       | 1    | 1 | 0 | 0 | 0  | 0  |
/// | 1.0     | 1    | 1 | 1 | 0 | 0  | 0  |
/// | 1.00    | 1    | 1 | 2 | 0 | 0  | 0  |
/// | 1.3     | 1.3  | 1 | 1 | 1 | 3  | 3  |
/// | 1.30    | 1.3  | 1 | 2 | 1 | 30 | 3  |
/// | 1.03    | 1.03 | 1 | 2 | 2 | 3  | 3  |
/// | 1.230   | 1.23 | 1 | 3 | 2 | 230| 23 |
///
/// Operands are derived from the decimal text rather than from a binary
/// float, because trailing fraction zeros are significant: `1.0` is `other`
/// in English while `1` is `one`.
///
/// The compact exponent operand `e` is always 0; compact notation is not
/// part of the input model.
///
/// # Example
///
/// ```
/// use plurals::PluralOperand;
///
/// let operand: PluralOperand = "1.30".parse().unwrap();
/// assert_eq!(operand.i(), 1);
/// assert_eq!(operand.v(), 2);
/// assert_eq!(operand.w(), 1);
/// assert_eq!(operand.f(), 30);
/// assert_eq!(operand.t(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PluralOperand {
    n: f64,
    i: i64,
    v: u32,
    w: u32,
    f: i64,
    t: i64,
}

impl PluralOperand {
    /// Derive operands from a decimal literal such as `"-12.50"`.
    pub fn from_decimal(input: &str) -> Result<Self, OperandError> {
        let invalid = |reason| OperandError::InvalidNumberFormat {
            input: input.to_string(),
            reason,
        };

        let unsigned = input.strip_prefix(['-', '+']).unwrap_or(input);
        let (integer_digits, fraction_digits) = match unsigned.split_once('.') {
            Some((integer, fraction)) => {
                if fraction.is_empty() {
                    return Err(invalid("missing digits after the decimal point"));
                }
                (integer, fraction)
            }
            None => (unsigned, ""),
        };

        if integer_digits.is_empty() {
            return Err(invalid("missing integer digits"));
        }
        if !integer_digits.bytes().all(|b| b.is_ascii_digit())
            || !fraction_digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid("expected only ASCII digits and one decimal point"));
        }

        let i = integer_digits
            .parse::<i64>()
            .map_err(|_| invalid("integer part does not fit in 64 bits"))?;
        let v = u32::try_from(fraction_digits.len())
            .map_err(|_| invalid("too many fraction digits"))?;
        let significant = fraction_digits.trim_end_matches('0');
        let w = u32::try_from(significant.len())
            .map_err(|_| invalid("too many fraction digits"))?;
        let f = parse_fraction(fraction_digits)
            .ok_or_else(|| invalid("fraction digits do not fit in 64 bits"))?;
        let t = parse_fraction(significant)
            .ok_or_else(|| invalid("fraction digits do not fit in 64 bits"))?;
        let n = unsigned
            .parse::<f64>()
            .map_err(|_| invalid("not a decimal number"))?;

        Ok(PluralOperand { n, i, v, w, f, t })
    }

    /// Absolute value of the source number.
    pub fn n(&self) -> f64 {
        self.n
    }

    /// Integer digits of the source number.
    pub fn i(&self) -> i64 {
        self.i
    }

    /// Number of visible fraction digits, with trailing zeros.
    pub fn v(&self) -> u32 {
        self.v
    }

    /// Number of visible fraction digits, without trailing zeros.
    pub fn w(&self) -> u32 {
        self.w
    }

    /// Visible fraction digits, with trailing zeros, as an integer.
    pub fn f(&self) -> i64 {
        self.f
    }

    /// Visible fraction digits, without trailing zeros, as an integer.
    pub fn t(&self) -> i64 {
        self.t
    }

    /// Compact decimal exponent. Always 0.
    pub fn e(&self) -> u32 {
        0
    }

    fn integer(magnitude: u64) -> Self {
        PluralOperand {
            n: magnitude as f64,
            // Magnitudes past i64::MAX saturate.
            i: i64::try_from(magnitude).unwrap_or(i64::MAX),
            v: 0,
            w: 0,
            f: 0,
            t: 0,
        }
    }
}

/// Parse fraction digits as an integer; an empty string is 0.
fn parse_fraction(digits: &str) -> Option<i64> {
    if digits.is_empty() {
        Some(0)
    } else {
        digits.parse().ok()
    }
}

impl FromStr for PluralOperand {
    type Err = OperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PluralOperand::from_decimal(s)
    }
}

impl From<i64> for PluralOperand {
    fn from(value: i64) -> Self {
        PluralOperand::integer(value.unsigned_abs())
    }
}

impl From<i32> for PluralOperand {
    fn from(value: i32) -> Self {
        PluralOperand::integer(value.unsigned_abs().into())
    }
}

impl From<u64> for PluralOperand {
    fn from(value: u64) -> Self {
        PluralOperand::integer(value)
    }
}

impl From<u32> for PluralOperand {
    fn from(value: u32) -> Self {
        PluralOperand::integer(value.into())
    }
}

impl Display for PluralOperand {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "n={} i={} v={} w={} f={} t={} e={}",
            self.n,
            self.i,
            self.v,
            self.w,
            self.f,
            self.t,
            self.e()
        )
    }
}
