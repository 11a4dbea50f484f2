//! Integration tests for plural operand derivation.

use plurals::{OperandError, PluralOperand};

fn operand(text: &str) -> PluralOperand {
    text.parse().unwrap()
}

/// (n, i, v, w, f, t)
fn fields(operand: &PluralOperand) -> (f64, i64, u32, u32, i64, i64) {
    (
        operand.n(),
        operand.i(),
        operand.v(),
        operand.w(),
        operand.f(),
        operand.t(),
    )
}

// =============================================================================
// Decimal literals
// =============================================================================

#[test]
fn integer_literal() {
    assert_eq!(fields(&operand("1")), (1.0, 1, 0, 0, 0, 0));
}

#[test]
fn trailing_zero_counts_as_visible_digit() {
    assert_eq!(fields(&operand("1.0")), (1.0, 1, 1, 0, 0, 0));
    assert_eq!(fields(&operand("1.00")), (1.0, 1, 2, 0, 0, 0));
}

#[test]
fn fraction_with_and_without_trailing_zeros() {
    assert_eq!(fields(&operand("1.3")), (1.3, 1, 1, 1, 3, 3));
    assert_eq!(fields(&operand("1.30")), (1.3, 1, 2, 1, 30, 3));
    assert_eq!(fields(&operand("1.03")), (1.03, 1, 2, 2, 3, 3));
    assert_eq!(fields(&operand("1.230")), (1.23, 1, 3, 2, 230, 23));
}

#[test]
fn large_integer() {
    assert_eq!(fields(&operand("1200000")), (1_200_000.0, 1_200_000, 0, 0, 0, 0));
}

#[test]
fn integer_part_with_fraction() {
    assert_eq!(fields(&operand("1200.50")), (1200.5, 1200, 2, 1, 50, 5));
}

#[test]
fn leading_zeros_in_fraction_are_kept_in_counts() {
    assert_eq!(fields(&operand("0.001")), (0.001, 0, 3, 3, 1, 1));
    assert_eq!(fields(&operand("0.0010")), (0.001, 0, 4, 3, 10, 1));
}

#[test]
fn sign_is_dropped() {
    assert_eq!(operand("-1.30"), operand("1.30"));
    assert_eq!(operand("+7"), operand("7"));
    assert_eq!(fields(&operand("-0.5")), (0.5, 0, 1, 1, 5, 5));
}

#[test]
fn one_point_zero_differs_only_in_visible_digits() {
    let a = operand("1.0");
    let b = operand("1.00");
    assert_eq!(a.n(), b.n());
    assert_eq!(a.i(), b.i());
    assert_ne!(a.v(), b.v());
}

#[test]
fn derivation_is_deterministic() {
    for text in ["0", "1.30", "1200.50", "-3.000", "42"] {
        assert_eq!(operand(text), operand(text));
    }
}

#[test]
fn compact_exponent_is_always_zero() {
    assert_eq!(operand("1000000").e(), 0);
    assert_eq!(PluralOperand::from(5).e(), 0);
}

#[test]
fn invariants_hold() {
    for text in ["1", "1.0", "1.30", "1.230", "0.000", "12.3400", "99.9"] {
        let op = operand(text);
        assert!(op.w() <= op.v(), "{text}");
        assert!(op.t() == 0 || op.t() % 10 != 0, "{text}");
        let scale = 10_i64.pow(op.v() - op.w());
        assert_eq!(op.t() * scale, op.f(), "{text}");
    }
}

// =============================================================================
// Integer conversions
// =============================================================================

#[test]
fn from_integers_matches_parsed_literal() {
    assert_eq!(PluralOperand::from(22_i64), operand("22"));
    assert_eq!(PluralOperand::from(22_i32), operand("22"));
    assert_eq!(PluralOperand::from(22_u32), operand("22"));
    assert_eq!(PluralOperand::from(22_u64), operand("22"));
}

#[test]
fn from_negative_integer() {
    assert_eq!(PluralOperand::from(-5), operand("5"));
}

#[test]
fn from_i64_min_saturates_integer_part() {
    let op = PluralOperand::from(i64::MIN);
    assert_eq!(op.i(), i64::MAX);
    assert!(op.n() > 0.0);
}

#[test]
fn from_u64_past_i64_max_saturates_integer_part() {
    let op = PluralOperand::from(u64::MAX);
    assert_eq!(op.i(), i64::MAX);
    assert_eq!(op.n(), u64::MAX as f64);
    assert_eq!(PluralOperand::from(i64::MAX as u64).i(), i64::MAX);
}

// =============================================================================
// Errors
// =============================================================================

fn reason(text: &str) -> &'static str {
    match text.parse::<PluralOperand>() {
        Err(OperandError::InvalidNumberFormat { input, reason }) => {
            assert_eq!(input, text);
            reason
        }
        Ok(op) => panic!("'{text}' parsed as {op}"),
    }
}

#[test]
fn rejects_malformed_literals() {
    for text in [
        "", "-", "abc", "1.", ".5", "1.2.3", "1e3", " 1", "1 ", "1,5", "--1", "0x10", "½",
    ] {
        reason(text);
    }
}

#[test]
fn error_reasons_describe_the_problem() {
    assert_eq!(reason("1."), "missing digits after the decimal point");
    assert_eq!(reason(".5"), "missing integer digits");
    assert_eq!(reason("1a"), "expected only ASCII digits and one decimal point");
    assert_eq!(reason("99999999999999999999"), "integer part does not fit in 64 bits");
    assert_eq!(
        reason("0.99999999999999999999"),
        "fraction digits do not fit in 64 bits"
    );
}

#[test]
fn error_message_includes_input() {
    let err = "1.x".parse::<PluralOperand>().unwrap_err();
    assert_eq!(
        err.to_string(),
        "invalid number format '1.x': expected only ASCII digits and one decimal point"
    );
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn display_lists_all_operands() {
    assert_eq!(operand("1.30").to_string(), "n=1.3 i=1 v=2 w=1 f=30 t=3 e=0");
    assert_eq!(PluralOperand::from(7).to_string(), "n=7 i=7 v=0 w=0 f=0 t=0 e=0");
}
