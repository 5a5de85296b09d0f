use std::borrow::Cow;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::error::ParseErrorKind;

/// An integer literal with its sign, radix and separators resolved.
#[derive(Debug, PartialEq, Eq)]
struct IntegerLiteral {
    negative: bool,
    radix: u32,
    digits: String,
}

impl IntegerLiteral {
    fn signed_digits(&self) -> String {
        if self.negative {
            format!("-{}", self.digits)
        } else {
            self.digits.clone()
        }
    }
}

/// Parses `raw` as a base-prefixed integer and range-checks it through
/// `from_str_radix` of the target width.
pub(crate) fn parse_integer<T>(
    raw: &str,
    allow_sign: bool,
    from_str_radix: fn(&str, u32) -> Result<T, ParseIntError>,
) -> Result<T, ParseErrorKind> {
    let literal = split_integer(raw, allow_sign)?;
    from_str_radix(&literal.signed_digits(), literal.radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseErrorKind::OutOfRange,
        _ => ParseErrorKind::Syntax,
    })
}

pub(crate) fn parse_float<T>(raw: &str, is_infinite: fn(T) -> bool) -> Result<T, ParseErrorKind>
where
    T: FromStr + Copy,
{
    let text = strip_float_separators(raw)?;
    let value = text.parse::<T>().map_err(|_| ParseErrorKind::Syntax)?;
    if is_infinite(value) && !names_infinity(&text) {
        return Err(ParseErrorKind::OutOfRange);
    }
    Ok(value)
}

/// Drops `_` separators; each one must sit between two decimal digits.
fn strip_float_separators(raw: &str) -> Result<Cow<'_, str>, ParseErrorKind> {
    if !raw.contains('_') {
        return Ok(Cow::Borrowed(raw));
    }
    let bytes = raw.as_bytes();
    let mut stripped = String::with_capacity(raw.len());
    for (idx, ch) in raw.char_indices() {
        if ch != '_' {
            stripped.push(ch);
            continue;
        }
        let digit_before = idx
            .checked_sub(1)
            .is_some_and(|prev| bytes[prev].is_ascii_digit());
        let digit_after = bytes.get(idx + 1).is_some_and(u8::is_ascii_digit);
        if !(digit_before && digit_after) {
            return Err(ParseErrorKind::Syntax);
        }
    }
    Ok(Cow::Owned(stripped))
}

fn names_infinity(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn split_integer(raw: &str, allow_sign: bool) -> Result<IntegerLiteral, ParseErrorKind> {
    let (negative, unsigned) = match raw.as_bytes().first() {
        Some(b'+') if allow_sign => (false, &raw[1..]),
        Some(b'-') if allow_sign => (true, &raw[1..]),
        _ => (false, raw),
    };
    if unsigned.is_empty() {
        return Err(ParseErrorKind::Syntax);
    }

    let (radix, body, prefixed) = split_radix(unsigned);
    let mut digits = String::with_capacity(body.len());
    // A radix prefix counts as a digit, so `0x_ff` is accepted.
    let mut after_digit = prefixed;
    for ch in body.chars() {
        if ch == '_' {
            if !after_digit {
                return Err(ParseErrorKind::Syntax);
            }
            after_digit = false;
        } else if ch.is_digit(radix) {
            digits.push(ch);
            after_digit = true;
        } else {
            return Err(ParseErrorKind::Syntax);
        }
    }
    if !after_digit {
        return Err(ParseErrorKind::Syntax);
    }
    if digits.is_empty() {
        // bare "0"
        digits.push('0');
    }

    Ok(IntegerLiteral {
        negative,
        radix,
        digits,
    })
}

fn split_radix(unsigned: &str) -> (u32, &str, bool) {
    let bytes = unsigned.as_bytes();
    if bytes[0] != b'0' {
        return (10, unsigned, false);
    }
    if bytes.len() >= 3 {
        match bytes[1].to_ascii_lowercase() {
            b'x' => return (16, &unsigned[2..], true),
            b'o' => return (8, &unsigned[2..], true),
            b'b' => return (2, &unsigned[2..], true),
            _ => {}
        }
    }
    (8, &unsigned[1..], true)
}

#[cfg(test)]
mod tests {
    use super::{IntegerLiteral, parse_float, parse_integer, split_integer};
    use crate::error::ParseErrorKind;

    fn literal(negative: bool, radix: u32, digits: &str) -> IntegerLiteral {
        IntegerLiteral {
            negative,
            radix,
            digits: digits.to_string(),
        }
    }

    #[test]
    fn split_integer_resolves_radix_prefixes() {
        assert_eq!(split_integer("8080", true), Ok(literal(false, 10, "8080")));
        assert_eq!(split_integer("0x1F", true), Ok(literal(false, 16, "1F")));
        assert_eq!(split_integer("0XfF", true), Ok(literal(false, 16, "fF")));
        assert_eq!(split_integer("0o17", true), Ok(literal(false, 8, "17")));
        assert_eq!(split_integer("0b101", true), Ok(literal(false, 2, "101")));
        assert_eq!(split_integer("017", true), Ok(literal(false, 8, "17")));
        assert_eq!(split_integer("0", true), Ok(literal(false, 8, "0")));
        assert_eq!(split_integer("-0x10", true), Ok(literal(true, 16, "10")));
    }

    #[test]
    fn split_integer_accepts_single_separators_between_digits() {
        assert_eq!(split_integer("1_000_000", true), Ok(literal(false, 10, "1000000")));
        assert_eq!(split_integer("0x_ff", true), Ok(literal(false, 16, "ff")));
        assert_eq!(split_integer("0_7", true), Ok(literal(false, 8, "7")));
    }

    #[test]
    fn split_integer_rejects_misplaced_separators() {
        for raw in ["_1", "1_", "1__0", "0x_", "-_1", "+"] {
            assert_eq!(
                split_integer(raw, true),
                Err(ParseErrorKind::Syntax),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn split_integer_rejects_malformed_text() {
        for raw in ["", "-", "0x", "08", "0b2", "12a", " 1", "1 ", "0x-5", "--1", "١٢"] {
            assert_eq!(
                split_integer(raw, true),
                Err(ParseErrorKind::Syntax),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn split_integer_rejects_sign_when_unsigned() {
        assert_eq!(split_integer("+1", false), Err(ParseErrorKind::Syntax));
        assert_eq!(split_integer("-0", false), Err(ParseErrorKind::Syntax));
    }

    #[test]
    fn parse_integer_checks_target_width() {
        assert_eq!(parse_integer("127", true, i8::from_str_radix), Ok(127));
        assert_eq!(parse_integer("-128", true, i8::from_str_radix), Ok(-128));
        assert_eq!(
            parse_integer("128", true, i8::from_str_radix),
            Err(ParseErrorKind::OutOfRange)
        );
        assert_eq!(
            parse_integer("-129", true, i8::from_str_radix),
            Err(ParseErrorKind::OutOfRange)
        );
        assert_eq!(
            parse_integer("0x100", false, u8::from_str_radix),
            Err(ParseErrorKind::OutOfRange)
        );
        assert_eq!(parse_integer("0xff", false, u8::from_str_radix), Ok(255));
    }

    #[test]
    fn parse_float_accepts_decimal_scientific_and_special_values() {
        assert_eq!(parse_float("3.25", f64::is_infinite), Ok(3.25));
        assert_eq!(parse_float("-2.5e3", f64::is_infinite), Ok(-2500.0));
        assert_eq!(parse_float(".5", f32::is_infinite), Ok(0.5));
        assert_eq!(
            parse_float("-Infinity", f64::is_infinite),
            Ok(f64::NEG_INFINITY)
        );
        assert!(
            parse_float("NaN", f64::is_infinite)
                .expect("nan parses")
                .is_nan()
        );
    }

    #[test]
    fn parse_float_accepts_separators_between_digits() {
        assert_eq!(parse_float("1_000.5", f64::is_infinite), Ok(1000.5));
        assert_eq!(parse_float("1_23.50_0_0e+1_2", f64::is_infinite), Ok(1.235e14));
        assert_eq!(parse_float("-2_5e-1", f32::is_infinite), Ok(-2.5));
    }

    #[test]
    fn parse_float_reports_overflow_of_target_width() {
        assert_eq!(
            parse_float("1e39", f32::is_infinite),
            Err(ParseErrorKind::OutOfRange)
        );
        assert_eq!(parse_float("1e39", f64::is_infinite), Ok(1e39));
        assert_eq!(
            parse_float("1e400", f64::is_infinite),
            Err(ParseErrorKind::OutOfRange)
        );
    }

    #[test]
    fn parse_float_rejects_malformed_text() {
        for raw in [
            "", "abc", "1.2.3", "0x1p3", " 1.0", "1_.5", "1._5", "_1.0", "1.0_", "1__0.5",
            "1e_5", "in_f",
        ] {
            assert_eq!(
                parse_float(raw, f64::is_infinite),
                Err(ParseErrorKind::Syntax),
                "input {raw:?}"
            );
        }
    }
}
