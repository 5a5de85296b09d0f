use crate::error::ParseErrorKind;
use crate::numeric::{parse_float, parse_integer};

/// A type an environment value can be converted into.
///
/// `TYPE_NAME` is what [`ParseError::target`](crate::ParseError::target)
/// reports when conversion fails.
pub trait EnvValue: Sized {
    const TYPE_NAME: &'static str;

    fn parse_env(raw: &str) -> Result<Self, ParseErrorKind>;
}

impl EnvValue for String {
    const TYPE_NAME: &'static str = "string";

    fn parse_env(raw: &str) -> Result<Self, ParseErrorKind> {
        Ok(raw.to_string())
    }
}

impl EnvValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn parse_env(raw: &str) -> Result<Self, ParseErrorKind> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(ParseErrorKind::Syntax),
        }
    }
}

macro_rules! impl_integer {
    ($allow_sign:expr => $($ty:ty),+) => {
        $(
            impl EnvValue for $ty {
                const TYPE_NAME: &'static str = stringify!($ty);

                fn parse_env(raw: &str) -> Result<Self, ParseErrorKind> {
                    parse_integer(raw, $allow_sign, <$ty>::from_str_radix)
                }
            }
        )+
    };
}

impl_integer!(true => i8, i16, i32, i64, isize);
impl_integer!(false => u8, u16, u32, u64, usize);

impl EnvValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn parse_env(raw: &str) -> Result<Self, ParseErrorKind> {
        parse_float(raw, f32::is_infinite)
    }
}

impl EnvValue for f64 {
    const TYPE_NAME: &'static str = "f64";

    fn parse_env(raw: &str) -> Result<Self, ParseErrorKind> {
        parse_float(raw, f64::is_infinite)
    }
}
