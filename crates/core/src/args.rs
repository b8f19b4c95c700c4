//! Argument model and token serialization.
//!
//! Arguments forwarded to the analysis tool are a closed set of variants.
//! Each variant serializes to one or more command-line tokens; arrays
//! expand in order and booleans become `0`/`1`.
//!
//! Numeric formatting:
//!
//! | Value            | Token            |
//! |------------------|------------------|
//! | integer `60`     | `60`             |
//! | float `0.007`    | `0.007`          |
//! | float `2.0`      | `2.0`            |
//! | float `1e-7`     | `1e-7`           |
//! | `f64::INFINITY`  | `Inf`            |
//! | `f64::NAN`       | `NaN`            |
//!
//! Floats use the shortest representation that round-trips and always
//! keep a decimal point or exponent, so the tool never sees a float that
//! looks like an integer.

use std::fmt;

use serde_json::Value;

use crate::error::{json_kind, ShimError};

/// A numeric scalar, keeping track of whether it was written as an integer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn from_json(number: &serde_json::Number) -> Self {
        if let Some(i) = number.as_i64() {
            Self::Int(i)
        } else if let Some(u) = number.as_u64() {
            // Above i64::MAX; precision loss is accepted.
            Self::Float(u as f64)
        } else {
            Self::Float(number.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) if x.is_nan() => f.write_str("NaN"),
            Self::Float(x) if x.is_infinite() => {
                f.write_str(if x.is_sign_positive() { "Inf" } else { "-Inf" })
            }
            Self::Float(x) => write!(f, "{x:?}"),
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(value: $t) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Self::Int(i64::from(value))
    }
}

/// One element of the forwarded argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// Passed through as a single token, unmodified.
    Text(String),
    /// Serialized as `1` or `0`.
    Flag(bool),
    Number(Number),
    /// One token per element, in order.
    NumberArray(Vec<Number>),
}

impl Arg {
    /// Append this argument's tokens to `out`.
    pub fn push_tokens(&self, out: &mut Vec<String>) {
        match self {
            Self::Text(text) => out.push(text.clone()),
            Self::Flag(flag) => out.push(Number::from(*flag).to_string()),
            Self::Number(number) => out.push(number.to_string()),
            Self::NumberArray(numbers) => out.extend(numbers.iter().map(Number::to_string)),
        }
    }

    pub fn tokens(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.push_tokens(&mut out);
        out
    }

    /// Convert an untyped JSON value found at `position` in an argument list.
    ///
    /// Arrays must hold only numbers or booleans. Objects, nulls, nested
    /// arrays and arrays of strings are rejected.
    pub fn from_json(position: usize, value: &Value) -> Result<Self, ShimError> {
        match value {
            Value::String(text) => Ok(Self::Text(text.clone())),
            Value::Bool(flag) => Ok(Self::Flag(*flag)),
            Value::Number(number) => Ok(Self::Number(Number::from_json(number))),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Number(number) => Ok(Number::from_json(number)),
                    Value::Bool(flag) => Ok(Number::from(*flag)),
                    other => Err(ShimError::UnsupportedArgumentType {
                        position,
                        kind: array_element_kind(other),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::NumberArray),
            other => Err(ShimError::UnsupportedArgumentType {
                position,
                kind: json_kind(other),
            }),
        }
    }
}

fn array_element_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "array containing null",
        Value::String(_) => "array containing string",
        Value::Array(_) => "nested array",
        Value::Object(_) => "array containing object",
        Value::Bool(_) | Value::Number(_) => "array",
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Arg {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<Number> for Arg {
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

macro_rules! arg_from_number {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Arg {
                fn from(value: $t) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

arg_from_number!(i8, i16, i32, i64, u8, u16, u32, f64);

impl<T: Into<Number>> From<Vec<T>> for Arg {
    fn from(values: Vec<T>) -> Self {
        Self::NumberArray(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Number> + Copy> From<&[T]> for Arg {
    fn from(values: &[T]) -> Self {
        Self::NumberArray(values.iter().copied().map(Into::into).collect())
    }
}

impl<T: Into<Number>, const N: usize> From<[T; N]> for Arg {
    fn from(values: [T; N]) -> Self {
        Self::NumberArray(values.into_iter().map(Into::into).collect())
    }
}

/// Build a `Vec<Arg>` from heterogeneous values.
///
/// ```
/// use decaes_core::args;
///
/// let list = args!["--TE", 0.007, "--nT2", 60, "--T2Range", [0.01, 2.0]];
/// assert_eq!(list.len(), 6);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        vec![$($crate::Arg::from($arg)),*]
    };
}

/// Flatten an argument list into command-line tokens, in order.
pub fn serialize_args(args: &[Arg]) -> Vec<String> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        arg.push_tokens(&mut out);
    }
    out
}

/// Convert a list of untyped JSON values into typed arguments.
///
/// Fails on the first unsupported element; positions are zero-based
/// indices into `values`.
pub fn args_from_json(values: &[Value]) -> Result<Vec<Arg>, ShimError> {
    values
        .iter()
        .enumerate()
        .map(|(position, value)| Arg::from_json(position, value))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn mixed_list_serializes_in_order() {
        let list = args!["--TE", 0.007, "--nT2", 60, "--T2Range", [0.01, 2.0]];
        assert_eq!(
            serialize_args(&list),
            ["--TE", "0.007", "--nT2", "60", "--T2Range", "0.01", "2.0"]
        );
    }

    #[test]
    fn booleans_become_digits() {
        assert_eq!(Arg::from(true).tokens(), ["1"]);
        assert_eq!(Arg::from(false).tokens(), ["0"]);
        assert_eq!(Arg::from(vec![true, false]).tokens(), ["1", "0"]);
    }

    #[test]
    fn float_formatting_policy() {
        let cases = [
            (0.007, "0.007"),
            (2.0, "2.0"),
            (-0.5, "-0.5"),
            (1e-7, "1e-7"),
            (1e20, "1e20"),
            (123.25, "123.25"),
            (f64::INFINITY, "Inf"),
            (f64::NEG_INFINITY, "-Inf"),
            (f64::NAN, "NaN"),
        ];
        for (value, expected) in cases {
            assert_eq!(Number::Float(value).to_string(), expected, "{value}");
        }
    }

    #[test]
    fn integer_formatting() {
        assert_eq!(Number::from(60).to_string(), "60");
        assert_eq!(Number::from(-3i64).to_string(), "-3");
        assert_eq!(Number::from(u32::MAX).to_string(), "4294967295");
    }

    #[test]
    fn text_passes_through_unmodified() {
        let list = args!["image.nii.gz", "--T2map", "@settings.txt", "with space"];
        assert_eq!(
            serialize_args(&list),
            ["image.nii.gz", "--T2map", "@settings.txt", "with space"]
        );
    }

    #[test]
    fn empty_array_contributes_no_tokens() {
        let list = args!["--a", Vec::<f64>::new(), "--b"];
        assert_eq!(serialize_args(&list), ["--a", "--b"]);
    }

    #[test]
    fn slice_conversion() {
        let values: &[i32] = &[1, 2, 3];
        assert_eq!(Arg::from(values).tokens(), ["1", "2", "3"]);
    }

    #[test]
    fn json_list_matches_typed_list() {
        let values = vec![
            json!("--TE"),
            json!(0.007),
            json!("--nT2"),
            json!(60),
            json!("--T2Range"),
            json!([0.01, 2.0]),
            json!("--SetFlip"),
            json!(true),
        ];
        let list = args_from_json(&values).expect("supported");
        assert_eq!(
            serialize_args(&list),
            ["--TE", "0.007", "--nT2", "60", "--T2Range", "0.01", "2.0", "--SetFlip", "1"]
        );
    }

    #[test]
    fn json_object_rejected_with_position() {
        let values = vec![json!("--TE"), json!({"value": 0.007})];
        match args_from_json(&values) {
            Err(ShimError::UnsupportedArgumentType { position, kind }) => {
                assert_eq!(position, 1);
                assert_eq!(kind, "object");
            }
            other => panic!("expected UnsupportedArgumentType, got {other:?}"),
        }
    }

    #[test]
    fn json_null_and_bad_arrays_rejected() {
        let cases = [
            (json!(null), "null"),
            (json!([1, "two"]), "array containing string"),
            (json!([[1, 2]]), "nested array"),
            (json!([null]), "array containing null"),
        ];
        for (value, expected) in cases {
            match Arg::from_json(4, &value) {
                Err(ShimError::UnsupportedArgumentType { position, kind }) => {
                    assert_eq!(position, 4);
                    assert_eq!(kind, expected);
                }
                other => panic!("expected rejection of {value}, got {other:?}"),
            }
        }
    }

    #[test]
    fn json_large_unsigned_becomes_float() {
        let arg = Arg::from_json(0, &json!(u64::MAX)).expect("supported");
        assert!(matches!(arg, Arg::Number(Number::Float(_))));
    }
}
