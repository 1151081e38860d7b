//! Typed values for environment variables.
//!
//! Every variable is declared with one of four kinds. The kind decides which
//! converter turns the raw environment string into a [`Value`]:
//!
//! | Kind | Rust type | Accepted input |
//! |------|-----------|----------------|
//! | [`VarKind::Integer`] | `i64` | base-10, optional sign |
//! | [`VarKind::Boolean`] | `bool` | `1 t T TRUE true True 0 f F FALSE false False` |
//! | [`VarKind::Text`] | `String` | anything |
//! | [`VarKind::Float`] | `f64` | decimal or exponent notation, `inf`, `nan` |

use std::fmt;
use std::string::{String, ToString};

/// The declared type of an environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// Signed 64-bit integer.
    Integer,
    /// `true` / `false`.
    Boolean,
    /// UTF-8 string, taken verbatim.
    Text,
    /// 64-bit floating point number.
    Float,
}

impl VarKind {
    /// Label shown in help text and conversion errors.
    pub const fn label(self) -> &'static str {
        match self {
            VarKind::Integer => "integer",
            VarKind::Boolean => "boolean",
            VarKind::Text => "string",
            VarKind::Float => "float",
        }
    }

    /// Convert a raw environment string into a value of this kind.
    pub fn convert(self, raw: &str) -> Result<Value, ConversionError> {
        match self {
            VarKind::Integer => parse_integer(raw).map(Value::Integer),
            VarKind::Boolean => parse_boolean(raw).map(Value::Boolean),
            VarKind::Text => Ok(Value::Text(raw.to_string())),
            VarKind::Float => parse_float(raw).map(Value::Float),
        }
    }
}

impl fmt::Display for VarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved environment variable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// An integer value.
    Integer(i64),
    /// A boolean value.
    Boolean(bool),
    /// A string value.
    Text(String),
    /// A floating point value.
    Float(f64),
}

impl Value {
    /// The kind tag of this value.
    pub const fn kind(&self) -> VarKind {
        match self {
            Value::Integer(_) => VarKind::Integer,
            Value::Boolean(_) => VarKind::Boolean,
            Value::Text(_) => VarKind::Text,
            Value::Float(_) => VarKind::Float,
        }
    }
}

/// Renders the value the way it is written back into the environment.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(i) => write!(f, "{i}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Text(s) => f.write_str(s),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

/// A raw string could not be converted to the declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionError {
    /// Why the conversion failed.
    pub reason: String,
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for ConversionError {}

fn parse_integer(raw: &str) -> Result<i64, ConversionError> {
    raw.parse::<i64>().map_err(|e| ConversionError {
        reason: e.to_string(),
    })
}

fn parse_boolean(raw: &str) -> Result<bool, ConversionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ConversionError {
            reason: "expected one of 1, t, T, TRUE, true, True, 0, f, F, FALSE, false, False"
                .to_string(),
        }),
    }
}

fn parse_float(raw: &str) -> Result<f64, ConversionError> {
    raw.parse::<f64>().map_err(|e| ConversionError {
        reason: e.to_string(),
    })
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for i64 {}
    impl Sealed for bool {}
    impl Sealed for String {}
    impl Sealed for f64 {}
}

/// Rust types that can be declared as environment variables.
///
/// Implemented for `i64`, `bool`, `String` and `f64`. Sealed: the set of
/// kinds is closed.
pub trait EnvType: sealed::Sealed + Clone + PartialEq + fmt::Display + Default + 'static {
    /// The kind tag for this type.
    const KIND: VarKind;

    /// Wrap into the type-erased value.
    fn into_value(self) -> Value;

    /// Borrow the typed payload back out of a value of the matching kind.
    fn from_value(value: &Value) -> Option<&Self>;
}

impl EnvType for i64 {
    const KIND: VarKind = VarKind::Integer;

    fn into_value(self) -> Value {
        Value::Integer(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Integer(i) => Some(i),
            _ => None,
        }
    }
}

impl EnvType for bool {
    const KIND: VarKind = VarKind::Boolean;

    fn into_value(self) -> Value {
        Value::Boolean(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl EnvType for String {
    const KIND: VarKind = VarKind::Text;

    fn into_value(self) -> Value {
        Value::Text(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl EnvType for f64 {
    const KIND: VarKind = VarKind::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<&Self> {
        match value {
            Value::Float(x) => Some(x),
            _ => None,
        }
    }
}
