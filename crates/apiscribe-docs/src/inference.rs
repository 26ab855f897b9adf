//! Type inference from runtime values.
//!
//! Observed values carry no type annotations: a query parameter arrives as
//! the string `"42"`, a JSON body field as the number `42`. This module maps
//! such values to Swagger `type`/`format` pairs using a fixed, ordered list
//! of rules. The first rule that accepts a value decides its type, so the
//! order is part of the contract. The digit rule inspects strings only; a
//! JSON integer is an integer whatever its sign.
//!
//! | # | rule | type | format |
//! |---|------|------|--------|
//! | 1 | digit-only string, any JSON integer | `integer` | `int32` / `int64` |
//! | 2 | numeric string, JSON float | `number` | `float` / `double` |
//! | 3 | JSON boolean, `"true"` / `"false"` | `boolean` | `boolean` |
//! | 4 | JSON object | `object` | - |
//! | 5 | JSON array | `array` | - |
//! | 6 | anything else | `string` | `date` / `string` |

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Swagger primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Whole number.
    Integer,
    /// Floating point number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Structured value with named members.
    Object,
    /// List of values.
    Array,
    /// Text.
    String,
}

/// Swagger data format refining a [`DataType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Signed 32-bit integer.
    Int32,
    /// Signed 64-bit integer.
    Int64,
    /// Single precision number.
    Float,
    /// Double precision number.
    Double,
    /// Boolean.
    Boolean,
    /// Calendar date or timestamp.
    Date,
    /// Free text.
    String,
}

/// The `type`/`format` pair inferred for a value.
///
/// `format` is absent for objects and arrays and present for every other
/// type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Swagger type.
    #[serde(rename = "type")]
    pub data_type: DataType,
    /// Swagger format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,
}

impl TypeDescriptor {
    /// An integer descriptor, `int64` when `wide`.
    #[must_use]
    pub fn integer(wide: bool) -> Self {
        Self::with_format(
            DataType::Integer,
            if wide { DataFormat::Int64 } else { DataFormat::Int32 },
        )
    }

    /// A number descriptor, `double` when `double`.
    #[must_use]
    pub fn number(double: bool) -> Self {
        Self::with_format(
            DataType::Number,
            if double { DataFormat::Double } else { DataFormat::Float },
        )
    }

    /// A boolean descriptor.
    #[must_use]
    pub fn boolean() -> Self {
        Self::with_format(DataType::Boolean, DataFormat::Boolean)
    }

    /// An object descriptor.
    #[must_use]
    pub fn object() -> Self {
        Self {
            data_type: DataType::Object,
            format: None,
        }
    }

    /// An array descriptor.
    #[must_use]
    pub fn array() -> Self {
        Self {
            data_type: DataType::Array,
            format: None,
        }
    }

    /// A string descriptor, `date` when `date`.
    #[must_use]
    pub fn string(date: bool) -> Self {
        Self::with_format(
            DataType::String,
            if date { DataFormat::Date } else { DataFormat::String },
        )
    }

    fn with_format(data_type: DataType, format: DataFormat) -> Self {
        Self {
            data_type,
            format: Some(format),
        }
    }
}

type Rule = fn(&Value) -> Option<TypeDescriptor>;

/// Classification rules in priority order.
const RULES: [Rule; 6] = [digits, numeric, boolean, object, array, string];

/// Infers the type descriptor of a runtime value.
///
/// # Example
///
/// ```rust
/// use apiscribe_docs::{infer_type, DataFormat, DataType};
/// use serde_json::json;
///
/// let id = infer_type(&json!("123"));
/// assert_eq!(id.data_type, DataType::Integer);
///
/// let day = infer_type(&json!("2024-01-01"));
/// assert_eq!(day.format, Some(DataFormat::Date));
/// ```
#[must_use]
pub fn infer_type(value: &Value) -> TypeDescriptor {
    RULES
        .iter()
        .find_map(|rule| rule(value))
        .unwrap_or_else(|| TypeDescriptor::string(false))
}

fn digits(value: &Value) -> Option<TypeDescriptor> {
    match value {
        Value::String(s) if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) => {
            Some(TypeDescriptor::integer(s.parse::<i32>().is_err()))
        }
        Value::Number(n) if n.is_i64() || n.is_u64() => {
            Some(TypeDescriptor::integer(!fits_i32(n)))
        }
        _ => None,
    }
}

fn fits_i32(n: &Number) -> bool {
    n.as_i64().is_some_and(|v| i32::try_from(v).is_ok())
}

fn numeric(value: &Value) -> Option<TypeDescriptor> {
    match value {
        Value::String(s) if is_numeric_literal(s) => Some(TypeDescriptor::number(false)),
        Value::Number(_) => Some(TypeDescriptor::number(true)),
        _ => None,
    }
}

fn boolean(value: &Value) -> Option<TypeDescriptor> {
    match value {
        Value::Bool(_) => Some(TypeDescriptor::boolean()),
        Value::String(s) if s == "true" || s == "false" => Some(TypeDescriptor::boolean()),
        _ => None,
    }
}

fn object(value: &Value) -> Option<TypeDescriptor> {
    value.is_object().then(TypeDescriptor::object)
}

fn array(value: &Value) -> Option<TypeDescriptor> {
    value.is_array().then(TypeDescriptor::array)
}

fn string(value: &Value) -> Option<TypeDescriptor> {
    let date = value.as_str().is_some_and(is_timestamp);
    Some(TypeDescriptor::string(date))
}

/// Returns true for decimal literals such as `-1`, `1.5`, `.5` or `2e10`.
///
/// Surrounding whitespace is allowed. `inf` and `NaN` are not numeric.
#[must_use]
pub fn is_numeric_literal(s: &str) -> bool {
    static NUMERIC: OnceLock<Regex> = OnceLock::new();
    NUMERIC
        .get_or_init(|| {
            Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$").expect("valid regex")
        })
        .is_match(s)
}

const DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Returns true if the string parses as a calendar timestamp.
#[must_use]
pub fn is_timestamp(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    DateTime::parse_from_rfc3339(s).is_ok()
        || DateTime::parse_from_rfc2822(s).is_ok()
        || DATE_TIME_FORMATS
            .iter()
            .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}
