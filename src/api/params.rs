//! Request parameter resolution.
//!
//! Every parameter can arrive either in the query string or as a field of a
//! JSON object body. A non-empty query value wins; otherwise the body field is
//! used. A missing, empty or malformed body simply yields no body fields.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// Floats in `[I64_LOWER, I64_UPPER)` convert to `i64` without saturating
const I64_LOWER: f64 = i64::MIN as f64;
const I64_UPPER: f64 = -(i64::MIN as f64);

/// Failed conversion of a parameter to the requested type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("invalid literal for integer: '{0}'")]
    NotAnInteger(String),

    #[error("could not convert to float: '{0}'")]
    NotAFloat(String),

    #[error("expected text, got '{0}'")]
    NotText(String),
}

/// A resolved parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Other(Value),
}

impl ParamValue {
    /// Absent for `null` and empty strings
    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(ParamValue::Text(s.clone())),
            Value::Bool(b) => Some(ParamValue::Bool(*b)),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(ParamValue::Integer(i)),
                None => n.as_f64().map(ParamValue::Float),
            },
            other => Some(ParamValue::Other(other.clone())),
        }
    }

    /// Integer value. Text is trimmed and parsed; finite floats are truncated.
    pub fn as_int(&self) -> Result<i64, CoercionError> {
        match self {
            ParamValue::Integer(i) => Ok(*i),
            ParamValue::Float(f) if f.is_finite() && (I64_LOWER..I64_UPPER).contains(f) => {
                Ok(f.trunc() as i64)
            }
            ParamValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| CoercionError::NotAnInteger(s.clone())),
            other => Err(CoercionError::NotAnInteger(other.to_string())),
        }
    }

    pub fn as_float(&self) -> Result<f64, CoercionError> {
        match self {
            ParamValue::Float(f) => Ok(*f),
            ParamValue::Integer(i) => Ok(*i as f64),
            ParamValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CoercionError::NotAFloat(s.clone())),
            other => Err(CoercionError::NotAFloat(other.to_string())),
        }
    }

    /// Text value; numbers are rendered as text, other values are rejected
    pub fn as_nonempty_string(&self) -> Result<String, CoercionError> {
        match self {
            ParamValue::Text(s) if !s.is_empty() => Ok(s.clone()),
            ParamValue::Integer(_) | ParamValue::Float(_) => Ok(self.to_string()),
            other => Err(CoercionError::NotText(other.to_string())),
        }
    }

    /// Truthiness: text must read `true` (any case), numbers must be non-zero,
    /// arrays and objects must be non-empty.
    pub fn as_flag(&self) -> bool {
        match self {
            ParamValue::Text(s) => s.eq_ignore_ascii_case("true"),
            ParamValue::Bool(b) => *b,
            ParamValue::Integer(i) => *i != 0,
            ParamValue::Float(f) => *f != 0.0,
            ParamValue::Other(Value::Array(items)) => !items.is_empty(),
            ParamValue::Other(Value::Object(fields)) => !fields.is_empty(),
            ParamValue::Other(_) => false,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Integer(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{:?}", x),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Query string and JSON body of one request
#[derive(Debug, Clone, Default)]
pub struct RequestParams {
    query: HashMap<String, String>,
    body: Option<Map<String, Value>>,
}

impl RequestParams {
    pub fn new(query: HashMap<String, String>, body: &[u8]) -> Self {
        Self {
            query,
            body: parse_body(body),
        }
    }

    /// Query value if present and non-empty, otherwise the body field
    pub fn get(&self, name: &str) -> Option<ParamValue> {
        match self.query.get(name) {
            Some(value) if !value.is_empty() => Some(ParamValue::Text(value.clone())),
            _ => self.body_field(name),
        }
    }

    /// Field of the JSON body only
    pub fn body_field(&self, name: &str) -> Option<ParamValue> {
        self.body
            .as_ref()
            .and_then(|fields| fields.get(name))
            .and_then(ParamValue::from_json)
    }

    /// Whether a non-empty JSON object was sent
    pub fn has_body(&self) -> bool {
        self.body.as_ref().is_some_and(|fields| !fields.is_empty())
    }
}

fn parse_body(bytes: &[u8]) -> Option<Map<String, Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(fields)) => Some(fields),
        Ok(_) => {
            tracing::debug!("Ignoring non-object JSON body");
            None
        }
        Err(e) => {
            tracing::debug!("Ignoring malformed JSON body: {}", e);
            None
        }
    }
}
