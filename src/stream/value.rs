//! Dynamically typed values flowing through a pipeline.
//!
//! Receivers may return plain data or further callables, so a single value
//! type covers both. Lists nest arbitrarily, which is what arrayed receivers
//! produce before a fan-in stage flattens them.

use crate::error::{Result, StreamError};
use crate::stream::invocable::Invocable;
use std::fmt;

/// A value produced or consumed by a pipeline stage.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<Value>),
    Callable(Invocable),
}

impl Value {
    /// Short name of this value's kind, used in contract violation messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Callable(_) => "callable",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&Invocable> {
        match self {
            Value::Callable(v) => Some(v),
            _ => None,
        }
    }

    /// Consume the value as a list, failing with a contract violation otherwise.
    pub fn into_list(self) -> Result<Vec<Value>> {
        match self {
            Value::List(items) => Ok(items),
            other => Err(StreamError::TypeMismatch {
                expected: "list",
                found: other.kind(),
            }),
        }
    }

    /// Recursively flatten nested lists into one ordered list.
    ///
    /// A non-list value flattens to a single-element list.
    pub fn flatten(self) -> Vec<Value> {
        let mut out = Vec::new();
        flatten_into(self, &mut out);
        out
    }

    /// Convert to JSON.
    ///
    /// Callables and non-finite floats have no JSON form and are rejected
    /// with `TypeMismatch`.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .ok_or(StreamError::TypeMismatch {
                    expected: "finite float",
                    found: "float",
                })?,
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => serde_json::Value::Array(
                items.iter().map(Value::to_json).collect::<Result<Vec<_>>>()?,
            ),
            Value::Callable(_) => {
                return Err(StreamError::TypeMismatch {
                    expected: "data value",
                    found: "callable",
                })
            }
        })
    }
}

fn flatten_into(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::List(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
        other => out.push(other),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{:?}", v),
            Value::Text(v) => write!(f, "{:?}", v),
            Value::List(items) => f.debug_list().entries(items).finish(),
            Value::Callable(c) => write!(f, "<callable {}>", c.name()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl From<Invocable> for Value {
    fn from(v: Invocable) -> Self {
        Value::Callable(v)
    }
}

/// JSON objects have no `Value` counterpart and are rejected.
impl TryFrom<serde_json::Value> for Value {
    type Error = StreamError;

    fn try_from(v: serde_json::Value) -> Result<Self> {
        Ok(match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(f)) => Value::Float(f),
                (None, None) => {
                    return Err(StreamError::TypeMismatch {
                        expected: "i64 or f64 number",
                        found: "number",
                    })
                }
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(_) => {
                return Err(StreamError::TypeMismatch {
                    expected: "json scalar or array",
                    found: "object",
                })
            }
        })
    }
}
