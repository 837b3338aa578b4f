//! Values exchanged with the script engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Closed set of values a script can pass to or receive from a binding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScriptValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
    List(Vec<ScriptValue>),
    Record(BTreeMap<String, ScriptValue>),
}

impl ScriptValue {
    /// Type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Null => "null",
            ScriptValue::Bool(_) => "boolean",
            ScriptValue::Int(_) | ScriptValue::UInt(_) | ScriptValue::Float(_) => "number",
            ScriptValue::String(_) => "string",
            ScriptValue::List(_) => "list",
            ScriptValue::Record(_) => "record",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScriptValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of a number; floats qualify only when integral and in range.
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            ScriptValue::Int(n) => Some(n),
            ScriptValue::UInt(n) => i64::try_from(n).ok(),
            ScriptValue::Float(f)
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 =>
            {
                Some(f as i64)
            }
            _ => None,
        }
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::String(s) => f.write_str(s),
            other => match serde_json::to_string(other) {
                Ok(json) => f.write_str(&json),
                Err(_) => write!(f, "{other:?}"),
            },
        }
    }
}

impl From<&str> for ScriptValue {
    fn from(s: &str) -> Self {
        ScriptValue::String(s.to_string())
    }
}

impl From<String> for ScriptValue {
    fn from(s: String) -> Self {
        ScriptValue::String(s)
    }
}

impl From<bool> for ScriptValue {
    fn from(b: bool) -> Self {
        ScriptValue::Bool(b)
    }
}

impl From<i32> for ScriptValue {
    fn from(n: i32) -> Self {
        ScriptValue::Int(n.into())
    }
}

impl From<i64> for ScriptValue {
    fn from(n: i64) -> Self {
        ScriptValue::Int(n)
    }
}

impl From<u64> for ScriptValue {
    fn from(n: u64) -> Self {
        ScriptValue::UInt(n)
    }
}

impl From<f64> for ScriptValue {
    fn from(f: f64) -> Self {
        ScriptValue::Float(f)
    }
}

impl<T: Into<ScriptValue>> From<Vec<T>> for ScriptValue {
    fn from(items: Vec<T>) -> Self {
        ScriptValue::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, ScriptValue>> for ScriptValue {
    fn from(record: BTreeMap<String, ScriptValue>) -> Self {
        ScriptValue::Record(record)
    }
}

impl From<serde_json::Value> for ScriptValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => ScriptValue::Null,
            Value::Bool(b) => ScriptValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ScriptValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    ScriptValue::UInt(u)
                } else {
                    ScriptValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => ScriptValue::String(s),
            Value::Array(items) => ScriptValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ScriptValue::Record(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
