mod key;
pub use key::Key;

use crate::{Error, Result};

/// Primitive column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    /// Boolean type
    Bool,

    /// Signed 64-bit integer
    I64,

    /// String type
    String,
}

/// A primitive value stored on a mapped object.
///
/// `Hash`/`Eq` so primary key tuples can index identity maps.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 64-bit integer
    I64(i64),

    /// Null value
    #[default]
    Null,

    /// String value
    String(String),
}

impl Value {
    /// Returns a `Value` representing null
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(&**v),
            _ => None,
        }
    }

    /// The type this value inhabits, or `None` for null.
    pub fn infer_ty(&self) -> Option<Type> {
        match self {
            Self::Bool(_) => Some(Type::Bool),
            Self::I64(_) => Some(Type::I64),
            Self::String(_) => Some(Type::String),
            Self::Null => None,
        }
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl Type {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::I64 => "i64",
            Self::String => "string",
        }
    }

    /// Coerce a JSON payload scalar into a typed value.
    ///
    /// Integer columns accept numeric strings in addition to JSON numbers;
    /// identifiers submitted by form widgets arrive as strings.
    pub fn coerce(self, raw: &serde_json::Value) -> Result<Value> {
        use serde_json::Value as Json;

        match (self, raw) {
            (_, Json::Null) => Ok(Value::Null),
            (Self::Bool, Json::Bool(v)) => Ok(Value::Bool(*v)),
            (Self::I64, Json::Number(n)) => match n.as_i64() {
                Some(v) => Ok(Value::I64(v)),
                None => Err(Error::type_conversion(json_type_name(raw), self.name())),
            },
            (Self::I64, Json::String(s)) => match s.trim().parse() {
                Ok(v) => Ok(Value::I64(v)),
                Err(_) => Err(Error::type_conversion(format!("string `{s}`"), self.name())),
            },
            (Self::String, Json::String(s)) => Ok(Value::String(s.clone())),
            _ => Err(Error::type_conversion(json_type_name(raw), self.name())),
        }
    }
}

pub(crate) fn json_type_name(raw: &serde_json::Value) -> &'static str {
    use serde_json::Value as Json;

    match raw {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}
