//! Coercion between typed values and the loosely-typed JSON form.
//!
//! RPC replies and user input arrive as `serde_json::Value`; every field type
//! knows how to validate and convert itself. Integers are accepted either as
//! JSON numbers or as decimal strings, since the node quotes 64-bit values.

use peerplays_primitives::{PublicKey, Signature};
use serde_json::{Map, Value};

use crate::codec::Bytes;
use crate::TypesError;

/// A value that converts to and from its RPC JSON form.
pub trait JsonField: Sized {
    fn to_json(&self) -> Value;

    fn from_json(value: &Value) -> Result<Self, TypesError>;

    /// Value to use when the field is absent from an input mapping.
    ///
    /// `None` means the field is required.
    fn when_missing() -> Option<Self> {
        None
    }
}

/// Look up and coerce a named field of an input mapping.
///
/// Absent fields fall back to [`JsonField::when_missing`]; required fields
/// that are absent yield `MissingRequiredField`. Unknown extra keys in the
/// mapping are ignored.
pub fn lookup<T: JsonField>(map: &Map<String, Value>, name: &str) -> Result<T, TypesError> {
    match map.get(name) {
        Some(value) => T::from_json(value),
        None => T::when_missing().ok_or_else(|| TypesError::MissingRequiredField(name.to_string())),
    }
}

/// Like [`lookup`], but wraps failures with the field name for nested values.
pub fn nested<T: JsonField>(map: &Map<String, Value>, name: &str) -> Result<T, TypesError> {
    lookup(map, name).map_err(|e| match e {
        missing @ TypesError::MissingRequiredField(_) => missing,
        other => TypesError::Field {
            field: name.to_string(),
            source: Box::new(other),
        },
    })
}

/// Require a JSON object, naming what was expected on failure.
pub fn as_object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, TypesError> {
    value
        .as_object()
        .ok_or_else(|| TypesError::InvalidField(format!("expected {} object, got {}", what, value)))
}

fn type_error(expected: &str, value: &Value) -> TypesError {
    TypesError::InvalidField(format!("expected {}, got {}", expected, value))
}

/// Read an unsigned integer from a number or a decimal string.
pub(crate) fn json_u64(value: &Value) -> Result<u64, TypesError> {
    match value {
        Value::Number(n) => n.as_u64().ok_or_else(|| type_error("unsigned integer", value)),
        Value::String(s) => s.trim().parse().map_err(|_| type_error("unsigned integer", value)),
        _ => Err(type_error("unsigned integer", value)),
    }
}

fn json_i64(value: &Value) -> Result<i64, TypesError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| type_error("integer", value)),
        Value::String(s) => s.trim().parse().map_err(|_| type_error("integer", value)),
        _ => Err(type_error("integer", value)),
    }
}

pub(crate) fn json_str<'a>(value: &'a Value, expected: &str) -> Result<&'a str, TypesError> {
    value.as_str().ok_or_else(|| type_error(expected, value))
}

macro_rules! json_unsigned {
    ($($t:ty),*) => {$(
        impl JsonField for $t {
            fn to_json(&self) -> Value {
                Value::from(*self)
            }

            fn from_json(value: &Value) -> Result<Self, TypesError> {
                let raw = json_u64(value)?;
                <$t>::try_from(raw).map_err(|_| {
                    TypesError::InvalidField(format!("{} out of range for {}", raw, stringify!($t)))
                })
            }
        }
    )*};
}

json_unsigned!(u8, u16, u32, u64);

impl JsonField for i64 {
    fn to_json(&self) -> Value {
        Value::from(*self)
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        json_i64(value)
    }
}

impl JsonField for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) if n.as_u64() == Some(0) => Ok(false),
            Value::Number(n) if n.as_u64() == Some(1) => Ok(true),
            _ => Err(type_error("bool", value)),
        }
    }
}

impl JsonField for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        Ok(json_str(value, "string")?.to_string())
    }
}

impl JsonField for Bytes {
    fn to_json(&self) -> Value {
        Value::String(hex::encode(&self.0))
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        let s = json_str(value, "hex string")?;
        let bytes = hex::decode(s).map_err(peerplays_primitives::PrimitivesError::from)?;
        Ok(Bytes(bytes))
    }
}

impl JsonField for [u8; 32] {
    fn to_json(&self) -> Value {
        Value::String(hex::encode(self))
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        let Bytes(bytes) = Bytes::from_json(value)?;
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| TypesError::InvalidField(format!("expected 32 bytes, got {}", bytes.len())))
    }
}

impl JsonField for PublicKey {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        Ok(json_str(value, "public key string")?.parse()?)
    }
}

impl JsonField for Signature {
    fn to_json(&self) -> Value {
        Value::String(self.to_hex())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        Ok(Signature::from_hex(json_str(value, "signature hex")?)?)
    }
}

impl<T: JsonField> JsonField for Vec<T> {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(JsonField::to_json).collect())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        value
            .as_array()
            .ok_or_else(|| type_error("array", value))?
            .iter()
            .map(T::from_json)
            .collect()
    }
}

/// `null` and absence both mean `None`.
impl<T: JsonField> JsonField for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(v) => v.to_json(),
            None => Value::Null,
        }
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        match value {
            Value::Null => Ok(None),
            other => Ok(Some(T::from_json(other)?)),
        }
    }

    fn when_missing() -> Option<Self> {
        Some(None)
    }
}

/// Pairs render as two-element arrays, the form flat maps take on the wire.
impl<A: JsonField, B: JsonField> JsonField for (A, B) {
    fn to_json(&self) -> Value {
        Value::Array(vec![self.0.to_json(), self.1.to_json()])
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        match value.as_array().map(Vec::as_slice) {
            Some([a, b]) => Ok((A::from_json(a)?, B::from_json(b)?)),
            _ => Err(type_error("[key, value] pair", value)),
        }
    }
}
