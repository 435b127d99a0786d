//! The reserved, always-empty extension set carried by every operation.

use peerplays_primitives::util::{WireReader, WireWriter};
use serde_json::Value;

use crate::codec::{Decode, Encode};
use crate::json::JsonField;
use crate::TypesError;

/// An empty extension set: a single `0x00` count on the wire, `[]` in JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extensions;

impl Encode for Extensions {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u8(0);
    }
}

impl Decode for Extensions {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        match reader.read_varint()?.value() {
            0 => Ok(Extensions),
            n => Err(TypesError::InvalidField(format!(
                "extensions must be empty, found {} entries",
                n
            ))),
        }
    }
}

/// Accepts `[]`, `{}` or `null`; anything else is rejected.
impl JsonField for Extensions {
    fn to_json(&self) -> Value {
        Value::Array(Vec::new())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        match value {
            Value::Null => Ok(Extensions),
            Value::Array(a) if a.is_empty() => Ok(Extensions),
            Value::Object(o) if o.is_empty() => Ok(Extensions),
            other => Err(TypesError::InvalidField(format!(
                "extensions must be empty, got {}",
                other
            ))),
        }
    }

    fn when_missing() -> Option<Self> {
        Some(Extensions)
    }
}
