//! Static variants (tagged unions).
//!
//! A static variant is written as a varint tag followed by the selected
//! payload. JSON renders it as `[tag, payload]`; input may name the tag either
//! by number or by its registered name.

use peerplays_primitives::util::{VarInt, WireReader, WireWriter};
use serde_json::Value;

use crate::codec::{Decode, Encode};
use crate::enums::RpsGesture;
use crate::json::JsonField;
use crate::TypesError;

/// Resolve a JSON tag (number or name) against a variant name table.
pub fn variant_tag(value: &Value, names: &[&str]) -> Result<u64, TypesError> {
    let tag = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => names.iter().position(|n| n == s).map(|i| i as u64),
        _ => None,
    };
    match tag {
        Some(t) if (t as usize) < names.len() => Ok(t),
        _ => Err(TypesError::UnknownEnumValue {
            name: "static variant tag",
            value: value.to_string(),
        }),
    }
}

/// Split `[tag, payload]` into its parts.
pub fn variant_parts(value: &Value) -> Result<(&Value, &Value), TypesError> {
    match value.as_array().map(Vec::as_slice) {
        Some([tag, payload]) => Ok((tag, payload)),
        _ => Err(TypesError::InvalidField(format!(
            "expected [tag, payload], got {}",
            value
        ))),
    }
}

crate::chain_struct! {
    /// First phase of a rock-paper-scissors throw: a hash binding the choice.
    pub struct RpsThrowCommit {
        pub nonce1: u64,
        pub throw_hash: [u8; 32],
    }
}

crate::chain_struct! {
    pub struct RpsThrow {
        pub nonce1: u64,
        pub gesture: RpsGesture,
    }
}

crate::chain_struct! {
    /// Second phase: discloses the throw committed to earlier.
    pub struct RpsThrowReveal {
        pub nonce2: u64,
        pub reveal: RpsThrow,
    }
}

/// A move in a tournament game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSpecificMove {
    Commit(RpsThrowCommit),
    Reveal(RpsThrowReveal),
}

impl GameSpecificMove {
    pub const NAMES: &'static [&'static str] =
        &["rock_paper_scissors_throw_commit", "rock_paper_scissors_throw_reveal"];

    pub fn tag(&self) -> u64 {
        match self {
            GameSpecificMove::Commit(_) => 0,
            GameSpecificMove::Reveal(_) => 1,
        }
    }
}

impl Encode for GameSpecificMove {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt(self.tag()));
        match self {
            GameSpecificMove::Commit(c) => c.encode(writer),
            GameSpecificMove::Reveal(r) => r.encode(writer),
        }
    }
}

impl Decode for GameSpecificMove {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        match reader.read_varint()?.value() {
            0 => Ok(GameSpecificMove::Commit(RpsThrowCommit::decode(reader)?)),
            1 => Ok(GameSpecificMove::Reveal(RpsThrowReveal::decode(reader)?)),
            other => Err(TypesError::UnknownEnumValue {
                name: "game move",
                value: other.to_string(),
            }),
        }
    }
}

impl JsonField for GameSpecificMove {
    fn to_json(&self) -> Value {
        let payload = match self {
            GameSpecificMove::Commit(c) => c.to_json(),
            GameSpecificMove::Reveal(r) => r.to_json(),
        };
        Value::Array(vec![Value::from(self.tag()), payload])
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        let (tag, payload) = variant_parts(value)?;
        match variant_tag(tag, Self::NAMES)? {
            0 => Ok(GameSpecificMove::Commit(RpsThrowCommit::from_json(payload)?)),
            _ => Ok(GameSpecificMove::Reveal(RpsThrowReveal::from_json(payload)?)),
        }
    }
}
