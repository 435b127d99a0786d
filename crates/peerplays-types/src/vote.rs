//! Vote identifiers.

use std::fmt;
use std::str::FromStr;

use peerplays_primitives::util::{WireReader, WireWriter};
use serde_json::Value;

use crate::codec::{Decode, Encode};
use crate::json::{json_str, JsonField};
use crate::TypesError;

/// A `type:instance` vote id, packed as `instance << 8 | type` on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoteId {
    pub vote_type: u8,
    pub instance: u32,
}

impl VoteId {
    /// Largest instance that fits in the 24 bits above the type byte.
    pub const MAX_INSTANCE: u32 = (1 << 24) - 1;

    pub fn new(vote_type: u8, instance: u32) -> Result<Self, TypesError> {
        if instance > Self::MAX_INSTANCE {
            return Err(TypesError::InvalidField(format!(
                "vote instance {} exceeds 24 bits",
                instance
            )));
        }
        Ok(VoteId { vote_type, instance })
    }

    fn packed(&self) -> u32 {
        (self.instance << 8) | u32::from(self.vote_type)
    }

    /// Sort a vote list into canonical order (instance ascending).
    pub fn sort(votes: &mut [VoteId]) {
        votes.sort_by_key(|v| (v.instance, v.vote_type));
    }
}

impl fmt::Display for VoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vote_type, self.instance)
    }
}

impl FromStr for VoteId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidField(format!("invalid vote id {}", s));
        let (t, i) = s.split_once(':').ok_or_else(invalid)?;
        VoteId::new(t.parse().map_err(|_| invalid())?, i.parse().map_err(|_| invalid())?)
    }
}

impl Encode for VoteId {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u32_le(self.packed());
    }
}

impl Decode for VoteId {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        let raw = reader.read_u32_le()?;
        Ok(VoteId {
            vote_type: (raw & 0xff) as u8,
            instance: raw >> 8,
        })
    }
}

impl JsonField for VoteId {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        json_str(value, "vote id string")?.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vote_packing() {
        let v: VoteId = "1:5".parse().unwrap();
        assert_eq!(v.to_hex(), "01050000");
        assert_eq!(v.to_string(), "1:5");
    }

    #[test]
    fn test_vote_sorting_by_instance() {
        let mut votes: Vec<VoteId> = ["0:10", "1:2", "0:3"].iter().map(|s| s.parse().unwrap()).collect();
        VoteId::sort(&mut votes);
        let rendered: Vec<String> = votes.iter().map(|v| v.to_string()).collect();
        assert_eq!(rendered, vec!["1:2", "0:3", "0:10"]);
    }

    #[test]
    fn test_invalid_votes() {
        assert!("5".parse::<VoteId>().is_err());
        assert!("x:1".parse::<VoteId>().is_err());
        assert!(VoteId::new(0, 1 << 24).is_err());
    }
}
