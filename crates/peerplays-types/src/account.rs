//! Account options.

use peerplays_primitives::util::{WireReader, WireWriter};
use peerplays_primitives::PublicKey;
use serde_json::{Map, Value};

use crate::codec::{Decode, Encode};
use crate::extensions::Extensions;
use crate::json::JsonField;
use crate::object_id::{tag, Id};
use crate::vote::VoteId;
use crate::TypesError;

/// The proxy account value meaning "vote for yourself".
pub const PROXY_TO_SELF: Id<tag::Account> = Id::new(5);

/// Per-account settings: memo key, voting proxy and votes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountOptions {
    pub memo_key: PublicKey,
    pub voting_account: Id<tag::Account>,
    pub num_witness: u16,
    pub num_committee: u16,
    votes: Vec<VoteId>,
    pub extensions: Extensions,
}

impl AccountOptions {
    /// Options with no votes and voting proxied to self.
    pub fn new(memo_key: PublicKey) -> Self {
        AccountOptions {
            memo_key,
            voting_account: PROXY_TO_SELF,
            num_witness: 0,
            num_committee: 0,
            votes: Vec::new(),
            extensions: Extensions,
        }
    }

    pub fn votes(&self) -> &[VoteId] {
        &self.votes
    }

    /// Replace the vote list; it is stored in canonical order.
    pub fn set_votes(&mut self, mut votes: Vec<VoteId>) {
        VoteId::sort(&mut votes);
        votes.dedup();
        self.votes = votes;
    }
}

impl Encode for AccountOptions {
    fn encode(&self, writer: &mut WireWriter) {
        self.memo_key.encode(writer);
        self.voting_account.encode(writer);
        self.num_witness.encode(writer);
        self.num_committee.encode(writer);
        self.votes.encode(writer);
        self.extensions.encode(writer);
    }
}

impl Decode for AccountOptions {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(AccountOptions {
            memo_key: PublicKey::decode(reader)?,
            voting_account: Id::decode(reader)?,
            num_witness: u16::decode(reader)?,
            num_committee: u16::decode(reader)?,
            votes: Vec::decode(reader)?,
            extensions: Extensions::decode(reader)?,
        })
    }
}

impl JsonField for AccountOptions {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("memo_key".to_string(), self.memo_key.to_json());
        map.insert("voting_account".to_string(), self.voting_account.to_json());
        map.insert("num_witness".to_string(), self.num_witness.to_json());
        map.insert("num_committee".to_string(), self.num_committee.to_json());
        map.insert("votes".to_string(), self.votes.to_json());
        map.insert("extensions".to_string(), self.extensions.to_json());
        Value::Object(map)
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        let map = value.as_object().ok_or_else(|| {
            TypesError::InvalidField(format!("expected account options object, got {}", value))
        })?;
        let required = |name: &str| {
            map.get(name).ok_or_else(|| {
                TypesError::InvalidField(format!("account options are missing {}", name))
            })
        };
        let mut options = AccountOptions::new(PublicKey::from_json(required("memo_key")?)?);
        if let Some(v) = map.get("voting_account") {
            options.voting_account = Id::from_json(v)?;
        }
        if let Some(v) = map.get("num_witness") {
            options.num_witness = u16::from_json(v)?;
        }
        if let Some(v) = map.get("num_committee") {
            options.num_committee = u16::from_json(v)?;
        }
        if let Some(v) = map.get("votes") {
            options.set_votes(Vec::from_json(v)?);
        }
        if let Some(v) = map.get("extensions") {
            options.extensions = Extensions::from_json(v)?;
        }
        Ok(options)
    }
}
