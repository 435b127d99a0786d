//! Weighted authorities.

use peerplays_primitives::util::{WireReader, WireWriter};
use peerplays_primitives::PublicKey;
use serde_json::{Map, Value};

use crate::codec::{read_len, Decode, Encode};
use crate::json::JsonField;
use crate::object_id::{tag, Id};
use crate::TypesError;

/// An authority: a threshold plus weighted accounts and keys.
///
/// `account_auths` is kept sorted by account instance and `key_auths` by the
/// raw bytes of each key's graphene address, which is the order the node's
/// flat maps serialize in. Address authorities are not supported and always
/// encode as an empty map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permission {
    weight_threshold: u32,
    account_auths: Vec<(Id<tag::Account>, u16)>,
    key_auths: Vec<(PublicKey, u16)>,
}

impl Permission {
    /// Build a validated authority from entries in any order.
    ///
    /// # Arguments
    /// * `weight_threshold` - Weight required to satisfy the authority.
    /// * `account_auths` - Accounts and their weights.
    /// * `key_auths` - Public keys and their weights.
    ///
    /// # Returns
    /// The sorted authority, or `ZeroThreshold`/`ThresholdTooRestrictive` when
    /// it could never be satisfied, or `InvalidField` for duplicate entries.
    pub fn new(
        weight_threshold: u32,
        account_auths: Vec<(Id<tag::Account>, u16)>,
        key_auths: Vec<(PublicKey, u16)>,
    ) -> Result<Self, TypesError> {
        let mut permission = Permission {
            weight_threshold,
            account_auths,
            key_auths,
        };
        permission.normalize()?;
        permission.validate()?;
        Ok(permission)
    }

    /// A single-key authority with threshold 1.
    pub fn single_key(key: PublicKey) -> Self {
        Permission {
            weight_threshold: 1,
            account_auths: Vec::new(),
            key_auths: vec![(key, 1)],
        }
    }

    pub fn weight_threshold(&self) -> u32 {
        self.weight_threshold
    }

    pub fn account_auths(&self) -> &[(Id<tag::Account>, u16)] {
        &self.account_auths
    }

    pub fn key_auths(&self) -> &[(PublicKey, u16)] {
        &self.key_auths
    }

    /// Sum of every entry's weight.
    pub fn total_weight(&self) -> u64 {
        let accounts: u64 = self.account_auths.iter().map(|(_, w)| u64::from(*w)).sum();
        let keys: u64 = self.key_auths.iter().map(|(_, w)| u64::from(*w)).sum();
        accounts + keys
    }

    /// Check that the authority can be satisfied by its own entries.
    pub fn validate(&self) -> Result<(), TypesError> {
        if self.weight_threshold == 0 {
            return Err(TypesError::ZeroThreshold);
        }
        let total = self.total_weight();
        if u64::from(self.weight_threshold) > total {
            return Err(TypesError::ThresholdTooRestrictive {
                threshold: self.weight_threshold,
                total,
            });
        }
        Ok(())
    }

    pub fn set_threshold(&mut self, weight_threshold: u32) {
        self.weight_threshold = weight_threshold;
    }

    /// Add a key, or replace its weight if already present.
    pub fn add_key(&mut self, key: PublicKey, weight: u16) {
        self.key_auths.retain(|(k, _)| k != &key);
        self.key_auths.push((key, weight));
        self.key_auths.sort_by(|a, b| a.0.cmp(&b.0));
    }

    /// Remove a key, returning its weight if it was present.
    pub fn remove_key(&mut self, key: &PublicKey) -> Option<u16> {
        let pos = self.key_auths.iter().position(|(k, _)| k == key)?;
        Some(self.key_auths.remove(pos).1)
    }

    /// Add an account, or replace its weight if already present.
    pub fn add_account(&mut self, account: Id<tag::Account>, weight: u16) {
        self.account_auths.retain(|(a, _)| a != &account);
        self.account_auths.push((account, weight));
        self.account_auths.sort_by_key(|(a, _)| a.instance());
    }

    /// Remove an account, returning its weight if it was present.
    pub fn remove_account(&mut self, account: &Id<tag::Account>) -> Option<u16> {
        let pos = self.account_auths.iter().position(|(a, _)| a == account)?;
        Some(self.account_auths.remove(pos).1)
    }

    fn normalize(&mut self) -> Result<(), TypesError> {
        self.account_auths.sort_by_key(|(a, _)| a.instance());
        if let Some(w) = self.account_auths.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(TypesError::InvalidField(format!(
                "account {} listed twice in authority",
                w[0].0
            )));
        }
        self.key_auths.sort_by(|a, b| a.0.cmp(&b.0));
        if let Some(w) = self.key_auths.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(TypesError::InvalidField(format!(
                "key {} listed twice in authority",
                w[0].0
            )));
        }
        Ok(())
    }
}

impl Encode for Permission {
    fn encode(&self, writer: &mut WireWriter) {
        self.weight_threshold.encode(writer);
        self.account_auths.encode(writer);
        self.key_auths.encode(writer);
        // address_auths
        writer.write_u8(0);
    }
}

/// Decoding keeps entries as found and does not re-validate thresholds.
impl Decode for Permission {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        let weight_threshold = u32::decode(reader)?;
        let account_auths = Vec::decode(reader)?;
        let key_auths = Vec::decode(reader)?;
        if read_len(reader)? != 0 {
            return Err(TypesError::InvalidField(
                "address authorities are not supported".to_string(),
            ));
        }
        Ok(Permission {
            weight_threshold,
            account_auths,
            key_auths,
        })
    }
}

impl JsonField for Permission {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("weight_threshold".to_string(), self.weight_threshold.to_json());
        map.insert("account_auths".to_string(), self.account_auths.to_json());
        map.insert("key_auths".to_string(), self.key_auths.to_json());
        map.insert("address_auths".to_string(), Value::Array(Vec::new()));
        Value::Object(map)
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        let map = value.as_object().ok_or_else(|| {
            TypesError::InvalidField(format!("expected authority object, got {}", value))
        })?;
        let weight_threshold = match map.get("weight_threshold") {
            Some(v) => u32::from_json(v)?,
            None => return Err(TypesError::InvalidField("authority is missing weight_threshold".to_string())),
        };
        let account_auths = match map.get("account_auths") {
            Some(v) => Vec::from_json(v)?,
            None => Vec::new(),
        };
        let key_auths = match map.get("key_auths") {
            Some(v) => Vec::from_json(v)?,
            None => Vec::new(),
        };
        if let Some(addresses) = map.get("address_auths") {
            if addresses.as_array().map_or(true, |a| !a.is_empty()) {
                return Err(TypesError::InvalidField(
                    "address authorities are not supported".to_string(),
                ));
            }
        }
        Permission::new(weight_threshold, account_auths, key_auths)
    }
}
