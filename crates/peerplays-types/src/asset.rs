//! Asset amounts.

use peerplays_primitives::util::{WireReader, WireWriter};
use serde_json::{Map, Value};

use crate::codec::{Decode, Encode};
use crate::json::JsonField;
use crate::object_id::{tag, Id};
use crate::TypesError;

/// Core asset id `1.3.0`.
pub const CORE_ASSET: Id<tag::Asset> = Id::new(0);

/// An integer amount of an asset in its smallest unit.
///
/// Precision is asset metadata and is never applied here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetAmount {
    pub amount: i64,
    pub asset_id: Id<tag::Asset>,
}

impl AssetAmount {
    pub fn new(amount: i64, asset_id: Id<tag::Asset>) -> Self {
        AssetAmount { amount, asset_id }
    }

    /// A zero amount of the given asset, the placeholder fee before resolution.
    pub fn zero(asset_id: Id<tag::Asset>) -> Self {
        AssetAmount::new(0, asset_id)
    }
}

impl Default for AssetAmount {
    fn default() -> Self {
        AssetAmount::zero(CORE_ASSET)
    }
}

impl Encode for AssetAmount {
    fn encode(&self, writer: &mut WireWriter) {
        self.amount.encode(writer);
        self.asset_id.encode(writer);
    }
}

impl Decode for AssetAmount {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(AssetAmount {
            amount: i64::decode(reader)?,
            asset_id: Id::decode(reader)?,
        })
    }
}

impl JsonField for AssetAmount {
    fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("amount".to_string(), self.amount.to_json());
        map.insert("asset_id".to_string(), self.asset_id.to_json());
        Value::Object(map)
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        let map = value.as_object().ok_or_else(|| {
            TypesError::InvalidField(format!("expected asset object, got {}", value))
        })?;
        let field = |name: &str| {
            map.get(name).ok_or_else(|| {
                TypesError::InvalidField(format!("asset amount is missing {}", name))
            })
        };
        Ok(AssetAmount {
            amount: i64::from_json(field("amount")?)?,
            asset_id: Id::from_json(field("asset_id")?)?,
        })
    }
}
