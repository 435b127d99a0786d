//! Typed operation records.
//!
//! Every record starts with `fee` and ends with `extensions`; the fields in
//! between are listed in wire order. [`define_operation!`] generates the
//! struct plus its codec and JSON coercion from that single field list, so the
//! schema lives in exactly one place per operation.

use peerplays_types::json::lookup;
use peerplays_types::{AssetAmount, Decode, Encode, JsonField};
use serde_json::{Map, Value};

use crate::kind::OperationKind;
use crate::operation::Operation;
use crate::OperationError;

/// Behaviour shared by every typed operation record.
pub trait OperationRecord: Encode + Decode + Clone + Into<Operation> {
    const KIND: OperationKind;

    fn fee(&self) -> &AssetAmount;

    fn fee_mut(&mut self) -> &mut AssetAmount;

    /// Field mapping in wire order.
    fn to_json_map(&self) -> Map<String, Value>;

    /// Build the record from a loosely-typed field mapping.
    ///
    /// Unknown keys are ignored. A missing `fee` becomes a zero core-asset
    /// placeholder to be replaced during fee resolution; other missing fields
    /// fail unless they are optional.
    fn from_json_map(map: &Map<String, Value>) -> Result<Self, OperationError>;
}

/// Coerce one named field, tagging failures with the operation and field.
pub(crate) fn field<T: JsonField>(
    kind: OperationKind,
    map: &Map<String, Value>,
    name: &'static str,
) -> Result<T, OperationError> {
    lookup(map, name).map_err(|source| OperationError::Field {
        operation: kind.name(),
        field: name,
        source,
    })
}

pub(crate) fn fee_field(
    kind: OperationKind,
    map: &Map<String, Value>,
) -> Result<AssetAmount, OperationError> {
    match map.get("fee") {
        None | Some(Value::Null) => Ok(AssetAmount::default()),
        Some(_) => field(kind, map, "fee"),
    }
}

macro_rules! define_operation {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$fmeta:meta])* $field:ident : $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name {
            pub fee: peerplays_types::AssetAmount,
            $( $(#[$fmeta])* pub $field: $ty, )*
            pub extensions: peerplays_types::Extensions,
        }

        impl peerplays_types::Encode for $name {
            fn encode(&self, writer: &mut peerplays_primitives::util::WireWriter) {
                peerplays_types::Encode::encode(&self.fee, writer);
                $( peerplays_types::Encode::encode(&self.$field, writer); )*
                peerplays_types::Encode::encode(&self.extensions, writer);
            }
        }

        impl peerplays_types::Decode for $name {
            fn decode(
                reader: &mut peerplays_primitives::util::WireReader<'_>,
            ) -> Result<Self, peerplays_types::TypesError> {
                Ok($name {
                    fee: peerplays_types::Decode::decode(reader)?,
                    $( $field: <$ty as peerplays_types::Decode>::decode(reader)?, )*
                    extensions: peerplays_types::Decode::decode(reader)?,
                })
            }
        }

        impl $crate::record::OperationRecord for $name {
            const KIND: $crate::kind::OperationKind = $crate::kind::OperationKind::$name;

            fn fee(&self) -> &peerplays_types::AssetAmount {
                &self.fee
            }

            fn fee_mut(&mut self) -> &mut peerplays_types::AssetAmount {
                &mut self.fee
            }

            fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
                use peerplays_types::JsonField;
                let mut map = serde_json::Map::new();
                map.insert("fee".to_string(), self.fee.to_json());
                $( map.insert(stringify!($field).trim_start_matches("r#").to_string(), self.$field.to_json()); )*
                map.insert("extensions".to_string(), self.extensions.to_json());
                map
            }

            fn from_json_map(
                map: &serde_json::Map<String, serde_json::Value>,
            ) -> Result<Self, $crate::OperationError> {
                let kind = <Self as $crate::record::OperationRecord>::KIND;
                Ok($name {
                    fee: $crate::record::fee_field(kind, map)?,
                    $( $field: $crate::record::field::<$ty>(kind, map, stringify!($field).trim_start_matches("r#"))?, )*
                    extensions: $crate::record::field(kind, map, "extensions")?,
                })
            }
        }

        impl From<$name> for $crate::operation::Operation {
            fn from(op: $name) -> Self {
                $crate::operation::Operation::$name(op)
            }
        }
    };
}
