//! The [`Operation`] tagged union.
//!
//! Wire form: varint kind id followed by the record. JSON form: `[id, {..}]`.

use peerplays_primitives::util::{VarInt, WireReader, WireWriter};
use peerplays_types::json::as_object;
use peerplays_types::{AssetAmount, Decode, Encode, JsonField, TypesError};
use serde_json::{Map, Value};

use crate::kind::OperationKind;
use crate::ops::*;
use crate::record::OperationRecord;
use crate::OperationError;

macro_rules! operations {
    ($($variant:ident),* $(,)?) => {
        /// A typed operation of any supported kind.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Operation {
            $($variant($variant),)*
        }

        impl Operation {
            pub fn kind(&self) -> OperationKind {
                match self {
                    $(Operation::$variant(_) => OperationKind::$variant,)*
                }
            }

            pub fn fee(&self) -> &AssetAmount {
                match self {
                    $(Operation::$variant(op) => op.fee(),)*
                }
            }

            pub fn fee_mut(&mut self) -> &mut AssetAmount {
                match self {
                    $(Operation::$variant(op) => op.fee_mut(),)*
                }
            }

            /// The record's field mapping, without the kind tag.
            pub fn fields_json(&self) -> Map<String, Value> {
                match self {
                    $(Operation::$variant(op) => op.to_json_map(),)*
                }
            }

            fn encode_record(&self, writer: &mut WireWriter) {
                match self {
                    $(Operation::$variant(op) => op.encode(writer),)*
                }
            }

            fn read_record(
                kind: OperationKind,
                reader: &mut WireReader<'_>,
            ) -> Result<Self, OperationError> {
                match kind {
                    $(OperationKind::$variant => Ok(Operation::$variant($variant::decode(reader)?)),)*
                    #[allow(unreachable_patterns)]
                    other => Err(OperationError::Unsupported(other)),
                }
            }

            /// Build an operation of `kind` from a loosely-typed field mapping.
            pub fn from_fields(
                kind: OperationKind,
                map: &Map<String, Value>,
            ) -> Result<Self, OperationError> {
                match kind {
                    $(OperationKind::$variant => Ok(Operation::$variant($variant::from_json_map(map)?)),)*
                    #[allow(unreachable_patterns)]
                    other => Err(OperationError::Unsupported(other)),
                }
            }
        }
    };
}

operations! {
    Transfer,
    AssetIssue,
    AccountCreate,
    AccountUpdate,
    AccountUpgrade,
    ProposalCreate,
    ProposalUpdate,
    ProposalDelete,
    SportCreate,
    SportUpdate,
    SportDelete,
    EventGroupCreate,
    EventGroupUpdate,
    EventGroupDelete,
    EventCreate,
    EventUpdate,
    EventUpdateStatus,
    BettingMarketRulesCreate,
    BettingMarketRulesUpdate,
    BettingMarketGroupCreate,
    BettingMarketGroupUpdate,
    BettingMarketGroupResolve,
    BettingMarketGroupCancelUnmatchedBets,
    BettingMarketCreate,
    BettingMarketUpdate,
    BetPlace,
    BetCancel,
    TournamentJoin,
    TournamentLeave,
    GameMove,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Decode one operation, distinguishing unknown ids from kinds this SDK
    /// cannot construct.
    pub fn read(reader: &mut WireReader<'_>) -> Result<Self, OperationError> {
        let id = reader.read_varint().map_err(TypesError::from)?.value();
        let kind = OperationKind::from_id(id)
            .ok_or_else(|| OperationError::UnknownOperation(id.to_string()))?;
        Self::read_record(kind, reader)
    }

    /// Parse `[id_or_name, {fields}]`.
    ///
    /// # Arguments
    ///
    /// * `value` - a two-element array whose first element is the numeric wire
    ///   id (or a decimal string of it) or the operation name
    ///
    /// # Returns
    ///
    /// The typed operation, or an error naming the operation and the first
    /// field that failed to coerce.
    pub fn from_json(value: &Value) -> Result<Self, OperationError> {
        let pair = value
            .as_array()
            .filter(|items| items.len() == 2)
            .ok_or_else(|| OperationError::Malformed(format!("expected [id, {{..}}], got {}", value)))?;
        let kind = match &pair[0] {
            Value::Number(n) => n
                .as_u64()
                .and_then(OperationKind::from_id)
                .ok_or_else(|| OperationError::UnknownOperation(n.to_string()))?,
            Value::String(s) => s.parse()?,
            other => {
                return Err(OperationError::Malformed(format!(
                    "operation tag must be an id or name, got {}",
                    other
                )))
            }
        };
        let map = as_object(&pair[1], kind.name())?;
        Self::from_fields(kind, map)
    }

    pub fn to_json(&self) -> Value {
        Value::Array(vec![
            Value::from(self.kind().id()),
            Value::Object(self.fields_json()),
        ])
    }
}

impl Encode for Operation {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt(self.kind().id()));
        self.encode_record(writer);
    }
}

// Nested operations (proposal bodies) travel through the generic codec, which
// only speaks `TypesError`.
fn flatten(err: OperationError) -> TypesError {
    match err {
        OperationError::Types(inner) => inner,
        other => TypesError::InvalidField(other.to_string()),
    }
}

impl Decode for Operation {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Operation::read(reader).map_err(|err| match err {
            OperationError::Unsupported(kind) => TypesError::UnknownEnumValue {
                name: "operation",
                value: kind.name().to_string(),
            },
            OperationError::UnknownOperation(id) => TypesError::UnknownEnumValue {
                name: "operation",
                value: id,
            },
            other => flatten(other),
        })
    }
}

impl JsonField for Operation {
    fn to_json(&self) -> Value {
        Operation::to_json(self)
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        Operation::from_json(value).map_err(flatten)
    }
}
