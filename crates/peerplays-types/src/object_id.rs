//! Object identifiers.
//!
//! Every chain object is addressed by `space.type.instance`. Space 1 holds the
//! protocol objects enumerated by [`ObjectType`]; space 2 holds implementation
//! objects such as `2.0.0` (dynamic global properties). Space 0 is reserved for
//! relative ids: `0.0.N` names the object created by the N-th operation of
//! the bundle being built.
//!
//! Fields come in two wire flavours:
//! * [`Id<T>`] is a typed id whose space/type are implied by the field, so
//!   only the instance is written, as a varint.
//! * [`FullId<T>`] is written as a little-endian u64
//!   `space << 56 | type << 48 | instance` and may also hold a relative id.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use peerplays_primitives::util::{VarInt, WireReader, WireWriter};
use serde_json::Value;

use crate::codec::{Decode, Encode};
use crate::json::{json_str, JsonField};
use crate::TypesError;

/// Space of protocol objects.
pub const PROTOCOL_SPACE: u8 = 1;
/// Space of implementation objects.
pub const IMPLEMENTATION_SPACE: u8 = 2;
/// Space of relative references inside an unbroadcast bundle.
pub const RELATIVE_SPACE: u8 = 0;

const INSTANCE_MASK: u64 = (1 << 48) - 1;

macro_rules! object_types {
    ($($variant:ident = $id:literal => $name:literal),* $(,)?) => {
        /// Protocol object types (space 1).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum ObjectType {
            $($variant = $id,)*
        }

        impl ObjectType {
            /// All protocol object types in id order.
            pub const ALL: &'static [ObjectType] = &[$(ObjectType::$variant,)*];

            pub fn id(self) -> u8 {
                self as u8
            }

            pub fn name(self) -> &'static str {
                match self {
                    $(ObjectType::$variant => $name,)*
                }
            }

            pub fn from_id(id: u8) -> Option<Self> {
                Self::ALL.get(usize::from(id)).copied()
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(ObjectType::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

object_types! {
    Null = 0 => "null",
    Base = 1 => "base",
    Account = 2 => "account",
    Asset = 3 => "asset",
    ForceSettlement = 4 => "force_settlement",
    CommitteeMember = 5 => "committee_member",
    Witness = 6 => "witness",
    LimitOrder = 7 => "limit_order",
    CallOrder = 8 => "call_order",
    Custom = 9 => "custom",
    Proposal = 10 => "proposal",
    OperationHistory = 11 => "operation_history",
    WithdrawPermission = 12 => "withdraw_permission",
    VestingBalance = 13 => "vesting_balance",
    Worker = 14 => "worker",
    Balance = 15 => "balance",
    Tournament = 16 => "tournament",
    TournamentDetails = 17 => "tournament_details",
    Match = 18 => "match",
    Game = 19 => "game",
    Sport = 20 => "sport",
    EventGroup = 21 => "event_group",
    Event = 22 => "event",
    BettingMarketRules = 23 => "betting_market_rules",
    BettingMarketGroup = 24 => "betting_market_group",
    BettingMarket = 25 => "betting_market",
    Bet = 26 => "bet",
}

// The table is indexed by id, so ids must be dense.
const _: () = {
    let mut i = 0;
    while i < ObjectType::ALL.len() {
        assert!(ObjectType::ALL[i] as usize == i);
        i += 1;
    }
};

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An untyped `space.type.instance` identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId {
    pub space: u8,
    pub type_id: u8,
    pub instance: u64,
}

impl ObjectId {
    pub fn new(space: u8, type_id: u8, instance: u64) -> Self {
        ObjectId { space, type_id, instance }
    }

    /// A protocol-space id of the given type.
    pub fn protocol(object_type: ObjectType, instance: u64) -> Self {
        ObjectId::new(PROTOCOL_SPACE, object_type.id(), instance)
    }

    /// A relative reference to the result of the `index`-th bundled operation.
    pub fn relative(index: u64) -> Self {
        ObjectId::new(RELATIVE_SPACE, 0, index)
    }

    pub fn is_relative(&self) -> bool {
        self.space == RELATIVE_SPACE
    }

    /// The protocol object type, when this id lives in space 1.
    pub fn object_type(&self) -> Option<ObjectType> {
        if self.space == PROTOCOL_SPACE {
            ObjectType::from_id(self.type_id)
        } else {
            None
        }
    }

    /// Pack into the 64-bit wire form `space << 56 | type << 48 | instance`.
    pub fn to_u64(&self) -> u64 {
        (u64::from(self.space) << 56) | (u64::from(self.type_id) << 48) | (self.instance & INSTANCE_MASK)
    }

    pub fn from_u64(raw: u64) -> Self {
        ObjectId::new((raw >> 56) as u8, (raw >> 48) as u8, raw & INSTANCE_MASK)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.space, self.type_id, self.instance)
    }
}

impl FromStr for ObjectId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TypesError::InvalidObjectId(s.to_string());
        let mut parts = s.split('.');
        let (Some(space), Some(type_id), Some(instance), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        let id = ObjectId::new(
            space.parse().map_err(|_| invalid())?,
            type_id.parse().map_err(|_| invalid())?,
            instance.parse().map_err(|_| invalid())?,
        );
        if id.instance > INSTANCE_MASK {
            return Err(invalid());
        }
        Ok(id)
    }
}

impl Encode for ObjectId {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_u64_le(self.to_u64());
    }
}

impl Decode for ObjectId {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(ObjectId::from_u64(reader.read_u64_le()?))
    }
}

impl JsonField for ObjectId {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        json_str(value, "object id string")?.parse()
    }
}

/// Compile-time tag naming the protocol object type a typed id refers to.
pub trait ObjectTypeTag:
    Copy + Clone + Default + fmt::Debug + PartialEq + Eq + std::hash::Hash + Send + Sync + 'static
{
    const OBJECT_TYPE: ObjectType;
}

/// Marker types for the protocol object types referenced by operations.
pub mod tag {
    use super::{ObjectType, ObjectTypeTag};

    macro_rules! tags {
        ($($name:ident),* $(,)?) => {$(
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name;

            impl ObjectTypeTag for $name {
                const OBJECT_TYPE: ObjectType = ObjectType::$name;
            }
        )*};
    }

    tags!(
        Account,
        Asset,
        CommitteeMember,
        Witness,
        Proposal,
        Tournament,
        Game,
        Sport,
        EventGroup,
        Event,
        BettingMarketRules,
        BettingMarketGroup,
        BettingMarket,
        Bet,
    );
}

/// A typed protocol id whose wire form is the varint instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    instance: u64,
    _tag: PhantomData<T>,
}

impl<T: ObjectTypeTag> Id<T> {
    pub const fn new(instance: u64) -> Self {
        Id { instance, _tag: PhantomData }
    }

    pub fn instance(&self) -> u64 {
        self.instance
    }

    pub fn object_id(&self) -> ObjectId {
        ObjectId::protocol(T::OBJECT_TYPE, self.instance)
    }
}

impl<T: ObjectTypeTag> TryFrom<ObjectId> for Id<T> {
    type Error = TypesError;

    fn try_from(id: ObjectId) -> Result<Self, Self::Error> {
        if id.object_type() != Some(T::OBJECT_TYPE) {
            return Err(TypesError::WrongObjectType {
                expected: format!("{}.{}.x ({})", PROTOCOL_SPACE, T::OBJECT_TYPE.id(), T::OBJECT_TYPE),
                got: id.to_string(),
            });
        }
        Ok(Id::new(id.instance))
    }
}

impl<T: ObjectTypeTag> From<Id<T>> for ObjectId {
    fn from(id: Id<T>) -> Self {
        id.object_id()
    }
}

impl<T: ObjectTypeTag> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.object_id().fmt(f)
    }
}

impl<T: ObjectTypeTag> FromStr for Id<T> {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ObjectId>()?.try_into()
    }
}

impl<T: ObjectTypeTag> Encode for Id<T> {
    fn encode(&self, writer: &mut WireWriter) {
        writer.write_varint(VarInt(self.instance));
    }
}

impl<T: ObjectTypeTag> Decode for Id<T> {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        Ok(Id::new(reader.read_varint()?.value()))
    }
}

impl<T: ObjectTypeTag> JsonField for Id<T> {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        json_str(value, "object id string")?.parse()
    }
}

/// A full 64-bit id that is either an object of type `T` or a relative
/// reference (`0.0.N`) into the bundle under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FullId<T> {
    id: ObjectId,
    _tag: PhantomData<T>,
}

impl<T: ObjectTypeTag> FullId<T> {
    /// Reference the result of the `index`-th operation of the enclosing bundle.
    pub fn relative(index: u64) -> Self {
        FullId { id: ObjectId::relative(index), _tag: PhantomData }
    }

    pub fn object_id(&self) -> ObjectId {
        self.id
    }

    pub fn is_relative(&self) -> bool {
        self.id.is_relative()
    }

    /// The referenced bundle index, if this is a relative id.
    pub fn relative_index(&self) -> Option<u64> {
        self.is_relative().then_some(self.id.instance)
    }
}

impl<T: ObjectTypeTag> From<Id<T>> for FullId<T> {
    fn from(id: Id<T>) -> Self {
        FullId { id: id.object_id(), _tag: PhantomData }
    }
}

impl<T: ObjectTypeTag> TryFrom<ObjectId> for FullId<T> {
    type Error = TypesError;

    fn try_from(id: ObjectId) -> Result<Self, Self::Error> {
        if id.is_relative() {
            if id.type_id != 0 {
                return Err(TypesError::InvalidObjectId(id.to_string()));
            }
            return Ok(FullId { id, _tag: PhantomData });
        }
        Ok(Id::<T>::try_from(id)?.into())
    }
}

impl<T: ObjectTypeTag> fmt::Display for FullId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.id.fmt(f)
    }
}

impl<T: ObjectTypeTag> FromStr for FullId<T> {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ObjectId>()?.try_into()
    }
}

impl<T: ObjectTypeTag> Encode for FullId<T> {
    fn encode(&self, writer: &mut WireWriter) {
        self.id.encode(writer);
    }
}

impl<T: ObjectTypeTag> Decode for FullId<T> {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, TypesError> {
        ObjectId::decode(reader)?.try_into()
    }
}

impl<T: ObjectTypeTag> JsonField for FullId<T> {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_json(value: &Value) -> Result<Self, TypesError> {
        json_str(value, "object id string")?.parse()
    }
}
