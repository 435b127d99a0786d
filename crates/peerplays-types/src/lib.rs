/// PeerPlays SDK - Binary codec and typed chain values.
///
/// Every value that can appear inside an operation implements [`Encode`] and
/// [`Decode`] for the node's canonical wire format and [`JsonField`] for the
/// loosely-typed JSON form used by RPC. Producers of ordered maps (authority
/// entries, localized names, votes, [`FlatSet`] and [`FlatMap`]) sort on
/// construction; the codec itself writes entries exactly as held.

#[macro_use]
mod macros;

pub mod codec;
pub mod json;
pub mod object_id;
pub mod asset;
pub mod time;
pub mod extensions;
pub mod flat;
pub mod locale;
pub mod permission;
pub mod vote;
pub mod account;
pub mod memo;
pub mod enums;
pub mod variant;

mod error;
pub use error::TypesError;

pub use account::AccountOptions;
pub use asset::AssetAmount;
pub use codec::{from_bytes, Bytes, Decode, Encode};
pub use enums::{
    BetType, BettingMarketGroupStatus, BettingMarketResolution, EventStatus,
    ResolutionConstraint, RpsGesture,
};
pub use extensions::Extensions;
pub use flat::{FlatMap, FlatSet};
pub use json::JsonField;
pub use locale::LocalizedString;
pub use memo::Memo;
pub use object_id::{tag, FullId, Id, ObjectId, ObjectType, ObjectTypeTag};
pub use permission::Permission;
pub use time::PointInTime;
pub use variant::GameSpecificMove;
pub use vote::VoteId;

#[doc(hidden)]
pub mod __private {
    pub use peerplays_primitives::util::{WireReader, WireWriter};
    pub use serde_json::{Map, Value};
}
