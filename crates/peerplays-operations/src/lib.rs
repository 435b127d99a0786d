/// PeerPlays SDK - Operation registry and typed operation records.
///
/// [`OperationKind`] is the total id/name table of every operation the chain
/// knows. [`Operation`] is the closed union of the kinds this SDK can build,
/// each backed by a record in [`ops`] whose field list fixes both its wire
/// layout and its JSON shape.

#[macro_use]
pub mod record;

pub mod authority;
pub mod kind;
pub mod operation;
pub mod ops;

mod error;
pub use error::OperationError;

pub use authority::{AuthorityLevel, RelativeReference, RequiredAuthority, WITNESS_ACCOUNT};
pub use kind::OperationKind;
pub use operation::Operation;
pub use ops::*;
pub use record::OperationRecord;

#[cfg(test)]
mod tests;
